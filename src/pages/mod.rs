// Site pages, one file per route leaf

mod battery;
mod configure;
mod dashboard;
mod home;
mod not_found;
mod overview;
mod robot;
mod station;

pub use battery::BatteryPage;
pub use configure::ConfigurePage;
pub use dashboard::DashboardHomePage;
pub use home::HomePage;
pub use not_found::NotFoundPage;
pub use overview::RobotOverviewPage;
pub use robot::RobotPage;
pub use station::StationPage;
