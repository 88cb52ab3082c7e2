// ANSCER Robotics site, Leptos 0.8 CSR build

mod app;
mod history;
mod layouts;
mod pages;
mod query;
mod reveal;
mod router;
mod sections;

use std::sync::Arc;

use leptos::prelude::*;

use app::App;
use query::QueryClient;

fn main() {
    console_error_panic_hook::set_once();

    // One cache for the whole process, handed down explicitly.
    let client = QueryClient::new(
        Arc::new(js_sys::Date::now),
        Arc::new(|fut| leptos::task::spawn_local(fut)),
    );

    leptos::mount::mount_to_body(move || view! { <App client=client/> });
}
