// Landing page sections

mod feature_teaser;
mod hero;
mod masthead;
mod spinner;
mod story;

pub use feature_teaser::FeatureTeaser;
pub use hero::Hero;
pub use masthead::Masthead;
pub use spinner::LoadingSpinner;
pub use story::{STORY_BLOCKS, StoryBlock};
