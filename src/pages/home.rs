//! Landing page: content comes through the query cache, sections animate in
//! through the reveal controller.

use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use crate::query::{FetchError, QueryClient, QueryOptions, QueryState, use_query};
use crate::sections::{FeatureTeaser, Hero, LoadingSpinner, Masthead, STORY_BLOCKS, StoryBlock};

/// Marketing copy for the landing page, shaped like a remote payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HomeData {
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub hero_image_url: String,
    pub key_feature: String,
}

/// Mock content endpoint. Swap for a real HTTP call without touching the
/// cache layer. `None` models a successful response with nothing in it.
async fn fetch_home_content() -> Result<Option<HomeData>, FetchError> {
    Ok(Some(HomeData {
        name: "Anscer Robotics".to_string(),
        tagline: "Empowering Warehouses with Intelligent Automation".to_string(),
        description: "Anscer Robotics delivers state-of-the-art warehouse automation \
                      solutions, including Pallet Lifter Robots (PLR), Articulated \
                      Robots (AR), and Automated Guided Vehicles (AGVs), designed to \
                      optimize logistics, boost efficiency, and enhance safety in \
                      modern warehouses."
            .to_string(),
        hero_image_url: "https://images.pexels.com/photos/9242858/pexels-photo-9242858.jpeg?auto=compress&cs=tinysrgb&w=600"
            .to_string(),
        key_feature: "Seamless integration with 30% faster order fulfillment".to_string(),
    }))
}

#[component]
pub fn HomePage(client: QueryClient) -> impl IntoView {
    let content = use_query(&client, "home-content", QueryOptions::default(), fetch_home_content);

    move || match content.get() {
        QueryState::Loading => view! { <LoadingSpinner/> }.into_any(),
        QueryState::Failed(err) => view! {
            <div class="status-screen">
                <p class="status-error">{format!("Error: {err}")}</p>
            </div>
        }
        .into_any(),
        QueryState::Ready(None) => view! {
            <div class="status-screen">
                <p class="status-empty">"No data available"</p>
            </div>
        }
        .into_any(),
        QueryState::Ready(Some(data)) => view! { <LandingContent data=data/> }.into_any(),
    }
}

#[component]
fn LandingContent(data: HomeData) -> impl IntoView {
    view! {
        <div class="landing">
            <Masthead name=data.name.clone() tagline=data.tagline/>
            <Hero name=data.name description=data.description image_url=data.hero_image_url/>
            <FeatureTeaser key_feature=data.key_feature/>
            {STORY_BLOCKS
                .iter()
                .map(|block| view! { <StoryBlock block=block/> })
                .collect_view()}
        </div>
    }
}
