use leptos::prelude::*;

use crate::history::Link;
use crate::reveal::{Reveal, RevealVariant};

#[component]
pub fn FeatureTeaser(#[prop(into)] key_feature: String) -> impl IntoView {
    view! {
        <section class="feature-teaser">
            <div class="container">
                <Reveal variant=RevealVariant::Heading>
                    <h3 class="section-title">"Why Choose Anscer Robotics?"</h3>
                </Reveal>
                <Reveal variant=RevealVariant::Copy>
                    <p class="section-description">{key_feature}</p>
                </Reveal>
                <Link to="/Dashboard" class="btn btn-primary">"Explore All Features"</Link>
            </div>
        </section>
    }
}
