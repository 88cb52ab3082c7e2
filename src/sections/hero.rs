use leptos::prelude::*;

use crate::history::Link;
use crate::reveal::{Reveal, RevealVariant};

#[component]
pub fn Hero(
    #[prop(into)] name: String,
    #[prop(into)] description: String,
    #[prop(into)] image_url: String,
) -> impl IntoView {
    let welcome = format!("Welcome to {name}");
    view! {
        <section class="hero">
            <div class="container hero-grid">
                <div class="hero-text">
                    <Reveal variant=RevealVariant::Heading>
                        <h2 class="hero-title">{welcome}</h2>
                    </Reveal>
                    <Reveal variant=RevealVariant::Copy>
                        <p class="hero-description">{description}</p>
                    </Reveal>
                    <Link to="/about" class="btn btn-primary">"Learn More"</Link>
                </div>
                <div class="hero-media">
                    <Reveal variant=RevealVariant::Media>
                        <img src=image_url alt=name class="hero-image"/>
                    </Reveal>
                </div>
            </div>
        </section>
    }
}
