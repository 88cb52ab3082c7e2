use leptos::prelude::*;

use crate::reveal::{Reveal, RevealVariant};

#[component]
pub fn Masthead(#[prop(into)] name: String, #[prop(into)] tagline: String) -> impl IntoView {
    view! {
        <header class="masthead">
            <div class="container">
                <Reveal variant=RevealVariant::Heading>
                    <h1 class="masthead-title">{name}</h1>
                </Reveal>
                <Reveal variant=RevealVariant::Copy>
                    <p class="masthead-tagline">{tagline}</p>
                </Reveal>
            </div>
        </header>
    }
}
