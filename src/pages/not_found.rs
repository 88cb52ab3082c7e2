use leptos::prelude::*;

use crate::history::Link;

/// Terminal fallback for paths outside the route tree.
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="status-screen">
            <h2>"Page not found"</h2>
            <p>"The address does not match any registered route."</p>
            <Link to="/" class="btn">"Back to home"</Link>
        </div>
    }
}
