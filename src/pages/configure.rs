use leptos::prelude::*;

#[component]
pub fn ConfigurePage() -> impl IntoView {
    view! { <div class="page-title">"Configuration"</div> }
}
