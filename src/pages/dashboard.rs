use leptos::prelude::*;

#[component]
pub fn DashboardHomePage() -> impl IntoView {
    view! { <div class="page-note">"Select a section from the sidebar to continue."</div> }
}
