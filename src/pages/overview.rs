use leptos::prelude::*;

#[component]
pub fn RobotOverviewPage() -> impl IntoView {
    view! { <div class="page-title">"Robot fleet overview"</div> }
}
