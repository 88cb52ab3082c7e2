use leptos::prelude::*;

#[component]
pub fn RobotPage() -> impl IntoView {
    view! { <div class="page-title">"Robot Management View"</div> }
}
