use leptos::prelude::*;

#[component]
pub fn BatteryPage() -> impl IntoView {
    view! { <div class="page-title">"Battery Management View"</div> }
}
