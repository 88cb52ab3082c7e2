use leptos::prelude::*;

#[component]
pub fn StationPage() -> impl IntoView {
    view! { <div class="page-title">"Station Management View"</div> }
}
