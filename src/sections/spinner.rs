use leptos::prelude::*;

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="status-screen">
            <div class="spinner" aria-label="Loading"></div>
        </div>
    }
}
