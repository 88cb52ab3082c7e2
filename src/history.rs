//! Browser navigation boundary: a current-path signal kept in sync with the
//! History API, plus the `<Link>` component used by layouts and pages.

use leptos::ev::MouseEvent;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

use crate::router::{RoutePath, is_active};

/// Handle on the platform URL mechanism. Copyable; all copies share the
/// same path signal.
#[derive(Clone, Copy)]
pub struct Navigator {
    path: ReadSignal<RoutePath>,
    set_path: WriteSignal<RoutePath>,
}

impl Navigator {
    /// The current path, updated on navigation and on `popstate`.
    pub fn current(&self) -> ReadSignal<RoutePath> {
        self.path
    }

    /// Push a new entry onto the history stack and update the signal.
    pub fn navigate(&self, to: &RoutePath) {
        if let Some(window) = web_sys::window() {
            if let Ok(history) = window.history() {
                let _ = history.push_state_with_url(&JsValue::NULL, "", Some(&to.to_string()));
            }
        }
        self.set_path.set(to.clone());
    }
}

/// Install a [`Navigator`] into context, seeded from `location.pathname`
/// and kept in sync with back/forward navigation.
pub fn provide_navigator() -> Navigator {
    let (path, set_path) = signal(location_path());
    let navigator = Navigator { path, set_path };
    provide_context(navigator);

    if let Some(window) = web_sys::window() {
        let on_pop = Closure::<dyn FnMut()>::new(move || set_path.set(location_path()));
        let _ = window.add_event_listener_with_callback("popstate", on_pop.as_ref().unchecked_ref());
        on_pop.forget();
    }
    navigator
}

fn location_path() -> RoutePath {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .map(|p| RoutePath::parse(&p))
        .unwrap_or_else(RoutePath::root)
}

/// In-app link. Intercepts the click, pushes history and lets the shell
/// re-render; `active_class` is applied per the exact/prefix rule of the
/// target, recomputed on every path change.
#[component]
pub fn Link(
    #[prop(into)] to: String,
    #[prop(optional)] exact: bool,
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] active_class: String,
    children: Children,
) -> impl IntoView {
    let navigator = expect_context::<Navigator>();
    let target = RoutePath::parse(&to);
    let current = navigator.current();

    let class_attr = {
        let target = target.clone();
        move || {
            let mut classes = class.clone();
            if !active_class.is_empty() && is_active(&current.get(), &target, exact) {
                if !classes.is_empty() {
                    classes.push(' ');
                }
                classes.push_str(&active_class);
            }
            classes
        }
    };

    let on_click = move |ev: MouseEvent| {
        ev.prevent_default();
        navigator.navigate(&target);
    };

    view! {
        <a href=to class=class_attr on:click=on_click>
            {children()}
        </a>
    }
}
