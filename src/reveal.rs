//! One-shot reveal animations driven by viewport visibility.
//!
//! [`RevealGate`] is the pure state machine: it opens once when the visible
//! fraction of an element first reaches the threshold, and never closes.
//! The DOM side feeds it from an `IntersectionObserver` and flips a class
//! on a wrapper element. Users who ask for reduced motion get the final
//! presentation immediately; the gate itself still runs unchanged.

use leptos::html::Div;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

/// Fraction of an element that must be visible before it reveals.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Monotonic visibility trigger.
#[derive(Clone, Copy, Debug)]
pub struct RevealGate {
    threshold: f64,
    triggered: bool,
}

impl RevealGate {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            triggered: false,
        }
    }

    /// Feed one visibility sample. Returns true only on the edge where the
    /// gate first opens.
    pub fn observe(&mut self, visible_fraction: f64) -> bool {
        if self.triggered || visible_fraction < self.threshold {
            return false;
        }
        self.triggered = true;
        true
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }
}

/// True when the platform reports `prefers-reduced-motion: reduce`.
pub fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
        .is_some_and(|mq| mq.matches())
}

/// Subscribe an element to the platform visibility boundary. The observer
/// disconnects itself after the first trigger.
fn observe_once(el: &web_sys::Element, threshold: f64, on_trigger: impl Fn() + 'static) {
    let mut gate = RevealGate::new(threshold);
    let callback = Closure::<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: web_sys::IntersectionObserver| {
            if gate.is_triggered() {
                return;
            }
            for entry in entries.iter() {
                let entry: web_sys::IntersectionObserverEntry = entry.unchecked_into();
                // is_intersecting already reflects the configured threshold;
                // intersection_ratio can land a hair under it from rounding.
                let fraction = if entry.is_intersecting() {
                    threshold.max(entry.intersection_ratio())
                } else {
                    entry.intersection_ratio()
                };
                if gate.observe(fraction) {
                    on_trigger();
                    observer.disconnect();
                }
            }
        },
    );

    let init = web_sys::IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    match web_sys::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
    {
        Ok(observer) => {
            observer.observe(el);
            // Keep the callback alive for the life of the page.
            callback.forget();
        }
        Err(err) => leptos::logging::warn!("IntersectionObserver unavailable: {err:?}"),
    }
}

/// Observe a node and report the one-shot reveal state as a signal.
pub fn use_reveal(threshold: f64) -> (NodeRef<Div>, ReadSignal<bool>) {
    let node_ref = NodeRef::new();
    let (revealed, set_revealed) = signal(false);

    Effect::new(move |attached: Option<bool>| {
        if attached.unwrap_or(false) {
            return true;
        }
        let Some(el): Option<web_sys::HtmlDivElement> = node_ref.get() else {
            return false;
        };
        observe_once(el.as_ref(), threshold, move || set_revealed.set(true));
        true
    });

    (node_ref, revealed)
}

/// How an element enters the page once revealed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RevealVariant {
    #[default]
    Heading,
    Copy,
    Media,
}

impl RevealVariant {
    fn class(self) -> &'static str {
        match self {
            RevealVariant::Heading => "reveal-heading",
            RevealVariant::Copy => "reveal-copy",
            RevealVariant::Media => "reveal-media",
        }
    }
}

/// Classes for the wrapper element. Reduced motion renders the final
/// state immediately and suppresses the transition; the gate state is
/// still reported as-is.
fn reveal_classes(variant: RevealVariant, reduce_motion: bool, revealed: bool, extra: &str) -> String {
    let mut classes = vec!["reveal", variant.class()];
    if reduce_motion {
        classes.push("no-motion");
    }
    if reduce_motion || revealed {
        classes.push("is-revealed");
    }
    if !extra.is_empty() {
        classes.push(extra);
    }
    classes.join(" ")
}

/// Wrapper that reveals its children the first time it scrolls into view.
#[component]
pub fn Reveal(
    #[prop(optional)] variant: RevealVariant,
    #[prop(optional, into)] class: String,
    #[prop(default = DEFAULT_THRESHOLD)] threshold: f64,
    children: Children,
) -> impl IntoView {
    let (node_ref, revealed) = use_reveal(threshold);
    let reduce_motion = prefers_reduced_motion();

    let class_attr = move || reveal_classes(variant, reduce_motion, revealed.get(), &class);

    view! {
        <div node_ref=node_ref class=class_attr>
            {children()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::{RevealGate, RevealVariant, reveal_classes};

    #[test]
    fn triggers_once_at_threshold() {
        let mut gate = RevealGate::new(0.3);
        assert!(!gate.observe(0.1));
        assert!(!gate.is_triggered());
        assert!(gate.observe(0.3));
        assert!(gate.is_triggered());
        // Later samples never re-fire, even well above threshold.
        assert!(!gate.observe(0.9));
    }

    #[test]
    fn stays_triggered_when_visibility_drops() {
        let mut gate = RevealGate::new(0.5);
        assert!(gate.observe(0.8));
        assert!(!gate.observe(0.0));
        assert!(gate.is_triggered());
    }

    #[test]
    fn below_threshold_samples_never_trigger() {
        let mut gate = RevealGate::new(0.5);
        assert!(!gate.observe(0.49));
        assert!(!gate.observe(0.0));
        assert!(!gate.is_triggered());
    }

    #[test]
    fn zero_threshold_triggers_on_the_first_sample() {
        let mut gate = RevealGate::new(0.0);
        assert!(gate.observe(0.0));
    }

    #[test]
    fn hidden_element_starts_unrevealed() {
        assert_eq!(
            reveal_classes(RevealVariant::Copy, false, false, ""),
            "reveal reveal-copy"
        );
        assert_eq!(
            reveal_classes(RevealVariant::Copy, false, true, ""),
            "reveal reveal-copy is-revealed"
        );
    }

    #[test]
    fn reduced_motion_renders_the_final_state_immediately() {
        // Even before the gate opens, the element is shown in place.
        assert_eq!(
            reveal_classes(RevealVariant::Heading, true, false, "intro"),
            "reveal reveal-heading no-motion is-revealed intro"
        );
    }
}
