//! Layout chrome: frames that wrap nested route content.
//!
//! Layouts are plain functions from a slot view to a wrapped view so the
//! shell composer can stack them over the resolved route chain.

use leptos::prelude::*;

use crate::history::Link;
use crate::router::{NavLink, RoutePath};

/// Minimal site frame used by the standalone robot overview route.
pub fn site_frame(content: AnyView) -> AnyView {
    view! {
        <div class="site-frame">
            <h1>"ANSCER Robotics"</h1>
            <hr/>
            {content}
        </div>
    }
    .into_any()
}

fn sidebar_links() -> Vec<NavLink> {
    [
        ("/Dashboard/Robot", "Robot", true),
        ("/Dashboard/user", "Users", false),
        ("/Dashboard/Station", "Station", false),
        ("/Dashboard/battery", "Battery", false),
    ]
    .into_iter()
    .map(|(target, label, exact)| NavLink {
        target: RoutePath::parse(target),
        label: label.to_string(),
        exact,
    })
    .collect()
}

/// Dashboard frame: header bar plus sidebar navigation; nested section
/// pages render into the main slot.
pub fn dashboard_frame(content: AnyView) -> AnyView {
    view! {
        <div class="dashboard">
            <header class="dashboard-header">
                <Link to="/Dashboard/Robot" class="dashboard-title">"Dashboard"</Link>
            </header>
            <div class="dashboard-body">
                <aside class="dashboard-sidebar">
                    <nav>
                        {sidebar_links()
                            .into_iter()
                            .map(|link| {
                                view! {
                                    <Link
                                        to=link.target.to_string()
                                        exact=link.exact
                                        class="sidebar-link"
                                        active_class="sidebar-link-active"
                                    >
                                        {link.label}
                                    </Link>
                                }
                            })
                            .collect_view()}
                    </nav>
                </aside>
                <main class="dashboard-content">{content}</main>
            </div>
        </div>
    }
    .into_any()
}
