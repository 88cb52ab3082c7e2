//! Top-level shell: resolves the current path against the route tree and
//! stacks the matching layouts around the leaf page.

use std::sync::Arc;

use leptos::prelude::*;

use crate::history::provide_navigator;
use crate::layouts;
use crate::pages;
use crate::query::QueryClient;
use crate::router::{RouteNode, RouteTree, compose};

type LayoutFn = Box<dyn Fn(AnyView) -> AnyView + Send + Sync>;
type PageFn = Box<dyn Fn() -> AnyView + Send + Sync>;

fn page(view: fn() -> AnyView) -> PageFn {
    Box::new(view)
}

/// The site's route table. Paths are case-sensitive; sidebar links that
/// point below `/Dashboard` without a node of their own (like
/// `/Dashboard/user`) fall back to the dashboard frame and index page.
fn route_table(client: &QueryClient) -> RouteTree<LayoutFn, PageFn> {
    let home: PageFn = {
        let client = client.clone();
        Box::new(move || view! { <pages::HomePage client=client.clone()/> }.into_any())
    };
    RouteTree::new(
        RouteNode::new("/")
            .with_page(home)
            .child(
                RouteNode::new("/Robot")
                    .with_layout(Box::new(layouts::site_frame) as LayoutFn)
                    .with_page(page(|| view! { <pages::RobotOverviewPage/> }.into_any())),
            )
            .child(
                RouteNode::new("/Configure")
                    .with_page(page(|| view! { <pages::ConfigurePage/> }.into_any())),
            )
            .child(
                RouteNode::new("/Dashboard")
                    .with_layout(Box::new(layouts::dashboard_frame) as LayoutFn)
                    .with_page(page(|| view! { <pages::DashboardHomePage/> }.into_any()))
                    .child(
                        RouteNode::new("/Dashboard/Robot")
                            .with_page(page(|| view! { <pages::RobotPage/> }.into_any())),
                    )
                    .child(
                        RouteNode::new("/Dashboard/Station")
                            .with_page(page(|| view! { <pages::StationPage/> }.into_any())),
                    )
                    .child(
                        RouteNode::new("/Dashboard/battery")
                            .with_page(page(|| view! { <pages::BatteryPage/> }.into_any())),
                    ),
            ),
    )
}

fn not_found_view() -> AnyView {
    view! { <pages::NotFoundPage/> }.into_any()
}

#[component]
pub fn App(client: QueryClient) -> impl IntoView {
    let navigator = provide_navigator();
    let tree = Arc::new(route_table(&client));
    let current = navigator.current();

    move || {
        let path = current.get();
        match tree.resolve(&path) {
            Ok(chain) => compose(&chain, not_found_view),
            Err(err) => {
                // Resolution failures stop here and render the fallback.
                leptos::logging::warn!("{err}");
                not_found_view()
            }
        }
    }
}
