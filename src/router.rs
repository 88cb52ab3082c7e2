//! Static route tree: path normalization, longest-prefix resolution and
//! layout composition.
//!
//! The tree is built once at startup and never mutated. Resolution is pure
//! and synchronous; everything that touches the browser lives in
//! [`crate::history`]. Nodes are generic over their layout and page handle
//! types so the matching and composition logic tests with plain strings.

use thiserror::Error;

/// Normalized, case-sensitive sequence of URL path segments.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RoutePath(Vec<String>);

impl RoutePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Parse from a raw URL path. Empty segments collapse, so `/a//b/`
    /// normalizes to `/a/b`.
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Segment-wise prefix test: `/Dashboard/user` is a prefix of
    /// `/Dashboard/user/5` but not of `/Dashboard/username`.
    pub fn starts_with(&self, prefix: &RoutePath) -> bool {
        self.0.len() >= prefix.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }
}

impl std::fmt::Display for RoutePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.0 {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// No registered route matches the requested path.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("no route matches {path}")]
pub struct NotFoundError {
    pub path: String,
}

/// One node of the route tree: a full path plus optional layout chrome, an
/// optional terminal page and nested children. Child insertion order is
/// menu order and breaks prefix-length ties during resolution.
#[derive(Debug)]
pub struct RouteNode<L, P> {
    pub path: RoutePath,
    pub layout: Option<L>,
    pub page: Option<P>,
    pub children: Vec<RouteNode<L, P>>,
}

impl<L, P> RouteNode<L, P> {
    pub fn new(path: &str) -> Self {
        Self {
            path: RoutePath::parse(path),
            layout: None,
            page: None,
            children: Vec::new(),
        }
    }

    pub fn with_layout(mut self, layout: L) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn with_page(mut self, page: P) -> Self {
        self.page = Some(page);
        self
    }

    pub fn child(mut self, node: RouteNode<L, P>) -> Self {
        self.children.push(node);
        self
    }
}

/// Immutable route tree rooted at `/`.
pub struct RouteTree<L, P> {
    root: RouteNode<L, P>,
}

impl<L, P> RouteTree<L, P> {
    pub fn new(root: RouteNode<L, P>) -> Self {
        debug_assert!(root.path.is_root(), "route tree root must sit at /");
        debug_assert!(
            Self::well_formed(&root),
            "child paths must extend their parent and be unique"
        );
        Self { root }
    }

    fn well_formed(node: &RouteNode<L, P>) -> bool {
        let mut seen = std::collections::HashSet::new();
        node.children.iter().all(|child| {
            child.path.starts_with(&node.path)
                && child.path.segments().len() > node.path.segments().len()
                && seen.insert(child.path.clone())
                && Self::well_formed(child)
        })
    }

    /// Resolve a path to the chain of nodes from the root to the most
    /// specific match. Longest prefix wins; first-registered child wins a
    /// tie. A non-root path that matches nothing below the root is an
    /// error.
    pub fn resolve(&self, path: &RoutePath) -> Result<Vec<&RouteNode<L, P>>, NotFoundError> {
        let mut chain = vec![&self.root];
        let mut here = &self.root;
        loop {
            let mut next: Option<&RouteNode<L, P>> = None;
            for child in &here.children {
                if path.starts_with(&child.path)
                    && next.is_none_or(|n| child.path.segments().len() > n.path.segments().len())
                {
                    next = Some(child);
                }
            }
            match next {
                Some(node) => {
                    chain.push(node);
                    here = node;
                }
                None => break,
            }
        }
        if chain.len() == 1 && !path.is_root() {
            return Err(NotFoundError {
                path: path.to_string(),
            });
        }
        Ok(chain)
    }
}

/// Compose a resolved chain outer-to-inner: the innermost node's page (or
/// `fallback` when it has none) fills the deepest slot, and each layout on
/// the chain wraps the result from the inside out.
pub fn compose<L, P, V>(chain: &[&RouteNode<L, P>], fallback: impl FnOnce() -> V) -> V
where
    L: Fn(V) -> V,
    P: Fn() -> V,
{
    let mut view = match chain.last().and_then(|node| node.page.as_ref()) {
        Some(page) => page(),
        None => fallback(),
    };
    for node in chain.iter().rev() {
        if let Some(layout) = &node.layout {
            view = layout(view);
        }
    }
    view
}

/// A menu link and its active-match rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub target: RoutePath,
    pub label: String,
    pub exact: bool,
}

/// Exact links match only their own path; prefix links also match any
/// descendant path. Recomputed per render, never cached across
/// navigations.
pub fn is_active(current: &RoutePath, target: &RoutePath, exact: bool) -> bool {
    if exact {
        current == target
    } else {
        current.starts_with(target)
    }
}
