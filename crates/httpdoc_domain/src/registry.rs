use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use httpdoc_base::{HttpdocResult, err};

use crate::method::Method;

/* # Why a per-method BTreeMap instead of one flat map?

The method set is fixed at construction, so the registry seeds one path map
per directive method and never adds or removes methods afterwards. BTreeMaps
keep enumeration deterministic (fixed method order, lexicographic paths),
which the routing-table index and the host's object list both rely on.
*/

/// Identifier of the document a route was defined in.
///
/// Opaque to the registry; the host decides what a document name means
/// (typically a source file path without extension).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocName(String);

impl DocName {
    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DocName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DocName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for DocName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered route: the defining document plus an optional synopsis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub doc: DocName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
}

/// Deterministic anchor identifier for a route, used for in-page linking.
///
/// The path characters `<`, `>`, `:` and `/` are replaced by `-` and the
/// lowercased method is prefixed: `GET /users/(int:id)` yields
/// `get--users-(int-id)`.
pub fn resource_anchor(method: Method, path: &str) -> String {
    let sanitized: String = path
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '/' => '-',
            other => other,
        })
        .collect();
    format!("{}-{}", method.lower(), sanitized)
}

/// One enumerated route, flattened for index generation and object lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredRoute {
    pub method: Method,
    pub path: String,
    pub doc: DocName,
    pub anchor: String,
    pub synopsis: Option<String>,
}

/// Per-build store of all registered routes, keyed by method then path.
///
/// Owned by the build state: discarded and rebuilt on full rebuilds, pruned
/// per document via [`RouteRegistry::evict_document`] on incremental rebuilds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRegistry {
    routes: BTreeMap<Method, BTreeMap<String, Route>>,
}

impl RouteRegistry {
    /// Create a registry with one empty path map per directive method.
    pub fn new() -> Self {
        let routes = Method::DIRECTIVE_METHODS
            .iter()
            .map(|method| (*method, BTreeMap::new()))
            .collect();
        Self { routes }
    }

    /// Insert or overwrite the route for `(method, path)` and return its anchor.
    ///
    /// Duplicate registration is last-write-wins; the overwrite is logged but
    /// never an error. Registering under a method without a registry slot
    /// (CONNECT) is rejected.
    pub fn register(
        &mut self,
        method: Method,
        path: &str,
        doc: DocName,
        synopsis: Option<String>,
    ) -> HttpdocResult<String> {
        let paths = self
            .routes
            .get_mut(&method)
            .ok_or_else(|| err!("{} routes cannot be registered", method))?;

        let route = Route { doc, synopsis };
        if let Some(previous) = paths.insert(path.to_string(), route) {
            warn!(
                method = %method,
                path,
                previous_doc = %previous.doc,
                "route redefined, earlier definition replaced"
            );
        } else {
            debug!(method = %method, path, "route registered");
        }

        Ok(resource_anchor(method, path))
    }

    /// Exact-match lookup; no pattern or wildcard matching.
    pub fn lookup(&self, method: Method, path: &str) -> Option<&Route> {
        self.routes.get(&method)?.get(path)
    }

    /// Remove every route whose defining document equals `doc`.
    ///
    /// Called by the host when a document is invalidated on an incremental
    /// rebuild; all other routes are left unchanged.
    pub fn evict_document(&mut self, doc: &DocName) {
        for paths in self.routes.values_mut() {
            paths.retain(|_, route| &route.doc != doc);
        }
    }

    /// Iterate over all routes in fixed method order, paths lexicographic.
    pub fn enumerate(&self) -> impl Iterator<Item = RegisteredRoute> + '_ {
        self.routes.iter().flat_map(|(method, paths)| {
            paths.iter().map(|(path, route)| RegisteredRoute {
                method: *method,
                path: path.clone(),
                doc: route.doc.clone(),
                anchor: resource_anchor(*method, path),
                synopsis: route.synopsis.clone(),
            })
        })
    }

    /// Total number of registered routes across all methods.
    pub fn len(&self) -> usize {
        self.routes.values().map(BTreeMap::len).sum()
    }

    /// Returns true if no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RouteRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A shared handle to a route registry.
///
/// Provides cheap cloning (via Arc) and interior mutability (via RwLock) so
/// the directive handlers, cross-reference resolution, and index generation
/// can all reach the same per-build registry.
#[derive(Debug, Clone, Default)]
pub struct RegistryHandle(Arc<RwLock<RouteRegistry>>);

impl RegistryHandle {
    /// Create a handle around a fresh registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// See [`RouteRegistry::register`].
    pub fn register(
        &self,
        method: Method,
        path: &str,
        doc: DocName,
        synopsis: Option<String>,
    ) -> HttpdocResult<String> {
        self.0.write().register(method, path, doc, synopsis)
    }

    /// See [`RouteRegistry::lookup`]; returns a clone of the route.
    pub fn lookup(&self, method: Method, path: &str) -> Option<Route> {
        self.0.read().lookup(method, path).cloned()
    }

    /// See [`RouteRegistry::evict_document`].
    pub fn evict_document(&self, doc: &DocName) {
        self.0.write().evict_document(doc)
    }

    /// See [`RouteRegistry::enumerate`]; returns an owned snapshot.
    pub fn enumerate(&self) -> Vec<RegisteredRoute> {
        self.0.read().enumerate().collect()
    }

    /// See [`RouteRegistry::len`].
    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    /// See [`RouteRegistry::is_empty`].
    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_then_lookup_round_trip() {
        let mut registry = RouteRegistry::new();
        registry
            .register(
                Method::Get,
                "/users/(int:id)",
                DocName::from("api/users"),
                Some("Fetch a single user".to_string()),
            )
            .unwrap();

        let route = registry.lookup(Method::Get, "/users/(int:id)").unwrap();
        assert_eq!(route.doc, DocName::from("api/users"));
        assert_eq!(route.synopsis.as_deref(), Some("Fetch a single user"));
    }

    #[test]
    fn test_lookup_is_exact_match_only() {
        let mut registry = RouteRegistry::new();
        registry
            .register(Method::Get, "/users", DocName::from("api"), None)
            .unwrap();

        assert!(registry.lookup(Method::Get, "/users/").is_none());
        assert!(registry.lookup(Method::Post, "/users").is_none());
    }

    #[test]
    fn test_duplicate_registration_is_last_write_wins() {
        let mut registry = RouteRegistry::new();
        registry
            .register(Method::Get, "/users", DocName::from("first"), None)
            .unwrap();
        registry
            .register(Method::Get, "/users", DocName::from("second"), None)
            .unwrap();

        assert_eq!(registry.len(), 1);
        let route = registry.lookup(Method::Get, "/users").unwrap();
        assert_eq!(route.doc, DocName::from("second"));
    }

    #[test]
    fn test_register_connect_is_rejected() {
        let mut registry = RouteRegistry::new();
        let result = registry.register(Method::Connect, "/tunnel", DocName::from("api"), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_evict_document_removes_exactly_that_document() {
        let mut registry = RouteRegistry::new();
        registry
            .register(Method::Get, "/users", DocName::from("users_doc"), None)
            .unwrap();
        registry
            .register(Method::Post, "/users", DocName::from("users_doc"), None)
            .unwrap();
        registry
            .register(Method::Get, "/items", DocName::from("items_doc"), None)
            .unwrap();

        registry.evict_document(&DocName::from("users_doc"));

        assert!(registry.lookup(Method::Get, "/users").is_none());
        assert!(registry.lookup(Method::Post, "/users").is_none());
        assert!(registry.lookup(Method::Get, "/items").is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_resource_anchor_substitution() {
        assert_eq!(
            resource_anchor(Method::Get, "/users/(int:id)"),
            "get--users-(int-id)"
        );
        assert_eq!(resource_anchor(Method::Delete, "/a/<b>/c"), "delete--a--b--c");
    }

    #[test]
    fn test_anchors_distinct_across_registered_routes() {
        let mut registry = RouteRegistry::new();
        let paths = ["/users", "/users/(int:id)", "/items", "/"];
        for method in [Method::Get, Method::Post] {
            for path in paths {
                registry
                    .register(method, path, DocName::from("api"), None)
                    .unwrap();
            }
        }

        let anchors: Vec<String> = registry.enumerate().map(|r| r.anchor).collect();
        let mut deduped = anchors.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(anchors.len(), deduped.len());
    }

    #[test]
    fn test_enumerate_order_is_deterministic() {
        let mut registry = RouteRegistry::new();
        registry
            .register(Method::Get, "/b", DocName::from("d"), None)
            .unwrap();
        registry
            .register(Method::Get, "/a", DocName::from("d"), None)
            .unwrap();
        registry
            .register(Method::Options, "/z", DocName::from("d"), None)
            .unwrap();

        let listed: Vec<(Method, String)> = registry
            .enumerate()
            .map(|r| (r.method, r.path))
            .collect();
        assert_eq!(
            listed,
            vec![
                (Method::Options, "/z".to_string()),
                (Method::Get, "/a".to_string()),
                (Method::Get, "/b".to_string()),
            ]
        );
    }

    #[test]
    fn test_handle_shares_one_registry() {
        let handle = RegistryHandle::new();
        let clone = handle.clone();

        handle
            .register(Method::Get, "/users", DocName::from("api"), None)
            .unwrap();

        assert_eq!(clone.len(), 1);
        assert!(clone.lookup(Method::Get, "/users").is_some());

        clone.evict_document(&DocName::from("api"));
        assert!(handle.is_empty());
    }
}
