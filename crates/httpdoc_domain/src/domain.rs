use tracing::debug;

use httpdoc_base::error::ErrorKind;
use httpdoc_base::{HttpdocResult, err};

use crate::extractor::RouteDef;
use crate::index::RoutingTable;
use crate::method::Method;
use crate::registry::{DocName, RegisteredRoute, RegistryHandle};
use crate::roles::{method_info, status_code_info};
use crate::signature::{SignatureToken, full_name, parse_signature};

/* # Why one HttpDomain object?

The domain bundles everything the host needs for the `http` markup
vocabulary: the per-build route registry, the directive back-end, role
dispatch, cross-reference resolution, and the routing-table index. The host
creates one per build and drives it inline during document processing.
*/

/// The rendered signature of a route directive: display tokens, the full
/// `METHOD PATH` name, and the anchor assigned to the route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureNode {
    pub tokens: Vec<SignatureToken>,
    pub full_name: String,
    pub anchor: String,
}

/// A resolved cross-reference: link title, target document, and anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossRef {
    pub title: String,
    pub doc: DocName,
    pub anchor: String,
}

/// Output of an inline role.
///
/// Role errors are local and non-fatal: they surface as a `Problem` marker in
/// place of the intended reference, and the build continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleOutput {
    /// A rendered reference node: display label plus target URL
    /// (empty when no reference URL exists).
    Reference { label: String, url: String },
    /// A problem marker carrying the error message for the offending span.
    Problem { message: String },
}

/// One entry of the host-facing object list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectEntry {
    pub path: String,
    pub method: Method,
    pub doc: DocName,
    pub anchor: String,
}

/// The HTTP documentation domain.
#[derive(Debug, Clone, Default)]
pub struct HttpDomain {
    registry: RegistryHandle,
}

impl HttpDomain {
    /// Machine name of the domain.
    pub const NAME: &'static str = "http";
    /// Display label of the domain.
    pub const LABEL: &'static str = "HTTP";

    /// Create a domain with an empty registry, as at the start of a build.
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared registry handle, e.g. for persisting build state.
    pub fn registry(&self) -> RegistryHandle {
        self.registry.clone()
    }

    /// Directive back-end: register the route defined in `doc` and return its
    /// rendered signature.
    pub fn add_route(&self, doc: &DocName, def: &RouteDef) -> HttpdocResult<SignatureNode> {
        let anchor =
            self.registry
                .register(def.method, &def.path, doc.clone(), def.synopsis.clone())?;

        Ok(SignatureNode {
            tokens: parse_signature(&def.path),
            full_name: full_name(def.method, &def.path),
            anchor,
        })
    }

    /// Evict every route defined by `doc`, ahead of re-reading it on an
    /// incremental rebuild.
    pub fn evict_document(&self, doc: &DocName) {
        debug!(doc = %doc, "evicting document routes");
        self.registry.evict_document(doc);
    }

    /// Resolve a method cross-reference by exact path match.
    ///
    /// Without an explicit title the link reads `METHOD target`, matching the
    /// route's full name.
    pub fn resolve_xref(
        &self,
        method: Method,
        target: &str,
        explicit_title: Option<&str>,
    ) -> Option<CrossRef> {
        let route = self.registry.lookup(method, target)?;
        let title = match explicit_title {
            Some(title) => title.to_string(),
            None => full_name(method, target),
        };
        Some(CrossRef {
            title,
            doc: route.doc,
            anchor: crate::registry::resource_anchor(method, target),
        })
    }

    /// Dispatch an inline role by name.
    ///
    /// `statuscode` and `method` resolve against the fixed tables; the seven
    /// method names act as cross-reference roles against the registry. Role
    /// input errors and unresolved references come back as
    /// [`RoleOutput::Problem`]; only an unknown role name is a hard error.
    pub fn role(&self, name: &str, text: &str) -> HttpdocResult<RoleOutput> {
        match name {
            "statuscode" => Ok(match status_code_info(text) {
                Ok(status) => RoleOutput::Reference {
                    label: format!("{} {}", status.code, status.label),
                    url: status.url,
                },
                Err(error) => problem(error.kind(), error.to_string())?,
            }),
            "method" => Ok(match method_info(text) {
                Ok(method) => RoleOutput::Reference {
                    label: method.method.as_str().to_string(),
                    url: method.url,
                },
                Err(error) => problem(error.kind(), error.to_string())?,
            }),
            _ => match Method::parse(name) {
                Some(method) if method.is_directive_method() => {
                    Ok(match self.resolve_xref(method, text, None) {
                        Some(xref) => RoleOutput::Reference {
                            label: xref.title,
                            url: format!("{}#{}", xref.doc, xref.anchor),
                        },
                        None => RoleOutput::Problem {
                            message: format!(
                                "unresolved reference: {} {}",
                                method.as_str(),
                                text
                            ),
                        },
                    })
                }
                _ => Err(err!("unknown role '{}' in the {} domain", name, Self::NAME)),
            },
        }
    }

    /// Flat list of all registered routes, for host search indices.
    pub fn objects(&self) -> Vec<ObjectEntry> {
        self.registry
            .enumerate()
            .into_iter()
            .map(|route| ObjectEntry {
                path: route.path,
                method: route.method,
                doc: route.doc,
                anchor: route.anchor,
            })
            .collect()
    }

    /// Snapshot of all registered routes, index-builder input.
    pub fn routes(&self) -> Vec<RegisteredRoute> {
        self.registry.enumerate()
    }

    /// Build the "HTTP Routing Table" index from the current registry.
    pub fn routing_table(&self) -> RoutingTable {
        RoutingTable::from_routes(&self.registry.enumerate())
    }
}

/// Role input errors become problem markers; anything else propagates.
fn problem(kind: &ErrorKind, message: String) -> HttpdocResult<RoleOutput> {
    match kind {
        ErrorKind::InvalidStatusCode { .. } | ErrorKind::UnknownMethod { .. } => {
            Ok(RoleOutput::Problem { message })
        }
        _ => Err(err!("{}", message)),
    }
}
