pub mod config;
pub mod domain;
pub mod extractor;
pub mod index;
pub mod method;
pub mod registry;
pub mod roles;
pub mod scanner;
pub mod signature;

pub use config::{Config, DirectoryConfig, load_config};
pub use domain::{CrossRef, HttpDomain, ObjectEntry, RoleOutput, SignatureNode};
pub use extractor::{ExtractionError, ExtractionResult, RouteDef, extract_routes};
pub use index::{RoutingEntry, RoutingGroup, RoutingTable};
pub use method::Method;
pub use registry::{DocName, RegisteredRoute, RegistryHandle, Route, RouteRegistry, resource_anchor};
pub use roles::{MethodRef, StatusRef, method_info, status_code_info};
pub use scanner::{ScanError, ScanResult, scan_files};
pub use signature::{SignatureToken, full_name, parse_signature};
