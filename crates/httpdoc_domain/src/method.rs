use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use httpdoc_base::error::ErrorKind;
use httpdoc_base::{HttpdocError, HttpdocResult};

/* # Why a fixed enum instead of free-form method strings?

The method set is closed: seven methods carry directives and registry slots,
and CONNECT additionally exists for the `method` role. An enum makes the
fixed-at-initialization invariant a type-level fact and gives the registry a
cheap, ordered key.
*/

/// An HTTP/1.1 method.
///
/// The variant order matches the order routes are listed in, so it doubles as
/// the registry's method ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Options,
    Head,
    Post,
    Get,
    Put,
    Delete,
    Trace,
    Connect,
}

impl Method {
    /// The seven methods that carry directives and registry slots.
    /// CONNECT is recognized by the `method` role only.
    pub const DIRECTIVE_METHODS: [Method; 7] = [
        Method::Options,
        Method::Head,
        Method::Post,
        Method::Get,
        Method::Put,
        Method::Delete,
        Method::Trace,
    ];

    /// The uppercase method name, as displayed in signatures and labels.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Options => "OPTIONS",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Trace => "TRACE",
            Method::Connect => "CONNECT",
        }
    }

    /// The lowercase method name, as used in directive names and anchors.
    pub fn lower(self) -> &'static str {
        match self {
            Method::Options => "options",
            Method::Head => "head",
            Method::Post => "post",
            Method::Get => "get",
            Method::Put => "put",
            Method::Delete => "delete",
            Method::Trace => "trace",
            Method::Connect => "connect",
        }
    }

    /// Case-insensitive lookup over the fixed method set.
    pub fn parse(s: &str) -> Option<Method> {
        match s.to_ascii_lowercase().as_str() {
            "options" => Some(Method::Options),
            "head" => Some(Method::Head),
            "post" => Some(Method::Post),
            "get" => Some(Method::Get),
            "put" => Some(Method::Put),
            "delete" => Some(Method::Delete),
            "trace" => Some(Method::Trace),
            "connect" => Some(Method::Connect),
            _ => None,
        }
    }

    /// Whether this method has a directive and a registry slot.
    pub fn is_directive_method(self) -> bool {
        self != Method::Connect
    }

    /// RFC 2616 section number for this method, used by the `method` role.
    pub fn rfc_section(self) -> &'static str {
        match self {
            Method::Options => "9.2",
            Method::Get => "9.3",
            Method::Head => "9.4",
            Method::Post => "9.5",
            Method::Put => "9.6",
            Method::Delete => "9.7",
            Method::Trace => "9.8",
            Method::Connect => "9.9",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Method {
    type Err = Box<HttpdocError>;

    fn from_str(s: &str) -> HttpdocResult<Method> {
        Method::parse(s).ok_or_else(|| {
            Box::new(HttpdocError::new(ErrorKind::UnknownMethod {
                method: s.to_string(),
            }))
        })
    }
}
