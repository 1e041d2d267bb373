use httpdoc_base::error::ErrorKind;
use httpdoc_base::{HttpdocError, HttpdocResult};

use crate::method::Method;

/* # Why static match tables instead of a map?

The status-code and method tables are fixed by RFC 2616 (plus a handful of
extension codes) and never change at runtime. A match statement keeps them as
enumerated constants with no allocation or initialization order concerns.
*/

/// Reference produced by the `statuscode` role: the numeric code, a display
/// label, and a specification URL (empty when no reference exists).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRef {
    pub code: u16,
    pub label: String,
    pub url: String,
}

/// Reference produced by the `method` role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodRef {
    pub method: Method,
    pub url: String,
}

/// The known HTTP status codes and their standard reason phrases.
pub fn status_label(code: u16) -> Option<&'static str> {
    let label = match code {
        100 => "Continue",
        101 => "Switching Protocols",
        102 => "Processing",
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        203 => "Non Authoritative Information",
        204 => "No Content",
        205 => "Reset Content",
        206 => "Partial Content",
        207 => "Multi Status",
        226 => "IM Used", // see RFC 3229
        300 => "Multiple Choices",
        301 => "Moved Permanently",
        302 => "Found",
        303 => "See Other",
        304 => "Not Modified",
        305 => "Use Proxy",
        307 => "Temporary Redirect",
        400 => "Bad Request",
        401 => "Unauthorized",
        402 => "Payment Required", // unused
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        406 => "Not Acceptable",
        407 => "Proxy Authentication Required",
        408 => "Request Timeout",
        409 => "Conflict",
        410 => "Gone",
        411 => "Length Required",
        412 => "Precondition Failed",
        413 => "Request Entity Too Large",
        414 => "Request URI Too Long",
        415 => "Unsupported Media Type",
        416 => "Requested Range Not Satisfiable",
        417 => "Expectation Failed",
        418 => "I'm a teapot", // see RFC 2324
        422 => "Unprocessable Entity",
        423 => "Locked",
        424 => "Failed Dependency",
        426 => "Upgrade Required",
        449 => "Retry With", // proprietary MS extension
        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        505 => "HTTP Version Not Supported",
        507 => "Insufficient Storage",
        510 => "Not Extended",
        _ => return None,
    };
    Some(label)
}

/// Specification URL for a status code.
///
/// Three codes live outside RFC 2616 and get dedicated links; codes in the
/// table get a computed RFC 2616 section 10 fragment; anything else has no
/// reference.
fn status_url(code: u16) -> String {
    match code {
        226 => "http://www.ietf.org/rfc/rfc3229.txt".to_string(),
        418 => "http://www.ietf.org/rfc/rfc2324.txt".to_string(),
        449 => "http://msdn.microsoft.com/en-us/library/dd891478(v=prot.10).aspx".to_string(),
        _ if status_label(code).is_some() => format!(
            "http://www.w3.org/Protocols/rfc2616/rfc2616-sec10.html#sec10.{}.{}",
            code / 100,
            1 + code % 100
        ),
        _ => String::new(),
    }
}

/// Resolve a `statuscode` role input.
///
/// Accepts either a bare integer (`"404"`), whose label must come from the
/// fixed table, or `"<int> <label>"` (`"200 Great"`), where the label is
/// caller-supplied and no table lookup can fail. Bare non-integers and bare
/// integers outside the table are `InvalidStatusCode` errors.
pub fn status_code_info(text: &str) -> HttpdocResult<StatusRef> {
    let text = text.trim();
    let invalid = || {
        Box::new(HttpdocError::new(ErrorKind::InvalidStatusCode {
            input: text.to_string(),
        }))
    };

    let (code, label) = match text.split_once(char::is_whitespace) {
        None => {
            let code: u16 = text.parse().map_err(|_| invalid())?;
            let label = status_label(code).ok_or_else(invalid)?;
            (code, label.to_string())
        }
        Some((code_part, label_part)) => {
            let code: u16 = code_part.parse().map_err(|_| invalid())?;
            (code, label_part.trim().to_string())
        }
    };

    Ok(StatusRef {
        code,
        label,
        url: status_url(code),
    })
}

/// Resolve a `method` role input: any of the eight HTTP/1.1 methods,
/// case-insensitive, with its RFC 2616 section 9 link.
pub fn method_info(text: &str) -> HttpdocResult<MethodRef> {
    let method: Method = text.trim().parse()?;
    Ok(MethodRef {
        url: format!(
            "http://www.w3.org/Protocols/rfc2616/rfc2616-sec9.html#sec{}",
            method.rfc_section()
        ),
        method,
    })
}
