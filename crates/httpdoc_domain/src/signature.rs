use std::sync::OnceLock;

use regex::Regex;

use crate::method::Method;

/* # Why is signature parsing display-formatting, not validation?

Directive signatures are author-supplied path strings. The only structure we
recognize is the `(type:name)` / `(name)` placeholder form; everything else,
including unmatched parentheses, passes through as literal text. Any string is
a valid signature.
*/

/// One display token of a parsed route signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureToken {
    /// A literal path fragment, rendered as-is.
    Literal(String),
    /// A `(type:name)` or `(name)` placeholder.
    Param {
        name: String,
        type_annotation: Option<String>,
    },
}

/// Placeholder pattern: `(name)` or `(type:name)`, where the name is a word
/// and the type is anything up to the first `:` or `)`.
fn sig_param_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\((?:([^:)]+):)?(\w+)\)").expect("signature regex is valid"))
}

/// Parse a raw signature string into its display token sequence.
///
/// Literal segments and parameter placeholders alternate in source order.
/// Text that does not match the placeholder form stays literal, so malformed
/// parentheses degrade gracefully instead of failing.
///
/// # Examples
///
/// ```
/// use httpdoc_domain::signature::{parse_signature, SignatureToken};
///
/// let tokens = parse_signature("/things/(int:id)");
/// assert_eq!(
///     tokens,
///     vec![
///         SignatureToken::Literal("/things/".to_string()),
///         SignatureToken::Param {
///             name: "id".to_string(),
///             type_annotation: Some("int".to_string()),
///         },
///     ]
/// );
/// ```
pub fn parse_signature(sig: &str) -> Vec<SignatureToken> {
    let mut tokens = Vec::new();
    let mut offset = 0;

    for captures in sig_param_re().captures_iter(sig) {
        let whole = captures.get(0).expect("capture 0 always present");
        if whole.start() > offset {
            tokens.push(SignatureToken::Literal(sig[offset..whole.start()].to_string()));
        }
        tokens.push(SignatureToken::Param {
            name: captures[2].to_string(),
            type_annotation: captures.get(1).map(|m| m.as_str().to_string()),
        });
        offset = whole.end();
    }

    if offset < sig.len() {
        tokens.push(SignatureToken::Literal(sig[offset..].to_string()));
    }

    tokens
}

/// The full rendered name of a route: `METHOD PATH`.
pub fn full_name(method: Method, path: &str) -> String {
    format!("{} {}", method.as_str(), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literal_only() {
        let tokens = parse_signature("/users");
        assert_eq!(tokens, vec![SignatureToken::Literal("/users".to_string())]);
    }

    #[test]
    fn test_parse_typed_parameter() {
        let tokens = parse_signature("/things/(int:id)");
        assert_eq!(
            tokens,
            vec![
                SignatureToken::Literal("/things/".to_string()),
                SignatureToken::Param {
                    name: "id".to_string(),
                    type_annotation: Some("int".to_string()),
                },
            ]
        );
    }

    #[test]
    fn test_parse_untyped_parameter() {
        let tokens = parse_signature("/users/(name)");
        assert_eq!(
            tokens,
            vec![
                SignatureToken::Literal("/users/".to_string()),
                SignatureToken::Param {
                    name: "name".to_string(),
                    type_annotation: None,
                },
            ]
        );
    }

    #[test]
    fn test_parse_multiple_parameters_with_trailing_literal() {
        let tokens = parse_signature("/posts/(int:year)/(int:month)/comments");
        assert_eq!(
            tokens,
            vec![
                SignatureToken::Literal("/posts/".to_string()),
                SignatureToken::Param {
                    name: "year".to_string(),
                    type_annotation: Some("int".to_string()),
                },
                SignatureToken::Literal("/".to_string()),
                SignatureToken::Param {
                    name: "month".to_string(),
                    type_annotation: Some("int".to_string()),
                },
                SignatureToken::Literal("/comments".to_string()),
            ]
        );
    }

    #[test]
    fn test_unmatched_parentheses_stay_literal() {
        let tokens = parse_signature("/weird/(broken");
        assert_eq!(
            tokens,
            vec![SignatureToken::Literal("/weird/(broken".to_string())]
        );

        let tokens = parse_signature("/weird/)open(");
        assert_eq!(
            tokens,
            vec![SignatureToken::Literal("/weird/)open(".to_string())]
        );
    }

    #[test]
    fn test_empty_signature() {
        assert_eq!(parse_signature(""), vec![]);
    }

    #[test]
    fn test_full_name() {
        assert_eq!(full_name(Method::Get, "/users/(int:id)"), "GET /users/(int:id)");
    }
}
