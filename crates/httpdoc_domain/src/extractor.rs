use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, instrument};

use httpdoc_base::error::ErrorKind;
use httpdoc_base::{FilePath, HttpdocError, HttpdocResult, PalHandle};

use crate::method::Method;

/* # Why a dedicated extractor module?

The extractor is the markup-facing edge: it finds directive lines in source
files and turns them into route definitions, leaving registration to the
domain. The design is fail-tolerant like the scanner: one bad directive or
unreadable file is collected as an error and extraction continues, so a
single typo never blocks the build.
*/

/// A route definition extracted from a directive line
/// (`.. http:get:: /users/(int:id)`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDef {
    pub method: Method,
    pub path: String,
    /// First line of the indented directive body, when present.
    pub synopsis: Option<String>,
    /// 1-indexed line number of the directive.
    pub line: usize,
}

/// Error encountered while extracting from a specific file.
#[derive(Debug)]
pub struct ExtractionError {
    pub file_path: FilePath,
    /// 1-indexed directive line, or 0 for whole-file errors.
    pub line: usize,
    pub error: Box<HttpdocError>,
}

/// Results from extraction, including routes and any non-fatal errors.
#[derive(Debug, Default)]
pub struct ExtractionResult {
    /// Extracted route definitions with the file they were defined in.
    pub routes: Vec<(FilePath, RouteDef)>,
    /// Errors encountered during extraction (non-fatal).
    pub errors: Vec<ExtractionError>,
}

/// Directive line: `.. http:<method>:: <signature>`.
fn directive_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\.\.\s+http:(\w+)::\s*(\S.*?)\s*$").expect("directive regex is valid")
    })
}

/// Extract route definitions from one file's text.
///
/// Returns the definitions plus per-line errors for directive names outside
/// the seven directive methods.
pub fn extract_routes_from_text(
    text: &str,
) -> (Vec<RouteDef>, Vec<(usize, Box<HttpdocError>)>) {
    let mut routes = Vec::new();
    let mut errors = Vec::new();

    let lines: Vec<&str> = text.lines().collect();
    for (idx, line) in lines.iter().enumerate() {
        let Some(captures) = directive_re().captures(line) else {
            continue;
        };
        let line_number = idx + 1;

        let method = match Method::parse(&captures[1]) {
            Some(method) if method.is_directive_method() => method,
            _ => {
                errors.push((
                    line_number,
                    Box::new(HttpdocError::new(ErrorKind::UnknownMethod {
                        method: captures[1].to_string(),
                    })),
                ));
                continue;
            }
        };

        routes.push(RouteDef {
            method,
            path: captures[2].to_string(),
            synopsis: find_synopsis(&lines[idx + 1..]),
            line: line_number,
        });
    }

    (routes, errors)
}

/// The synopsis is the first indented body line after the directive, skipping
/// blank lines and `:field:` option lines.
fn find_synopsis(following: &[&str]) -> Option<String> {
    for line in following {
        if line.trim().is_empty() {
            continue;
        }
        // Body lines are indented; an unindented line ends the directive
        if !line.starts_with(char::is_whitespace) {
            return None;
        }
        let trimmed = line.trim();
        if trimmed.starts_with(':') {
            continue;
        }
        return Some(trimmed.to_string());
    }
    None
}

/// Extract route definitions from the given files.
///
/// Unreadable files and bad directive lines are collected as errors; the
/// remaining files are still processed.
#[instrument(skip(pal, files), fields(file_count = files.len()))]
pub fn extract_routes(pal: &PalHandle, files: &[FilePath]) -> HttpdocResult<ExtractionResult> {
    let mut result = ExtractionResult::default();

    for file in files {
        let text = match pal.read_file_to_string(file) {
            Ok(text) => text,
            Err(error) => {
                result.errors.push(ExtractionError {
                    file_path: file.clone(),
                    line: 0,
                    error,
                });
                continue;
            }
        };

        let (routes, errors) = extract_routes_from_text(&text);
        debug!(
            file = %file,
            routes_found = routes.len(),
            errors_found = errors.len(),
            "extracted directives"
        );
        result
            .routes
            .extend(routes.into_iter().map(|route| (file.clone(), route)));
        result
            .errors
            .extend(errors.into_iter().map(|(line, error)| ExtractionError {
                file_path: file.clone(),
                line,
                error,
            }));
    }

    Ok(result)
}
