use tracing::{debug, instrument, warn};

use httpdoc_base::{FilePath, HttpdocError, HttpdocResult, PalHandle};

use crate::config::Config;

/* # Why collect scan errors instead of failing fast?

One misconfigured directory should not block scanning of the others. Errors
are collected and reported alongside results, matching the fail-tolerant
design of the extractor.
*/

/// Results from scanning files, including matched files and any errors encountered.
#[derive(Debug)]
pub struct ScanResult {
    /// Files found during the scan.
    pub files: Vec<FilePath>,
    /// Errors encountered during the scan (non-fatal).
    pub errors: Vec<ScanError>,
}

/// Error encountered while scanning a specific directory.
#[derive(Debug)]
pub struct ScanError {
    /// The directory path that was being scanned when the error occurred.
    pub directory_path: String,
    /// The error that occurred.
    pub error: Box<HttpdocError>,
}

/// Scan for markup files matching the configured glob patterns.
///
/// Walks each configured directory; if scanning a directory fails, the error
/// is collected and scanning continues with the others.
#[instrument(skip(pal, config), fields(directory_count = config.directory.len()))]
pub fn scan_files(pal: &PalHandle, config: &Config) -> HttpdocResult<ScanResult> {
    debug!("starting file scan");

    let mut files = Vec::new();
    let mut errors = Vec::new();

    for dir_config in &config.directory {
        for path_str in &dir_config.paths {
            let path = FilePath::from(path_str.as_str());

            match pal.walk_directory(&path, &dir_config.globs) {
                Ok(iter) => {
                    for result in iter {
                        match result {
                            Ok(file_path) => files.push(file_path),
                            Err(e) => {
                                warn!("error walking file: {}", e);
                                errors.push(ScanError {
                                    directory_path: path_str.clone(),
                                    error: e,
                                });
                            }
                        }
                    }
                }
                Err(e) => {
                    warn!("error walking directory '{}': {}", path_str, e);
                    errors.push(ScanError {
                        directory_path: path_str.clone(),
                        error: e,
                    });
                }
            }
        }
    }

    debug!(
        files_found = files.len(),
        errors_count = errors.len(),
        "file scan complete"
    );

    Ok(ScanResult { files, errors })
}
