/* # Why is the CLI minimal and hardcoded?

The CLI is intentionally kept minimal with no argument parsing or
configuration options. Change to your project directory, ensure
`httpdoc.toml` exists, run `httpdoc`, and the routing table page is written.

Exit codes:
- 0: Success (routing table generated)
- 1: Error (config not found, or nothing could be processed)
*/

use std::env;
use std::process;

use httpdoc_base::tracing::init_tracing;
use httpdoc_base::{FilePath, PalHandle, RealPal};
use httpdoc_domain::{DocName, HttpDomain, extract_routes, load_config, scan_files};

/// A file's document name is its path without the extension.
fn doc_name(file: &FilePath) -> DocName {
    DocName::from(file.as_relative().with_extension("").to_string())
}

fn main() {
    init_tracing().unwrap();

    let current_dir = env::current_dir().unwrap_or_else(|e| {
        eprintln!("Error: Failed to get current directory: {}", e);
        process::exit(1);
    });

    let pal = PalHandle::new(RealPal::new(current_dir));

    let config_path = FilePath::from("httpdoc.toml");
    let config = match load_config(&pal, &config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config from httpdoc.toml: {}", e);
            process::exit(1);
        }
    };

    println!("Configuration loaded: {}", config.title);

    let scan_result = match scan_files(&pal, &config) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: Failed to scan files: {}", e);
            process::exit(1);
        }
    };

    if !scan_result.errors.is_empty() {
        eprintln!("\nWarnings during file scanning:");
        for error in &scan_result.errors {
            eprintln!("  - {}: {}", error.directory_path, error.error);
        }
    }

    println!("Found {} files", scan_result.files.len());

    if scan_result.files.is_empty() {
        println!("No files found matching the configured patterns.");
        process::exit(0);
    }

    let extraction = match extract_routes(&pal, &scan_result.files) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: Failed to extract routes: {}", e);
            process::exit(1);
        }
    };

    if !extraction.errors.is_empty() {
        eprintln!("\nWarnings during route extraction:");
        for error in &extraction.errors {
            eprintln!(
                "  - {}:{}: {}",
                error.file_path, error.line, error.error
            );
        }
    }

    println!("Extracted {} routes", extraction.routes.len());

    let domain = HttpDomain::new();
    let mut registered = 0;
    for (file, def) in &extraction.routes {
        match domain.add_route(&doc_name(file), def) {
            Ok(node) => {
                registered += 1;
                println!("  + {} ({})", node.full_name, node.anchor);
            }
            Err(e) => {
                eprintln!("  - Failed to register route at {}:{}: {}", file, def.line, e);
            }
        }
    }

    let table = domain.routing_table();
    let output = FilePath::from(config.output.as_str());
    if let Err(e) = pal.write_file(&output, &table.render_markdown()) {
        eprintln!("Error: Failed to write {}: {}", output, e);
        process::exit(1);
    }

    println!(
        "\nWrote routing table with {} routes to {}",
        registered, output
    );

    if registered > 0 || extraction.routes.is_empty() {
        process::exit(0);
    } else {
        eprintln!("No routes were successfully registered.");
        process::exit(1);
    }
}
