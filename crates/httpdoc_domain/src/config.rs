use serde::Deserialize;

use httpdoc_base::{FilePath, HttpdocResult, PalHandle, ResultExt, err};

/// Configuration for an httpdoc run.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Title of the documented API.
    pub title: String,
    /// Path the generated routing table page is written to.
    #[serde(default = "default_output")]
    pub output: String,
    /// Directories to scan for markup sources.
    #[serde(default)]
    pub directory: Vec<DirectoryConfig>,
}

/// Configuration for a specific set of source directories.
#[derive(Debug, Deserialize)]
pub struct DirectoryConfig {
    /// Paths to the directories.
    pub paths: Vec<String>,
    /// Glob patterns for files in these directories.
    pub globs: Vec<String>,
}

fn default_output() -> String {
    "routing_table.md".to_string()
}

/// Load and parse the TOML configuration at the given path.
pub fn load_config(pal: &PalHandle, path: &FilePath) -> HttpdocResult<Config> {
    let contents = pal
        .read_file_to_string(path)
        .with_context(|| format!("loading configuration from {}", path))?;
    toml::from_str(&contents).map_err(|e| err!("invalid configuration in {}: {}", path, e))
}
