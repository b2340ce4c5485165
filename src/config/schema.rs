use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/m3u-builder/config.toml` or `~/.config/m3u-builder/config.toml`
///
/// Precedence (highest wins):
/// 1) Command line flags (applied by the runtime)
/// 2) Environment variables (prefix `M3U_BUILDER__`, `__` as nested separator)
/// 3) Config file (if present)
/// 4) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Path suffixes treated as audio, matched case-sensitively (e.g. ".mp3").
    pub extensions: Vec<String>,
    /// Compute an md5 of every song and show it in listings.
    pub hash: bool,
    /// Number of scan workers. Values below 1 are treated as 1.
    pub workers: usize,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// What to do with a file whose tags cannot be parsed.
    pub tag_errors: TagErrorPolicy,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec![".mp3".into(), ".m4a".into()],
            hash: false,
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            follow_links: false,
            tag_errors: TagErrorPolicy::Skip,
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TagErrorPolicy {
    /// Leave the file out of the catalog and keep scanning.
    #[default]
    #[serde(alias = "continue")]
    Skip,
    /// Fail the whole scan on the first unreadable tag.
    #[serde(alias = "fail")]
    Abort,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive, overridden by `RUST_LOG`.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}
