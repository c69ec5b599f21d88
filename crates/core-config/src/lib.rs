//! Configuration loading and parsing.
//!
//! Parses `crumbline.toml` (or an override path provided by the binary).
//! Every key is optional; absent keys take the documented default and
//! unknown keys are ignored so older binaries tolerate newer files.
//!
//! ```toml
//! show_modified = true
//! exclude_filetypes = ["netrw", "toggleterm", "help"]
//!
//! [modifiers]
//! dirname = ":~:."
//!
//! [symbols]
//! separator = ">"
//!
//! # `kinds = false` disables context icons entirely.
//! [kinds]
//! Function = "f"
//! ```
//!
//! The core only consumes values from here (glyphs, flags, eligibility
//! sets); it never branches on where they came from.

use anyhow::Result;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::{fs, path::PathBuf};
use tracing::{debug, warn};

const FILE_NAME: &str = "crumbline.toml";

/// Default glyph per symbol kind (codicon code points, nerd-font patched).
const DEFAULT_KIND_ICONS: &[(&str, &str)] = &[
    ("File", "\u{eb60}"),
    ("Module", "\u{ea8b}"),
    ("Namespace", "\u{ea8b}"),
    ("Package", "\u{eb29}"),
    ("Class", "\u{eb5b}"),
    ("Method", "\u{ea8c}"),
    ("Property", "\u{eb65}"),
    ("Field", "\u{eb5f}"),
    ("Constructor", "\u{ea8c}"),
    ("Enum", "\u{ea95}"),
    ("Interface", "\u{eb61}"),
    ("Function", "\u{ea8c}"),
    ("Variable", "\u{ea88}"),
    ("Constant", "\u{eb5d}"),
    ("String", "\u{eb8d}"),
    ("Number", "\u{ea90}"),
    ("Boolean", "\u{ea8f}"),
    ("Array", "\u{ea8a}"),
    ("Object", "\u{ea8b}"),
    ("Key", "\u{ea93}"),
    ("Null", "\u{ea8f}"),
    ("EnumMember", "\u{eb5e}"),
    ("Struct", "\u{ea91}"),
    ("Event", "\u{ea86}"),
    ("Operator", "\u{eb64}"),
    ("TypeParameter", "\u{ea92}"),
];

/// Path-modifier directives applied before decomposing a buffer path.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ModifiersConfig {
    pub dirname: String,
    pub basename: String,
}

impl Default for ModifiersConfig {
    fn default() -> Self {
        Self {
            dirname: ":~:.".to_string(),
            basename: String::new(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SymbolsConfig {
    pub modified: String,
    pub ellipsis: String,
    pub separator: String,
}

impl Default for SymbolsConfig {
    fn default() -> Self {
        Self {
            modified: "\u{25CF}".to_string(),
            ellipsis: "\u{2026}".to_string(),
            separator: "\u{eab6}".to_string(),
        }
    }
}

/// `kinds = false` / `kinds = true` or a table of per-kind glyph overrides.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum KindsSetting {
    Enabled(bool),
    Glyphs(BTreeMap<String, String>),
}

impl Default for KindsSetting {
    fn default() -> Self {
        KindsSetting::Enabled(true)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ConfigFile {
    pub show_dirname: bool,
    pub show_basename: bool,
    pub show_context: bool,
    pub show_modified: bool,
    /// Context labels take the style of their kind icon instead of the generic context style.
    pub context_follow_icon_color: bool,
    pub lead_custom_section: String,
    pub custom_section: String,
    /// Buffer kinds eligible for a breadcrumb (`""` is a regular file buffer).
    pub include_buftypes: Vec<String>,
    pub exclude_filetypes: Vec<String>,
    pub theme: String,
    pub modifiers: ModifiersConfig,
    pub symbols: SymbolsConfig,
    pub kinds: KindsSetting,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            show_dirname: true,
            show_basename: true,
            show_context: true,
            show_modified: false,
            context_follow_icon_color: true,
            lead_custom_section: String::new(),
            custom_section: String::new(),
            include_buftypes: vec![String::new()],
            exclude_filetypes: vec!["netrw".to_string(), "toggleterm".to_string()],
            theme: "auto".to_string(),
            modifiers: ModifiersConfig::default(),
            symbols: SymbolsConfig::default(),
            kinds: KindsSetting::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
    /// Resolved glyph per kind name; `None` when icons are disabled.
    kind_icons: Option<BTreeMap<String, String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_file(ConfigFile::default())
    }
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("crumbline").join(FILE_NAME);
    }
    PathBuf::from(FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        debug!(target: "config", path = %path.display(), "config_missing_using_defaults");
        return Ok(Config::default());
    };
    match parse(&content) {
        Ok(mut cfg) => {
            cfg.raw = Some(content);
            debug!(target: "config", path = %path.display(), "config_loaded");
            Ok(cfg)
        }
        Err(e) => {
            // Fall back to defaults; a broken file must not take the line down.
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed");
            Ok(Config::default())
        }
    }
}

/// Parse configuration text without touching the filesystem.
pub fn parse(content: &str) -> Result<Config> {
    let file = toml::from_str::<ConfigFile>(content)?;
    Ok(Config::from_file(file))
}

impl Config {
    pub fn from_file(file: ConfigFile) -> Self {
        let kind_icons = match &file.kinds {
            KindsSetting::Enabled(false) => None,
            KindsSetting::Enabled(true) => Some(default_kind_icons()),
            KindsSetting::Glyphs(overrides) => {
                let mut icons = default_kind_icons();
                icons.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
                Some(icons)
            }
        };
        Self {
            raw: None,
            file,
            kind_icons,
        }
    }

    pub fn icons_enabled(&self) -> bool {
        self.kind_icons.is_some()
    }

    /// Glyph configured for a symbol kind name, or `None` if icons are off or the kind is unmapped.
    pub fn kind_icon(&self, kind: &str) -> Option<&str> {
        self.kind_icons.as_ref()?.get(kind).map(String::as_str)
    }

    pub fn is_buftype_included(&self, buftype: &str) -> bool {
        self.file.include_buftypes.iter().any(|b| b == buftype)
    }

    pub fn is_filetype_excluded(&self, filetype: &str) -> bool {
        self.file.exclude_filetypes.iter().any(|f| f == filetype)
    }

    pub fn symbols(&self) -> &SymbolsConfig {
        &self.file.symbols
    }
}

fn default_kind_icons() -> BTreeMap<String, String> {
    DEFAULT_KIND_ICONS
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl<'a> Write for LockedWriter<'a> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert!(cfg.raw.is_none());
        assert!(cfg.file.show_dirname && cfg.file.show_basename && cfg.file.show_context);
        assert!(!cfg.file.show_modified);
        assert_eq!(cfg.symbols().ellipsis, "\u{2026}");
        assert!(cfg.is_buftype_included(""));
        assert!(!cfg.is_buftype_included("terminal"));
        assert!(cfg.is_filetype_excluded("netrw"));
        assert_eq!(cfg.file.modifiers.dirname, ":~:.");
    }

    #[test]
    fn default_kind_icons_cover_function() {
        let cfg = Config::default();
        assert!(cfg.icons_enabled());
        assert_eq!(cfg.kind_icon("Function"), Some("\u{ea8c}"));
        assert_eq!(cfg.kind_icon("NotAKind"), None);
    }

    #[test]
    fn parses_symbols_and_flags() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            tmp.path(),
            "show_modified = true\nexclude_filetypes = [\"help\"]\n[symbols]\nseparator = \">\"\n",
        )
        .unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert!(cfg.raw.is_some());
        assert!(cfg.file.show_modified);
        assert_eq!(cfg.symbols().separator, ">");
        // untouched keys keep their defaults
        assert_eq!(cfg.symbols().modified, "\u{25CF}");
        assert!(cfg.is_filetype_excluded("help"));
        assert!(!cfg.is_filetype_excluded("netrw"));
    }

    #[test]
    fn kinds_false_disables_icons() {
        let cfg = parse("kinds = false\n").unwrap();
        assert!(!cfg.icons_enabled());
        assert_eq!(cfg.kind_icon("Function"), None);
    }

    #[test]
    fn kinds_table_overrides_single_glyph() {
        let cfg = parse("[kinds]\nFunction = \"fn\"\n").unwrap();
        assert_eq!(cfg.kind_icon("Function"), Some("fn"));
        assert_eq!(cfg.kind_icon("Struct"), Some("\u{ea91}"));
    }

    #[test]
    fn parse_error_falls_back_and_logs_config_target() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "show_modified = \"yes please\"\n").unwrap();
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::WARN)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();

        let cfg = with_default(subscriber, || {
            load_from(Some(tmp.path().to_path_buf())).unwrap()
        });

        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("WARN config:"));
        assert!(log_output.contains("config_parse_failed"));
        assert!(!cfg.file.show_modified);
        assert!(cfg.raw.is_none());
    }
}
