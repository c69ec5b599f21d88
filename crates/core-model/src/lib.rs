//! Host editor vocabulary shared by every breadcrumb crate.
//!
//! The breadcrumb engine never talks to a concrete editor. Everything it
//! needs from one (windows, buffers, cursor placement, the per-window display
//! property) is expressed through the [`EditorHost`] trait defined here, and
//! the values flowing across that seam (ids, positions, symbol kinds, style
//! tags, the rendered [`StyledLine`]) live in this crate so that collaborators
//! and the renderer agree on one set of types.
//!
//! Invariants:
//! * Ids are opaque; a stale id is never an error at the type level, hosts
//!   report it through `is_*_valid` or `HostError`.
//! * `Position::line` is 1-based and `Position::column` is 0-based, matching
//!   the coordinates context providers report for scope starts.
//! * Style tags are symbolic; only the theme layer maps them to colors.

use std::fmt;

mod line;
mod memory;

pub use line::{StyledLine, StyledSpan};
pub use memory::MemoryHost;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Identity of a rendering surface (one editor window).
pub struct WindowId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub u32);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "win:{}", self.0)
    }
}

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "buf:{}", self.0)
    }
}

/// Opaque handle to an interactive action registered for one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(pub u64);

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "action:{}", self.0)
    }
}

/// Cursor coordinate: 1-based line, 0-based column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// First line, first column.
    pub const fn start() -> Self {
        Self { line: 1, column: 0 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    /// The designated interactive trigger; every other button is a no-op for breadcrumb actions.
    pub const PRIMARY: MouseButton = MouseButton::Left;

    pub fn is_primary(self) -> bool {
        self == Self::PRIMARY
    }
}

macro_rules! symbol_kinds {
    ($($variant:ident),+ $(,)?) => {
        /// Nesting node kind reported by a context provider (LSP symbol kinds).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum SymbolKind {
            $($variant),+
        }

        impl SymbolKind {
            pub const ALL: &'static [SymbolKind] = &[$(SymbolKind::$variant),+];

            /// Stable kind name, also the key used for per-kind icon configuration.
            pub fn name(self) -> &'static str {
                match self {
                    $(SymbolKind::$variant => stringify!($variant)),+
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $(stringify!($variant) => Some(SymbolKind::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

symbol_kinds!(
    File,
    Module,
    Namespace,
    Package,
    Class,
    Method,
    Property,
    Field,
    Constructor,
    Enum,
    Interface,
    Function,
    Variable,
    Constant,
    String,
    Number,
    Boolean,
    Array,
    Object,
    Key,
    Null,
    EnumMember,
    Struct,
    Event,
    Operator,
    TypeParameter,
);

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One named, positioned symbol-scope entry supplied by a context provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextNode {
    pub name: String,
    pub kind: SymbolKind,
    pub scope_start: Position,
}

impl ContextNode {
    pub fn new(name: impl Into<String>, kind: SymbolKind, scope_start: Position) -> Self {
        Self {
            name: name.into(),
            kind,
            scope_start,
        }
    }
}

/// Symbolic style class resolved to colors by the theme layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StyleTag {
    Normal,
    Dirname,
    Basename,
    Context,
    ContextKind(SymbolKind),
    Modified,
    Ellipsis,
    Separator,
    /// Style named by an external collaborator (e.g. a file-type icon color).
    External(String),
}

impl StyleTag {
    /// Stable group name (`crumbline_dirname`, `crumbline_context_function`, ...).
    pub fn group_name(&self) -> String {
        match self {
            StyleTag::Normal => "crumbline_normal".to_string(),
            StyleTag::Dirname => "crumbline_dirname".to_string(),
            StyleTag::Basename => "crumbline_basename".to_string(),
            StyleTag::Context => "crumbline_context".to_string(),
            StyleTag::ContextKind(kind) => {
                format!("crumbline_context_{}", kind.name().to_ascii_lowercase())
            }
            StyleTag::Modified => "crumbline_modified".to_string(),
            StyleTag::Ellipsis => "crumbline_ellipsis".to_string(),
            StyleTag::Separator => "crumbline_separator".to_string(),
            StyleTag::External(name) => name.clone(),
        }
    }
}

/// Inputs to path modifiers that depend on the host process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathContext {
    pub cwd: Option<String>,
    pub home: Option<String>,
}

/// Value held by a window's display property (the line above the text area).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceDisplay {
    /// Content owned by someone else (or nothing at all when empty).
    Plain(String),
    Breadcrumb(StyledLine),
}

impl Default for SurfaceDisplay {
    fn default() -> Self {
        SurfaceDisplay::Plain(String::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("window {0} is no longer valid")]
    InvalidWindow(WindowId),
    #[error("buffer {0} is no longer valid")]
    InvalidBuffer(BufferId),
}

/// Everything the breadcrumb needs from the host editor.
///
/// Queries on stale ids return `None`/`false`; mutations on stale ids return
/// `HostError`. All calls happen on the host's main loop.
pub trait EditorHost {
    fn windows(&self) -> Vec<WindowId>;
    fn is_window_valid(&self, window: WindowId) -> bool;
    fn is_buffer_valid(&self, buffer: BufferId) -> bool;
    fn window_buffer(&self, window: WindowId) -> Option<BufferId>;
    /// Width of the window in terminal cells.
    fn window_width(&self, window: WindowId) -> Option<usize>;
    fn is_floating(&self, window: WindowId) -> bool;

    /// Raw buffer path as the host knows it; empty for unnamed buffers.
    fn buffer_name(&self, buffer: BufferId) -> Option<&str>;
    /// Buffer kind (`""` for regular files, `"terminal"`, `"nofile"`, ...).
    fn buffer_type(&self, buffer: BufferId) -> Option<&str>;
    fn file_type(&self, buffer: BufferId) -> Option<&str>;
    fn is_modified(&self, buffer: BufferId) -> bool;
    fn path_context(&self) -> PathContext;

    fn display(&self, window: WindowId) -> Option<SurfaceDisplay>;
    fn set_display(&mut self, window: WindowId, display: SurfaceDisplay) -> Result<(), HostError>;

    fn focus_window(&mut self, window: WindowId) -> Result<(), HostError>;
    fn set_cursor(&mut self, window: WindowId, position: Position) -> Result<(), HostError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_kind_names_round_trip() {
        for kind in SymbolKind::ALL {
            assert_eq!(SymbolKind::from_name(kind.name()), Some(*kind));
        }
        assert_eq!(SymbolKind::from_name("Gadget"), None);
        assert_eq!(SymbolKind::ALL.len(), 26);
    }

    #[test]
    fn group_names() {
        assert_eq!(StyleTag::Dirname.group_name(), "crumbline_dirname");
        assert_eq!(
            StyleTag::ContextKind(SymbolKind::EnumMember).group_name(),
            "crumbline_context_enummember"
        );
        assert_eq!(
            StyleTag::External("DevIconRs".into()).group_name(),
            "DevIconRs"
        );
    }

    #[test]
    fn only_left_button_is_primary() {
        assert!(MouseButton::Left.is_primary());
        assert!(!MouseButton::Middle.is_primary());
        assert!(!MouseButton::Right.is_primary());
    }

    #[test]
    fn host_error_messages() {
        assert_eq!(
            HostError::InvalidWindow(WindowId(4)).to_string(),
            "window win:4 is no longer valid"
        );
    }
}
