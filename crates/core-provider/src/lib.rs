//! Collaborator seams for the breadcrumb builders.
//!
//! Two external services feed the segment builders:
//! - a `ContextProvider` (language analysis) that reports the nesting nodes
//!   enclosing the cursor of a window,
//! - an `IconProvider` that maps a file name / file type to a decorative glyph.
//!
//! Neither is an error source. "Unavailable" and "no icon" are ordinary
//! answers (`None`) and the builders degrade to an empty context run or an
//! icon-less basename. Implementations are called on the host main loop only.
//!
//! This crate ships a no-op and a static implementation of each seam. The
//! static ones back the binary and the test suites; real integrations live in
//! the embedding editor.

use core_model::{BufferId, ContextNode, StyleTag, WindowId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Source of symbol-scope context for a window.
pub trait ContextProvider {
    /// Stable identifier (for logs / diagnostics).
    fn name(&self) -> &'static str;
    /// Ordered nesting nodes, outermost first. `None` when the provider is not
    /// attached to this buffer or has nothing computed yet.
    fn context(&self, window: WindowId, buffer: BufferId) -> Option<Vec<ContextNode>>;
}

/// Decorative glyph lookup by file name and file type.
pub trait IconProvider {
    fn name(&self) -> &'static str;
    fn icon(&self, file_name: &str, file_type: &str) -> Option<FileIcon>;
}

/// Glyph plus the style it is drawn in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileIcon {
    pub glyph: String,
    pub style: StyleTag,
}

impl<T: ContextProvider + ?Sized> ContextProvider for Rc<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }
    fn context(&self, window: WindowId, buffer: BufferId) -> Option<Vec<ContextNode>> {
        (**self).context(window, buffer)
    }
}

impl<T: IconProvider + ?Sized> IconProvider for Rc<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }
    fn icon(&self, file_name: &str, file_type: &str) -> Option<FileIcon> {
        (**self).icon(file_name, file_type)
    }
}

/// Provider that is never available.
#[derive(Debug, Default)]
pub struct NoopContextProvider;

impl ContextProvider for NoopContextProvider {
    fn name(&self) -> &'static str {
        "noop-context"
    }
    fn context(&self, _window: WindowId, _buffer: BufferId) -> Option<Vec<ContextNode>> {
        None
    }
}

/// Context fixed per buffer by whoever owns the provider.
///
/// Buffers that were never `set` report "unavailable"; a buffer set to an
/// empty list reports "available, no scopes".
#[derive(Debug, Default)]
pub struct StaticContextProvider {
    nodes: RefCell<HashMap<BufferId, Vec<ContextNode>>>,
}

impl StaticContextProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, buffer: BufferId, nodes: Vec<ContextNode>) {
        tracing::trace!(target: "provider.context", %buffer, count = nodes.len(), "context_set");
        self.nodes.borrow_mut().insert(buffer, nodes);
    }

    pub fn detach(&self, buffer: BufferId) {
        self.nodes.borrow_mut().remove(&buffer);
    }
}

impl ContextProvider for StaticContextProvider {
    fn name(&self) -> &'static str {
        "static-context"
    }
    fn context(&self, _window: WindowId, buffer: BufferId) -> Option<Vec<ContextNode>> {
        self.nodes.borrow().get(&buffer).cloned()
    }
}

#[derive(Debug, Default)]
pub struct NoopIconProvider;

impl IconProvider for NoopIconProvider {
    fn name(&self) -> &'static str {
        "noop-icons"
    }
    fn icon(&self, _file_name: &str, _file_type: &str) -> Option<FileIcon> {
        None
    }
}

/// Built-in icons: file type first, then file extension.
const BUILTIN_ICONS: &[(&str, &str, &str)] = &[
    // (key, glyph, style group)
    ("rust", "\u{e7a8}", "DevIconRs"),
    ("rs", "\u{e7a8}", "DevIconRs"),
    ("toml", "\u{e6b2}", "DevIconToml"),
    ("markdown", "\u{e73e}", "DevIconMd"),
    ("md", "\u{e73e}", "DevIconMd"),
    ("lua", "\u{e620}", "DevIconLua"),
    ("python", "\u{e606}", "DevIconPy"),
    ("py", "\u{e606}", "DevIconPy"),
    ("json", "\u{e60b}", "DevIconJson"),
    ("txt", "\u{f15c}", "DevIconTxt"),
];

/// Icon table keyed by file type and by extension.
#[derive(Debug, Clone)]
pub struct TableIconProvider {
    table: HashMap<String, FileIcon>,
}

impl Default for TableIconProvider {
    fn default() -> Self {
        let table = BUILTIN_ICONS
            .iter()
            .map(|(key, glyph, group)| {
                (
                    key.to_string(),
                    FileIcon {
                        glyph: glyph.to_string(),
                        style: StyleTag::External(group.to_string()),
                    },
                )
            })
            .collect();
        Self { table }
    }
}

impl TableIconProvider {
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, icon: FileIcon) {
        self.table.insert(key.into(), icon);
    }
}

impl IconProvider for TableIconProvider {
    fn name(&self) -> &'static str {
        "table-icons"
    }
    fn icon(&self, file_name: &str, file_type: &str) -> Option<FileIcon> {
        if let Some(icon) = self.table.get(file_type) {
            return Some(icon.clone());
        }
        let ext = file_name.rsplit_once('.').map(|(_, ext)| ext)?;
        self.table.get(ext).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_model::{Position, SymbolKind};

    #[test]
    fn noop_providers_answer_none() {
        assert!(NoopContextProvider.context(WindowId(1), BufferId(1)).is_none());
        assert!(NoopIconProvider.icon("main.rs", "rust").is_none());
    }

    #[test]
    fn static_context_distinguishes_unavailable_from_empty() {
        let provider = StaticContextProvider::new();
        assert!(provider.context(WindowId(1), BufferId(2)).is_none());
        provider.set(BufferId(2), Vec::new());
        assert_eq!(provider.context(WindowId(1), BufferId(2)), Some(Vec::new()));
        provider.set(
            BufferId(2),
            vec![ContextNode::new("run", SymbolKind::Function, Position::new(3, 4))],
        );
        let nodes = provider.context(WindowId(9), BufferId(2)).unwrap();
        assert_eq!(nodes[0].name, "run");
        provider.detach(BufferId(2));
        assert!(provider.context(WindowId(1), BufferId(2)).is_none());
    }

    #[test]
    fn shared_provider_sees_updates() {
        let provider = Rc::new(StaticContextProvider::new());
        let boxed: Box<dyn ContextProvider> = Box::new(provider.clone());
        provider.set(BufferId(1), Vec::new());
        assert_eq!(boxed.context(WindowId(1), BufferId(1)), Some(Vec::new()));
        assert_eq!(boxed.name(), "static-context");
    }

    #[test]
    fn table_icons_prefer_filetype_then_extension() {
        let icons = TableIconProvider::default();
        let by_type = icons.icon("Makefile", "rust").unwrap();
        assert_eq!(by_type.style, StyleTag::External("DevIconRs".into()));
        let by_ext = icons.icon("README.md", "").unwrap();
        assert_eq!(by_ext.glyph, "\u{e73e}");
        assert!(icons.icon("LICENSE", "").is_none());
        assert!(TableIconProvider::empty().icon("a.rs", "rust").is_none());
    }
}
