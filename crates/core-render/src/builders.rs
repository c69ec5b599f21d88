//! Segment builders: turn buffer, path and context-provider state into
//! ordered segments.
//!
//! The three builders are independent. Each one that creates clickable
//! segments registers its actions in the caller's `ActionStore`, so the
//! caller must have retired the surface's previous actions first.

use crate::path::{apply_modifiers, scheme_len};
use crate::segment::{Icon, Segment};
use crate::store::{ActionStore, jump_to};
use core_config::Config;
use core_model::{BufferId, PathContext, Position, StyleTag, WindowId};
use core_provider::{ContextProvider, IconProvider};
use tracing::trace;

/// Buffer facts captured for one render pass.
#[derive(Debug, Clone)]
pub struct BufferSnapshot<'a> {
    pub window: WindowId,
    pub buffer: BufferId,
    /// Raw buffer path; empty for an unnamed buffer.
    pub name: &'a str,
    pub file_type: &'a str,
    pub modified: bool,
    pub path_context: &'a PathContext,
}

/// One segment per directory component of the buffer path.
///
/// The root marker of an absolute path and a leading `scheme://` each become
/// their own segment; empty components from repeated separators are dropped.
pub fn dirname_segments(config: &Config, snapshot: &BufferSnapshot<'_>) -> Vec<Segment> {
    let directive = format!("{}:h", config.file.modifiers.dirname);
    let dirname = apply_modifiers(snapshot.name, &directive, snapshot.path_context);
    if dirname.is_empty() || dirname == "." {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut rest = dirname.as_str();
    if rest.starts_with('/') {
        segments.push(Segment::new("/", StyleTag::Dirname));
    }
    if let Some(len) = scheme_len(rest) {
        segments.push(Segment::new(&rest[..len], StyleTag::Dirname));
        rest = &rest[len..];
    }
    segments.extend(
        rest.split('/')
            .filter(|component| !component.is_empty())
            .map(|component| Segment::new(component, StyleTag::Dirname)),
    );
    trace!(target: "render.builders", buffer = %snapshot.buffer, count = segments.len(), "dirname_built");
    segments
}

/// The file name segment, or `None` when the shortened name is empty.
///
/// Icon precedence: modified glyph (when enabled and the buffer has unsaved
/// changes), then the file-type icon, then nothing. Clicking it with the
/// primary trigger jumps to line 1, column 0 of the originating window.
pub fn basename_segment(
    config: &Config,
    snapshot: &BufferSnapshot<'_>,
    icons: &dyn IconProvider,
    store: &mut ActionStore,
) -> Option<Segment> {
    let directive = format!("{}:t", config.file.modifiers.basename);
    let basename = apply_modifiers(snapshot.name, &directive, snapshot.path_context);
    if basename.is_empty() {
        trace!(target: "render.builders", buffer = %snapshot.buffer, "basename_empty");
        return None;
    }

    let icon = if config.file.show_modified && snapshot.modified {
        Some(Icon::new(config.symbols().modified.as_str(), StyleTag::Modified))
    } else {
        icons
            .icon(&basename, snapshot.file_type)
            .map(|found| Icon::new(found.glyph, found.style))
    };

    let action = store.register(snapshot.window, jump_to(snapshot.window, Position::start()));
    Some(
        Segment::new(basename, StyleTag::Basename)
            .with_icon(icon)
            .with_action(Some(action)),
    )
}

/// One segment per context node, outermost first. Empty when the provider is
/// unavailable or reports no scopes.
pub fn context_segments(
    config: &Config,
    snapshot: &BufferSnapshot<'_>,
    provider: &dyn ContextProvider,
    store: &mut ActionStore,
) -> Vec<Segment> {
    let Some(nodes) = provider.context(snapshot.window, snapshot.buffer) else {
        trace!(target: "render.builders", provider = provider.name(), window = %snapshot.window, "context_unavailable");
        return Vec::new();
    };

    nodes
        .into_iter()
        .map(|node| {
            let kind_style = StyleTag::ContextKind(node.kind);
            let text_style = if config.file.context_follow_icon_color {
                kind_style.clone()
            } else {
                StyleTag::Context
            };
            let icon = config
                .kind_icon(node.kind.name())
                .map(|glyph| Icon::new(glyph, kind_style));
            let action = store.register(snapshot.window, jump_to(snapshot.window, node.scope_start));
            Segment::new(node.name, text_style)
                .with_icon(icon)
                .with_action(Some(action))
        })
        .collect()
}
