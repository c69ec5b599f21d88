//! In-memory `EditorHost` used by the binary and by tests.
//!
//! Holds windows and buffers in ordered maps so iteration (and therefore
//! render scheduling) is deterministic.

use crate::{
    BufferId, EditorHost, HostError, PathContext, Position, SurfaceDisplay, WindowId,
};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct BufferData {
    name: String,
    buftype: String,
    filetype: String,
    modified: bool,
}

#[derive(Debug, Clone)]
struct WindowData {
    buffer: BufferId,
    width: usize,
    floating: bool,
    cursor: Position,
    display: SurfaceDisplay,
}

#[derive(Debug, Default)]
pub struct MemoryHost {
    buffers: BTreeMap<BufferId, BufferData>,
    windows: BTreeMap<WindowId, WindowData>,
    focused: Option<WindowId>,
    path_context: PathContext,
    next_id: u32,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path_context(mut self, ctx: PathContext) -> Self {
        self.path_context = ctx;
        self
    }

    fn bump(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    /// Add a regular file buffer (`buftype == ""`).
    pub fn add_buffer(&mut self, name: impl Into<String>, filetype: impl Into<String>) -> BufferId {
        let id = BufferId(self.bump());
        self.buffers.insert(
            id,
            BufferData {
                name: name.into(),
                buftype: String::new(),
                filetype: filetype.into(),
                modified: false,
            },
        );
        id
    }

    pub fn add_window(&mut self, buffer: BufferId, width: usize) -> WindowId {
        let id = WindowId(self.bump());
        self.windows.insert(
            id,
            WindowData {
                buffer,
                width,
                floating: false,
                cursor: Position::start(),
                display: SurfaceDisplay::default(),
            },
        );
        if self.focused.is_none() {
            self.focused = Some(id);
        }
        id
    }

    pub fn close_window(&mut self, window: WindowId) {
        self.windows.remove(&window);
        if self.focused == Some(window) {
            self.focused = self.windows.keys().next().copied();
        }
    }

    pub fn wipe_buffer(&mut self, buffer: BufferId) {
        self.buffers.remove(&buffer);
    }

    pub fn set_buffer_name(&mut self, buffer: BufferId, name: impl Into<String>) {
        if let Some(b) = self.buffers.get_mut(&buffer) {
            b.name = name.into();
        }
    }

    pub fn set_window_buffer(&mut self, window: WindowId, buffer: BufferId) {
        if let Some(w) = self.windows.get_mut(&window) {
            w.buffer = buffer;
        }
    }

    pub fn set_window_width(&mut self, window: WindowId, width: usize) {
        if let Some(w) = self.windows.get_mut(&window) {
            w.width = width;
        }
    }

    pub fn set_floating(&mut self, window: WindowId, floating: bool) {
        if let Some(w) = self.windows.get_mut(&window) {
            w.floating = floating;
        }
    }

    pub fn set_modified(&mut self, buffer: BufferId, modified: bool) {
        if let Some(b) = self.buffers.get_mut(&buffer) {
            b.modified = modified;
        }
    }

    pub fn set_buffer_type(&mut self, buffer: BufferId, buftype: impl Into<String>) {
        if let Some(b) = self.buffers.get_mut(&buffer) {
            b.buftype = buftype.into();
        }
    }

    pub fn set_file_type(&mut self, buffer: BufferId, filetype: impl Into<String>) {
        if let Some(b) = self.buffers.get_mut(&buffer) {
            b.filetype = filetype.into();
        }
    }

    pub fn cursor(&self, window: WindowId) -> Option<Position> {
        self.windows.get(&window).map(|w| w.cursor)
    }

    pub fn focused(&self) -> Option<WindowId> {
        self.focused
    }
}

impl EditorHost for MemoryHost {
    fn windows(&self) -> Vec<WindowId> {
        self.windows.keys().copied().collect()
    }

    fn is_window_valid(&self, window: WindowId) -> bool {
        self.windows.contains_key(&window)
    }

    fn is_buffer_valid(&self, buffer: BufferId) -> bool {
        self.buffers.contains_key(&buffer)
    }

    fn window_buffer(&self, window: WindowId) -> Option<BufferId> {
        self.windows.get(&window).map(|w| w.buffer)
    }

    fn window_width(&self, window: WindowId) -> Option<usize> {
        self.windows.get(&window).map(|w| w.width)
    }

    fn is_floating(&self, window: WindowId) -> bool {
        self.windows.get(&window).is_some_and(|w| w.floating)
    }

    fn buffer_name(&self, buffer: BufferId) -> Option<&str> {
        self.buffers.get(&buffer).map(|b| b.name.as_str())
    }

    fn buffer_type(&self, buffer: BufferId) -> Option<&str> {
        self.buffers.get(&buffer).map(|b| b.buftype.as_str())
    }

    fn file_type(&self, buffer: BufferId) -> Option<&str> {
        self.buffers.get(&buffer).map(|b| b.filetype.as_str())
    }

    fn is_modified(&self, buffer: BufferId) -> bool {
        self.buffers.get(&buffer).is_some_and(|b| b.modified)
    }

    fn path_context(&self) -> PathContext {
        self.path_context.clone()
    }

    fn display(&self, window: WindowId) -> Option<SurfaceDisplay> {
        self.windows.get(&window).map(|w| w.display.clone())
    }

    fn set_display(&mut self, window: WindowId, display: SurfaceDisplay) -> Result<(), HostError> {
        let w = self
            .windows
            .get_mut(&window)
            .ok_or(HostError::InvalidWindow(window))?;
        let kind = match &display {
            SurfaceDisplay::Plain(_) => "plain",
            SurfaceDisplay::Breadcrumb(_) => "breadcrumb",
        };
        tracing::trace!(target: "host.memory", %window, kind, "display_set");
        w.display = display;
        Ok(())
    }

    fn focus_window(&mut self, window: WindowId) -> Result<(), HostError> {
        if !self.windows.contains_key(&window) {
            return Err(HostError::InvalidWindow(window));
        }
        self.focused = Some(window);
        Ok(())
    }

    fn set_cursor(&mut self, window: WindowId, position: Position) -> Result<(), HostError> {
        let w = self
            .windows
            .get_mut(&window)
            .ok_or(HostError::InvalidWindow(window))?;
        tracing::trace!(target: "host.memory", %window, %position, "cursor_set");
        w.cursor = position;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_window_gets_focus() {
        let mut host = MemoryHost::new();
        let buf = host.add_buffer("/tmp/a.rs", "rust");
        let w1 = host.add_window(buf, 80);
        let w2 = host.add_window(buf, 40);
        assert_eq!(host.focused(), Some(w1));
        host.focus_window(w2).unwrap();
        assert_eq!(host.focused(), Some(w2));
        assert_eq!(host.windows(), vec![w1, w2]);
    }

    #[test]
    fn stale_window_mutations_error() {
        let mut host = MemoryHost::new();
        let buf = host.add_buffer("a", "");
        let win = host.add_window(buf, 10);
        host.close_window(win);
        assert!(!host.is_window_valid(win));
        assert_eq!(
            host.set_cursor(win, Position::start()),
            Err(HostError::InvalidWindow(win))
        );
        assert_eq!(host.focused(), None);
    }

    #[test]
    fn buffer_queries_reflect_setters() {
        let mut host = MemoryHost::new();
        let buf = host.add_buffer("notes.md", "markdown");
        assert_eq!(host.buffer_type(buf), Some(""));
        host.set_buffer_type(buf, "nofile");
        host.set_buffer_name(buf, "");
        assert_eq!(host.buffer_name(buf), Some(""));
        host.set_modified(buf, true);
        assert_eq!(host.buffer_type(buf), Some("nofile"));
        assert!(host.is_modified(buf));
        host.wipe_buffer(buf);
        assert!(!host.is_buffer_valid(buf));
        assert_eq!(host.buffer_name(buf), None);
    }
}
