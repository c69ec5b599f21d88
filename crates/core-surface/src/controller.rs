use crate::visibility::Visibility;
use core_config::Config;
use core_events::{EditorEvent, QueueMetricsSnapshot, RenderTask, TaskQueue};
use core_model::{ActionId, EditorHost, MouseButton, StyledLine, SurfaceDisplay, WindowId};
use core_provider::{ContextProvider, IconProvider};
use core_render::{
    ActionStore, Budget, BufferSnapshot, Chrome, Segment, assemble, basename_segment, context_segments,
    dirname_segments, occupied_width, truncate,
};
use core_text::str_width;
use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::{debug, trace};

/// Per-surface breadcrumb state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceMode {
    /// Not shown: ineligible window/buffer, or never rendered.
    Hidden,
    Rendered,
    /// Eligible, but global visibility is off.
    Suspended,
}

#[derive(Debug)]
struct SurfaceState {
    mode: SurfaceMode,
    /// Display content found on the surface before the breadcrumb took it.
    previous: SurfaceDisplay,
    line: Option<StyledLine>,
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self {
            mode: SurfaceMode::Hidden,
            previous: SurfaceDisplay::default(),
            line: None,
        }
    }
}

pub struct SurfaceController {
    config: Rc<Config>,
    visibility: Rc<Visibility>,
    context: Box<dyn ContextProvider>,
    icons: Box<dyn IconProvider>,
    actions: ActionStore,
    queue: TaskQueue<RenderTask>,
    surfaces: BTreeMap<WindowId, SurfaceState>,
}

impl std::fmt::Debug for SurfaceController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceController")
            .field("visible", &self.visibility.is_visible())
            .field("context", &self.context.name())
            .field("icons", &self.icons.name())
            .field("actions", &self.actions)
            .field("pending", &self.queue.len())
            .field("surfaces", &self.surfaces.len())
            .finish()
    }
}

impl SurfaceController {
    pub fn new(
        config: Rc<Config>,
        visibility: Rc<Visibility>,
        context: Box<dyn ContextProvider>,
        icons: Box<dyn IconProvider>,
    ) -> Self {
        Self {
            config,
            visibility,
            context,
            icons,
            actions: ActionStore::new(),
            queue: TaskQueue::new(),
            surfaces: BTreeMap::new(),
        }
    }

    pub fn visibility(&self) -> &Rc<Visibility> {
        &self.visibility
    }

    pub fn actions(&self) -> &ActionStore {
        &self.actions
    }

    pub fn state(&self, window: WindowId) -> Option<SurfaceMode> {
        self.surfaces.get(&window).map(|s| s.mode)
    }

    /// Line shown on `window` whose actions are live, if the breadcrumb owns it.
    pub fn line(&self, window: WindowId) -> Option<&StyledLine> {
        self.surfaces.get(&window).and_then(|s| s.line.as_ref())
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn queue_metrics(&self) -> QueueMetricsSnapshot {
        self.queue.metrics_snapshot()
    }

    /// React to an editor event by deferring a render. Window closure is the
    /// exception: its actions and state are dropped immediately.
    pub fn handle_event(&mut self, host: &dyn EditorHost, event: EditorEvent) {
        trace!(target: "surface", ?event, "event");
        match event {
            EditorEvent::BufferEntered { window, buffer } => {
                self.queue.post(RenderTask { window, buffer });
            }
            EditorEvent::WindowResized { window } | EditorEvent::ContextUpdated { window } => {
                self.schedule(host, window);
            }
            EditorEvent::ModifiedChanged { buffer } => {
                for window in host.windows() {
                    if host.window_buffer(window) == Some(buffer) {
                        self.queue.post(RenderTask { window, buffer });
                    }
                }
            }
            EditorEvent::WindowClosed { window } => {
                let removed = self.actions.forget(window);
                self.surfaces.remove(&window);
                debug!(target: "surface", %window, removed, "surface_dropped");
            }
        }
    }

    fn schedule(&mut self, host: &dyn EditorHost, window: WindowId) {
        if let Some(buffer) = host.window_buffer(window) {
            self.queue.post(RenderTask { window, buffer });
        }
    }

    fn schedule_all(&mut self, host: &dyn EditorHost) {
        for window in host.windows() {
            self.schedule(host, window);
        }
    }

    /// Run every task queued before this call. Stale tasks (window or buffer
    /// gone, or the window now shows another buffer) are skipped. Returns the
    /// number of tasks that ran.
    pub fn run_pending(&mut self, host: &mut dyn EditorHost) -> usize {
        let mut ran = 0usize;
        for task in self.queue.take_ready() {
            let current = host.is_window_valid(task.window)
                && host.is_buffer_valid(task.buffer)
                && host.window_buffer(task.window) == Some(task.buffer);
            if !current {
                self.queue.record_skipped();
                trace!(target: "surface", window = %task.window, buffer = %task.buffer, "stale_task_skipped");
                continue;
            }
            self.update(host, task.window);
            ran += 1;
        }
        ran
    }

    pub fn show(&mut self, host: &dyn EditorHost) {
        self.visibility.set(true);
        debug!(target: "surface", "show");
        self.schedule_all(host);
    }

    pub fn hide(&mut self, host: &dyn EditorHost) {
        self.visibility.set(false);
        debug!(target: "surface", "hide");
        self.schedule_all(host);
    }

    /// Returns the new visibility.
    pub fn toggle(&mut self, host: &dyn EditorHost) -> bool {
        let visible = self.visibility.toggle();
        debug!(target: "surface", visible, "toggle");
        self.schedule_all(host);
        visible
    }

    fn is_eligible(&self, host: &dyn EditorHost, window: WindowId) -> bool {
        let Some(buffer) = host.window_buffer(window) else {
            return false;
        };
        !host.is_floating(window)
            && self.config.is_buftype_included(host.buffer_type(buffer).unwrap_or_default())
            && !self.config.is_filetype_excluded(host.file_type(buffer).unwrap_or_default())
    }

    /// Re-evaluate one surface synchronously and return its resulting mode.
    pub fn update(&mut self, host: &mut dyn EditorHost, window: WindowId) -> SurfaceMode {
        if !host.is_window_valid(window) {
            self.actions.forget(window);
            self.surfaces.remove(&window);
            return SurfaceMode::Hidden;
        }
        if !self.is_eligible(host, window) {
            return self.release(host, window, SurfaceMode::Hidden);
        }
        if !self.visibility.is_visible() {
            return self.release(host, window, SurfaceMode::Suspended);
        }

        self.actions.retire(window);
        let Some((line, width)) = self.build(host, window) else {
            // The old line stays on screen but its actions are gone.
            return self.surfaces.get_mut(&window).map_or(SurfaceMode::Hidden, |s| {
                s.line = None;
                s.mode
            });
        };

        let state = self.surfaces.entry(window).or_default();
        if let Some(display @ SurfaceDisplay::Plain(_)) = host.display(window) {
            state.previous = display;
        }
        if let Err(e) = host.set_display(window, SurfaceDisplay::Breadcrumb(line.clone())) {
            debug!(target: "surface", %window, error = %e, "set_display_failed");
            return state.mode;
        }
        debug!(
            target: "surface",
            %window,
            width,
            spans = line.spans.len(),
            actions = line.actions().len(),
            "rendered"
        );
        state.line = Some(line);
        state.mode = SurfaceMode::Rendered;
        SurfaceMode::Rendered
    }

    /// Give the surface back: retire actions and, if the breadcrumb owned the
    /// display, restore what was there before.
    fn release(&mut self, host: &mut dyn EditorHost, window: WindowId, mode: SurfaceMode) -> SurfaceMode {
        self.actions.retire(window);
        let state = self.surfaces.entry(window).or_default();
        if state.mode == SurfaceMode::Rendered {
            if let Err(e) = host.set_display(window, state.previous.clone()) {
                debug!(target: "surface", %window, error = %e, "restore_failed");
            }
        }
        state.line = None;
        if state.mode != mode {
            debug!(target: "surface", %window, from = ?state.mode, to = ?mode, "transition");
        }
        state.mode = mode;
        mode
    }

    /// Builders, truncation and assembly for one surface. `None` aborts the
    /// render without touching the displayed line.
    fn build(&mut self, host: &dyn EditorHost, window: WindowId) -> Option<(StyledLine, usize)> {
        let buffer = host.window_buffer(window)?;
        let width = host.window_width(window)?;
        let path_context = host.path_context();
        let snapshot = BufferSnapshot {
            window,
            buffer,
            name: host.buffer_name(buffer).unwrap_or_default(),
            file_type: host.file_type(buffer).unwrap_or_default(),
            modified: host.is_modified(buffer),
            path_context: &path_context,
        };
        let config = &self.config.file;

        let mut segments: Vec<Segment> = Vec::new();
        if config.show_dirname {
            segments.extend(dirname_segments(&self.config, &snapshot));
        }
        let mut protected = None;
        if config.show_basename {
            let Some(basename) = basename_segment(&self.config, &snapshot, self.icons.as_ref(), &mut self.actions)
            else {
                debug!(target: "surface", %window, %buffer, "empty_basename_render_aborted");
                return None;
            };
            protected = Some(segments.len());
            segments.push(basename);
        }
        if config.show_context {
            segments.extend(context_segments(
                &self.config,
                &snapshot,
                self.context.as_ref(),
                &mut self.actions,
            ));
        }

        let symbols = self.config.symbols();
        let chrome = Chrome {
            separator: &symbols.separator,
            lead: &config.lead_custom_section,
            custom: &config.custom_section,
        };
        let budget = Budget {
            occupied: occupied_width(&segments, &chrome),
            available: width,
            separator_width: str_width(&symbols.separator),
        };
        truncate(&mut segments, budget, protected, &symbols.ellipsis);
        let kept: Vec<ActionId> = segments.iter().filter_map(Segment::action).collect();
        let mut pruned = 0usize;
        for id in self.actions.live(window) {
            if !kept.contains(&id) && self.actions.remove(id) {
                pruned += 1;
            }
        }
        if pruned > 0 {
            trace!(target: "surface.actions", %window, pruned, "truncated_actions_removed");
        }
        let Some(line) = assemble(&segments, &chrome) else {
            debug!(target: "surface", %window, "nothing_to_render");
            return None;
        };
        Some((line, width))
    }

    /// Run the action under `column` of the surface's line. Returns whether an
    /// action was hit.
    pub fn click(&mut self, host: &mut dyn EditorHost, window: WindowId, column: usize, button: MouseButton) -> bool {
        let Some(id) = self.line(window).and_then(|line| line.action_at(column)) else {
            trace!(target: "surface.actions", %window, column, "click_missed");
            return false;
        };
        self.actions.dispatch(id, host, button)
    }

    pub fn dispatch(&mut self, host: &mut dyn EditorHost, id: ActionId, button: MouseButton) -> bool {
        self.actions.dispatch(id, host, button)
    }

    /// Invoke the `index`-th clickable entry of the surface's line with the
    /// primary trigger. Negative indices count from the end (`-1` is the last).
    pub fn navigate(&mut self, host: &mut dyn EditorHost, window: WindowId, index: isize) -> bool {
        let Some(actions) = self.line(window).map(StyledLine::actions) else {
            return false;
        };
        let resolved = if index < 0 {
            actions.len().checked_sub(index.unsigned_abs())
        } else {
            Some(index.unsigned_abs()).filter(|i| *i < actions.len())
        };
        let Some(id) = resolved.map(|i| actions[i]) else {
            trace!(target: "surface.actions", %window, index, available = actions.len(), "navigate_out_of_range");
            return false;
        };
        self.actions.dispatch(id, host, MouseButton::PRIMARY)
    }
}
