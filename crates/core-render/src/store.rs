//! Action registry shared by every surface.
//!
//! Actions are stored in an arena keyed by `ActionId` and tagged with the
//! `(surface, generation)` pair that created them. Rebuilding a surface calls
//! `retire`, which bumps the surface's generation and drops every action the
//! surface owned, so a click on a line drawn by an earlier pass can never reach
//! a callback whose target position may have moved.
//!
//! Ordering rule: `retire(surface)` must precede the builders' `register`
//! calls for the same surface within one render pass. Registration and
//! retirement happen on the main loop only.

use ahash::AHashMap;
use core_model::{ActionId, EditorHost, MouseButton, Position, WindowId};
use tracing::{debug, trace};

/// Callback invoked with the host and the trigger button.
pub type ActionFn = Box<dyn Fn(&mut dyn EditorHost, MouseButton)>;

struct Entry {
    surface: WindowId,
    generation: u64,
    callback: ActionFn,
}

#[derive(Default)]
pub struct ActionStore {
    next_id: u64,
    entries: AHashMap<ActionId, Entry>,
    generations: AHashMap<WindowId, u64>,
}

impl std::fmt::Debug for ActionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionStore")
            .field("live", &self.entries.len())
            .field("surfaces", &self.generations.len())
            .finish()
    }
}

impl ActionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current generation of `surface` (0 before its first retirement).
    pub fn generation(&self, surface: WindowId) -> u64 {
        self.generations.get(&surface).copied().unwrap_or(0)
    }

    pub fn register<F>(&mut self, surface: WindowId, callback: F) -> ActionId
    where
        F: Fn(&mut dyn EditorHost, MouseButton) + 'static,
    {
        self.next_id += 1;
        let id = ActionId(self.next_id);
        let generation = self.generation(surface);
        self.entries.insert(
            id,
            Entry {
                surface,
                generation,
                callback: Box::new(callback),
            },
        );
        trace!(target: "surface.actions", %surface, %id, generation, "action_registered");
        id
    }

    /// Drop every action owned by `surface` and start a new generation.
    /// Returns how many actions were removed.
    pub fn retire(&mut self, surface: WindowId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, e| e.surface != surface);
        let removed = before - self.entries.len();
        let generation = self.generations.entry(surface).or_insert(0);
        *generation += 1;
        trace!(target: "surface.actions", %surface, removed, generation = *generation, "actions_retired");
        removed
    }

    /// Drop a single action, e.g. one whose segment was truncated away.
    /// Returns false when the id was not live.
    pub fn remove(&mut self, id: ActionId) -> bool {
        let removed = self.entries.remove(&id).is_some();
        if removed {
            trace!(target: "surface.actions", %id, "action_removed");
        }
        removed
    }

    /// Retire and forget the surface entirely (window closed).
    pub fn forget(&mut self, surface: WindowId) -> usize {
        let removed = self.retire(surface);
        self.generations.remove(&surface);
        removed
    }

    /// Run the action `id`. Returns false when the id is unknown (stale or never registered).
    pub fn dispatch(&self, id: ActionId, host: &mut dyn EditorHost, button: MouseButton) -> bool {
        let Some(entry) = self.entries.get(&id) else {
            debug!(target: "surface.actions", %id, "dispatch_unknown_action");
            return false;
        };
        debug_assert_eq!(entry.generation, self.generation(entry.surface));
        trace!(target: "surface.actions", %id, surface = %entry.surface, ?button, "dispatch");
        (entry.callback)(host, button);
        true
    }

    /// Live action ids of `surface`, in registration order.
    pub fn live(&self, surface: WindowId) -> Vec<ActionId> {
        let mut ids: Vec<ActionId> = self
            .entries
            .iter()
            .filter(|(_, e)| e.surface == surface)
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Action that, on the primary trigger, focuses `window` and moves its cursor
/// to `position`. Other buttons do nothing.
pub fn jump_to(
    window: WindowId,
    position: Position,
) -> impl Fn(&mut dyn EditorHost, MouseButton) + 'static {
    move |host: &mut dyn EditorHost, button: MouseButton| {
        if !button.is_primary() {
            return;
        }
        let result = host
            .focus_window(window)
            .and_then(|()| host.set_cursor(window, position));
        if let Err(e) = result {
            debug!(target: "surface.actions", %window, %position, error = %e, "jump_failed");
        }
    }
}
