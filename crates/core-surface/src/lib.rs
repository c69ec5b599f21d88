//! Surface controller: decides, per editor window, whether a breadcrumb is
//! shown and keeps it current.
//!
//! State machine per surface:
//!
//! ```text
//!            eligible + visible
//!   Hidden ----------------------> Rendered <--+
//!     ^  ^                          |   |      | any relevant event
//!     |  +---- ineligible ----------+   +------+
//!     |                                 |
//!     +-- ineligible -- Suspended <-----+ visibility off
//! ```
//!
//! * Eligibility: the window is not floating, its buffer kind is in
//!   `include_buftypes` and its file type is not in `exclude_filetypes`.
//! * Leaving `Rendered` restores whatever plain content the surface held
//!   before the breadcrumb took it, and retires the surface's actions.
//! * Every rebuild retires the surface's actions before the builders register
//!   new ones.
//!
//! Events never render inline. `handle_event` posts a `RenderTask`; the host
//! calls `run_pending` one tick later and each task re-validates its window
//! and buffer before running. Tasks are neither coalesced nor cancelled, so a
//! surface may be rebuilt redundantly; each rebuild reads current state.

mod controller;
mod visibility;

pub use controller::{SurfaceController, SurfaceMode};
pub use visibility::Visibility;
