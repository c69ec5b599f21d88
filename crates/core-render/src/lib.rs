//! Breadcrumb rendering pipeline: builders -> truncation -> assembly -> paint.
//!
//! One render pass for one surface runs these stages to completion:
//! 1. `builders` turn the buffer path and the context provider's nodes into
//!    segments, registering click actions in the shared [`ActionStore`].
//! 2. `truncate` collapses segments into a single ellipsis until the line
//!    fits the surface width, never touching the basename.
//! 3. `assemble` joins the survivors with padded separators into a
//!    `StyledLine`.
//! 4. `paint` (terminal hosts only) maps style tags through a [`StyleMap`]
//!    and emits crossterm commands.
//!
//! Invariants:
//! - All widths come from `core_text`; byte lengths never reach layout.
//! - `occupied_width` and the assembled line agree cell for cell, so the
//!   truncation budget is exactly what the painter will draw.
//! - Every stage is pure apart from action registration; re-running a pass
//!   on unchanged inputs yields the same line.

pub mod assemble;
pub mod builders;
pub mod paint;
pub mod path;
pub mod segment;
pub mod store;
pub mod theme;
pub mod truncate;

pub use assemble::{Chrome, LEAD_PAD, assemble, occupied_width};
pub use builders::{BufferSnapshot, basename_segment, context_segments, dirname_segments};
pub use paint::paint;
pub use path::apply_modifiers;
pub use segment::{Icon, Segment};
pub use store::{ActionFn, ActionStore, jump_to};
pub use theme::{BuiltinThemes, Highlight, StyleMap, ThemeResolver};
pub use truncate::{Budget, SEPARATOR_PADDING, TruncateOutcome, truncate};
