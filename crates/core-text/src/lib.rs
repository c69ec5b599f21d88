//! Text measurement shared by every breadcrumb component.

pub mod width;

pub use width::{clip_to_width, egc_width, str_width};
