mod caret;
mod config;
mod core;
mod document;
mod error;
mod keymap;
mod palette;
mod registry;
mod surface;

pub use crate::caret::*;
pub use crate::config::*;
pub use crate::core::*;
pub use crate::document::*;
pub use crate::error::*;
pub use crate::keymap::*;
pub use crate::palette::*;
pub use crate::registry::*;
pub use crate::surface::*;
