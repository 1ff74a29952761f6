//! Tree rendering for module graphs.
//!
//! This module provides [`render`], the depth-bounded, cycle-safe
//! pretty printer, and [`RenderOptions`] for configuring it.

mod tree;

pub use tree::{render, RenderOptions};
