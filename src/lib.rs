//! Shared library for `relgraph`
//! Spreadsheet loading, relation graph construction, planar layout and rendering.

pub mod core;
pub mod logger;
pub mod shared;

pub use crate::core::config;
pub use shared::*;
