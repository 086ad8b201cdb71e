//! Core pipeline: load a relationship sheet, build the graph, lay it out, render it.

pub mod config;
pub mod graph;
pub mod layout;
pub mod loader;
pub mod models;
pub mod render;
