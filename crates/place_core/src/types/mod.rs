//! Core type definitions for the placement engine.

mod grid;
mod layout;

pub use grid::Grid;
pub use layout::{Device, Layout, Net, Pin, Point};
