//! Application services layer.

pub mod error;
pub mod render;
pub mod theme;
