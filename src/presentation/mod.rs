//! Presentation layer: paints preview trees for people to look at.

pub mod html;
pub mod views;
