//! Domain layer types: theme documents, settings maps and the media registry.

pub mod media;
pub mod settings;
pub mod theme;
