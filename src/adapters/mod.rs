// Adapters layer: concrete implementations for external systems (files, http, output).

pub mod image_source;
pub mod inference;
pub mod presentation;
