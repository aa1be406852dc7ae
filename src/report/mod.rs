//! Report module - document assembly, rendering and export

pub mod document;
pub mod export;
pub mod render;
pub mod summary;

pub use document::*;
pub use export::*;
pub use render::*;
pub use summary::*;
