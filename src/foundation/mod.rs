/// Geometry and pixel-buffer types shared by every pipeline stage.
pub mod core;
/// Error type and result alias.
pub mod error;
