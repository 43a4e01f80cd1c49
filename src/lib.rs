//! Packs still PNGs and animated GIF frames into one fixed-column sprite sheet PNG.
//!
//! The pipeline is strictly linear:
//!
//! - [`load_frames`] decodes every input into [`RasterFrame`]s, flattening GIFs
//! - [`compute_layout`] sizes the cells and the grid
//! - [`composite`] draws each frame into its cell on a [`SheetCanvas`]
//! - [`write_png`] encodes the canvas
//!
//! [`build_sheet`] and [`stitch`] run those stages back to back.
#![forbid(unsafe_code)]

mod foundation;

pub mod composite;
pub mod encode;
pub mod layout;
pub mod load;
pub mod pipeline;

pub use crate::foundation::core::{CellSize, FrameRect, RasterFrame, SheetCanvas};
pub use crate::foundation::error::{SheetError, SheetResult};

pub use crate::composite::{blit_over, composite, over};
pub use crate::encode::{encode_png, write_png};
pub use crate::layout::{DEFAULT_COLUMNS, Layout, compute_layout};
pub use crate::load::{InputKind, decode_gif_frames, decode_png_frame, load_frames, load_path};
pub use crate::pipeline::{SheetOpts, SpriteSheet, build_sheet, stitch};
