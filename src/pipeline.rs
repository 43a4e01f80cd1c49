use std::path::Path;

use crate::{
    composite::composite,
    encode::write_png,
    foundation::{core::SheetCanvas, error::SheetResult},
    layout::{DEFAULT_COLUMNS, Layout, compute_layout},
    load::load_frames,
};

/// Knobs for one sheet build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SheetOpts {
    /// Cells per row.
    pub columns: u32,
}

impl Default for SheetOpts {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
        }
    }
}

/// A finished sheet: its grid plus the composited pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpriteSheet {
    pub layout: Layout,
    pub frame_count: usize,
    pub canvas: SheetCanvas,
}

/// Load every input, lay the frames out and composite them. Nothing is written.
#[tracing::instrument(skip(paths), fields(inputs = paths.len()))]
pub fn build_sheet<P: AsRef<Path>>(paths: &[P], opts: SheetOpts) -> SheetResult<SpriteSheet> {
    let frames = load_frames(paths)?;
    let layout = compute_layout(&frames, opts.columns)?;
    let canvas = composite(&frames, &layout)?;
    Ok(SpriteSheet {
        layout,
        frame_count: frames.len(),
        canvas,
    })
}

/// [`build_sheet`] followed by writing the PNG to `out`.
pub fn stitch<P: AsRef<Path>>(paths: &[P], out: &Path, opts: SheetOpts) -> SheetResult<SpriteSheet> {
    let sheet = build_sheet(paths, opts)?;
    write_png(&sheet.canvas, out)?;
    Ok(sheet)
}
