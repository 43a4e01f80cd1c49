use crate::foundation::{
    core::{CellSize, RasterFrame},
    error::{SheetError, SheetResult},
};

/// Column count compiled into the binary.
pub const DEFAULT_COLUMNS: u32 = 8;

/// Grid geometry of a sprite sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub columns: u32,
    pub rows: u32,
    pub cell: CellSize,
}

impl Layout {
    /// Pixel offset of the cell holding frame `index`.
    pub fn cell_origin(&self, index: usize) -> (u32, u32) {
        let (col, row) = self.cell_of(index);
        (col * self.cell.width, row * self.cell.height)
    }

    /// `(column, row)` of frame `index`, filling rows left to right.
    pub fn cell_of(&self, index: usize) -> (u32, u32) {
        let columns = self.columns as usize;
        ((index % columns) as u32, (index / columns) as u32)
    }

    /// Full canvas size in pixels.
    pub fn sheet_size(&self) -> (u32, u32) {
        (
            self.columns * self.cell.width,
            self.rows * self.cell.height,
        )
    }
}

/// Size every cell to the largest frame and give each frame its own cell.
///
/// Rows round up, so a frame count that is not a multiple of `columns` gets one
/// partially filled last row instead of losing the remainder.
pub fn compute_layout(frames: &[RasterFrame], columns: u32) -> SheetResult<Layout> {
    if frames.is_empty() {
        return Err(SheetError::layout("no frames to lay out"));
    }
    if columns == 0 {
        return Err(SheetError::layout("column count must be > 0"));
    }

    let cell = CellSize {
        width: frames.iter().map(RasterFrame::width).max().unwrap_or(0),
        height: frames.iter().map(RasterFrame::height).max().unwrap_or(0),
    };
    if cell.width == 0 || cell.height == 0 {
        return Err(SheetError::layout(format!(
            "every frame is empty (cell {}x{})",
            cell.width, cell.height
        )));
    }

    let rows = u32::try_from(frames.len().div_ceil(columns as usize))
        .map_err(|_| SheetError::layout("too many frames"))?;

    let layout = Layout {
        columns,
        rows,
        cell,
    };
    if columns.checked_mul(cell.width).is_none() || rows.checked_mul(cell.height).is_none() {
        return Err(SheetError::layout(format!(
            "sheet of {columns}x{rows} cells at {}x{} overflows",
            cell.width, cell.height
        )));
    }

    tracing::debug!(
        frames = frames.len(),
        columns,
        rows,
        cell_w = cell.width,
        cell_h = cell.height,
        "computed layout"
    );
    Ok(layout)
}
