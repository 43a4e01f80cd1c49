use crate::foundation::error::{SheetError, SheetResult};

/// Bounding rectangle of a decoded frame: its own offset plus its size.
///
/// PNG frames always sit at `(0, 0)`. GIF sub-images keep the offset they were stored with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FrameRect {
    /// Horizontal offset of the frame's top-left corner.
    pub x: u32,
    /// Vertical offset of the frame's top-left corner.
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FrameRect {
    /// Rectangle anchored at the origin.
    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// One decoded still image: a whole PNG or one stored sub-image of a GIF.
///
/// Pixels are straight (non-premultiplied) RGBA8, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterFrame {
    rect: FrameRect,
    rgba8: Vec<u8>,
}

impl RasterFrame {
    /// Wrap a pixel buffer, checking it holds exactly `width * height` RGBA8 pixels.
    pub fn new(rect: FrameRect, rgba8: Vec<u8>) -> SheetResult<Self> {
        let expected = rgba8_len(rect.width, rect.height)?;
        if rgba8.len() != expected {
            return Err(SheetError::layout(format!(
                "frame {}x{} expects {expected} rgba8 bytes, got {}",
                rect.width,
                rect.height,
                rgba8.len()
            )));
        }
        Ok(Self { rect, rgba8 })
    }

    pub fn rect(&self) -> FrameRect {
        self.rect
    }

    pub fn width(&self) -> u32 {
        self.rect.width
    }

    pub fn height(&self) -> u32 {
        self.rect.height
    }

    pub fn rgba8(&self) -> &[u8] {
        &self.rgba8
    }

    /// Pixel at frame-local coordinates.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.rect.width || y >= self.rect.height {
            return None;
        }
        let i = (y as usize * self.rect.width as usize + x as usize) * 4;
        let px = &self.rgba8[i..i + 4];
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Uniform cell size of the sheet: per-axis maximum of all frame sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellSize {
    pub width: u32,
    pub height: u32,
}

/// Output pixel buffer, straight RGBA8, initialised fully transparent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetCanvas {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl SheetCanvas {
    pub fn transparent(width: u32, height: u32) -> SheetResult<Self> {
        Ok(Self {
            width,
            height,
            data: vec![0; rgba8_len(width, height)?],
        })
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        let px = &self.data[i..i + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    pub(crate) fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut [u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some(&mut self.data[i..i + 4])
    }

    /// Return `true` when every pixel inside the given region has zero alpha.
    pub fn is_transparent_in(&self, x: u32, y: u32, width: u32, height: u32) -> bool {
        (y..y.saturating_add(height)).all(|py| {
            (x..x.saturating_add(width))
                .all(|px| self.pixel(px, py).is_none_or(|p| p[3] == 0))
        })
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }
}

fn rgba8_len(width: u32, height: u32) -> SheetResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| SheetError::layout(format!("{width}x{height} rgba8 buffer overflows")))
}
