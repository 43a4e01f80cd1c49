use crate::{
    foundation::{
        core::{RasterFrame, SheetCanvas},
        error::SheetResult,
    },
    layout::Layout,
};

pub type Rgba8 = [u8; 4];

/// Straight-alpha source-over.
///
/// Transparent `src` keeps `dst`, opaque `src` replaces it, and a transparent `dst`
/// takes `src` unchanged.
pub fn over(dst: Rgba8, src: Rgba8) -> Rgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 || dst[3] == 0 {
        return src;
    }

    let inv = 255u16 - u16::from(sa);
    let da = mul_div255(u16::from(dst[3]), inv);
    let out_a = add_sat_u8(sa, da);

    let mut out = [0u8; 4];
    out[3] = out_a;
    for i in 0..3 {
        // Premultiplied sum, divided back out by the result alpha.
        let num = u32::from(src[i]) * u32::from(sa) + u32::from(dst[i]) * u32::from(da);
        out[i] = ((num + u32::from(out_a) / 2) / u32::from(out_a)).min(255) as u8;
    }
    out
}

/// Draw `frame` over `canvas` with its top-left corner at `(dx, dy)`.
///
/// Pixels that land outside the canvas are dropped.
pub fn blit_over(canvas: &mut SheetCanvas, frame: &RasterFrame, dx: u32, dy: u32) {
    if frame.rect().is_empty() {
        return;
    }
    let width = frame.width() as usize;
    for (y, row) in frame.rgba8().chunks_exact(width * 4).enumerate() {
        let Some(cy) = dy.checked_add(y as u32) else {
            break;
        };
        if cy >= canvas.height {
            break;
        }
        for (x, s) in row.chunks_exact(4).enumerate() {
            let Some(cx) = dx.checked_add(x as u32) else {
                break;
            };
            let Some(d) = canvas.pixel_mut(cx, cy) else {
                break;
            };
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
    }
}

/// Allocate a transparent sheet and draw every frame into its cell, in order.
///
/// A frame lands at its cell origin shifted by its own rectangle offset, unscaled.
#[tracing::instrument(skip_all, fields(frames = frames.len()))]
pub fn composite(frames: &[RasterFrame], layout: &Layout) -> SheetResult<SheetCanvas> {
    let (width, height) = layout.sheet_size();
    let mut canvas = SheetCanvas::transparent(width, height)?;

    let (mut col, mut row) = (0u32, 0u32);
    for frame in frames {
        let rect = frame.rect();
        let dx = (col * layout.cell.width).saturating_add(rect.x);
        let dy = (row * layout.cell.height).saturating_add(rect.y);
        blit_over(&mut canvas, frame, dx, dy);

        col += 1;
        if col == layout.columns {
            col = 0;
            row += 1;
        }
    }

    tracing::debug!(width, height, "composited sheet");
    Ok(canvas)
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}
