use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use image::ImageEncoder as _;

use crate::foundation::{
    core::SheetCanvas,
    error::{SheetError, SheetResult},
};

/// Serialize `canvas` as an RGBA8 PNG into `writer`.
///
/// `path` only labels errors.
pub fn encode_png<W: Write>(canvas: &SheetCanvas, writer: W, path: &Path) -> SheetResult<()> {
    image::codecs::png::PngEncoder::new(writer)
        .write_image(
            &canvas.data,
            canvas.width,
            canvas.height,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| match e {
            image::ImageError::IoError(io) => SheetError::io(path, io),
            other => SheetError::encode(path, other),
        })
}

/// Create (or truncate) `path` and write the sheet into it as PNG.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn write_png(canvas: &SheetCanvas, path: &Path) -> SheetResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| SheetError::io(parent, e))?;
    }

    let file = File::create(path).map_err(|e| SheetError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    encode_png(canvas, &mut writer, path)?;
    writer.flush().map_err(|e| SheetError::io(path, e))?;

    tracing::debug!(width = canvas.width, height = canvas.height, "wrote png");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn encoded_png_decodes_to_same_pixels() {
        let mut canvas = SheetCanvas::transparent(2, 1).unwrap();
        canvas.data[..4].copy_from_slice(&[1, 2, 3, 255]);

        let mut buf = Vec::new();
        encode_png(&canvas, &mut buf, Path::new("mem.png")).unwrap();

        let img = image::load(Cursor::new(buf), image::ImageFormat::Png)
            .unwrap()
            .into_rgba8();
        assert_eq!(img.dimensions(), (2, 1));
        assert_eq!(img.as_raw(), &canvas.data);
    }

    #[test]
    fn unwritable_destination_is_io_error() {
        let canvas = SheetCanvas::transparent(1, 1).unwrap();
        let dir = std::env::temp_dir();
        // A directory cannot be opened as a file for writing.
        let err = write_png(&canvas, &dir).unwrap_err();
        assert!(matches!(err, SheetError::Io { .. }), "{err}");
    }
}
