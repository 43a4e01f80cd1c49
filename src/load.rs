use std::{
    fs::File,
    io::{BufRead, BufReader, Read, Seek},
    path::Path,
};

use crate::foundation::{
    core::{FrameRect, RasterFrame},
    error::{SheetError, SheetResult},
};

/// Input formats the loader understands, picked by file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    /// Single still image.
    Png,
    /// Possibly animated; every stored sub-image becomes one frame.
    Gif,
}

impl InputKind {
    /// Case-sensitive match on `.png` / `.gif`.
    pub fn from_path(path: &Path) -> SheetResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("png") => Ok(Self::Png),
            Some("gif") => Ok(Self::Gif),
            _ => {
                let ext = path
                    .extension()
                    .map(|e| format!(".{}", e.to_string_lossy()))
                    .unwrap_or_default();
                Err(SheetError::unsupported_format(path, ext))
            }
        }
    }
}

/// Decode every input in order and concatenate their frames.
///
/// The first unreadable or undecodable input aborts the whole load.
#[tracing::instrument(skip_all, fields(inputs = paths.len()))]
pub fn load_frames<P: AsRef<Path>>(paths: &[P]) -> SheetResult<Vec<RasterFrame>> {
    let mut frames = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let loaded = load_path(path)?;
        frames.extend(loaded);
    }
    tracing::debug!(frames = frames.len(), "loaded frames");
    Ok(frames)
}

/// Decode one input file. The handle is dropped before this returns.
pub fn load_path(path: &Path) -> SheetResult<Vec<RasterFrame>> {
    let kind = InputKind::from_path(path)?;
    let file = File::open(path).map_err(|e| SheetError::io(path, e))?;
    let reader = BufReader::new(file);

    let frames = match kind {
        InputKind::Png => vec![decode_png_frame(reader, path)?],
        InputKind::Gif => decode_gif_frames(reader, path)?,
    };
    tracing::debug!(path = %path.display(), ?kind, frames = frames.len(), "decoded input");
    Ok(frames)
}

/// Decode a PNG stream into a single frame anchored at the origin.
///
/// `path` only labels errors.
pub fn decode_png_frame<R: BufRead + Seek>(reader: R, path: &Path) -> SheetResult<RasterFrame> {
    let img =
        image::load(reader, image::ImageFormat::Png).map_err(|e| SheetError::decode(path, e))?;
    let rgba = img.into_rgba8();
    let (width, height) = rgba.dimensions();
    RasterFrame::new(FrameRect::sized(width, height), rgba.into_raw())
}

/// Decode every stored GIF sub-image, in stored order, keeping each one's own rectangle.
///
/// No disposal compositing happens here; a frame is exactly what the file stored.
pub fn decode_gif_frames<R: Read>(reader: R, path: &Path) -> SheetResult<Vec<RasterFrame>> {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::RGBA);
    let mut decoder = options
        .read_info(reader)
        .map_err(|e| SheetError::decode(path, e))?;

    let mut frames = Vec::new();
    while let Some(frame) = decoder
        .read_next_frame()
        .map_err(|e| SheetError::decode(path, e))?
    {
        let rect = FrameRect {
            x: u32::from(frame.left),
            y: u32::from(frame.top),
            width: u32::from(frame.width),
            height: u32::from(frame.height),
        };
        frames.push(RasterFrame::new(rect, frame.buffer.to_vec())?);
    }
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn png_bytes(width: u32, height: u32, px: [u8; 4]) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba(px));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    // (left, top, width, height, rgba)
    fn gif_bytes(screen: (u16, u16), frames: &[(u16, u16, u16, u16, [u8; 4])]) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut enc = gif::Encoder::new(&mut buf, screen.0, screen.1, &[]).unwrap();
            for &(left, top, w, h, px) in frames {
                let mut pixels: Vec<u8> = std::iter::repeat_n(px, usize::from(w) * usize::from(h))
                    .flatten()
                    .collect();
                let mut frame = gif::Frame::from_rgba_speed(w, h, &mut pixels, 10);
                frame.left = left;
                frame.top = top;
                enc.write_frame(&frame).unwrap();
            }
        }
        buf
    }

    #[test]
    fn extension_dispatch_is_case_sensitive() {
        assert_eq!(
            InputKind::from_path(Path::new("a/b.png")).unwrap(),
            InputKind::Png
        );
        assert_eq!(
            InputKind::from_path(Path::new("walk.gif")).unwrap(),
            InputKind::Gif
        );

        for bad in ["a.PNG", "a.Gif", "a.jpg", "noext"] {
            let err = InputKind::from_path(Path::new(bad)).unwrap_err();
            assert!(matches!(err, SheetError::UnsupportedFormat { .. }), "{bad}");
        }
    }

    #[test]
    fn unsupported_format_names_extension() {
        let err = InputKind::from_path(Path::new("sprite.bmp")).unwrap_err();
        assert!(err.to_string().contains("bad ext '.bmp'"));
    }

    #[test]
    fn png_decodes_to_single_origin_frame() {
        let bytes = png_bytes(3, 2, [10, 20, 30, 255]);
        let frame = decode_png_frame(Cursor::new(bytes), Path::new("mem.png")).unwrap();
        assert_eq!(frame.rect(), FrameRect::sized(3, 2));
        assert_eq!(frame.pixel(2, 1), Some([10, 20, 30, 255]));
    }

    #[test]
    fn png_decode_error_is_decode_variant() {
        let err = decode_png_frame(Cursor::new(b"not a png".to_vec()), Path::new("bad.png"))
            .unwrap_err();
        assert!(matches!(err, SheetError::Decode { .. }), "{err}");
    }

    #[test]
    fn gif_keeps_every_frame_in_order_with_native_rects() {
        let bytes = gif_bytes(
            (8, 8),
            &[
                (0, 0, 8, 8, [255, 0, 0, 255]),
                (2, 3, 4, 2, [0, 255, 0, 255]),
                (1, 0, 3, 5, [0, 0, 255, 255]),
            ],
        );
        let frames = decode_gif_frames(Cursor::new(bytes), Path::new("mem.gif")).unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].rect(), FrameRect::sized(8, 8));
        assert_eq!(
            frames[1].rect(),
            FrameRect {
                x: 2,
                y: 3,
                width: 4,
                height: 2
            }
        );
        assert_eq!(
            frames[2].rect(),
            FrameRect {
                x: 1,
                y: 0,
                width: 3,
                height: 5
            }
        );
        assert_eq!(frames[1].pixel(0, 0), Some([0, 255, 0, 255]));
        assert_eq!(frames[2].pixel(2, 4), Some([0, 0, 255, 255]));
    }

    #[test]
    fn gif_decode_error_is_decode_variant() {
        let err = decode_gif_frames(Cursor::new(b"GIF89a".to_vec()), Path::new("short.gif"))
            .unwrap_err();
        assert!(matches!(err, SheetError::Decode { .. }), "{err}");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_path(Path::new("definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, SheetError::Io { .. }), "{err}");
    }

    #[test]
    fn bad_extension_is_rejected_before_open() {
        // The file does not exist; the extension check must win over the io error.
        let err = load_path(Path::new("definitely/not/here.tga")).unwrap_err();
        assert!(matches!(err, SheetError::UnsupportedFormat { .. }), "{err}");
    }
}
