use std::path::{Path, PathBuf};

/// Result alias used throughout the crate.
pub type SheetResult<T> = Result<T, SheetError>;

/// Every failure the sprite sheet pipeline can surface.
///
/// All of them are fatal for a run; the binary reports the chain and exits non-zero.
#[derive(thiserror::Error, Debug)]
pub enum SheetError {
    /// Input file extension is neither `.gif` nor `.png` (case-sensitive).
    #[error("unsupported format: bad ext '{ext}' for '{}'", .path.display())]
    UnsupportedFormat { path: PathBuf, ext: String },

    #[error("io error: '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("decode error: '{}': {message}", .path.display())]
    Decode { path: PathBuf, message: String },

    #[error("encode error: '{}': {message}", .path.display())]
    Encode { path: PathBuf, message: String },

    #[error("layout error: {0}")]
    Layout(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SheetError {
    pub fn unsupported_format(path: impl AsRef<Path>, ext: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            path: path.as_ref().to_path_buf(),
            ext: ext.into(),
        }
    }

    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn decode(path: impl AsRef<Path>, message: impl ToString) -> Self {
        Self::Decode {
            path: path.as_ref().to_path_buf(),
            message: message.to_string(),
        }
    }

    pub fn encode(path: impl AsRef<Path>, message: impl ToString) -> Self {
        Self::Encode {
            path: path.as_ref().to_path_buf(),
            message: message.to_string(),
        }
    }

    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }
}
