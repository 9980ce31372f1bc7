use std::path::PathBuf;

use enough::StopReason;

/// Errors from loading, filtering, and saving BMP images.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    #[error("could not open {}: {source}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a BMP file (magic bytes are not \"BM\")")]
    NotBmp,

    #[error("unsupported info header size {0} (only the 40-byte BITMAPINFOHEADER is supported)")]
    UnsupportedVersion(u32),

    #[error("unsupported bit depth {0} (only 24 bits per pixel is supported)")]
    UnsupportedDepth(u16),

    #[error("unsupported compression method {0} (only uncompressed BI_RGB is supported)")]
    UnsupportedCompression(u32),

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BmpError {
    fn from(r: StopReason) -> Self {
        BmpError::Cancelled(r)
    }
}
