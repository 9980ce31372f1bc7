//! Restricted BMP codec: 40-byte info header, 24 bits per pixel, BI_RGB.
//!
//! Decoding reads rows in stored order and does not flip for the height sign.
//! In-place saving rewrites only the pixel payload; headers and row padding
//! bytes on disk are never touched.

mod decode;
mod encode;
mod header;

pub use decode::{DecodedBmp, decode};
pub use encode::{encode, headers_for, write_pixels};
pub use header::{
    BMP_MAGIC, FILE_HEADER_LEN, FileHeader, HEADERS_LEN, INFO_HEADER_LEN, InfoHeader, row_padding,
};
