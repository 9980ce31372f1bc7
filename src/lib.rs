//! # bmpfilter
//!
//! Load an uncompressed 24-bit BMP, run pixel filters over it, and write the
//! result back into the same file.
//!
//! ## Supported files
//!
//! - `BM` magic, 40-byte BITMAPINFOHEADER, 24 bits per pixel, no compression
//! - Rows are kept in stored order; the height sign is not used to flip them
//!
//! ## Filters
//!
//! - Grayscale (truncated channel mean)
//! - Sepia
//! - Horizontal reflection
//! - Box blur, radius 20, computed with a summed-area table
//! - Sobel edge detection over a zero-padded grayscale copy
//! - Revert to the pixels as loaded
//!
//! ## Non-Goals
//!
//! - Palettes, RLE, bitfields, or any depth other than 24
//! - Any image format other than BMP
//!
//! ## Usage
//!
//! ```no_run
//! use bmpfilter::{FilterKind, ImageSession};
//!
//! let mut session = ImageSession::load("photo.bmp")?;
//! session.apply(FilterKind::Grayscale);
//! session.apply(FilterKind::Blur);
//! session.save()?;
//! # Ok::<(), bmpfilter::BmpError>(())
//! ```

#![forbid(unsafe_code)]

mod error;
mod grid;
mod limits;
mod pixel;
mod session;

pub mod bmp;
pub mod filter;

// Re-exports
pub use enough::{Stop, Unstoppable};
pub use error::BmpError;
pub use filter::FilterKind;
pub use grid::PixelGrid;
pub use limits::Limits;
pub use pixel::{AccumPixel, BYTES_PER_PIXEL, Pixel};
pub use session::{ImageSession, LoadRequest};
