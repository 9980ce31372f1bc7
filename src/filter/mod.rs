//! In-place pixel filters.
//!
//! Every filter is a plain function over `&mut PixelGrid`: deterministic, no
//! hidden state, and shape-preserving. Scratch buffers live only for the call.

mod blur;
mod color;
mod edges;
mod reflect;

use core::fmt;
use core::str::FromStr;

pub use blur::{BLUR_RADIUS, box_blur, box_blur_with_radius};
pub use color::{grayscale, sepia};
pub use edges::sobel_edges;
pub use reflect::reflect;

use crate::grid::PixelGrid;

/// Overwrite `grid` with the as-loaded snapshot.
///
/// # Panics
///
/// If the shapes differ.
pub fn revert(grid: &mut PixelGrid, original: &PixelGrid) {
    grid.copy_from(original);
}

/// The filters a session can apply.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Grayscale,
    Sepia,
    Reflect,
    Blur,
    EdgeDetect,
    Revert,
}

impl FilterKind {
    pub const ALL: [FilterKind; 6] = [
        FilterKind::Grayscale,
        FilterKind::Sepia,
        FilterKind::Reflect,
        FilterKind::Blur,
        FilterKind::EdgeDetect,
        FilterKind::Revert,
    ];

    /// Short name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Grayscale => "grayscale",
            Self::Sepia => "sepia",
            Self::Reflect => "reflect",
            Self::Blur => "blur",
            Self::EdgeDetect => "edges",
            Self::Revert => "revert",
        }
    }

    /// Whether this filter changes the image (everything but revert).
    pub fn is_edit(self) -> bool {
        self != Self::Revert
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown filter name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter {0:?} (expected one of: grayscale, sepia, reflect, blur, edges, revert)")]
pub struct ParseFilterError(String);

impl FromStr for FilterKind {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grayscale" | "greyscale" | "gray" | "grey" => Ok(Self::Grayscale),
            "sepia" => Ok(Self::Sepia),
            "reflect" | "mirror" => Ok(Self::Reflect),
            "blur" => Ok(Self::Blur),
            "edges" | "edge" | "sobel" => Ok(Self::EdgeDetect),
            "revert" => Ok(Self::Revert),
            _ => Err(ParseFilterError(s.to_owned())),
        }
    }
}

/// Run one filter on `grid`. `original` is only read by [`FilterKind::Revert`].
pub fn apply(kind: FilterKind, grid: &mut PixelGrid, original: &PixelGrid) {
    log::trace!("applying {kind} to {}x{}", grid.width(), grid.height());
    match kind {
        FilterKind::Grayscale => grayscale(grid),
        FilterKind::Sepia => sepia(grid),
        FilterKind::Reflect => reflect(grid),
        FilterKind::Blur => box_blur(grid),
        FilterKind::EdgeDetect => sobel_edges(grid),
        FilterKind::Revert => revert(grid, original),
    }
}
