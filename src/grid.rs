//! Row-major pixel storage for one decoded image.

use imgref::ImgVec;

use crate::pixel::Pixel;

/// A `height` x `width` matrix of [`Pixel`]s in a single flat buffer.
///
/// Dimensions are fixed at construction. Indexing outside the grid panics.
#[derive(Clone, Debug)]
pub struct PixelGrid {
    img: ImgVec<Pixel>,
}

impl PartialEq for PixelGrid {
    fn eq(&self, other: &Self) -> bool {
        self.same_shape(other) && self.pixels() == other.pixels()
    }
}

impl Eq for PixelGrid {}

impl PixelGrid {
    /// Allocate a black grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self::from_pixels(vec![Pixel::default(); width * height], width, height)
    }

    /// Allocate a grid with every pixel set to `value`.
    pub fn filled(width: usize, height: usize, value: Pixel) -> Self {
        Self::from_pixels(vec![value; width * height], width, height)
    }

    /// Wrap an existing row-major buffer.
    ///
    /// # Panics
    ///
    /// If `pixels.len() != width * height`, or either dimension is zero.
    pub fn from_pixels(pixels: Vec<Pixel>, width: usize, height: usize) -> Self {
        assert_eq!(
            pixels.len(),
            width * height,
            "pixel buffer does not match {width}x{height}"
        );
        Self {
            img: ImgVec::new(pixels, width, height),
        }
    }

    pub fn width(&self) -> usize {
        self.img.width()
    }

    pub fn height(&self) -> usize {
        self.img.height()
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Pixel] {
        self.img.buf()
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        self.img.buf_mut()
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.height() && col < self.width(),
            "pixel ({row}, {col}) outside {}x{} grid",
            self.width(),
            self.height()
        );
        row * self.width() + col
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Pixel {
        self.pixels()[self.index(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: Pixel) {
        let i = self.index(row, col);
        self.pixels_mut()[i] = value;
    }

    pub fn row(&self, row: usize) -> &[Pixel] {
        assert!(row < self.height(), "row {row} outside grid");
        let w = self.width();
        &self.pixels()[row * w..(row + 1) * w]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [Pixel] {
        assert!(row < self.height(), "row {row} outside grid");
        let w = self.width();
        &mut self.pixels_mut()[row * w..(row + 1) * w]
    }

    /// Iterate over rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> + '_ {
        (0..self.height()).map(move |r| self.row(r))
    }

    /// A black scratch grid of the same shape.
    pub fn clone_shape(&self) -> Self {
        Self::new(self.width(), self.height())
    }

    /// A frozen copy of the current pixel values.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Overwrite every pixel from `other`.
    ///
    /// # Panics
    ///
    /// If the shapes differ.
    pub fn copy_from(&mut self, other: &PixelGrid) {
        assert_eq!(
            (self.width(), self.height()),
            (other.width(), other.height()),
            "grid shapes differ"
        );
        self.pixels_mut().copy_from_slice(other.pixels());
    }

    pub fn same_shape(&self, other: &PixelGrid) -> bool {
        self.width() == other.width() && self.height() == other.height()
    }
}
