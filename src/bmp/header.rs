//! Fixed-layout BMP file header and BITMAPINFOHEADER.
//!
//! All multi-byte fields are little-endian and tightly packed. The 2-byte
//! magic is read separately so it can be rejected before anything else.

use crate::error::BmpError;

/// `"BM"` read as a little-endian u16.
pub const BMP_MAGIC: u16 = 0x4D42;

/// File header size, excluding the 2-byte magic.
pub const FILE_HEADER_LEN: usize = 12;

/// The only supported info header variant (BITMAPINFOHEADER).
pub const INFO_HEADER_LEN: usize = 40;

/// Magic + file header + info header.
pub const HEADERS_LEN: usize = 2 + FILE_HEADER_LEN + INFO_HEADER_LEN;

/// The bytes following the magic: total size, two reserved words, pixel offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Byte offset of the pixel array from the start of the file.
    pub pixel_offset: u32,
}

/// BITMAPINFOHEADER. Width and height are signed as stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

#[inline]
fn u16_at(b: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([b[at], b[at + 1]])
}

#[inline]
fn u32_at(b: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

#[inline]
fn i32_at(b: &[u8], at: usize) -> i32 {
    i32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

impl FileHeader {
    pub fn parse(b: &[u8; FILE_HEADER_LEN]) -> Self {
        Self {
            file_size: u32_at(b, 0),
            reserved1: u16_at(b, 4),
            reserved2: u16_at(b, 6),
            pixel_offset: u32_at(b, 8),
        }
    }

    pub fn to_bytes(&self) -> [u8; FILE_HEADER_LEN] {
        let mut out = [0u8; FILE_HEADER_LEN];
        out[0..4].copy_from_slice(&self.file_size.to_le_bytes());
        out[4..6].copy_from_slice(&self.reserved1.to_le_bytes());
        out[6..8].copy_from_slice(&self.reserved2.to_le_bytes());
        out[8..12].copy_from_slice(&self.pixel_offset.to_le_bytes());
        out
    }
}

impl InfoHeader {
    pub fn parse(b: &[u8; INFO_HEADER_LEN]) -> Self {
        Self {
            header_size: u32_at(b, 0),
            width: i32_at(b, 4),
            height: i32_at(b, 8),
            planes: u16_at(b, 12),
            bits_per_pixel: u16_at(b, 14),
            compression: u32_at(b, 16),
            image_size: u32_at(b, 20),
            x_pixels_per_meter: i32_at(b, 24),
            y_pixels_per_meter: i32_at(b, 28),
            colors_used: u32_at(b, 32),
            colors_important: u32_at(b, 36),
        }
    }

    pub fn to_bytes(&self) -> [u8; INFO_HEADER_LEN] {
        let mut out = [0u8; INFO_HEADER_LEN];
        out[0..4].copy_from_slice(&self.header_size.to_le_bytes());
        out[4..8].copy_from_slice(&self.width.to_le_bytes());
        out[8..12].copy_from_slice(&self.height.to_le_bytes());
        out[12..14].copy_from_slice(&self.planes.to_le_bytes());
        out[14..16].copy_from_slice(&self.bits_per_pixel.to_le_bytes());
        out[16..20].copy_from_slice(&self.compression.to_le_bytes());
        out[20..24].copy_from_slice(&self.image_size.to_le_bytes());
        out[24..28].copy_from_slice(&self.x_pixels_per_meter.to_le_bytes());
        out[28..32].copy_from_slice(&self.y_pixels_per_meter.to_le_bytes());
        out[32..36].copy_from_slice(&self.colors_used.to_le_bytes());
        out[36..40].copy_from_slice(&self.colors_important.to_le_bytes());
        out
    }

    /// Reject anything outside the 40-byte, 24-bit, uncompressed profile.
    pub fn validate(&self) -> Result<(), BmpError> {
        if self.header_size as usize != INFO_HEADER_LEN {
            return Err(BmpError::UnsupportedVersion(self.header_size));
        }
        if self.bits_per_pixel != 24 {
            return Err(BmpError::UnsupportedDepth(self.bits_per_pixel));
        }
        if self.compression != 0 {
            return Err(BmpError::UnsupportedCompression(self.compression));
        }
        if self.width == 0 || self.height == 0 {
            return Err(BmpError::InvalidHeader(format!(
                "image has no pixels ({}x{})",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Width magnitude. The sign is not interpreted.
    pub fn abs_width(&self) -> u32 {
        self.width.unsigned_abs()
    }

    /// Height magnitude. Rows are read and written in stored order regardless
    /// of whether the sign marks the file as top-down.
    pub fn abs_height(&self) -> u32 {
        self.height.unsigned_abs()
    }
}

/// Padding bytes after each stored row of `width` 24-bit pixels.
///
/// Rows are padded to a multiple of 4 bytes. Since `3 * width` and `-width`
/// agree modulo 4, this always equals `width % 4`.
#[inline]
pub const fn row_padding(width: usize) -> usize {
    (4 - (width * 3) % 4) % 4
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_info() -> InfoHeader {
        InfoHeader {
            header_size: 40,
            width: 3,
            height: -2,
            planes: 1,
            bits_per_pixel: 24,
            compression: 0,
            image_size: 24,
            x_pixels_per_meter: 2835,
            y_pixels_per_meter: 2835,
            colors_used: 0,
            colors_important: 0,
        }
    }

    #[test]
    fn info_header_layout() {
        let bytes = sample_info().to_bytes();
        assert_eq!(&bytes[0..4], &40u32.to_le_bytes());
        assert_eq!(&bytes[8..12], &(-2i32).to_le_bytes());
        assert_eq!(&bytes[14..16], &24u16.to_le_bytes());
        assert_eq!(InfoHeader::parse(&bytes), sample_info());
    }

    #[test]
    fn file_header_layout() {
        let header = FileHeader {
            file_size: 78,
            reserved1: 0xABCD,
            reserved2: 7,
            pixel_offset: 54,
        };
        let bytes = header.to_bytes();
        assert_eq!(bytes, [78, 0, 0, 0, 0xCD, 0xAB, 7, 0, 54, 0, 0, 0]);
        assert_eq!(FileHeader::parse(&bytes), header);
    }

    #[test]
    fn magnitudes_ignore_sign() {
        let mut info = sample_info();
        info.width = -5;
        assert_eq!(info.abs_width(), 5);
        assert_eq!(info.abs_height(), 2);
    }

    #[test]
    fn validate_profile() {
        assert!(sample_info().validate().is_ok());

        let mut info = sample_info();
        info.header_size = 124;
        assert!(matches!(info.validate(), Err(BmpError::UnsupportedVersion(124))));

        let mut info = sample_info();
        info.bits_per_pixel = 32;
        assert!(matches!(info.validate(), Err(BmpError::UnsupportedDepth(32))));

        let mut info = sample_info();
        info.compression = 1;
        assert!(matches!(
            info.validate(),
            Err(BmpError::UnsupportedCompression(1))
        ));

        let mut info = sample_info();
        info.height = 0;
        assert!(matches!(info.validate(), Err(BmpError::InvalidHeader(_))));
    }

    #[test]
    fn padding_matches_width_mod_four() {
        for width in 0..64 {
            assert_eq!(row_padding(width), width % 4, "width {width}");
        }
        assert_eq!((3 * 5 + row_padding(5)) % 4, 0);
    }
}
