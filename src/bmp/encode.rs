//! BMP encoder: in-place pixel payload rewrite and fresh 24-bit files.

use std::io::{Seek, SeekFrom, Write};

use enough::Stop;

use super::decode::row_bytes;
use super::header::{FileHeader, HEADERS_LEN, INFO_HEADER_LEN, InfoHeader, row_padding};
use crate::error::BmpError;
use crate::grid::PixelGrid;
use crate::pixel::{BYTES_PER_PIXEL, to_bgr};

fn bgr_row(row: &[crate::pixel::Pixel], out: &mut [u8]) {
    for (p, chunk) in row.iter().zip(out.chunks_exact_mut(BYTES_PER_PIXEL)) {
        to_bgr(*p, chunk);
    }
}

/// Overwrite the pixel payload of an existing file.
///
/// Seeks to `file_header.pixel_offset` and writes each row in BGR order,
/// seeking over the row padding instead of writing it. Header bytes and
/// padding bytes are left untouched.
pub fn write_pixels<W: Write + Seek>(
    writer: &mut W,
    file_header: &FileHeader,
    grid: &PixelGrid,
    stop: &dyn Stop,
) -> Result<u64, BmpError> {
    let width = grid.width() as u32;
    let height = grid.height() as u32;
    let mut row_buf = vec![0u8; row_bytes(width, height)?];
    let pad = row_padding(grid.width()) as i64;

    writer.seek(SeekFrom::Start(u64::from(file_header.pixel_offset)))?;
    let mut written = 0u64;
    for (y, row) in grid.rows().enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        bgr_row(row, &mut row_buf);
        writer.write_all(&row_buf)?;
        written += row_buf.len() as u64;
        if pad != 0 {
            writer.seek_relative(pad)?;
        }
    }
    writer.flush()?;
    Ok(written)
}

/// Headers for a fresh file holding `grid`.
///
/// Resolution fields and the sign of the height come from `template` when
/// given; everything else is canonical (offset 54, no palette, BI_RGB).
pub fn headers_for(
    grid: &PixelGrid,
    template: Option<&InfoHeader>,
) -> Result<(FileHeader, InfoHeader), BmpError> {
    let width = grid.width() as u32;
    let height = grid.height() as u32;
    let row_stride = row_bytes(width, height)?
        .checked_add(row_padding(grid.width()))
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;
    let pixel_data_size = row_stride
        .checked_mul(grid.height())
        .and_then(|s| u32::try_from(s).ok())
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;
    let file_size = pixel_data_size
        .checked_add(HEADERS_LEN as u32)
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;
    let w = i32::try_from(width).map_err(|_| BmpError::DimensionsTooLarge { width, height })?;
    let h = i32::try_from(height).map_err(|_| BmpError::DimensionsTooLarge { width, height })?;

    let (h, x_ppm, y_ppm) = match template {
        Some(t) if t.height < 0 => (-h, t.x_pixels_per_meter, t.y_pixels_per_meter),
        Some(t) => (h, t.x_pixels_per_meter, t.y_pixels_per_meter),
        // 72 DPI
        None => (h, 2835, 2835),
    };

    let file_header = FileHeader {
        file_size,
        reserved1: 0,
        reserved2: 0,
        pixel_offset: HEADERS_LEN as u32,
    };
    let info_header = InfoHeader {
        header_size: INFO_HEADER_LEN as u32,
        width: w,
        height: h,
        planes: 1,
        bits_per_pixel: 24,
        compression: 0,
        image_size: pixel_data_size,
        x_pixels_per_meter: x_ppm,
        y_pixels_per_meter: y_ppm,
        colors_used: 0,
        colors_important: 0,
    };
    Ok((file_header, info_header))
}

/// Encode `grid` as a complete 24-bit BMP file.
///
/// Rows are written in grid order, matching how [`decode`](super::decode)
/// reads them back.
pub fn encode(grid: &PixelGrid, template: Option<&InfoHeader>) -> Result<Vec<u8>, BmpError> {
    let (file_header, info_header) = headers_for(grid, template)?;

    let mut out = Vec::with_capacity(file_header.file_size as usize);
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_header.to_bytes());
    out.extend_from_slice(&info_header.to_bytes());

    let pad = row_padding(grid.width());
    let mut row_buf = vec![0u8; grid.width() * BYTES_PER_PIXEL];
    for row in grid.rows() {
        bgr_row(row, &mut row_buf);
        out.extend_from_slice(&row_buf);
        out.extend(std::iter::repeat_n(0u8, pad));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Pixel;
    use enough::Unstoppable;
    use std::io::Cursor;

    #[test]
    fn fresh_file_layout() {
        let grid = PixelGrid::filled(3, 2, Pixel::new(1, 2, 3));
        let bytes = encode(&grid, None).unwrap();
        // 3 px * 3 bytes + 3 padding = 12 bytes per row
        assert_eq!(bytes.len(), 54 + 12 * 2);
        assert_eq!(&bytes[0..2], b"BM");
        assert_eq!(&bytes[2..6], &(78u32).to_le_bytes());
        assert_eq!(&bytes[10..14], &54u32.to_le_bytes());
        assert_eq!(&bytes[54..57], &[3, 2, 1]);
        assert_eq!(&bytes[63..66], &[0, 0, 0]);
    }

    #[test]
    fn template_keeps_height_sign() {
        let grid = PixelGrid::new(4, 4);
        let (_, base) = headers_for(&grid, None).unwrap();
        let template = InfoHeader {
            height: -4,
            x_pixels_per_meter: 1000,
            ..base
        };
        let (_, info) = headers_for(&grid, Some(&template)).unwrap();
        assert_eq!(info.height, -4);
        assert_eq!(info.x_pixels_per_meter, 1000);
        assert_eq!(info.image_size, 48);
    }

    #[test]
    fn write_pixels_skips_padding() {
        let grid = PixelGrid::filled(1, 2, Pixel::new(7, 8, 9));
        let mut bytes = encode(&PixelGrid::new(1, 2), None).unwrap();
        // Mark padding so we can see it survive.
        bytes[57] = 0xEE;
        bytes[61] = 0xEE;
        let (file_header, _) = headers_for(&grid, None).unwrap();

        let mut cursor = Cursor::new(bytes);
        let written = write_pixels(&mut cursor, &file_header, &grid, &Unstoppable).unwrap();
        assert_eq!(written, 6);

        let bytes = cursor.into_inner();
        assert_eq!(&bytes[54..57], &[9, 8, 7]);
        assert_eq!(bytes[57], 0xEE);
        assert_eq!(&bytes[58..61], &[9, 8, 7]);
        assert_eq!(bytes[61], 0xEE);
    }
}
