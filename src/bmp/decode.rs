//! 24-bit BMP decoder over any seekable byte stream.

use std::io::{ErrorKind, Read, Seek, SeekFrom};

use enough::Stop;

use super::header::{
    BMP_MAGIC, FILE_HEADER_LEN, FileHeader, HEADERS_LEN, INFO_HEADER_LEN, InfoHeader, row_padding,
};
use crate::error::BmpError;
use crate::grid::PixelGrid;
use crate::limits::Limits;
use crate::pixel::{BYTES_PER_PIXEL, Pixel, from_bgr};

/// Headers and pixels of one decoded file.
#[derive(Clone, Debug)]
pub struct DecodedBmp {
    pub file_header: FileHeader,
    pub info_header: InfoHeader,
    pub grid: PixelGrid,
}

/// Read and validate both headers, leaving the stream just past them.
pub(crate) fn read_headers<R: Read>(reader: &mut R) -> Result<(FileHeader, InfoHeader), BmpError> {
    let mut magic = [0u8; 2];
    match reader.read_exact(&mut magic) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Err(BmpError::NotBmp),
        Err(e) => return Err(e.into()),
    }
    if u16::from_le_bytes(magic) != BMP_MAGIC {
        return Err(BmpError::NotBmp);
    }

    let mut fh = [0u8; FILE_HEADER_LEN];
    reader.read_exact(&mut fh)?;
    let file_header = FileHeader::parse(&fh);

    let mut ih = [0u8; INFO_HEADER_LEN];
    reader.read_exact(&mut ih)?;
    let info_header = InfoHeader::parse(&ih);

    info_header.validate()?;

    // Saving writes pixels at this offset; anything lower would clobber the headers.
    if (file_header.pixel_offset as usize) < HEADERS_LEN {
        return Err(BmpError::InvalidHeader(format!(
            "pixel array offset {} overlaps the {HEADERS_LEN}-byte headers",
            file_header.pixel_offset
        )));
    }

    Ok((file_header, info_header))
}

/// Byte length of one stored row without its padding.
pub(crate) fn row_bytes(width: u32, height: u32) -> Result<usize, BmpError> {
    (width as usize)
        .checked_mul(BYTES_PER_PIXEL)
        .ok_or(BmpError::DimensionsTooLarge { width, height })
}

/// Decode a 24-bit uncompressed BMP.
///
/// The pixel grid is allocated only after every header check and limit has
/// passed and the stream is known to hold the whole pixel array. Rows land in
/// the grid in stored order.
pub fn decode<R: Read + Seek>(
    reader: &mut R,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodedBmp, BmpError> {
    let (file_header, info_header) = read_headers(reader)?;

    let width = info_header.abs_width();
    let height = info_header.abs_height();
    if let Some(limits) = limits {
        limits.check(width, height)?;
        limits.check_memory(width, height)?;
    }
    let pixel_count = (width as usize)
        .checked_mul(height as usize)
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;
    let row_len = row_bytes(width, height)?;
    let pad = row_padding(width as usize) as i64;

    // The last row needs no trailing padding on disk.
    let needed = (row_len as u64 + pad as u64)
        .checked_mul(u64::from(height) - 1)
        .and_then(|n| n.checked_add(row_len as u64))
        .and_then(|n| n.checked_add(u64::from(file_header.pixel_offset)))
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;
    let stream_len = reader.seek(SeekFrom::End(0))?;
    if needed > stream_len {
        return Err(BmpError::Io(std::io::Error::new(
            ErrorKind::UnexpectedEof,
            format!("pixel array needs {needed} bytes, stream has {stream_len}"),
        )));
    }

    log::debug!(
        "bmp {}x{} (stored height {}), pixels at offset {}",
        width,
        height,
        info_header.height,
        file_header.pixel_offset
    );

    stop.check()?;

    let w = width as usize;
    let h = height as usize;
    let mut pixels: Vec<Pixel> = Vec::with_capacity(pixel_count);
    let mut row_buf = vec![0u8; row_len];

    reader.seek(SeekFrom::Start(u64::from(file_header.pixel_offset)))?;
    for row in 0..h {
        if row % 16 == 0 {
            stop.check()?;
        }
        reader.read_exact(&mut row_buf)?;
        pixels.extend(row_buf.chunks_exact(BYTES_PER_PIXEL).map(from_bgr));
        if pad != 0 {
            reader.seek_relative(pad)?;
        }
    }

    Ok(DecodedBmp {
        file_header,
        info_header,
        grid: PixelGrid::from_pixels(pixels, w, h),
    })
}
