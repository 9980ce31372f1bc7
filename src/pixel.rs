/// One decoded pixel: 8-bit red, green, blue. No alpha.
pub type Pixel = rgb::RGB8;

/// Wide signed running sum of pixel channels, used by the summed-area table.
pub type AccumPixel = rgb::RGB<i64>;

/// Bytes one pixel occupies on disk (blue, green, red).
pub const BYTES_PER_PIXEL: usize = 3;

/// Saturate a wide intermediate into the 0..=255 channel range.
#[inline]
pub(crate) fn clamp_channel(v: i64) -> u8 {
    v.clamp(0, 255) as u8
}

/// Build a pixel from on-disk BGR byte order.
#[inline]
pub(crate) fn from_bgr(bytes: &[u8]) -> Pixel {
    Pixel::new(bytes[2], bytes[1], bytes[0])
}

/// Write a pixel in on-disk BGR byte order.
#[inline]
pub(crate) fn to_bgr(p: Pixel, out: &mut [u8]) {
    out[0] = p.b;
    out[1] = p.g;
    out[2] = p.r;
}
