use std::io::Cursor;
use std::path::{Path, PathBuf};

use bmpfilter::*;

fn checkerboard(w: usize, h: usize) -> PixelGrid {
    let mut grid = PixelGrid::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let p = if (x + y) % 2 == 0 {
                Pixel::new(255, 0, 128)
            } else {
                Pixel::new(0, 200, 50)
            };
            grid.set(y, x, p);
        }
    }
    grid
}

/// A hand-built file with a gap between the headers and the pixel array and
/// non-zero padding, so in-place saves can be checked for collateral writes.
fn unusual_file(w: usize, h: usize) -> Vec<u8> {
    let gap = 10usize;
    let pad = bmp::row_padding(w);
    let stride = w * 3 + pad;
    let offset = bmp::HEADERS_LEN + gap;
    let file_size = offset + stride * h;

    let mut out = Vec::with_capacity(file_size);
    out.extend_from_slice(b"BM");
    out.extend_from_slice(
        &bmp::FileHeader {
            file_size: file_size as u32,
            reserved1: 0x1234,
            reserved2: 0x5678,
            pixel_offset: offset as u32,
        }
        .to_bytes(),
    );
    out.extend_from_slice(
        &bmp::InfoHeader {
            header_size: 40,
            width: w as i32,
            height: -(h as i32),
            planes: 1,
            bits_per_pixel: 24,
            compression: 0,
            image_size: 0,
            x_pixels_per_meter: 3780,
            y_pixels_per_meter: 3780,
            colors_used: 0,
            colors_important: 0,
        }
        .to_bytes(),
    );
    out.extend(std::iter::repeat_n(0xAAu8, gap));
    let mut state: u32 = 0x1234_5678;
    for _ in 0..h {
        for _ in 0..w * 3 {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            out.push(state as u8);
        }
        out.extend(std::iter::repeat_n(0x55u8, pad));
    }
    out
}

fn write_temp(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

fn read(path: &Path) -> Vec<u8> {
    std::fs::read(path).unwrap()
}

#[test]
fn load_then_save_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    for w in 1..=6 {
        let original = unusual_file(w, 3);
        let path = write_temp(&dir, &format!("w{w}.bmp"), &original);
        let session = ImageSession::load(&path).unwrap();
        session.save().unwrap();
        assert_eq!(read(&path), original, "width {w}");
    }
}

#[test]
fn save_only_touches_pixel_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let (w, h) = (5, 4);
    let original = unusual_file(w, h);
    let path = write_temp(&dir, "edit.bmp", &original);

    let mut session = ImageSession::load(&path).unwrap();
    session.apply(FilterKind::Grayscale);
    session.save().unwrap();
    let saved = read(&path);
    assert_eq!(saved.len(), original.len());

    let offset = session.file_header().pixel_offset as usize;
    assert_eq!(&saved[..offset], &original[..offset]);
    let stride = w * 3 + bmp::row_padding(w);
    for y in 0..h {
        let row = offset + y * stride;
        assert_eq!(&saved[row + w * 3..row + stride], &original[row + w * 3..row + stride]);
    }

    let reloaded = ImageSession::load(&path).unwrap();
    assert_eq!(reloaded.grid(), session.grid());
}

#[test]
fn encoded_file_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let grid = checkerboard(7, 5);
    let bytes = bmp::encode(&grid, None).unwrap();
    let path = write_temp(&dir, "checker.bmp", &bytes);

    let session = ImageSession::load(&path).unwrap();
    assert_eq!(session.grid(), &grid);
    assert_eq!(session.original(), &grid);
    assert_eq!(session.info_header().width, 7);
    assert_eq!(session.info_header().height, 5);
}

#[test]
fn save_as_writes_fresh_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "src.bmp", &unusual_file(3, 3));
    let mut session = ImageSession::load(&path).unwrap();
    session.apply(FilterKind::Reflect);

    let out = dir.path().join("out.bmp");
    session.save_as(&out).unwrap();

    // Source untouched, copy canonical with the height sign kept.
    assert_eq!(read(&path), unusual_file(3, 3));
    let copy = ImageSession::load(&out).unwrap();
    assert_eq!(copy.grid(), session.grid());
    assert_eq!(copy.file_header().pixel_offset, 54);
    assert_eq!(copy.info_header().height, -3);
    assert_eq!(copy.info_header().x_pixels_per_meter, 3780);
}

#[test]
fn stream_decode_matches_file_load() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = unusual_file(4, 2);
    let path = write_temp(&dir, "s.bmp", &bytes);
    let decoded = bmp::decode(&mut Cursor::new(bytes), None, &Unstoppable).unwrap();
    let session = ImageSession::load(&path).unwrap();
    assert_eq!(&decoded.grid, session.grid());
    assert_eq!(&decoded.info_header, session.info_header());
}

// ── Rejection ───────────────────────────────────────────────────────

fn load_err(bytes: &[u8]) -> BmpError {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "bad.bmp", bytes);
    ImageSession::load(&path).unwrap_err()
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    match ImageSession::load(dir.path().join("nope.bmp")).unwrap_err() {
        BmpError::NotFound { path, .. } => assert!(path.ends_with("nope.bmp")),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn wrong_magic_is_not_bmp() {
    let mut bytes = unusual_file(2, 2);
    bytes[0] = b'P';
    bytes[1] = b'6';
    assert!(matches!(load_err(&bytes), BmpError::NotBmp));
}

#[test]
fn unsupported_profiles_are_rejected() {
    let mut bytes = unusual_file(2, 2);
    bytes[14..18].copy_from_slice(&124u32.to_le_bytes());
    assert!(matches!(load_err(&bytes), BmpError::UnsupportedVersion(124)));

    let mut bytes = unusual_file(2, 2);
    bytes[28..30].copy_from_slice(&32u16.to_le_bytes());
    assert!(matches!(load_err(&bytes), BmpError::UnsupportedDepth(32)));

    let mut bytes = unusual_file(2, 2);
    bytes[30..34].copy_from_slice(&3u32.to_le_bytes());
    assert!(matches!(load_err(&bytes), BmpError::UnsupportedCompression(3)));
}

#[test]
fn truncated_header_is_io_error() {
    let bytes = unusual_file(2, 2);
    assert!(matches!(load_err(&bytes[..30]), BmpError::Io(_)));
}

#[test]
fn limits_reject_large() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "big.bmp", &unusual_file(4, 4));
    let limits = Limits {
        max_pixels: Some(15),
        ..Default::default()
    };
    let result = LoadRequest::new(&path)
        .with_limits(&limits)
        .load(Unstoppable);
    match result.unwrap_err() {
        BmpError::LimitExceeded(_) => {}
        other => panic!("expected LimitExceeded, got {other:?}"),
    }
}
