#![no_main]
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

use bmpfilter::bmp;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, writing the pixels back in place must reproduce the file.
    let limits = bmpfilter::Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };
    let Ok(decoded) = bmp::decode(&mut Cursor::new(data), Some(&limits), &enough::Unstoppable)
    else {
        return;
    };

    let mut cursor = Cursor::new(data.to_vec());
    bmp::write_pixels(&mut cursor, &decoded.file_header, &decoded.grid, &enough::Unstoppable)
        .expect("in-memory write failed");
    assert_eq!(cursor.get_ref().as_slice(), data, "in-place save changed bytes");

    let reencoded = bmp::encode(&decoded.grid, Some(&decoded.info_header))
        .expect("re-encode failed");
    let Ok(decoded2) = bmp::decode(&mut Cursor::new(reencoded), None, &enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };
    assert_eq!(decoded.grid, decoded2.grid, "roundtrip pixel mismatch");
});
