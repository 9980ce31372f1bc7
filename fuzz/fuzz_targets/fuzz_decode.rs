#![no_main]
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must never panic, only error.
    let limits = bmpfilter::Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };
    let Ok(mut decoded) =
        bmpfilter::bmp::decode(&mut Cursor::new(data), Some(&limits), &enough::Unstoppable)
    else {
        return;
    };

    // Any grid that decodes must survive every filter.
    let original = decoded.grid.snapshot();
    for kind in bmpfilter::FilterKind::ALL {
        bmpfilter::filter::apply(kind, &mut decoded.grid, &original);
    }
});
