#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp24(width: i32, height: i32, offset: u32) -> Vec<u8> {
    let w = width.unsigned_abs() as usize;
    let h = height.unsigned_abs() as usize;
    let stride = w * 3 + (4 - (w * 3) % 4) % 4;
    let size = offset as usize + stride * h;
    let mut bmp = vec![0u8; size];
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&(size as u32).to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&offset.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&width.to_le_bytes());
    bmp[22..26].copy_from_slice(&height.to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    for (i, b) in bmp[offset as usize..].iter_mut().enumerate() {
        *b = (i * 37) as u8;
    }
    bmp
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    fs::write(format!("{dir}/bmp_1x1.bmp"), bmp24(1, 1, 54)).unwrap();
    fs::write(format!("{dir}/bmp_3x2.bmp"), bmp24(3, 2, 54)).unwrap();
    fs::write(format!("{dir}/bmp_4x4_topdown.bmp"), bmp24(4, -4, 54)).unwrap();
    fs::write(format!("{dir}/bmp_neg_width.bmp"), bmp24(-5, 2, 54)).unwrap();
    fs::write(format!("{dir}/bmp_gap.bmp"), bmp24(2, 2, 70)).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    let mut truncated = bmp24(8, 8, 54);
    truncated.truncate(100);
    fs::write(format!("{dir}/bmp_truncated.bin"), truncated).unwrap();

    println!("Generated seed corpus in {dir}/");
}
