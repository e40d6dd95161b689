#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 1x2 reference image
    fs::write(format!("{dir}/p3_1x2.ppm"), b"P3 1 2 255 0 128 255 128 255 0").unwrap();

    // Commented, wrapped 2x2
    let commented = b"P3  # Plain portable pixmap\n2 2 255  # Width, Height, Max color component value\n\n255   0   0    0 255   0\n\n  0   0 255  128 128 128\n\n";
    fs::write(format!("{dir}/p3_2x2_commented.ppm"), commented).unwrap();

    // CR/tab separated
    fs::write(format!("{dir}/p3_tabs.ppm"), b"P3\r\n1\t1\r255\t# c\r\n1 2 3").unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_p3.bin"), b"P3").unwrap();
    fs::write(format!("{dir}/p6_label.bin"), b"P6 1 1 255 0 0 0").unwrap();
    fs::write(format!("{dir}/maxval_65535.bin"), b"P3 1 1 65535 0 0 0").unwrap();
    fs::write(format!("{dir}/component_256.bin"), b"P3 1 1 255 0 256 0").unwrap();
    fs::write(format!("{dir}/short_pixels.bin"), b"P3 2 2 255 1 2 3 4 5").unwrap();
    fs::write(format!("{dir}/comment_eof.bin"), b"P3 # no newline").unwrap();

    println!("Generated seed corpus in {dir}/");
}
