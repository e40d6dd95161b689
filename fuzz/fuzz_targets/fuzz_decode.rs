#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decode and probe must never panic
    let _ = plainppm::decode(data, enough::Unstoppable);
    let _ = plainppm::ImageInfo::from_bytes(data);
});
