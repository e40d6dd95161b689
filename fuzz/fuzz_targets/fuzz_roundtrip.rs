#![no_main]
use libfuzzer_sys::fuzz_target;
use plainppm::*;

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must re-encode, and the second decode must match exactly
    let Ok(decoded) = decode(data, enough::Unstoppable) else {
        return;
    };

    let reencoded = encode(&decoded, enough::Unstoppable).expect("decoded image failed to encode");
    let Ok(decoded2) = decode(&reencoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded, decoded2, "roundtrip pixel mismatch");
    assert_eq!(encode(&decoded2, enough::Unstoppable).unwrap(), reencoded);
});
