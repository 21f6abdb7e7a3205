#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes, valid header or not: decode must never panic, only
    // return Ok or Err.
    if let Ok(desc) = qoi_codec::decode_descriptor(data) {
        let _ = qoi_codec::decode_to_vec(data, 0).map(|(out, _)| {
            assert_eq!(out.len(), desc.width as usize * desc.height as usize * desc.channels.count());
        });
    }
});
