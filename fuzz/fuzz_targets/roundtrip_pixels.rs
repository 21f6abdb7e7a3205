#![no_main]
use libfuzzer_sys::fuzz_target;
use qoi_codec::{Channels, ColorSpace, Descriptor};

fuzz_target!(|input: (u8, u8, bool, Vec<u8>)| {
    let (w, h, rgba, raw) = input;
    let width = 1 + (w as u32 % 32);
    let height = 1 + (h as u32 % 32);
    let channels = if rgba { Channels::Rgba } else { Channels::Rgb };
    let n = (width * height) as usize * channels.count();
    if raw.len() < n {
        return;
    }
    let pixels = &raw[..n];

    let desc = Descriptor::new(width, height, channels, ColorSpace::Srgb).unwrap();
    let Ok(encoded) = qoi_codec::encode(pixels, &desc) else { return };
    let (decoded, decoded_desc) = qoi_codec::decode(&encoded, channels.count() as u8).unwrap();
    assert_eq!(decoded_desc, desc);
    assert_eq!(decoded, pixels);
});
