#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(image) = pngdump::decode(data) {
        assert_eq!(image.rows().len(), image.height() as usize);
    }
});
