#![no_main]

use libfuzzer_sys::fuzz_target;
use mime_range::{MediaRange, MediaType};

fuzz_target!(|data: &[u8]| {
    if let Ok(range) = MediaRange::from_bytes(data) {
        // Qualities must stay sorted highest first
        for pair in range.entries().windows(2) {
            assert!(pair[0].quality >= pair[1].quality);
        }
        let _ = range.quality(MediaType::any());
    }
});
