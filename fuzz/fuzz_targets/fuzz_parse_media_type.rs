#![no_main]

use libfuzzer_sys::fuzz_target;
use mime_range::MediaType;

fuzz_target!(|data: &[u8]| {
    if let Ok(mt) = MediaType::from_bytes(data) {
        // Serialized output must parse back to the same value
        let reparsed = MediaType::from_string(&mt.to_string())
            .expect("serialized media type must parse");
        assert_eq!(reparsed, mt);
        let _ = mt.pop();
    }
});
