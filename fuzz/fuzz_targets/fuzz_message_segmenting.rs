//! Fuzz target for message segmentation.
//!
//! Tests that splitting handles arbitrary input and limits safely.

#![no_main]

use libfuzzer_sys::fuzz_target;
use meshchunk_protocol::chunking::strip_marker;
use meshchunk_protocol::limits::required_chunk_limit;
use meshchunk_protocol::segment_message;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    // First two bytes pick the limits, the rest is the message
    let total_limit = usize::from(data[0]) * 8;
    let chunk_limit = usize::from(data[1]);

    let Ok(message) = std::str::from_utf8(&data[2..]) else {
        return;
    };

    let result = segment_message(message, total_limit, chunk_limit);

    if chunk_limit < required_chunk_limit(total_limit) {
        // Should fail for limits that cannot hold a marker
        assert!(result.is_err());
        return;
    }

    let chunks = result.unwrap();
    assert!(!chunks.is_empty());

    // Each chunk should fit the ceiling
    for chunk in &chunks {
        assert!(chunk.chars().count() <= chunk_limit);
    }

    // Stripped bodies should rebuild the truncated message
    let expected: String = message.chars().take(total_limit).collect();
    if chunks.len() == 1 {
        assert_eq!(chunks[0], expected);
    } else {
        let mut rebuilt = String::new();
        for (i, chunk) in chunks.iter().enumerate() {
            let (index, total, body) = strip_marker(chunk).unwrap();
            assert_eq!(index, i + 1);
            assert_eq!(total, chunks.len());
            rebuilt.push_str(body);
        }
        assert_eq!(rebuilt, expected);
    }
});
