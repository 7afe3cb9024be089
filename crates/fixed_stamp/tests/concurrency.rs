// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Values are shared across threads without synchronization.

use std::sync::Arc;
use std::thread;

use fixed_stamp::FixedTimestamp;

#[test]
fn format_and_parse_from_many_threads() {
    let shared = Arc::new(FixedTimestamp::parse("2023-07-15T14:30:45+09:00").unwrap());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                let text = shared.to_string();
                (text.clone(), FixedTimestamp::parse(&text).unwrap())
            })
        })
        .collect();

    for handle in handles {
        let (text, parsed) = handle.join().unwrap();

        assert_eq!(text, "2023-07-15T14:30:45+09:00");
        assert_eq!(parsed, *shared);
    }
}
