// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! This example demonstrates how a response type keeps its timestamps at
//! second precision when serialized to JSON.

use fixed_stamp::FixedTimestamp;
use jiff::Zoned;
use serde::{Deserialize, Serialize};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The current time carries sub-second precision, which is not written.
    let response = Response {
        id: 1,
        created_at: Zoned::now().into(),
    };

    let json = serde_json::to_string(&response)?;
    println!("Serialized: {json}");

    // Timestamps coming back in must follow the layout exactly.
    let received: Response = serde_json::from_str(r#"{"id":2,"created_at":"2023-07-15T14:30:45+09:00"}"#)?;
    println!("Received: {}", received.created_at);

    let parsed = FixedTimestamp::parse("2016-10-20T12:32:02+09:00")?;
    println!("Parsed: {parsed}, instant: {}", parsed.timestamp());

    match serde_json::from_str::<Response>(r#"{"id":3,"created_at":"2023-07-15"}"#) {
        Ok(_) => println!("Unexpectedly accepted a date without time"),
        Err(err) => println!("Rejected: {err}"),
    }

    Ok(())
}

/// A response whose creation time is serialized as `YYYY-MM-DDThh:mm:ss±hh:mm`.
#[derive(Debug, Serialize, Deserialize)]
struct Response {
    id: u32,
    created_at: FixedTimestamp,
}
