use serde_json::Value;
use std::io::{self, Read};
use tracing::debug;

/// Read a piped JSON document from stdin.
///
/// Interactive terminals and empty input yield `None` so the caller can fall
/// back to command-line flags.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let body = buffer.trim();
    if body.is_empty() {
        return Ok(None);
    }

    debug!(bytes = body.len(), "read input from stdin");
    Ok(Some(serde_json::from_str(body)?))
}
