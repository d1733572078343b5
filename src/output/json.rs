//! JSON rendering

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Envelope wrapping command output with response metadata.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T> {
    pub data: T,
    pub meta: Metadata,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Metadata {
    pub timestamp: String,
    pub version: String,
}

impl<T> JsonOutput<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

/// Pretty-print data inside the standard envelope.
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let rendered = format_json(&vec!["a", "b"]).unwrap();
        assert!(rendered.contains("\"data\""));
        assert!(rendered.contains("\"meta\""));
        assert!(rendered.contains("\"timestamp\""));
        assert!(rendered.contains(env!("CARGO_PKG_VERSION")));
    }
}
