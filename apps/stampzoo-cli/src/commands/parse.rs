//! Parse command: decode a code without collecting anything.

use serde::Serialize;
use std::fmt;

use stampzoo_core::qr::{self, QrKind, QrMode};

use crate::error::ApiError;

#[derive(Debug, Clone, Serialize)]
pub struct ParseView {
    pub mode: QrMode,
    pub kind: QrKind,
    pub id: String,
    /// Canonical form of the same payload.
    pub uri: String,
}

pub fn handle_parse(raw: &str) -> Result<ParseView, ApiError> {
    let payload = qr::parse(raw).ok_or_else(|| ApiError::invalid_code(raw))?;

    Ok(ParseView {
        mode: payload.mode(),
        kind: payload.kind(),
        id: payload.id().to_string(),
        uri: payload.to_uri(),
    })
}

impl fmt::Display for ParseView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "kind: {}", self.kind)?;
        writeln!(f, "id:   {}", self.id)?;
        write!(
            f,
            "mode: {}",
            if self.mode.is_test() { "test" } else { "real" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_parse_view() {
        let view = handle_parse("stamp_zoo://real/animal/a1").unwrap();
        assert_eq!(view.mode, QrMode::Real);
        assert_eq!(view.kind, QrKind::Animal);
        assert_eq!(view.uri, "stamp_zoo://animal/a1");
        assert!(view.to_string().contains("mode: real"));
    }

    #[test]
    fn test_parse_invalid() {
        let err = handle_parse("stamp_zoo://ANIMAL/a1").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCode);
    }
}
