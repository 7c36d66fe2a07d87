//! # QR Payload Parser
//!
//! Classifies a scanned text token into a typed [`QrPayload`] or rejects it.
//!
//! ## Wire Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stamp_zoo://[test/]{facility|animal|bingo|event}/{id}                  │
//! │                                                                         │
//! │  "stamp_zoo://animal/a123"        → Real / Animal   / "a123"           │
//! │  "stamp_zoo://test/facility/f9"   → Test / Facility / "f9"             │
//! │  "stamp_zoo://real/animal/x1"     → Real / Animal   / "x1"             │
//! │  "stamp_zoo://bingo/"             → None (blank id)                    │
//! │  "stamp_zoo://a/b/c/d"            → None (4 segments)                  │
//! │  "http://animal/a1"               → None (wrong scheme)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! After the scheme prefix the remainder must split on `/` into exactly 2
//! segments (`{type}/{id}`, mode Real) or exactly 3 segments
//! (`{modeTag}/{type}/{id}`, mode Test iff `modeTag == "test"`). Anything else
//! is rejected outright.
//!
//! ## Rejection Is Not An Error
//! [`parse`] returns `Option`. Camera input is untrusted and arbitrary, so
//! "no payload" is the normal outcome for most strings a scanner sees.

use serde::Serialize;
use std::fmt;
use ts_rs::TS;

use crate::QR_SCHEME_PREFIX;

/// Mode tag that marks a code as a test code.
const TEST_MODE_TAG: &str = "test";

// =============================================================================
// Mode / Kind
// =============================================================================

/// Whether a code is a canonical production code or a test code.
///
/// Test codes are collected like any other, but the resulting stamp is
/// flagged so reporting can exclude it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum QrMode {
    Test,
    Real,
}

impl QrMode {
    /// Interprets the leading segment of a 3-segment code.
    ///
    /// Only the literal `test` selects [`QrMode::Test`]; every other tag
    /// (including `real`) is treated as [`QrMode::Real`].
    pub fn from_tag(tag: &str) -> Self {
        if tag == TEST_MODE_TAG {
            QrMode::Test
        } else {
            QrMode::Real
        }
    }

    #[inline]
    pub fn is_test(&self) -> bool {
        matches!(self, QrMode::Test)
    }
}

/// The resource type a code points at. Determines routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum QrKind {
    Facility,
    Animal,
    Bingo,
    Event,
}

impl QrKind {
    /// Maps a literal type token to a kind. Case-sensitive.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "facility" => Some(QrKind::Facility),
            "animal" => Some(QrKind::Animal),
            "bingo" => Some(QrKind::Bingo),
            "event" => Some(QrKind::Event),
            _ => None,
        }
    }

    /// The literal token used in the wire format.
    pub fn token(&self) -> &'static str {
        match self {
            QrKind::Facility => "facility",
            QrKind::Animal => "animal",
            QrKind::Bingo => "bingo",
            QrKind::Event => "event",
        }
    }
}

impl fmt::Display for QrKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

// =============================================================================
// Payload
// =============================================================================

/// A parsed, typed scan request.
///
/// Fields are private so the non-blank `id` invariant cannot be bypassed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export)]
pub struct QrPayload {
    mode: QrMode,
    kind: QrKind,
    id: String,
}

impl QrPayload {
    /// Builds a payload. Returns `None` when `id` is empty or whitespace.
    pub fn new(mode: QrMode, kind: QrKind, id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return None;
        }
        Some(QrPayload { mode, kind, id })
    }

    #[inline]
    pub fn mode(&self) -> QrMode {
        self.mode
    }

    #[inline]
    pub fn kind(&self) -> QrKind {
        self.kind
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Renders the canonical wire form of this payload.
    ///
    /// Real codes use the short 2-segment form, test codes the `test/` form,
    /// so `parse(p.to_uri()) == Some(p)` for every payload whose id contains
    /// no `/`.
    pub fn to_uri(&self) -> String {
        match self.mode {
            QrMode::Real => format!("{}{}/{}", QR_SCHEME_PREFIX, self.kind, self.id),
            QrMode::Test => format!(
                "{}{}/{}/{}",
                QR_SCHEME_PREFIX, TEST_MODE_TAG, self.kind, self.id
            ),
        }
    }
}

// =============================================================================
// Parser
// =============================================================================

/// Parses raw scanner output into a payload.
///
/// Pure and deterministic; safe to call concurrently with arbitrary input.
///
/// ## Example
/// ```rust
/// use stampzoo_core::qr::{parse, QrKind, QrMode};
///
/// let payload = parse("stamp_zoo://test/facility/f9").unwrap();
/// assert_eq!(payload.mode(), QrMode::Test);
/// assert_eq!(payload.kind(), QrKind::Facility);
/// assert_eq!(payload.id(), "f9");
///
/// assert!(parse("stamp_zoo://bingo/").is_none());
/// assert!(parse("http://animal/a1").is_none());
/// ```
pub fn parse(raw: &str) -> Option<QrPayload> {
    let rest = raw.strip_prefix(QR_SCHEME_PREFIX)?;
    let segments: Vec<&str> = rest.split('/').collect();

    let (mode, type_token, id) = match segments.as_slice() {
        [type_token, id] => (QrMode::Real, *type_token, *id),
        [tag, type_token, id] => (QrMode::from_tag(tag), *type_token, *id),
        _ => return None,
    };

    let kind = QrKind::from_token(type_token)?;
    QrPayload::new(mode, kind, id)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: [(&str, QrKind); 4] = [
        ("animal", QrKind::Animal),
        ("facility", QrKind::Facility),
        ("bingo", QrKind::Bingo),
        ("event", QrKind::Event),
    ];

    #[test]
    fn test_documented_examples() {
        let p = parse("stamp_zoo://animal/a123").unwrap();
        assert_eq!(
            (p.mode(), p.kind(), p.id()),
            (QrMode::Real, QrKind::Animal, "a123")
        );

        let p = parse("stamp_zoo://test/facility/f9").unwrap();
        assert_eq!(
            (p.mode(), p.kind(), p.id()),
            (QrMode::Test, QrKind::Facility, "f9")
        );

        assert_eq!(parse("stamp_zoo://bingo/"), None);
        assert_eq!(parse("http://animal/a1"), None);
    }

    #[test]
    fn test_two_segments_are_real() {
        for (token, kind) in KINDS {
            let raw = format!("stamp_zoo://{}/id-{}", token, token);
            let p = parse(&raw).unwrap();
            assert_eq!(p.mode(), QrMode::Real);
            assert_eq!(p.kind(), kind);
            assert_eq!(p.id(), format!("id-{}", token));
        }
    }

    #[test]
    fn test_three_segments_mode_tag() {
        for (token, kind) in KINDS {
            let p = parse(&format!("stamp_zoo://test/{}/x", token)).unwrap();
            assert_eq!((p.mode(), p.kind()), (QrMode::Test, kind));

            let p = parse(&format!("stamp_zoo://real/{}/x", token)).unwrap();
            assert_eq!((p.mode(), p.kind()), (QrMode::Real, kind));
        }

        // Any tag other than the literal "test" is Real
        let p = parse("stamp_zoo://staging/animal/x1").unwrap();
        assert_eq!(p.mode(), QrMode::Real);
        let p = parse("stamp_zoo://TEST/animal/x1").unwrap();
        assert_eq!(p.mode(), QrMode::Real);
    }

    #[test]
    fn test_uuid_style_ids() {
        let id = "550e8400-e29b-41d4-a716-446655440000";
        let p = parse(&format!("stamp_zoo://animal/{}", id)).unwrap();
        assert_eq!(p.id(), id);
    }

    #[test]
    fn test_rejects_wrong_segment_counts() {
        assert_eq!(parse("stamp_zoo://"), None);
        assert_eq!(parse("stamp_zoo://animal"), None);
        assert_eq!(parse("stamp_zoo://test/animal/a1/extra"), None);
        // Nested facility/animal form is not part of the grammar
        assert_eq!(parse("stamp_zoo://facility/f1/animal/3"), None);
        assert_eq!(parse("stamp_zoo://animal/a1/"), None);
    }

    #[test]
    fn test_rejects_unknown_type() {
        assert_eq!(parse("stamp_zoo://plant/p1"), None);
        assert_eq!(parse("stamp_zoo://test/plant/p1"), None);
        assert_eq!(parse("stamp_zoo://Animal/a1"), None);
        assert_eq!(parse("stamp_zoo:///a1"), None);
    }

    #[test]
    fn test_rejects_blank_id() {
        assert_eq!(parse("stamp_zoo://animal/"), None);
        assert_eq!(parse("stamp_zoo://animal/   "), None);
        assert_eq!(parse("stamp_zoo://test/event/"), None);
        assert_eq!(parse("stamp_zoo://test/event/\t"), None);
    }

    #[test]
    fn test_rejects_wrong_scheme() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("animal/a1"), None);
        assert_eq!(parse("STAMP_ZOO://animal/a1"), None);
        assert_eq!(parse(" stamp_zoo://animal/a1"), None);
        assert_eq!(parse("stamp_zoo:/animal/a1"), None);
    }

    #[test]
    fn test_arbitrary_input_does_not_panic() {
        let inputs = [
            "stamp_zoo://////",
            "stamp_zoo://🦒/🦓",
            "stamp_zoo://animal/🐧",
            "\u{0}\u{1}\u{2}",
            "stamp_zoo://test//a1",
        ];
        for raw in inputs {
            let _ = parse(raw);
        }
        assert_eq!(parse("stamp_zoo://animal/🐧").unwrap().id(), "🐧");
    }

    #[test]
    fn test_payload_new_rejects_blank() {
        assert!(QrPayload::new(QrMode::Real, QrKind::Animal, "").is_none());
        assert!(QrPayload::new(QrMode::Real, QrKind::Animal, " \n").is_none());
        assert!(QrPayload::new(QrMode::Real, QrKind::Animal, "a").is_some());
    }

    #[test]
    fn test_to_uri_is_parseable() {
        let real = QrPayload::new(QrMode::Real, QrKind::Bingo, "card-1").unwrap();
        assert_eq!(real.to_uri(), "stamp_zoo://bingo/card-1");
        assert_eq!(parse(&real.to_uri()), Some(real));

        let test = QrPayload::new(QrMode::Test, QrKind::Animal, "a9").unwrap();
        assert_eq!(test.to_uri(), "stamp_zoo://test/animal/a9");
        assert_eq!(parse(&test.to_uri()), Some(test));
    }
}
