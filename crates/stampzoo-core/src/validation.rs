//! # Validation Module
//!
//! Input validation utilities for Stamp Zoo.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: QR parser                                                    │
//! │  └── Grammar check, blank id → no payload                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Request construction (THIS MODULE)                           │
//! │  ├── animal id non-blank, bounded length                               │
//! │  └── coordinates in range                                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── UNIQUE(animal_id), UNIQUE(slot_number)                            │
//! │  └── CHECK(slot_number BETWEEN 1 AND 9)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::MAX_ANIMAL_ID_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates an animal identifier.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most [`MAX_ANIMAL_ID_LEN`] characters
///
/// ## Example
/// ```rust
/// use stampzoo_core::validation::validate_animal_id;
///
/// assert!(validate_animal_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_animal_id("").is_err());
/// assert!(validate_animal_id("   ").is_err());
/// ```
pub fn validate_animal_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "animal_id".to_string(),
        });
    }

    if id.chars().count() > MAX_ANIMAL_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "animal_id".to_string(),
            max: MAX_ANIMAL_ID_LEN,
        });
    }

    Ok(())
}

/// Validates a latitude/longitude pair in decimal degrees.
///
/// NaN fails both range checks.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> ValidationResult<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ValidationError::OutOfRange {
            field: "latitude".to_string(),
            min: -90.0,
            max: 90.0,
        });
    }

    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ValidationError::OutOfRange {
            field: "longitude".to_string(),
            min: -180.0,
            max: 180.0,
        });
    }

    Ok(())
}

/// Validates a geofence radius in meters. Must be finite and positive.
pub fn validate_radius_meters(radius: f64) -> ValidationResult<()> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(ValidationError::OutOfRange {
            field: "radius".to_string(),
            min: f64::MIN_POSITIVE,
            max: f64::MAX,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_animal_id() {
        assert!(validate_animal_id("a1").is_ok());
        assert!(validate_animal_id(" a1 ").is_ok());

        assert!(validate_animal_id("").is_err());
        assert!(validate_animal_id("\t\n").is_err());
        assert!(matches!(
            validate_animal_id(&"x".repeat(MAX_ANIMAL_ID_LEN + 1)),
            Err(ValidationError::TooLong { .. })
        ));
        assert!(validate_animal_id(&"x".repeat(MAX_ANIMAL_ID_LEN)).is_ok());

        // Counted in characters, not bytes
        assert!(validate_animal_id(&"キリン".repeat(MAX_ANIMAL_ID_LEN / 3)).is_ok());
        assert!(validate_animal_id(&"키".repeat(MAX_ANIMAL_ID_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(0.0, 0.0).is_ok());
        assert!(validate_coordinates(-90.0, 180.0).is_ok());
        assert!(validate_coordinates(90.1, 0.0).is_err());
        assert!(validate_coordinates(0.0, 180.1).is_err());
        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
        assert!(validate_coordinates(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_radius() {
        assert!(validate_radius_meters(200.0).is_ok());
        assert!(validate_radius_meters(0.0).is_err());
        assert!(validate_radius_meters(-5.0).is_err());
        assert!(validate_radius_meters(f64::NAN).is_err());
    }
}
