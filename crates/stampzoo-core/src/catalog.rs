//! # Catalog
//!
//! Static reference data: facilities, animals and bingo cards, decoded from
//! the bundled JSON document. The catalog is read-only; this crate never
//! mutates it and never reads it from disk (callers hand over the text).
//!
//! ## Document Shape
//! ```text
//! {
//!   "metadata":   { "version", "last_updated", "description", "data_count" },
//!   "facilities": [ { "id", "facility_id", "name_ko", ..., "latitude"?, ... } ],
//!   "animals":    [ { "id", "name_ko", ..., "facility_id" } ],
//!   "bingoCards": [ { "id", "name_ko", ..., "grid_size", "is_active", ... } ],
//!   "refresh_bingo_animals": false
//! }
//! ```
//! Unknown keys are ignored so newer documents load in older builds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult, ValidationError};

/// Display name used when an animal's facility cannot be resolved.
pub const UNKNOWN_FACILITY_NAME: &str = "Unknown";

// =============================================================================
// Language
// =============================================================================

/// Languages the catalog carries names and descriptions in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ko,
    En,
    #[default]
    Ja,
    Zh,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::Ko, Language::En, Language::Ja, Language::Zh];

    /// Strict lookup by ISO 639-1 code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "ko" => Some(Language::Ko),
            "en" => Some(Language::En),
            "ja" => Some(Language::Ja),
            "zh" => Some(Language::Zh),
            _ => None,
        }
    }

    /// Lenient lookup: unknown codes fall back to Japanese.
    pub fn from_code_or_default(code: &str) -> Self {
        Self::from_code(code).unwrap_or_default()
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
            Language::Ja => "ja",
            Language::Zh => "zh",
        }
    }

    /// Picks the field matching this language.
    fn pick<'a>(&self, ko: &'a str, en: &'a str, ja: &'a str, zh: &'a str) -> &'a str {
        match self {
            Language::Ko => ko,
            Language::En => en,
            Language::Ja => ja,
            Language::Zh => zh,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s).ok_or_else(|| ValidationError::NotAllowed {
            field: "language".to_string(),
            allowed: Language::ALL.iter().map(|l| l.code().to_string()).collect(),
        })
    }
}

// =============================================================================
// Records
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub version: String,
    pub last_updated: String,
    pub description: String,
    pub data_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub id: String,
    pub facility_id: String,
    pub name_ko: String,
    pub name_en: String,
    pub name_ja: String,
    pub name_zh: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub location_ko: String,
    pub location_en: String,
    pub location_ja: String,
    pub location_zh: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub logo_image: Option<String>,
    #[serde(default)]
    pub map_image: Option<String>,
    #[serde(default)]
    pub map_link: Option<String>,
    pub detail_ko: String,
    pub detail_en: String,
    pub detail_ja: String,
    pub detail_zh: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Geofence radius in meters.
    #[serde(default)]
    pub validation_radius: Option<f64>,
}

impl Facility {
    pub fn name(&self, lang: Language) -> &str {
        lang.pick(&self.name_ko, &self.name_en, &self.name_ja, &self.name_zh)
    }

    pub fn location(&self, lang: Language) -> &str {
        lang.pick(
            &self.location_ko,
            &self.location_en,
            &self.location_ja,
            &self.location_zh,
        )
    }

    /// Either identifier form matches.
    fn matches(&self, id: &str) -> bool {
        self.facility_id == id || self.id == id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub id: String,
    pub name_ko: String,
    pub name_en: String,
    pub name_ja: String,
    pub name_zh: String,
    pub detail_ko: String,
    pub detail_en: String,
    pub detail_ja: String,
    pub detail_zh: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub stamp_image: Option<String>,
    pub facility_id: String,
}

impl Animal {
    pub fn name(&self, lang: Language) -> &str {
        lang.pick(&self.name_ko, &self.name_en, &self.name_ja, &self.name_zh)
    }

    pub fn detail(&self, lang: Language) -> &str {
        lang.pick(
            &self.detail_ko,
            &self.detail_en,
            &self.detail_ja,
            &self.detail_zh,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BingoCard {
    pub id: String,
    pub name_ko: String,
    pub name_en: String,
    pub name_ja: String,
    pub name_zh: String,
    pub description_ko: String,
    pub description_en: String,
    pub description_ja: String,
    pub description_zh: String,
    pub grid_size: u32,
    pub is_active: bool,
    pub display_order: i32,
}

impl BingoCard {
    pub fn name(&self, lang: Language) -> &str {
        lang.pick(&self.name_ko, &self.name_en, &self.name_ja, &self.name_zh)
    }
}

// =============================================================================
// Zoo Data
// =============================================================================

/// The whole catalog document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZooData {
    pub metadata: Metadata,
    pub facilities: Vec<Facility>,
    pub animals: Vec<Animal>,
    #[serde(rename = "bingoCards")]
    pub bingo_cards: Vec<BingoCard>,
    #[serde(default)]
    pub refresh_bingo_animals: bool,
}

impl ZooData {
    /// Decodes a catalog document.
    pub fn from_json(text: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn animal(&self, id: &str) -> Option<&Animal> {
        self.animals.iter().find(|a| a.id == id)
    }

    /// Like [`ZooData::animal`] but as a typed error.
    pub fn require_animal(&self, id: &str) -> CoreResult<&Animal> {
        self.animal(id)
            .ok_or_else(|| CoreError::AnimalNotFound(id.to_string()))
    }

    /// Finds a facility by either its `facility_id` or its `id`.
    pub fn facility(&self, id: &str) -> Option<&Facility> {
        self.facilities.iter().find(|f| f.matches(id))
    }

    pub fn facility_for_animal(&self, animal: &Animal) -> Option<&Facility> {
        self.facility(&animal.facility_id)
    }

    /// Display label recorded on a collected stamp.
    pub fn facility_name_for_animal(&self, animal: &Animal, lang: Language) -> String {
        self.facility_for_animal(animal)
            .map(|f| f.name(lang).to_string())
            .unwrap_or_else(|| UNKNOWN_FACILITY_NAME.to_string())
    }

    pub fn animals_in_facility<'a>(
        &'a self,
        facility_id: &'a str,
    ) -> impl Iterator<Item = &'a Animal> + 'a {
        let facility = self.facility(facility_id);
        self.animals.iter().filter(move |a| match facility {
            Some(f) => f.matches(&a.facility_id),
            None => a.facility_id == facility_id,
        })
    }

    /// The active bingo card with the lowest `display_order`.
    pub fn active_bingo_card(&self) -> Option<&BingoCard> {
        self.bingo_cards
            .iter()
            .filter(|c| c.is_active)
            .min_by_key(|c| c.display_order)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SAMPLE: &str = r#"{
        "metadata": {
            "version": "1.0.0",
            "last_updated": "2025-09-01",
            "description": "test catalog",
            "data_count": 3,
            "extra_key": "ignored"
        },
        "facilities": [
            {
                "id": "fac-1", "facility_id": "F001",
                "name_ko": "북쪽 동물원", "name_en": "North Zoo", "name_ja": "北動物園", "name_zh": "北动物园",
                "type": "zoo",
                "location_ko": "서울", "location_en": "Seoul", "location_ja": "ソウル", "location_zh": "首尔",
                "detail_ko": "", "detail_en": "", "detail_ja": "", "detail_zh": "",
                "latitude": 35.0, "longitude": 139.0, "validation_radius": 500.0
            },
            {
                "id": "fac-2", "facility_id": "F002",
                "name_ko": "수족관", "name_en": "Aquarium", "name_ja": "水族館", "name_zh": "水族馆",
                "type": "aquarium",
                "location_ko": "", "location_en": "", "location_ja": "", "location_zh": "",
                "detail_ko": "", "detail_en": "", "detail_ja": "", "detail_zh": ""
            }
        ],
        "animals": [
            {
                "id": "a1",
                "name_ko": "기린", "name_en": "Giraffe", "name_ja": "キリン", "name_zh": "长颈鹿",
                "detail_ko": "", "detail_en": "Tall", "detail_ja": "", "detail_zh": "",
                "facility_id": "F001"
            },
            {
                "id": "a2",
                "name_ko": "펭귄", "name_en": "Penguin", "name_ja": "ペンギン", "name_zh": "企鹅",
                "detail_ko": "", "detail_en": "", "detail_ja": "", "detail_zh": "",
                "facility_id": "fac-2"
            },
            {
                "id": "a3",
                "name_ko": "유령", "name_en": "Ghost", "name_ja": "ゴースト", "name_zh": "幽灵",
                "detail_ko": "", "detail_en": "", "detail_ja": "", "detail_zh": "",
                "facility_id": "F999"
            }
        ],
        "bingoCards": [
            {
                "id": "card-old",
                "name_ko": "", "name_en": "Old", "name_ja": "", "name_zh": "",
                "description_ko": "", "description_en": "", "description_ja": "", "description_zh": "",
                "grid_size": 3, "is_active": false, "display_order": 0
            },
            {
                "id": "card-2",
                "name_ko": "", "name_en": "Second", "name_ja": "", "name_zh": "",
                "description_ko": "", "description_en": "", "description_ja": "", "description_zh": "",
                "grid_size": 3, "is_active": true, "display_order": 2
            },
            {
                "id": "card-1",
                "name_ko": "", "name_en": "First", "name_ja": "", "name_zh": "",
                "description_ko": "", "description_en": "", "description_ja": "", "description_zh": "",
                "grid_size": 3, "is_active": true, "display_order": 1
            }
        ],
        "refresh_bingo_animals": false
    }"#;

    pub(crate) fn sample() -> ZooData {
        ZooData::from_json(SAMPLE).unwrap()
    }

    #[test]
    fn test_decodes_sample() {
        let data = sample();
        assert_eq!(data.metadata.version, "1.0.0");
        assert_eq!(data.facilities.len(), 2);
        assert_eq!(data.animals.len(), 3);
        assert_eq!(data.facilities[0].validation_radius, Some(500.0));
        assert_eq!(data.facilities[1].latitude, None);
        assert_eq!(data.facilities[1].kind, "aquarium");
    }

    #[test]
    fn test_invalid_document() {
        assert!(matches!(
            ZooData::from_json("{\"metadata\": 1}"),
            Err(CoreError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn test_animal_lookup() {
        let data = sample();
        assert_eq!(data.animal("a1").unwrap().name(Language::En), "Giraffe");
        assert!(data.animal("missing").is_none());
        assert!(matches!(
            data.require_animal("missing"),
            Err(CoreError::AnimalNotFound(id)) if id == "missing"
        ));
    }

    #[test]
    fn test_facility_matches_either_id() {
        let data = sample();
        assert_eq!(data.facility("F001").unwrap().id, "fac-1");
        assert_eq!(data.facility("fac-1").unwrap().facility_id, "F001");
        assert!(data.facility("F404").is_none());
    }

    #[test]
    fn test_facility_name_for_animal() {
        let data = sample();
        let giraffe = data.animal("a1").unwrap();
        assert_eq!(data.facility_name_for_animal(giraffe, Language::Ja), "北動物園");

        let penguin = data.animal("a2").unwrap();
        assert_eq!(data.facility_name_for_animal(penguin, Language::En), "Aquarium");

        let ghost = data.animal("a3").unwrap();
        assert_eq!(
            data.facility_name_for_animal(ghost, Language::En),
            UNKNOWN_FACILITY_NAME
        );
    }

    #[test]
    fn test_animals_in_facility() {
        let data = sample();
        let ids: Vec<&str> = data.animals_in_facility("fac-2").map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a2"]);
        let ids: Vec<&str> = data.animals_in_facility("F001").map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a1"]);
    }

    #[test]
    fn test_active_bingo_card() {
        let data = sample();
        assert_eq!(data.active_bingo_card().unwrap().id, "card-1");
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::from_code("EN"), Some(Language::En));
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::from_code_or_default("fr"), Language::Ja);
        assert!("zh".parse::<Language>().is_ok());
        assert!("xx".parse::<Language>().is_err());
        assert_eq!(Language::default().to_string(), "ja");
    }

    #[test]
    fn test_localized_fields() {
        let data = sample();
        let giraffe = data.animal("a1").unwrap();
        assert_eq!(giraffe.name(Language::Ko), "기린");
        assert_eq!(giraffe.name(Language::Zh), "长颈鹿");
        assert_eq!(giraffe.detail(Language::En), "Tall");
        assert_eq!(data.facilities[0].location(Language::En), "Seoul");
    }
}
