//! # Bingo Board & Field Guide
//!
//! Read-model projections over committed stamps. Both are rebuilt from a
//! fresh query whenever the store signals a change; neither holds state of
//! its own.
//!
//! ## Board Layout
//! ```text
//! ┌───┬───┬───┐
//! │ 1 │ 2 │ 3 │   slots fill in collection order,
//! ├───┼───┼───┤   left to right, top to bottom
//! │ 4 │ 5 │ 6 │
//! ├───┼───┼───┤   complete once all 9 are filled
//! │ 7 │ 8 │ 9 │
//! └───┴───┴───┘
//! ```

use serde::Serialize;
use ts_rs::TS;

use crate::catalog::{Language, ZooData};
use crate::types::CollectedStamp;
use crate::{BINGO_CAPACITY, BINGO_GRID_SIZE};

// =============================================================================
// Bingo Board
// =============================================================================

/// One cell of the board.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct BingoSlot {
    pub slot_number: u32,
    pub stamp: Option<CollectedStamp>,
}

impl BingoSlot {
    #[inline]
    pub fn is_collected(&self) -> bool {
        self.stamp.is_some()
    }
}

/// The 3×3 board.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct BingoBoard {
    slots: Vec<BingoSlot>,
    collected_count: u32,
}

impl BingoBoard {
    /// Places each stamp in its slot. Stamps with an out-of-range slot are
    /// ignored (the store never produces them).
    pub fn from_stamps(stamps: &[CollectedStamp]) -> Self {
        let slots: Vec<BingoSlot> = (1..=BINGO_CAPACITY)
            .map(|n| BingoSlot {
                slot_number: n,
                stamp: stamps.iter().find(|s| s.slot_number == n).cloned(),
            })
            .collect();
        let collected_count = slots.iter().filter(|s| s.is_collected()).count() as u32;

        BingoBoard {
            slots,
            collected_count,
        }
    }

    pub fn slots(&self) -> &[BingoSlot] {
        &self.slots
    }

    pub fn slot(&self, number: u32) -> Option<&BingoSlot> {
        self.slots.iter().find(|s| s.slot_number == number)
    }

    /// Slots grouped into grid rows.
    pub fn rows(&self) -> impl Iterator<Item = &[BingoSlot]> {
        self.slots.chunks(BINGO_GRID_SIZE)
    }

    #[inline]
    pub fn collected_count(&self) -> u32 {
        self.collected_count
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.collected_count >= BINGO_CAPACITY
    }

    /// Fraction of filled slots, 0.0..=1.0.
    pub fn progress(&self) -> f32 {
        self.collected_count as f32 / BINGO_CAPACITY as f32
    }

    /// The slot the next successful collection would fill.
    pub fn next_slot(&self) -> Option<u32> {
        if self.is_complete() {
            None
        } else {
            Some(self.collected_count + 1)
        }
    }
}

// =============================================================================
// Field Guide
// =============================================================================

/// One catalog animal as seen in the field guide.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct FieldGuideEntry {
    pub animal_id: String,
    pub name: String,
    pub facility_name: String,
    pub slot_number: Option<u32>,
}

impl FieldGuideEntry {
    #[inline]
    pub fn is_collected(&self) -> bool {
        self.slot_number.is_some()
    }
}

/// Every catalog animal with its collection state.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct FieldGuide {
    pub entries: Vec<FieldGuideEntry>,
}

impl FieldGuide {
    /// Builds the guide in catalog order. Stamps for animals that are no
    /// longer in the catalog are left out.
    pub fn build(catalog: &ZooData, stamps: &[CollectedStamp], lang: Language) -> Self {
        let entries = catalog
            .animals
            .iter()
            .map(|animal| FieldGuideEntry {
                animal_id: animal.id.clone(),
                name: animal.name(lang).to_string(),
                facility_name: catalog.facility_name_for_animal(animal, lang),
                slot_number: stamps
                    .iter()
                    .find(|s| s.animal_id == animal.id)
                    .map(|s| s.slot_number),
            })
            .collect();

        FieldGuide { entries }
    }

    pub fn collected(&self) -> impl Iterator<Item = &FieldGuideEntry> {
        self.entries.iter().filter(|e| e.is_collected())
    }

    pub fn collected_count(&self) -> usize {
        self.collected().count()
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample;

    fn stamp(slot: u32, animal: &str) -> CollectedStamp {
        CollectedStamp {
            id: slot as i64,
            slot_number: slot,
            animal_id: animal.to_string(),
            collected_at_millis: 0,
            source_code: String::new(),
            facility_name: String::new(),
            latitude: None,
            longitude: None,
            is_test_collection: false,
        }
    }

    #[test]
    fn test_empty_board() {
        let board = BingoBoard::from_stamps(&[]);
        assert_eq!(board.slots().len(), 9);
        assert_eq!(board.collected_count(), 0);
        assert!(!board.is_complete());
        assert_eq!(board.next_slot(), Some(1));
        assert_eq!(board.progress(), 0.0);
    }

    #[test]
    fn test_partial_board() {
        let board = BingoBoard::from_stamps(&[stamp(2, "b"), stamp(1, "a")]);
        assert_eq!(board.collected_count(), 2);
        assert!(board.slot(1).unwrap().is_collected());
        assert_eq!(board.slot(2).unwrap().stamp.as_ref().unwrap().animal_id, "b");
        assert!(!board.slot(3).unwrap().is_collected());
        assert_eq!(board.next_slot(), Some(3));
    }

    #[test]
    fn test_full_board() {
        let stamps: Vec<_> = (1..=9).map(|n| stamp(n, &format!("a{}", n))).collect();
        let board = BingoBoard::from_stamps(&stamps);
        assert!(board.is_complete());
        assert_eq!(board.next_slot(), None);
        assert!((board.progress() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rows() {
        let board = BingoBoard::from_stamps(&[]);
        let rows: Vec<Vec<u32>> = board
            .rows()
            .map(|r| r.iter().map(|s| s.slot_number).collect())
            .collect();
        assert_eq!(rows, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]);
    }

    #[test]
    fn test_out_of_range_slot_ignored() {
        let board = BingoBoard::from_stamps(&[stamp(10, "x"), stamp(0, "y")]);
        assert_eq!(board.collected_count(), 0);
    }

    #[test]
    fn test_field_guide() {
        let catalog = sample();
        let guide = FieldGuide::build(&catalog, &[stamp(1, "a2"), stamp(2, "gone")], Language::En);

        assert_eq!(guide.total(), 3);
        assert_eq!(guide.collected_count(), 1);

        let penguin = guide.entries.iter().find(|e| e.animal_id == "a2").unwrap();
        assert_eq!(penguin.name, "Penguin");
        assert_eq!(penguin.facility_name, "Aquarium");
        assert_eq!(penguin.slot_number, Some(1));

        let giraffe = guide.entries.iter().find(|e| e.animal_id == "a1").unwrap();
        assert!(!giraffe.is_collected());
    }
}
