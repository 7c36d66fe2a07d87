//! Board command: the 3×3 bingo board from committed stamps.

use serde::Serialize;
use std::fmt;

use stampzoo_core::{BingoBoard, BINGO_CAPACITY};

use crate::error::ApiError;
use crate::state::AppContext;

/// One printed cell.
#[derive(Debug, Clone, Serialize)]
pub struct BoardCell {
    pub slot_number: u32,
    pub animal_id: Option<String>,
    pub name: Option<String>,
    pub is_test: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardView {
    pub card: Option<String>,
    pub collected: u32,
    pub complete: bool,
    pub cells: Vec<BoardCell>,
}

pub async fn handle_board(ctx: &AppContext) -> Result<BoardView, ApiError> {
    let stamps = ctx.db().stamps().list_by_slot().await?;
    let board = BingoBoard::from_stamps(&stamps);
    let lang = ctx.language();
    let catalog = ctx.catalog();

    let cells = board
        .slots()
        .iter()
        .map(|slot| {
            let stamp = slot.stamp.as_ref();
            BoardCell {
                slot_number: slot.slot_number,
                animal_id: stamp.map(|s| s.animal_id.clone()),
                name: stamp
                    .and_then(|s| catalog.animal(&s.animal_id))
                    .map(|a| a.name(lang).to_string()),
                is_test: stamp.is_some_and(|s| s.is_test_collection),
            }
        })
        .collect();

    Ok(BoardView {
        card: catalog.active_bingo_card().map(|c| c.name(lang).to_string()),
        collected: board.collected_count(),
        complete: board.is_complete(),
        cells,
    })
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(card) = &self.card {
            writeln!(f, "{}", card)?;
        }
        for row in self.cells.chunks(stampzoo_core::BINGO_GRID_SIZE) {
            let labels: Vec<String> = row
                .iter()
                .map(|cell| match (&cell.name, &cell.animal_id) {
                    (Some(name), _) => format!("{:>2} {}", cell.slot_number, name),
                    (None, Some(id)) => format!("{:>2} {}", cell.slot_number, id),
                    (None, None) => format!("{:>2} ·", cell.slot_number),
                })
                .collect();
            writeln!(f, "{}", labels.join(" | "))?;
        }
        write!(f, "{}/{} collected", self.collected, BINGO_CAPACITY)?;
        if self.complete {
            write!(f, " - BINGO!")?;
        }
        Ok(())
    }
}
