//! # Stamp Collection Transaction
//!
//! The single write path for collected stamps.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     collect(request)                                    │
//! │                                                                         │
//! │  acquire write gate (one collection per Database at a time)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN IMMEDIATE ───────────────────────────────────────┐              │
//! │  │ find_by_animal_id ── found ──► ROLLBACK  AlreadyCollected            │
//! │  │ count_collected ──── >= 9 ───► ROLLBACK  CapacityReached             │
//! │  │ insert(slot = count + 1)                             │              │
//! │  COMMIT ────────────────────────────────────────────────┘              │
//! │       │                                                                 │
//! │       ├── ok ─────────────► bump change feed  Collected { stamp }      │
//! │       └── busy / slot race ► re-run from BEGIN (bounded)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The gate only covers writers sharing one `Database`. Writers on other
//! handles or in other processes serialize on SQLite's write lock, taken at
//! `BEGIN IMMEDIATE` and waited for under the connection's busy timeout.
//! The schema's UNIQUE and CHECK constraints back this up; a lost race
//! surfaces as a busy or UNIQUE error and the attempt is evaluated again
//! against the newly committed state.
//!
//! Dropping the returned future mid-flight drops the sqlx transaction, which
//! rolls back. No partial row is ever visible.

use tracing::{debug, error, info, warn};

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use crate::repository::stamp::{NewStamp, StampRepository};
use stampzoo_core::{CollectOutcome, CollectRequest, BINGO_CAPACITY};

/// Upper bound on evaluations of one request when the store reports a
/// conflict.
pub const MAX_COLLECT_ATTEMPTS: u32 = 3;

const BEGIN_IMMEDIATE: &str = "BEGIN IMMEDIATE";

/// Records stamps, enforcing one stamp per animal and nine slots in
/// collection order.
///
/// ## Example
/// ```rust,ignore
/// let collector = StampCollector::new(db.clone());
/// let request = CollectRequest::new("a1", raw, "North Zoo")?;
///
/// match collector.collect(&request).await? {
///     CollectOutcome::Collected { stamp } => println!("slot {}", stamp.slot_number),
///     CollectOutcome::AlreadyCollected => println!("already have it"),
///     CollectOutcome::CapacityReached => println!("board is full"),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct StampCollector {
    db: Database,
}

impl StampCollector {
    pub fn new(db: Database) -> Self {
        StampCollector { db }
    }

    /// Attempts to collect the stamp described by `request`.
    ///
    /// ## Returns
    /// - `Collected { stamp }` with the assigned slot
    /// - `AlreadyCollected` / `CapacityReached` with nothing written
    ///
    /// ## Errors
    /// Store failures. Check [`DbError::is_retryable`] to tell a temporary
    /// outage apart from a broken database.
    pub async fn collect(&self, request: &CollectRequest) -> DbResult<CollectOutcome> {
        let _gate = self.db.write_gate().lock().await;

        let mut attempt = 1;
        loop {
            match self.try_collect(request).await {
                Ok(outcome) => {
                    self.log_outcome(request, &outcome);
                    if outcome.is_collected() {
                        self.db.notify_changed();
                    }
                    return Ok(outcome);
                }
                Err(err) if attempt < MAX_COLLECT_ATTEMPTS && is_conflict(&err) => {
                    warn!(
                        animal_id = %request.animal_id(),
                        attempt,
                        error = %err,
                        "Collection conflicted, re-evaluating"
                    );
                    attempt += 1;
                    tokio::task::yield_now().await;
                }
                Err(err) => {
                    error!(
                        animal_id = %request.animal_id(),
                        attempt,
                        retryable = err.is_retryable(),
                        error = %err,
                        "Collection failed"
                    );
                    return Err(err);
                }
            }
        }
    }

    /// One evaluation of the rules inside one transaction.
    async fn try_collect(&self, request: &CollectRequest) -> DbResult<CollectOutcome> {
        // IMMEDIATE takes the write lock up front, so a competing writer
        // waits out busy_timeout here instead of failing on lock upgrade.
        let mut tx = self
            .db
            .pool()
            .begin_with(BEGIN_IMMEDIATE)
            .await
            .map_err(|e| match DbError::from(e) {
                DbError::Busy(msg) => DbError::Busy(msg),
                other => DbError::TransactionFailed(other.to_string()),
            })?;

        if StampRepository::find_by_animal_id(&mut tx, request.animal_id())
            .await?
            .is_some()
        {
            tx.rollback().await?;
            return Ok(CollectOutcome::AlreadyCollected);
        }

        let count = StampRepository::count_collected(&mut tx).await?;
        if count >= BINGO_CAPACITY {
            tx.rollback().await?;
            return Ok(CollectOutcome::CapacityReached);
        }

        let stamp = StampRepository::insert(&mut tx, NewStamp::now(count + 1, request)).await?;

        tx.commit().await?;
        debug!(id = stamp.id, slot_number = stamp.slot_number, "Stamp committed");

        Ok(CollectOutcome::Collected { stamp })
    }

    fn log_outcome(&self, request: &CollectRequest, outcome: &CollectOutcome) {
        match outcome {
            CollectOutcome::Collected { stamp } => info!(
                animal_id = %stamp.animal_id,
                slot_number = stamp.slot_number,
                is_test = stamp.is_test_collection,
                "Stamp collected"
            ),
            CollectOutcome::AlreadyCollected => info!(
                animal_id = %request.animal_id(),
                "Stamp already collected"
            ),
            CollectOutcome::CapacityReached => info!(
                animal_id = %request.animal_id(),
                capacity = BINGO_CAPACITY,
                "Bingo board full"
            ),
        }
    }
}

/// Errors after which re-reading committed state can change the answer.
fn is_conflict(err: &DbError) -> bool {
    matches!(err, DbError::Busy(_) | DbError::UniqueViolation { .. })
}

// =============================================================================
// Unit Tests
// =============================================================================
