//! # Stamp Repository
//!
//! Database operations for collected stamps.
//!
//! ## Two Kinds of Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Transaction building blocks (associated fns, take a connection)       │
//! │  ├── count_collected(conn)                                             │
//! │  ├── find_by_animal_id(conn, animal_id)                                │
//! │  └── insert(conn, NewStamp)                                            │
//! │       Composed by StampCollector inside ONE transaction:               │
//! │       find → count → insert(slot = count + 1) → commit                 │
//! │                                                                         │
//! │  Read model (methods, run on the pool, see committed rows only)        │
//! │  ├── list_by_slot / list_recent / list_by_test_flag                    │
//! │  ├── get_by_slot / count / mode_summary                                │
//! │  └── delete_all (bulk reset)                                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Callers outside this crate never insert directly; a row is only ever
//! written by the collection transaction.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use stampzoo_core::{CollectRequest, CollectedStamp, ModeSummary};

const STAMP_COLUMNS: &str = r#"
    id,
    slot_number,
    animal_id,
    collected_at_millis,
    source_code,
    facility_name,
    latitude,
    longitude,
    is_test_collection
"#;

/// Values for a row about to be inserted.
///
/// The slot is chosen by the caller from the count it read in the same
/// transaction.
#[derive(Debug, Clone)]
pub struct NewStamp<'a> {
    pub slot_number: u32,
    pub request: &'a CollectRequest,
    pub collected_at_millis: i64,
}

impl<'a> NewStamp<'a> {
    /// Stamps the request with the current wall-clock time.
    pub fn now(slot_number: u32, request: &'a CollectRequest) -> Self {
        NewStamp {
            slot_number,
            request,
            collected_at_millis: Utc::now().timestamp_millis(),
        }
    }
}

/// Repository for collected stamp operations.
#[derive(Debug, Clone)]
pub struct StampRepository {
    pool: SqlitePool,
}

impl StampRepository {
    /// Creates a new StampRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StampRepository { pool }
    }

    // =========================================================================
    // Transaction Building Blocks
    // =========================================================================

    /// Number of collected stamps, as seen by `conn`.
    pub async fn count_collected(conn: &mut SqliteConnection) -> DbResult<u32> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM collected_stamps")
            .fetch_one(conn)
            .await?;

        Ok(count as u32)
    }

    /// The stamp for `animal_id`, if one exists.
    pub async fn find_by_animal_id(
        conn: &mut SqliteConnection,
        animal_id: &str,
    ) -> DbResult<Option<CollectedStamp>> {
        let sql = format!(
            "SELECT {} FROM collected_stamps WHERE animal_id = ?1",
            STAMP_COLUMNS
        );
        let stamp = sqlx::query_as::<_, CollectedStamp>(&sql)
            .bind(animal_id)
            .fetch_optional(conn)
            .await?;

        Ok(stamp)
    }

    /// Inserts one stamp and returns it with its row id.
    ///
    /// ## Errors
    /// `DbError::UniqueViolation` when the animal or slot is already taken,
    /// `DbError::ConstraintViolation` when the slot is outside 1..=9.
    pub async fn insert(
        conn: &mut SqliteConnection,
        new: NewStamp<'_>,
    ) -> DbResult<CollectedStamp> {
        let request = new.request;
        let location = request.location();
        let latitude = location.map(|p| p.latitude);
        let longitude = location.map(|p| p.longitude);

        debug!(
            animal_id = %request.animal_id(),
            slot_number = new.slot_number,
            is_test = request.is_test_collection(),
            "Inserting stamp"
        );

        let result = sqlx::query(
            r#"
            INSERT INTO collected_stamps (
                slot_number, animal_id, collected_at_millis,
                source_code, facility_name,
                latitude, longitude, is_test_collection
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(new.slot_number)
        .bind(request.animal_id())
        .bind(new.collected_at_millis)
        .bind(request.source_code())
        .bind(request.facility_name())
        .bind(latitude)
        .bind(longitude)
        .bind(request.is_test_collection())
        .execute(conn)
        .await?;

        Ok(CollectedStamp {
            id: result.last_insert_rowid(),
            slot_number: new.slot_number,
            animal_id: request.animal_id().to_string(),
            collected_at_millis: new.collected_at_millis,
            source_code: request.source_code().to_string(),
            facility_name: request.facility_name().to_string(),
            latitude,
            longitude,
            is_test_collection: request.is_test_collection(),
        })
    }

    // =========================================================================
    // Read Model
    // =========================================================================

    /// All stamps in board order (slot 1 first).
    pub async fn list_by_slot(&self) -> DbResult<Vec<CollectedStamp>> {
        let sql = format!(
            "SELECT {} FROM collected_stamps ORDER BY slot_number ASC",
            STAMP_COLUMNS
        );
        let stamps = sqlx::query_as::<_, CollectedStamp>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(stamps)
    }

    /// All stamps, newest first.
    pub async fn list_recent(&self) -> DbResult<Vec<CollectedStamp>> {
        let sql = format!(
            "SELECT {} FROM collected_stamps ORDER BY collected_at_millis DESC, id DESC",
            STAMP_COLUMNS
        );
        let stamps = sqlx::query_as::<_, CollectedStamp>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(stamps)
    }

    /// Stamps collected from test codes (`true`) or real codes (`false`),
    /// newest first.
    pub async fn list_by_test_flag(&self, is_test: bool) -> DbResult<Vec<CollectedStamp>> {
        let sql = format!(
            "SELECT {} FROM collected_stamps WHERE is_test_collection = ?1 \
             ORDER BY collected_at_millis DESC, id DESC",
            STAMP_COLUMNS
        );
        let stamps = sqlx::query_as::<_, CollectedStamp>(&sql)
            .bind(is_test)
            .fetch_all(&self.pool)
            .await?;

        Ok(stamps)
    }

    /// The stamp occupying `slot_number`, if any.
    pub async fn get_by_slot(&self, slot_number: u32) -> DbResult<Option<CollectedStamp>> {
        let sql = format!(
            "SELECT {} FROM collected_stamps WHERE slot_number = ?1",
            STAMP_COLUMNS
        );
        let stamp = sqlx::query_as::<_, CollectedStamp>(&sql)
            .bind(slot_number)
            .fetch_optional(&self.pool)
            .await?;

        Ok(stamp)
    }

    /// Looks up a committed stamp by animal.
    pub async fn get_by_animal_id(&self, animal_id: &str) -> DbResult<Option<CollectedStamp>> {
        let mut conn = self.pool.acquire().await?;
        Self::find_by_animal_id(&mut conn, animal_id).await
    }

    /// Number of committed stamps.
    pub async fn count(&self) -> DbResult<u32> {
        let mut conn = self.pool.acquire().await?;
        Self::count_collected(&mut conn).await
    }

    /// Real vs test stamp counts.
    pub async fn mode_summary(&self) -> DbResult<ModeSummary> {
        let (real, test): (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COALESCE(SUM(CASE WHEN is_test_collection = 0 THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN is_test_collection = 1 THEN 1 ELSE 0 END), 0)
            FROM collected_stamps
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(ModeSummary {
            real: real as u32,
            test: test as u32,
        })
    }

    /// Deletes every stamp. Returns the number of rows removed.
    ///
    /// Prefer `Database::reset_collection`, which also serializes against
    /// collections and notifies subscribers.
    pub async fn delete_all(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM collected_stamps")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
