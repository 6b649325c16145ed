//! Versioned schema steps for the key/value database.
//!
//! # Responsibility
//! - Describe every schema change as an ordered, embedded SQL step.
//! - Bring `PRAGMA user_version` in line with the steps that ran.
//!
//! # Invariants
//! - Step versions are contiguous and strictly increasing from 1.
//! - A database whose version exceeds the newest step is rejected, never
//!   downgraded.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

struct SchemaStep {
    to_version: u32,
    ddl: &'static str,
}

// One key/value table carries the whole app today; the step list keeps the
// door open for real tables later.
const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    to_version: 1,
    ddl: include_str!("0001_kv.sql"),
}];

/// Returns the newest schema version this build understands.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.to_version)
}

/// Runs every step newer than the database's stored version, inside one
/// transaction.
pub fn run_pending(conn: &mut Connection) -> DbResult<()> {
    let found = stored_version(conn)?;
    let supported = latest_version();

    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }

    let pending: Vec<&SchemaStep> = SCHEMA_STEPS
        .iter()
        .filter(|step| step.to_version > found)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in pending {
        tx.execute_batch(step.ddl)?;
        tx.pragma_update(None, "user_version", step.to_version)?;
    }
    tx.commit()?;
    Ok(())
}

fn stored_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version)
}
