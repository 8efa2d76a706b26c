//! Ordered campus schema migrations.
//!
//! # Responsibility
//! - List the schema steps for students, instructors, courses and
//!   enrollments in the order they ship.
//! - Bring a connection up to the newest step inside one transaction.
//!
//! # Invariants
//! - Step versions start at 1 and grow by one; released steps never change.
//! - `PRAGMA user_version` equals the last applied step.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::Connection;

/// One schema step, identified in errors and logs by `version` and `name`.
#[derive(Debug, Clone, Copy)]
struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[
    SchemaStep {
        version: 1,
        name: "campus_tables",
        sql: include_str!("0001_init.sql"),
    },
    SchemaStep {
        version: 2,
        name: "enrollment_indexes",
        sql: include_str!("0002_enrollment_indexes.sql"),
    },
];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Applies all pending migrations on the provided connection.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the database is newer than this binary.
/// - `Migration` naming the failing step; earlier steps of the same call are
///   rolled back with it.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    apply_steps(conn, SCHEMA_STEPS)
}

fn apply_steps(conn: &mut Connection, steps: &[SchemaStep]) -> DbResult<()> {
    let from_version = current_user_version(conn)?;
    let latest = steps.last().map_or(0, |step| step.version);

    if from_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }
    if from_version == latest {
        debug!("event=db_migrate module=db status=ok version={from_version} pending=0");
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in steps.iter().filter(|step| step.version > from_version) {
        tx.execute_batch(step.sql)
            .and_then(|()| tx.pragma_update(None, "user_version", step.version))
            .map_err(|source| DbError::Migration {
                version: step.version,
                name: step.name,
                source,
            })?;
        debug!(
            "event=db_migrate_step module=db status=ok version={} name={}",
            step.version, step.name
        );
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={}",
        from_version, latest
    );
    Ok(())
}

pub(crate) fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::{apply_steps, current_user_version, latest_version, SchemaStep};
    use crate::db::DbError;
    use rusqlite::Connection;

    const BROKEN_STEPS: &[SchemaStep] = &[
        SchemaStep {
            version: 1,
            name: "rooms",
            sql: "CREATE TABLE rooms (id INTEGER PRIMARY KEY);",
        },
        SchemaStep {
            version: 2,
            name: "broken_rooms_index",
            sql: "CREATE INDEX idx_rooms_missing ON rooms(missing_column);",
        },
    ];

    #[test]
    fn shipped_steps_are_numbered_from_one() {
        for (index, step) in super::SCHEMA_STEPS.iter().enumerate() {
            assert_eq!(step.version as usize, index + 1, "step {}", step.name);
        }
        assert_eq!(latest_version(), 2);
    }

    #[test]
    fn failing_step_is_named_and_rolls_back_the_batch() {
        let mut conn = Connection::open_in_memory().unwrap();

        let err = apply_steps(&mut conn, BROKEN_STEPS).unwrap_err();
        match &err {
            DbError::Migration { version, name, .. } => {
                assert_eq!(*version, 2);
                assert_eq!(*name, "broken_rooms_index");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("broken_rooms_index"));

        assert_eq!(current_user_version(&conn).unwrap(), 0);
        let rooms: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'rooms';",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(rooms, 0);
    }

    #[test]
    fn up_to_date_connection_is_left_alone() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_steps(&mut conn, &BROKEN_STEPS[..1]).unwrap();
        apply_steps(&mut conn, &BROKEN_STEPS[..1]).unwrap();

        assert_eq!(current_user_version(&conn).unwrap(), 1);
    }
}
