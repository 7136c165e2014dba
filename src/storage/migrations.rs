//! Database migrations

use rusqlite::Connection;
use tracing::debug;

use crate::error::{CmError, Result};

const MIGRATIONS: [&str; 2] = [
    include_str!("../../migrations/001_initial_schema.sql"),
    include_str!("../../migrations/002_keyword_schema.sql"),
];

#[allow(clippy::cast_possible_truncation)]
pub const SCHEMA_VERSION: u32 = MIGRATIONS.len() as u32;

/// Run all pending migrations on the database.
///
/// Progress is tracked in `PRAGMA user_version`, so reopening an existing
/// store only applies what it is missing.
pub fn run_migrations(conn: &Connection) -> Result<u32> {
    let current_version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .map_err(|err| CmError::Migration(err.to_string()))?;

    for (idx, sql) in MIGRATIONS.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let target_version = (idx + 1) as u32;
        if current_version >= target_version {
            continue;
        }

        debug!(version = target_version, "applying migration");
        conn.execute_batch(sql).map_err(|err| {
            CmError::Migration(format!("migration {target_version} failed: {err}"))
        })?;
        conn.pragma_update(None, "user_version", target_version)
            .map_err(|err| {
                CmError::Migration(format!(
                    "failed to set user_version {target_version}: {err}"
                ))
            })?;
    }

    Ok(SCHEMA_VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_user_version(conn: &Connection) -> u32 {
        conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
            .unwrap()
    }

    fn table_exists(conn: &Connection, name: &str) -> bool {
        let count: i64 = conn
            .query_row(
                "SELECT count(*) FROM sqlite_master WHERE type='table' AND name=?",
                [name],
                |row| row.get(0),
            )
            .unwrap();
        count == 1
    }

    #[test]
    fn schema_version_matches_migrations_count() {
        assert_eq!(SCHEMA_VERSION as usize, MIGRATIONS.len());
    }

    #[test]
    fn migrations_are_not_empty() {
        for (idx, sql) in MIGRATIONS.iter().enumerate() {
            assert!(!sql.trim().is_empty(), "Migration {} is empty", idx + 1);
        }
    }

    #[test]
    fn run_migrations_on_empty_database() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(get_user_version(&conn), 0);

        let result = run_migrations(&conn).unwrap();
        assert_eq!(result, SCHEMA_VERSION);
        assert_eq!(get_user_version(&conn), SCHEMA_VERSION);
    }

    #[test]
    fn run_migrations_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        for _ in 0..3 {
            assert_eq!(run_migrations(&conn).unwrap(), SCHEMA_VERSION);
        }
        assert_eq!(get_user_version(&conn), SCHEMA_VERSION);
    }

    #[test]
    fn creates_skill_id_schema() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        for table in [
            "skills",
            "industry_standards",
            "industry_standard_skills",
            "job_requirements",
            "job_requirement_skills",
            "courses",
            "learning_objectives",
            "learning_objective_skills",
        ] {
            assert!(table_exists(&conn, table), "missing table {table}");
        }
    }

    #[test]
    fn creates_keyword_schema() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        for table in ["objective_keywords", "standard_keywords", "job_skills"] {
            assert!(table_exists(&conn, table), "missing table {table}");
        }
    }

    #[test]
    fn resumes_from_partial_version() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(MIGRATIONS[0]).unwrap();
        conn.pragma_update(None, "user_version", 1).unwrap();

        assert_eq!(run_migrations(&conn).unwrap(), SCHEMA_VERSION);
        assert!(table_exists(&conn, "objective_keywords"));
    }

    #[test]
    fn migration_keeps_existing_rows() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn.execute(
            "INSERT INTO skills (id, name, description) VALUES ('S1', 'python', '')",
            [],
        )
        .unwrap();

        run_migrations(&conn).unwrap();
        let count: i64 = conn
            .query_row("SELECT count(*) FROM skills", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
