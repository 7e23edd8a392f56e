use rusqlite::Connection;

use crate::error::Result;

pub const SCHEMA_VERSION: i64 = 1;

pub fn initialize(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA journal_mode = WAL;")?;
    conn.pragma_update(None, "busy_timeout", 5000)?;

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS metadata (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS digits (
            digit          INTEGER PRIMARY KEY,
            name           TEXT NOT NULL,
            essence        TEXT NOT NULL,
            numerator      INTEGER NOT NULL,
            denominator    INTEGER NOT NULL DEFAULT 1,
            base_resonance INTEGER NOT NULL,
            hue            INTEGER NOT NULL,
            source         TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS relations (
            a              INTEGER NOT NULL,
            b              INTEGER NOT NULL,
            relation_label TEXT NOT NULL,
            result         INTEGER NOT NULL,
            consciousness  INTEGER NOT NULL,
            frequency_hz   INTEGER NOT NULL,
            harmonic       INTEGER NOT NULL,
            vortex_flow    TEXT NOT NULL,
            color_hsl      TEXT NOT NULL,
            sound_hz       REAL NOT NULL,
            PRIMARY KEY (a, b)
        );

        CREATE TABLE IF NOT EXISTS matrix_cells (
            anchor INTEGER NOT NULL,
            i      INTEGER NOT NULL,
            j      INTEGER NOT NULL,
            value  INTEGER NOT NULL,
            PRIMARY KEY (anchor, i, j)
        );
        ",
    )?;

    let existing: Option<String> = conn
        .query_row(
            "SELECT value FROM metadata WHERE key = 'schema_version'",
            [],
            |row| row.get(0),
        )
        .ok();
    if existing.is_none() {
        conn.execute(
            "INSERT INTO metadata (key, value) VALUES ('schema_version', ?1)",
            [SCHEMA_VERSION.to_string()],
        )?;
        tracing::info!("initialized catalog schema v{SCHEMA_VERSION}");
    }

    Ok(())
}
