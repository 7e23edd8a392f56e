use std::path::Path;

use rusqlite::{Connection, params};
use vx_core::{
    BASE_FREQUENCY_HZ, Digit, InteractionMatrix, MATRIX_SIZE, PairRelation, RelationCatalog,
};

use crate::error::{Result, StoreError};
use crate::schema;

/// SQLite-backed materialization of a [`RelationCatalog`].
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    // --- Metadata ---

    pub fn get_metadata(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM metadata WHERE key = ?1")?;
        let result = stmt.query_row([key], |row| row.get(0)).ok();
        Ok(result)
    }

    pub fn set_metadata(&self, key: &str, value: &str) -> Result<()> {
        set_metadata_on(&self.conn, key, value)
    }

    /// Table label of the stored catalog (e.g. `main+audit`), if one has
    /// been saved.
    pub fn catalog_convention(&self) -> Result<Option<String>> {
        self.get_metadata("convention")
    }

    // --- Save ---

    /// Replace the stored catalog with `catalog` in one transaction.
    pub fn save_catalog(&self, catalog: &RelationCatalog) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute_batch("DELETE FROM relations; DELETE FROM matrix_cells; DELETE FROM digits;")?;

        set_metadata_on(&tx, "convention", &catalog.table.label())?;
        set_metadata_on(&tx, "color_policy", policy_label(catalog))?;
        set_metadata_on(&tx, "base_frequency_hz", &BASE_FREQUENCY_HZ.to_string())?;

        for row in catalog.table.rows() {
            tx.execute(
                "INSERT INTO digits (digit, name, essence, numerator, denominator, base_resonance,
                                     hue, source)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    row.digit.value(),
                    row.name,
                    row.essence,
                    row.multiplier.numerator,
                    row.multiplier.denominator,
                    row.base_resonance,
                    row.hue,
                    row.source,
                ],
            )?;
        }

        for relation in catalog.relations() {
            save_relation_on(&tx, relation)?;
        }

        for matrix in catalog.matrices() {
            save_matrix_on(&tx, matrix)?;
        }

        tx.commit()?;
        tracing::info!(
            "saved catalog ({}): {} relations, {} matrices",
            catalog.table.label(),
            catalog.relations().len(),
            catalog.matrices().len()
        );
        Ok(())
    }

    // --- Load ---

    pub fn relation_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM relations", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn load_relation(&self, a: Digit, b: Digit) -> Result<Option<PairRelation>> {
        let mut stmt = self.conn.prepare(
            "SELECT relation_label, result, consciousness, frequency_hz, harmonic,
                    vortex_flow, color_hsl, sound_hz
             FROM relations WHERE a = ?1 AND b = ?2",
        )?;
        let mut rows = stmt.query(params![a.value(), b.value()])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        let harmonic = Digit::nonzero(row.get(4)?)?;
        let frequency_hz: u32 = row.get(3)?;
        if frequency_hz != harmonic.value() as u32 * BASE_FREQUENCY_HZ {
            return Err(StoreError::InvalidData(format!(
                "relation ({a}, {b}) frequency {frequency_hz} is not harmonic {harmonic} x {BASE_FREQUENCY_HZ}"
            )));
        }
        let flow: String = row.get(5)?;
        Ok(Some(PairRelation {
            a,
            b,
            relation_label: row.get(0)?,
            result: Digit::nonzero(row.get(1)?)?,
            consciousness: Digit::nonzero(row.get(2)?)?,
            frequency_hz,
            harmonic,
            vortex_flow: decode_flow(&flow)?,
            color_hsl: row.get(6)?,
            sound_hz: row.get(7)?,
        }))
    }

    pub fn load_matrix(&self, anchor: Digit) -> Result<Option<InteractionMatrix>> {
        let mut stmt = self
            .conn
            .prepare("SELECT i, j, value FROM matrix_cells WHERE anchor = ?1")?;
        let cells_iter = stmt.query_map([anchor.value()], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, u8>(2)?,
            ))
        })?;

        let mut cells = [[Digit::NINE; MATRIX_SIZE]; MATRIX_SIZE];
        let mut seen = 0usize;
        for cell in cells_iter {
            let (i, j, value) = cell?;
            let (i, j) = (i as usize, j as usize);
            if i >= MATRIX_SIZE || j >= MATRIX_SIZE {
                return Err(StoreError::InvalidData(format!(
                    "matrix {anchor} cell ({i}, {j}) out of bounds"
                )));
            }
            cells[i][j] = Digit::nonzero(value)?;
            seen += 1;
        }

        match seen {
            0 => Ok(None),
            n if n == MATRIX_SIZE * MATRIX_SIZE => Ok(Some(InteractionMatrix { anchor, cells })),
            n => Err(StoreError::InvalidData(format!(
                "matrix {anchor} has {n} cells, expected {}",
                MATRIX_SIZE * MATRIX_SIZE
            ))),
        }
    }

    /// Truncate the WAL into the main database file.
    pub fn checkpoint_truncate(&self) -> Result<()> {
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}

fn set_metadata_on(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        params![key, value],
    )?;
    Ok(())
}

fn save_relation_on(conn: &Connection, r: &PairRelation) -> Result<()> {
    conn.execute(
        "INSERT INTO relations (a, b, relation_label, result, consciousness, frequency_hz,
                                harmonic, vortex_flow, color_hsl, sound_hz)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            r.a.value(),
            r.b.value(),
            r.relation_label,
            r.result.value(),
            r.consciousness.value(),
            r.frequency_hz,
            r.harmonic.value(),
            encode_flow(&r.vortex_flow),
            r.color_hsl,
            r.sound_hz,
        ],
    )?;
    Ok(())
}

fn save_matrix_on(conn: &Connection, m: &InteractionMatrix) -> Result<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO matrix_cells (anchor, i, j, value) VALUES (?1, ?2, ?3, ?4)",
    )?;
    for (i, row) in m.cells.iter().enumerate() {
        for (j, cell) in row.iter().enumerate() {
            stmt.execute(params![m.anchor.value(), i as i64, j as i64, cell.value()])?;
        }
    }
    Ok(())
}

fn policy_label(catalog: &RelationCatalog) -> &'static str {
    match catalog.policy {
        vx_core::ColorPolicy::Unclamped => "unclamped",
        vx_core::ColorPolicy::Clamped => "clamped",
    }
}

/// `[2, 4, 8]` ↔ `"2,4,8"`.
fn encode_flow(flow: &[Digit]) -> String {
    flow.iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn decode_flow(s: &str) -> Result<Vec<Digit>> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    s.split(',')
        .map(|part| -> Result<Digit> {
            let v: u8 = part
                .trim()
                .parse()
                .map_err(|_| StoreError::InvalidData(format!("bad flow element '{part}'")))?;
            Ok(Digit::new(v)?)
        })
        .collect()
}
