use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::Result;
use crate::store::PersistenceSlot;

/// Read the payload stored under `name`, if any.
pub fn read_slot(conn: &Connection, name: &str) -> Result<Option<String>> {
    let payload = conn
        .query_row(
            "SELECT payload FROM slots WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(payload)
}

/// Replace the payload stored under `name`. Using an upsert keeps every write
/// a whole-document replacement.
pub fn write_slot(conn: &Connection, name: &str, payload: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO slots (name, payload, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(name) DO UPDATE SET payload = excluded.payload,
                                         updated_at = excluded.updated_at",
        params![name, payload, Utc::now().to_rfc3339()],
    )?;
    Ok(())
}

/// A named slot inside the kiosk database.
pub struct SqliteSlot {
    conn: Connection,
    name: String,
}

impl SqliteSlot {
    /// Slot name the participant roster lives under.
    pub const PARTICIPANTS: &'static str = "participants";

    pub fn new(conn: Connection, name: impl Into<String>) -> Self {
        Self {
            conn,
            name: name.into(),
        }
    }

    /// Convenience constructor for the participant roster slot.
    pub fn participants(conn: Connection) -> Self {
        Self::new(conn, Self::PARTICIPANTS)
    }
}

impl PersistenceSlot for SqliteSlot {
    fn load(&self) -> Result<Option<String>> {
        read_slot(&self.conn, &self.name)
    }

    fn save(&mut self, payload: &str) -> Result<()> {
        write_slot(&self.conn, &self.name, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    #[test]
    fn missing_slot_reads_none() {
        let conn = open_in_memory().unwrap();
        assert_eq!(read_slot(&conn, "participants").unwrap(), None);
    }

    #[test]
    fn write_replaces_previous_payload() {
        let conn = open_in_memory().unwrap();
        write_slot(&conn, "participants", "[1]").unwrap();
        write_slot(&conn, "participants", "[2]").unwrap();
        assert_eq!(
            read_slot(&conn, "participants").unwrap().as_deref(),
            Some("[2]")
        );

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM slots", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn slots_are_independent() {
        let conn = open_in_memory().unwrap();
        write_slot(&conn, "a", "x").unwrap();
        write_slot(&conn, "b", "y").unwrap();
        assert_eq!(read_slot(&conn, "a").unwrap().as_deref(), Some("x"));
        assert_eq!(read_slot(&conn, "b").unwrap().as_deref(), Some("y"));
    }
}
