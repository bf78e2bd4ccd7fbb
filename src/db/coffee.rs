//! Fixed queries against the `coffee` table. Reads map straight onto
//! [`StoreError::Query`]; writes run inside a single transaction each and are
//! rolled back before the error reaches the caller.

use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::error::{Result, StoreError};
use crate::models::{Coffee, CoffeeDraft};

const SELECT_COLUMNS: &str =
    "SELECT id, name, roast_level, type, taste_description, price, package_volume FROM coffee";

/// Retrieve every row. No ORDER BY on purpose: the grid shows rows in the
/// order SQLite hands them back, which is insertion order in practice.
pub(super) fn fetch_all(conn: &Connection) -> Result<Vec<Coffee>> {
    let mut stmt = conn.prepare(SELECT_COLUMNS)?;

    let rows = stmt
        .query_map([], coffee_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub(super) fn fetch_one(conn: &Connection, id: i64) -> Result<Option<Coffee>> {
    let coffee = conn
        .query_row(
            &format!("{SELECT_COLUMNS} WHERE id = ?1"),
            [id],
            coffee_from_row,
        )
        .optional()?;

    Ok(coffee)
}

pub(super) fn insert(conn: &Connection, draft: &CoffeeDraft) -> Result<i64> {
    let id = write_in_transaction(conn, "insert", |tx| {
        tx.execute(
            "INSERT INTO coffee
                (name, roast_level, type, taste_description, price, package_volume)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                draft.name,
                draft.roast_level,
                draft.kind,
                draft.taste_description,
                draft.price,
                draft.package_volume
            ],
        )?;
        Ok(tx.last_insert_rowid())
    })?;

    info!("inserted coffee {id} ({})", draft.name);
    Ok(id)
}

pub(super) fn update(conn: &Connection, id: i64, draft: &CoffeeDraft) -> Result<()> {
    let updated = write_in_transaction(conn, "update", |tx| {
        tx.execute(
            "UPDATE coffee SET
                name = ?1, roast_level = ?2, type = ?3,
                taste_description = ?4, price = ?5, package_volume = ?6
             WHERE id = ?7",
            params![
                draft.name,
                draft.roast_level,
                draft.kind,
                draft.taste_description,
                draft.price,
                draft.package_volume,
                id
            ],
        )
    })?;

    if updated == 0 {
        warn!("update of coffee {id} touched no rows");
    } else {
        info!("updated coffee {id} ({})", draft.name);
    }
    Ok(())
}

/// Run `op` inside its own transaction. Commit on success; on failure roll
/// back explicitly and report the original SQLite error.
fn write_in_transaction<T>(
    conn: &Connection,
    action: &str,
    op: impl FnOnce(&Connection) -> rusqlite::Result<T>,
) -> Result<T> {
    let tx = conn
        .unchecked_transaction()
        .map_err(StoreError::Persistence)?;

    match op(&*tx) {
        Ok(value) => {
            tx.commit().map_err(StoreError::Persistence)?;
            Ok(value)
        }
        Err(err) => {
            warn!("{action} failed, rolling back: {err}");
            if let Err(rollback_err) = tx.rollback() {
                warn!("rollback after failed {action} also failed: {rollback_err}");
            }
            Err(StoreError::Persistence(err))
        }
    }
}

fn coffee_from_row(row: &Row<'_>) -> rusqlite::Result<Coffee> {
    Ok(Coffee {
        id: row.get(0)?,
        name: row.get(1)?,
        roast_level: row.get(2)?,
        kind: row.get(3)?,
        taste_description: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        price: row.get(5)?,
        package_volume: row.get(6)?,
    })
}
