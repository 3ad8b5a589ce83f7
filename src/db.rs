use chrono::Utc;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, Row};

use crate::models::familia::{Familia, NewFamilia};
use crate::models::persona::{NewPersona, Persona};

pub type SqlitePool = Pool<SqliteConnectionManager>;

pub fn init_pool(path: &str) -> Result<SqlitePool, r2d2::Error> {
    let manager = SqliteConnectionManager::file(path);
    Pool::new(manager)
}

/// Single-connection pool over a private in-memory database.
///
/// Each SQLite `:memory:` connection is its own database, so the pool must
/// never open a second one.
pub fn memory_pool() -> Result<SqlitePool, r2d2::Error> {
    Pool::builder()
        .max_size(1)
        .build(SqliteConnectionManager::memory())
}

pub fn init_db(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS personas (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nombre TEXT NOT NULL,
            correo TEXT NOT NULL,
            acompanado BOOLEAN NOT NULL DEFAULT 0,
            num_acompanantes INTEGER NOT NULL DEFAULT 0,
            mensaje TEXT,
            codigo_acceso TEXT NOT NULL,
            creado TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS familias (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nombre_familia TEXT NOT NULL,
            correo TEXT NOT NULL,
            num_integrantes INTEGER NOT NULL,
            mensaje TEXT,
            codigo_acceso TEXT NOT NULL,
            creado TEXT NOT NULL
        );
        ",
    )
}

/// Inserts one persona row carrying `codigo`. Returns the new row id.
pub fn insert_persona(conn: &Connection, persona: &NewPersona, codigo: &str) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO personas (nombre, correo, acompanado, num_acompanantes, mensaje, codigo_acceso, creado)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            persona.nombre,
            persona.correo,
            if persona.acompanado { 1 } else { 0 },
            persona.num_acompanantes,
            persona.mensaje,
            codigo,
            Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_familia(conn: &Connection, familia: &NewFamilia, codigo: &str) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO familias (nombre_familia, correo, num_integrantes, mensaje, codigo_acceso, creado)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            familia.nombre_familia,
            familia.correo,
            familia.num_integrantes,
            familia.mensaje,
            codigo,
            Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn persona_from_row(row: &Row<'_>) -> rusqlite::Result<Persona> {
    // stored as an integer flag
    let acompanado: i64 = row.get(3)?;
    Ok(Persona {
        id: Some(row.get(0)?),
        nombre: row.get(1)?,
        correo: row.get(2)?,
        acompanado: acompanado != 0,
        num_acompanantes: row.get(4)?,
        mensaje: row.get(5)?,
        codigo_acceso: row.get(6)?,
        creado: Some(row.get(7)?),
    })
}

fn familia_from_row(row: &Row<'_>) -> rusqlite::Result<Familia> {
    Ok(Familia {
        id: Some(row.get(0)?),
        nombre_familia: row.get(1)?,
        correo: row.get(2)?,
        num_integrantes: row.get(3)?,
        mensaje: row.get(4)?,
        codigo_acceso: row.get(5)?,
        creado: Some(row.get(6)?),
    })
}

pub fn list_personas(conn: &Connection) -> rusqlite::Result<Vec<Persona>> {
    let mut stmt = conn.prepare(
        "SELECT id, nombre, correo, acompanado, num_acompanantes, mensaje, codigo_acceso, creado
         FROM personas ORDER BY id",
    )?;
    let rows = stmt.query_map([], persona_from_row)?;
    rows.collect()
}

pub fn list_familias(conn: &Connection) -> rusqlite::Result<Vec<Familia>> {
    let mut stmt = conn.prepare(
        "SELECT id, nombre_familia, correo, num_integrantes, mensaje, codigo_acceso, creado
         FROM familias ORDER BY id",
    )?;
    let rows = stmt.query_map([], familia_from_row)?;
    rows.collect()
}
