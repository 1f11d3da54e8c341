//! SQL schema for the Escala SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- AUTOINCREMENT so ids only ever grow and are never reused.
CREATE TABLE IF NOT EXISTS persons (
    person_id  INTEGER PRIMARY KEY AUTOINCREMENT,
    code       TEXT NOT NULL,
    name       TEXT NOT NULL,
    rank       TEXT NOT NULL,
    UNIQUE (code)
);

-- Shifts are never updated or deleted.
CREATE TABLE IF NOT EXISTS shifts (
    shift_id    INTEGER PRIMARY KEY AUTOINCREMENT,
    person_id   INTEGER NOT NULL REFERENCES persons(person_id),
    duty_date   TEXT NOT NULL,   -- YYYY-MM-DD
    start_time  TEXT NOT NULL,   -- HH:MM, zero-padded so text order is time order
    end_time    TEXT NOT NULL,
    UNIQUE (person_id, duty_date),
    CHECK  (start_time < end_time)
);

CREATE INDEX IF NOT EXISTS shifts_date_start_idx ON shifts(duty_date, start_time);

PRAGMA user_version = 1;
";
