//! SQL schema for the TFG SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` gates future
//! migrations.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    user_id      TEXT PRIMARY KEY,
    email        TEXT NOT NULL UNIQUE,
    display_name TEXT NOT NULL,
    roles        TEXT NOT NULL DEFAULT '[]',  -- JSON array of role tags
    is_active    INTEGER NOT NULL DEFAULT 1,
    created_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS committees (
    committee_id TEXT PRIMARY KEY,
    name         TEXT NOT NULL,
    president_id TEXT NOT NULL REFERENCES users(user_id),
    secretary_id TEXT NOT NULL REFERENCES users(user_id),
    member_id    TEXT NOT NULL REFERENCES users(user_id),
    is_active    INTEGER NOT NULL DEFAULT 1,
    CHECK (president_id != secretary_id
       AND president_id != member_id
       AND secretary_id != member_id)
);

CREATE TABLE IF NOT EXISTS theses (
    thesis_id   TEXT PRIMARY KEY,
    title       TEXT NOT NULL,
    state       TEXT NOT NULL DEFAULT 'draft',
    student_id  TEXT NOT NULL REFERENCES users(user_id),
    tutor_id    TEXT REFERENCES users(user_id),
    co_tutor_id TEXT REFERENCES users(user_id),
    defense_id  TEXT,
    created_at  TEXT NOT NULL
);

-- scheduled_at is fixed-width RFC 3339 UTC so BETWEEN compares correctly.
CREATE TABLE IF NOT EXISTS defenses (
    defense_id            TEXT PRIMARY KEY,
    thesis_id             TEXT NOT NULL REFERENCES theses(thesis_id),
    committee_id          TEXT NOT NULL REFERENCES committees(committee_id),
    state                 TEXT NOT NULL DEFAULT 'scheduled',
    scheduled_at          TEXT NOT NULL,
    classroom             TEXT NOT NULL,
    duration_minutes      INTEGER NOT NULL DEFAULT 30,
    certificate_generated INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS notifications (
    notification_id TEXT PRIMARY KEY,
    user_id         TEXT NOT NULL REFERENCES users(user_id),
    kind            TEXT NOT NULL DEFAULT 'info',
    title           TEXT NOT NULL,
    message         TEXT NOT NULL DEFAULT '',
    is_read         INTEGER NOT NULL DEFAULT 0,
    created_at      TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS theses_student_idx        ON theses(student_id);
CREATE INDEX IF NOT EXISTS defenses_committee_idx    ON defenses(committee_id, scheduled_at);
CREATE INDEX IF NOT EXISTS defenses_classroom_idx    ON defenses(classroom, scheduled_at);
CREATE INDEX IF NOT EXISTS notifications_user_idx    ON notifications(user_id);

PRAGMA user_version = 1;
";
