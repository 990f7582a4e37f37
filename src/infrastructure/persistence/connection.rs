//! SQLite connection pool and schema bootstrap

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use super::RepoError;

/// Open the pool and create tables. Foreign keys are enforced so cascade
/// deletes and reference checks happen in the storage layer; unique
/// constraints back the name-uniqueness and learned-spell-pair invariants.
pub async fn connect(database_url: &str) -> Result<SqlitePool, RepoError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(RepoError::from)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    initialize_schema(&pool).await?;
    Ok(pool)
}

async fn initialize_schema(pool: &SqlitePool) -> Result<(), RepoError> {
    let statements = [
        "CREATE TABLE IF NOT EXISTS races (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL,
            playable INTEGER NOT NULL DEFAULT 1,
            speed INTEGER NOT NULL DEFAULT 30,
            darkvision INTEGER NOT NULL DEFAULT 0,
            size TEXT NOT NULL DEFAULT 'MEDIUM',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS classes (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL,
            hit_die INTEGER NOT NULL,
            primary_ability TEXT NOT NULL,
            saving_throws TEXT NOT NULL,
            spellcasting INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS subclasses (
            id TEXT PRIMARY KEY,
            class_id TEXT NOT NULL REFERENCES classes(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            description TEXT NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS spells (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL,
            level INTEGER NOT NULL,
            school TEXT NOT NULL,
            casting_time TEXT NOT NULL,
            spell_range TEXT NOT NULL,
            components TEXT NOT NULL,
            duration TEXT NOT NULL,
            concentration INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS weapons (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL,
            weapon_type TEXT NOT NULL,
            damage TEXT NOT NULL,
            two_handed INTEGER NOT NULL DEFAULT 0,
            versatile INTEGER NOT NULL DEFAULT 0,
            weapon_range INTEGER,
            architype TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS characters (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            level INTEGER NOT NULL DEFAULT 1,
            experience INTEGER NOT NULL DEFAULT 0,
            strength INTEGER NOT NULL DEFAULT 10,
            dexterity INTEGER NOT NULL DEFAULT 10,
            constitution INTEGER NOT NULL DEFAULT 10,
            intelligence INTEGER NOT NULL DEFAULT 10,
            wisdom INTEGER NOT NULL DEFAULT 10,
            charisma INTEGER NOT NULL DEFAULT 10,
            race_id TEXT NOT NULL REFERENCES races(id),
            class_id TEXT NOT NULL REFERENCES classes(id),
            subclass_id TEXT REFERENCES subclasses(id),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS inventories (
            id TEXT PRIMARY KEY,
            character_id TEXT NOT NULL UNIQUE
                REFERENCES characters(id) ON DELETE CASCADE,
            gold INTEGER NOT NULL DEFAULT 0,
            capacity INTEGER NOT NULL DEFAULT 20
        )",
        "CREATE TABLE IF NOT EXISTS items (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 1,
            inventory_id TEXT REFERENCES inventories(id) ON DELETE CASCADE,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS equipment (
            id TEXT PRIMARY KEY,
            character_id TEXT NOT NULL UNIQUE
                REFERENCES characters(id) ON DELETE CASCADE
        )",
        "CREATE TABLE IF NOT EXISTS equipment_slots (
            id TEXT PRIMARY KEY,
            equipment_id TEXT NOT NULL REFERENCES equipment(id) ON DELETE CASCADE,
            slot TEXT NOT NULL,
            item_id TEXT NOT NULL REFERENCES items(id) ON DELETE CASCADE,
            UNIQUE (equipment_id, slot)
        )",
        "CREATE TABLE IF NOT EXISTS character_spells (
            id TEXT PRIMARY KEY,
            character_id TEXT NOT NULL REFERENCES characters(id) ON DELETE CASCADE,
            spell_id TEXT NOT NULL REFERENCES spells(id) ON DELETE CASCADE,
            UNIQUE (character_id, spell_id)
        )",
    ];

    for statement in statements {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::debug!("Database schema initialized");
    Ok(())
}
