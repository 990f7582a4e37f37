//! SQLite persistence adapters
//!
//! This module implements the repository pattern over a shared
//! `sqlx::SqlitePool`, providing CRUD operations for all domain entities.
//! Storage faults are classified into typed error kinds here; nothing above
//! this layer inspects driver error codes.

mod character_repository;
mod class_repository;
mod connection;
mod equipment_repository;
mod inventory_repository;
mod item_repository;
mod race_repository;
mod spell_repository;
mod spellbook_repository;
mod weapon_repository;

pub use character_repository::CharacterRepository;
pub use class_repository::ClassRepository;
pub use equipment_repository::EquipmentRepository;
pub use inventory_repository::InventoryRepository;
pub use item_repository::ItemRepository;
pub use race_repository::{RaceRepository, LIST_FIELDS as RACE_LIST_FIELDS};
pub use spell_repository::SpellRepository;
pub use spellbook_repository::SpellbookRepository;
pub use weapon_repository::WeaponRepository;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use thiserror::Error;
use uuid::Uuid;

use crate::application::error::ApiError;

/// Typed storage error kinds
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("record not found")]
    NotFound,
    #[error("unique constraint violated")]
    UniqueViolation,
    #[error("referenced record does not exist")]
    ForeignKeyViolation,
    #[error("stored value could not be decoded: {0}")]
    Decode(String),
    #[error(transparent)]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for RepoError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::RowNotFound => RepoError::NotFound,
            sqlx::Error::Database(db) => match db.kind() {
                sqlx::error::ErrorKind::UniqueViolation => RepoError::UniqueViolation,
                sqlx::error::ErrorKind::ForeignKeyViolation => RepoError::ForeignKeyViolation,
                _ => RepoError::Database(e),
            },
            _ => RepoError::Database(e),
        }
    }
}

impl RepoError {
    /// Map to an API error with entity-specific wording, e.g.
    /// "Race not found" / "Race with this name already exists".
    pub fn into_api(self, entity: &str) -> ApiError {
        match self {
            RepoError::NotFound => ApiError::not_found(format!("{entity} not found")),
            RepoError::UniqueViolation => {
                ApiError::conflict(format!("{entity} with this name already exists"))
            }
            RepoError::ForeignKeyViolation => {
                ApiError::bad_reference("Invalid reference ID provided")
            }
            other => ApiError::Internal(anyhow::Error::new(other)),
        }
    }

    /// Like [`into_api`](Self::into_api), but for delete operations, where a
    /// foreign-key violation means live characters still point at the record.
    pub fn into_delete_api(self, entity: &str) -> ApiError {
        match self {
            RepoError::ForeignKeyViolation => {
                ApiError::validation(format!("{entity} is referenced by existing characters"))
            }
            other => other.into_api(entity),
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound => ApiError::not_found("Record not found"),
            RepoError::UniqueViolation => ApiError::conflict("Record already exists"),
            RepoError::ForeignKeyViolation => {
                ApiError::bad_reference("Invalid reference ID provided")
            }
            other => ApiError::Internal(anyhow::Error::new(other)),
        }
    }
}

pub(crate) fn decode_uuid(value: &str) -> Result<Uuid, RepoError> {
    Uuid::parse_str(value).map_err(|_| RepoError::Decode(format!("bad uuid: {value}")))
}

pub(crate) fn decode_datetime(value: &str) -> Result<DateTime<Utc>, RepoError> {
    value
        .parse::<DateTime<Utc>>()
        .map_err(|_| RepoError::Decode(format!("bad timestamp: {value}")))
}

/// Combined repository providing access to all entity repositories
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub async fn connect(database_url: &str) -> Result<Self, RepoError> {
        let pool = connection::connect(database_url).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn races(&self) -> RaceRepository {
        RaceRepository::new(self.pool.clone())
    }

    pub fn classes(&self) -> ClassRepository {
        ClassRepository::new(self.pool.clone())
    }

    pub fn spells(&self) -> SpellRepository {
        SpellRepository::new(self.pool.clone())
    }

    pub fn weapons(&self) -> WeaponRepository {
        WeaponRepository::new(self.pool.clone())
    }

    pub fn items(&self) -> ItemRepository {
        ItemRepository::new(self.pool.clone())
    }

    pub fn characters(&self) -> CharacterRepository {
        CharacterRepository::new(self.pool.clone())
    }

    pub fn inventories(&self) -> InventoryRepository {
        InventoryRepository::new(self.pool.clone())
    }

    pub fn equipment(&self) -> EquipmentRepository {
        EquipmentRepository::new(self.pool.clone())
    }

    pub fn spellbook(&self) -> SpellbookRepository {
        SpellbookRepository::new(self.pool.clone())
    }
}
