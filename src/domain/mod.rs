//! Domain model: entities and value objects. Serde stays out of the
//! entities; wire shapes live in `application::dto`.

pub mod entities;
pub mod value_objects;
