//! Domain layer for users: entities, validation, password hashing

pub mod entities;
pub mod password;
pub mod validation;
