//! Business rules for the school site: validation, normalisation and id
//! assignment for every entity, plus inline image handling.

pub mod services;

pub use services::*;
