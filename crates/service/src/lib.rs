//! Service layer for the toy store.
//! - `toys::domain` holds the record shape shared with the HTTP layer.
//! - `toys::repository` is the storage seam handlers depend on.
//! - `toys::memory` is the process-lifetime implementation.

pub mod errors;
pub mod toys;
