//! Service layer providing business-oriented operations on top of models.
//! - Separates business logic from data access.
//! - Reuses entity definitions in the `models` crate.
//! - Provides clear error types mapped to HTTP statuses at the server boundary.

pub mod errors;
pub mod services;
pub mod storage;
#[cfg(test)]
pub mod test_support;
