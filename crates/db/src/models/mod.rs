//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Serialize` response struct safe for API output
//! - A create DTO for inserts

pub mod user;
