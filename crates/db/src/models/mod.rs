//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for partial updates
//!
//! Field names stay in the legacy wire vocabulary (`nome`, `codigo`,
//! `valor`, ...) so rows serialize to the documented JSON shapes without
//! renames; the few spots where the wire name differs from the column
//! name (`estudante` vs `estudante_id`) carry an explicit serde rename.

pub mod course;
pub mod enrollment;
pub mod grade;
pub mod student;
pub mod teacher;
pub mod user;
