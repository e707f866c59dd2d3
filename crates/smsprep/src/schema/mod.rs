//! Column roles and per-column profiles.

mod column;
mod roles;
mod types;

pub use column::{ColumnProfile, NUMERIC_THRESHOLD};
pub use roles::{ColumnRoles, PHONE_COLUMN, RoleColumn, RoleDetector, RoleKeywords};
pub use types::{ColumnKind, Role};
