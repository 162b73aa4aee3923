#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Row-level ACL filtering for list queries.
//!
//! Given a [`PermissionDefinition`](acl_security::PermissionDefinition) and the
//! caller's token, the filter joins the ids of every permitted object onto an
//! existing `SeaORM` or `SeaQuery` select:
//!
//! ```text
//! INNER JOIN (
//!     SELECT DISTINCT o.object_identifier AS id
//!     FROM acl_object_identities o
//!     INNER JOIN acl_classes c ON c.id = o.class_id
//!     LEFT JOIN acl_entries e ON e.class_id = o.class_id
//!         AND (e.object_identity_id = o.id OR e.object_identity_id IS NULL)
//!     LEFT JOIN acl_security_identities s ON s.id = e.security_identity_id
//!     WHERE c.class_type = ? AND s.identifier IN (?, ...) AND (e.mask & ?) > 0
//! ) perms_ ON perms_.id = <alias>.<primary key>
//! ```
//!
//! Entries without an object identity are class-scoped and grant access to
//! every object of the class. An entry matches when its mask shares any bit
//! with the requested mask.
//!
//! # Policy
//!
//! | Situation | Behavior |
//! |-----------|----------|
//! | `enable_permissions: false` | Query returned unchanged |
//! | No token | Anonymous and public-access identities only |
//! | Composite primary key | `UnsupportedSchema`, no join added |
//! | Unknown permission name | `Permission`, no join added |
//!
//! [`AclFilter::apply_statement`] leaves the statement untouched on error.
//! [`AclFilter::apply`] consumes the `Select` and drops it on error.
//!
//! # Features
//! - `sqlite` (default), `pg`, `mysql`: enable the matching `SeaORM` driver

pub mod config;
pub mod error;
pub mod filter;
pub mod metadata;
pub mod platform;
pub mod schema;
mod select;

pub use config::AclConfig;
pub use error::{AclFilterError, ConfigError};
pub use filter::{AclContext, AclFilter, PERMS_ALIAS};
pub use metadata::{key_columns, single_key_column};
pub use select::AclSelectExt;
