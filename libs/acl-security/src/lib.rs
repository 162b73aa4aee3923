#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Security primitives for row-level ACL filtering.
//!
//! This crate has no database dependency. It turns permission names into
//! bitmasks and derives the set of security identities a caller acts as.
//! The query side lives in `acl_db`.
pub mod constants;
pub mod definition;
pub mod error;
pub mod hierarchy;
pub mod identity;
pub mod mask;
pub mod resolver;

pub use constants::{ANONYMOUS_IDENTITY, DEFAULT_ROLE, PUBLIC_ACCESS_IDENTITY};
pub use definition::PermissionDefinition;
pub use error::PermissionError;
pub use hierarchy::{FlatRoleHierarchy, RoleHierarchy, StaticRoleHierarchy};
pub use identity::{AuthToken, SecurityIdentities, SecurityIdentity, UserPrincipal};
pub use mask::{Mask, MaskBuilder, Permission};
pub use resolver::IdentityResolver;
