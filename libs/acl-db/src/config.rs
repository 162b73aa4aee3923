//! ACL filter configuration.
//!
//! ```yaml
//! acl:
//!   enable_permissions: true
//!   default_role: ROLE_USER
//!   role_hierarchy:
//!     ROLE_ADMIN: [ROLE_USER]
//!     ROLE_SUPER_ADMIN: [ROLE_ADMIN]
//! ```

use std::path::Path;

use acl_security::{DEFAULT_ROLE, StaticRoleHierarchy};
use figment::Figment;
use figment::providers::{Env, Format, Yaml};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AclConfig {
    /// When false every query passes through unfiltered.
    pub enable_permissions: bool,
    /// Role all users carry implicitly; never used for ACL lookups.
    pub default_role: String,
    pub role_hierarchy: StaticRoleHierarchy,
}

impl Default for AclConfig {
    fn default() -> Self {
        Self {
            enable_permissions: true,
            default_role: DEFAULT_ROLE.to_owned(),
            role_hierarchy: StaticRoleHierarchy::default(),
        }
    }
}

impl AclConfig {
    /// Key of the configuration section.
    pub const SECTION: &'static str = "acl";

    /// Prefix of environment overrides, e.g. `ACL__ENABLE_PERMISSIONS=false`.
    pub const ENV_PREFIX: &'static str = "ACL__";

    /// Extract the `acl` section, falling back to defaults when it is absent.
    ///
    /// # Errors
    /// Returns `ConfigError::Figment` if the section cannot be deserialized.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        if !figment.contains(Self::SECTION) {
            return Ok(Self::default());
        }
        Ok(figment.extract_inner(Self::SECTION)?)
    }

    /// Load from an optional YAML file, then apply `ACL__*` environment overrides.
    ///
    /// Role names are case-sensitive, so `role_hierarchy` can only be set from YAML.
    ///
    /// # Errors
    /// Returns `ConfigError::Figment` if a source cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        let figment = figment.merge(
            Env::prefixed(Self::ENV_PREFIX)
                .split("__")
                .map(|key| format!("{}.{}", Self::SECTION, key.as_str()).into()),
        );
        Self::from_figment(&figment)
    }

    #[must_use]
    pub fn role_hierarchy(&self) -> &StaticRoleHierarchy {
        &self.role_hierarchy
    }
}
