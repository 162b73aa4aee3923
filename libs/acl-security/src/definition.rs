use std::collections::BTreeSet;

use crate::error::PermissionError;
use crate::mask::{Mask, MaskBuilder};

/// Names the entity, the SQL alias it is queried under, and the permissions
/// a caller must hold on a row for it to appear in a listing.
///
/// # Example
/// ```
/// use acl_security::PermissionDefinition;
///
/// let def = PermissionDefinition::new(["view"], "App\\Entity\\Article", Some("a")).unwrap();
/// assert_eq!(def.alias(), Some("a"));
/// assert_eq!(def.mask().unwrap().bits(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionDefinition {
    entity: String,
    alias: Option<String>,
    permissions: BTreeSet<String>,
}

impl PermissionDefinition {
    /// Build a definition. Permission names are stored lower-cased and are
    /// only checked against the mask table by [`Self::mask`].
    ///
    /// # Errors
    /// Returns `PermissionError::Empty` if `permissions` yields nothing.
    pub fn new<I, S>(
        permissions: I,
        entity: impl Into<String>,
        alias: Option<&str>,
    ) -> Result<Self, PermissionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let permissions: BTreeSet<String> = permissions
            .into_iter()
            .map(|p| p.as_ref().trim().to_ascii_lowercase())
            .collect();
        if permissions.is_empty() {
            return Err(PermissionError::Empty);
        }
        Ok(Self {
            entity: entity.into(),
            alias: alias.map(str::to_owned),
            permissions,
        })
    }

    /// Class type of the entity as stored in `acl_classes.class_type`.
    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn permissions(&self) -> impl Iterator<Item = &str> {
        self.permissions.iter().map(String::as_str)
    }

    /// Combined mask of all permissions in this definition.
    ///
    /// # Errors
    /// Returns `PermissionError::Unknown` for the first name without a bit mapping.
    pub fn mask(&self) -> Result<Mask, PermissionError> {
        let mut builder = MaskBuilder::new();
        for name in &self.permissions {
            builder.add_permission(name)?;
        }
        Ok(builder.build())
    }
}
