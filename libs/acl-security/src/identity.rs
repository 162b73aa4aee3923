use std::fmt;

use crate::constants::{ANONYMOUS_IDENTITY, PUBLIC_ACCESS_IDENTITY};

/// A string eligible for ACL grants: a role name, one of the anonymous or
/// public markers, or `"<UserClass>-<identifier>"` for a single user.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SecurityIdentity(String);

impl SecurityIdentity {
    #[must_use]
    pub fn role(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn anonymous() -> Self {
        Self(ANONYMOUS_IDENTITY.to_owned())
    }

    #[must_use]
    pub fn public_access() -> Self {
        Self(PUBLIC_ACCESS_IDENTITY.to_owned())
    }

    #[must_use]
    pub fn user(principal: &UserPrincipal) -> Self {
        Self(format!("{}-{}", principal.class_name, principal.identifier))
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SecurityIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered set of identities. Insertion order is kept, duplicates are dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SecurityIdentities(Vec<SecurityIdentity>);

impl SecurityIdentities {
    /// Returns false if the identity was already present.
    pub fn insert(&mut self, identity: SecurityIdentity) -> bool {
        if self.0.contains(&identity) {
            return false;
        }
        self.0.push(identity);
        true
    }

    #[must_use]
    pub fn contains(&self, identity: &str) -> bool {
        self.0.iter().any(|i| i.as_str() == identity)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SecurityIdentity> {
        self.0.iter()
    }

    /// Identity strings, in order, ready to be bound as query parameters.
    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|i| i.0.clone()).collect()
    }
}

impl<'a> IntoIterator for &'a SecurityIdentities {
    type Item = &'a SecurityIdentity;
    type IntoIter = std::slice::Iter<'a, SecurityIdentity>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A concrete, logged-in user.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserPrincipal {
    class_name: String,
    identifier: String,
}

impl UserPrincipal {
    /// `class_name` is the fully qualified user class as written in
    /// `acl_security_identities.identifier` (e.g. `App\Entity\User`).
    #[must_use]
    pub fn new(class_name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            identifier: identifier.into(),
        }
    }

    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Stable user identifier (login name, e-mail, ...).
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

/// The authenticated caller, passed explicitly to the resolver.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuthToken {
    role_names: Vec<String>,
    user: Option<UserPrincipal>,
}

impl AuthToken {
    #[must_use]
    pub fn new<I, S>(role_names: I, user: Option<UserPrincipal>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            role_names: role_names.into_iter().map(Into::into).collect(),
            user,
        }
    }

    /// Token for a user principal with the given roles.
    #[must_use]
    pub fn for_user<I, S>(user: UserPrincipal, role_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(role_names, Some(user))
    }

    #[must_use]
    pub fn role_names(&self) -> &[String] {
        &self.role_names
    }

    #[must_use]
    pub fn user(&self) -> Option<&UserPrincipal> {
        self.user.as_ref()
    }
}
