use tracing::trace;

use crate::constants::DEFAULT_ROLE;
use crate::hierarchy::RoleHierarchy;
use crate::identity::{AuthToken, SecurityIdentities, SecurityIdentity};

/// Derives the security identities a caller acts as.
///
/// Resolution rules:
/// 1. The anonymous and public-access markers are always present, also for
///    authenticated callers, so anonymous-level grants apply to everyone.
/// 2. With a token, every role reachable from its granted roles is added,
///    except the default role that all users carry implicitly.
/// 3. With a user principal, its `"<class>-<identifier>"` identity comes last.
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    default_role: String,
}

impl Default for IdentityResolver {
    fn default() -> Self {
        Self::new(DEFAULT_ROLE)
    }
}

impl IdentityResolver {
    #[must_use]
    pub fn new(default_role: impl Into<String>) -> Self {
        Self {
            default_role: default_role.into(),
        }
    }

    #[must_use]
    pub fn default_role(&self) -> &str {
        &self.default_role
    }

    #[must_use]
    pub fn resolve(
        &self,
        token: Option<&AuthToken>,
        hierarchy: &dyn RoleHierarchy,
    ) -> SecurityIdentities {
        let mut identities = SecurityIdentities::default();
        identities.insert(SecurityIdentity::anonymous());
        identities.insert(SecurityIdentity::public_access());

        let Some(token) = token else {
            trace!("no token, resolved anonymous identities only");
            return identities;
        };

        for role in hierarchy.reachable_role_names(token.role_names()) {
            if role != self.default_role {
                identities.insert(SecurityIdentity::role(role));
            }
        }

        if let Some(user) = token.user() {
            identities.insert(SecurityIdentity::user(user));
        }

        trace!(count = identities.len(), "resolved security identities");
        identities
    }
}
