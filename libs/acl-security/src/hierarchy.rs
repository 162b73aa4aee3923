use std::collections::{HashMap, HashSet, VecDeque};

/// Expands granted roles into every role they imply.
pub trait RoleHierarchy: Send + Sync {
    /// Returns the given roles followed by every transitively implied role,
    /// each role once.
    fn reachable_role_names(&self, roles: &[String]) -> Vec<String>;
}

/// Hierarchy without implications: every role reaches only itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatRoleHierarchy;

impl RoleHierarchy for FlatRoleHierarchy {
    fn reachable_role_names(&self, roles: &[String]) -> Vec<String> {
        let mut seen = HashSet::new();
        roles
            .iter()
            .filter(|r| seen.insert(r.as_str()))
            .cloned()
            .collect()
    }
}

/// Hierarchy read from configuration, one entry per role listing the roles it implies:
///
/// ```yaml
/// ROLE_ADMIN: [ROLE_USER]
/// ROLE_SUPER_ADMIN: [ROLE_ADMIN, ROLE_ALLOWED_TO_SWITCH]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct StaticRoleHierarchy {
    implied: HashMap<String, Vec<String>>,
}

impl StaticRoleHierarchy {
    #[must_use]
    pub fn new(implied: HashMap<String, Vec<String>>) -> Self {
        Self { implied }
    }

    /// Declare that `role` implies each of `implied`.
    #[must_use]
    pub fn with<I, S>(mut self, role: &str, implied: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.implied
            .entry(role.to_owned())
            .or_default()
            .extend(implied.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.implied.is_empty()
    }
}

impl RoleHierarchy for StaticRoleHierarchy {
    fn reachable_role_names(&self, roles: &[String]) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut reachable = Vec::with_capacity(roles.len());
        let mut queue: VecDeque<&str> = VecDeque::new();

        for role in roles {
            if seen.insert(role) {
                reachable.push(role.clone());
                queue.push_back(role);
            }
        }

        // Breadth-first; `seen` guards against cycles.
        while let Some(role) = queue.pop_front() {
            let Some(children) = self.implied.get(role) else {
                continue;
            };
            for child in children {
                if seen.insert(child) {
                    reachable.push(child.clone());
                    queue.push_back(child);
                }
            }
        }

        reachable
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn roles(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_flat_hierarchy_only_dedups() {
        let got = FlatRoleHierarchy.reachable_role_names(&roles(&["ROLE_A", "ROLE_B", "ROLE_A"]));
        assert_eq!(got, roles(&["ROLE_A", "ROLE_B"]));
    }

    #[test]
    fn test_transitive_expansion() {
        let h = StaticRoleHierarchy::default()
            .with("ROLE_SUPER_ADMIN", ["ROLE_ADMIN"])
            .with("ROLE_ADMIN", ["ROLE_USER", "ROLE_EDITOR"]);
        let got = h.reachable_role_names(&roles(&["ROLE_SUPER_ADMIN"]));
        assert_eq!(
            got,
            roles(&["ROLE_SUPER_ADMIN", "ROLE_ADMIN", "ROLE_USER", "ROLE_EDITOR"])
        );
    }

    #[test]
    fn test_granted_roles_come_first() {
        let h = StaticRoleHierarchy::default().with("ROLE_ADMIN", ["ROLE_USER"]);
        let got = h.reachable_role_names(&roles(&["ROLE_USER", "ROLE_ADMIN"]));
        assert_eq!(got, roles(&["ROLE_USER", "ROLE_ADMIN"]));
    }

    #[test]
    fn test_cycles_terminate() {
        let h = StaticRoleHierarchy::default()
            .with("ROLE_A", ["ROLE_B"])
            .with("ROLE_B", ["ROLE_A", "ROLE_C"]);
        let got = h.reachable_role_names(&roles(&["ROLE_A"]));
        assert_eq!(got, roles(&["ROLE_A", "ROLE_B", "ROLE_C"]));
    }

    #[test]
    fn test_deserializes_from_map() {
        let h: StaticRoleHierarchy =
            serde_json::from_str(r#"{"ROLE_ADMIN": ["ROLE_USER"]}"#).unwrap();
        assert_eq!(
            h.reachable_role_names(&roles(&["ROLE_ADMIN"])),
            roles(&["ROLE_ADMIN", "ROLE_USER"])
        );
    }
}
