#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::Path;

use acl_db::{AclConfig, AclFilter};
use acl_security::RoleHierarchy;
use figment::Jail;

#[test]
fn yaml_file_is_loaded() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "acl.yaml",
            r"
acl:
  enable_permissions: false
  default_role: ROLE_MEMBER
  role_hierarchy:
    ROLE_ADMIN: [ROLE_EDITOR]
",
        )?;

        let cfg = AclConfig::load(Some(Path::new("acl.yaml"))).unwrap();
        assert!(!cfg.enable_permissions);
        assert_eq!(cfg.default_role, "ROLE_MEMBER");
        assert_eq!(
            cfg.role_hierarchy()
                .reachable_role_names(&["ROLE_ADMIN".to_owned()]),
            vec!["ROLE_ADMIN", "ROLE_EDITOR"]
        );
        assert!(!AclFilter::from_config(&cfg).is_enabled());
        Ok(())
    });
}

#[test]
fn environment_overrides_yaml() {
    Jail::expect_with(|jail| {
        jail.create_file("acl.yaml", "acl:\n  enable_permissions: false\n")?;
        jail.set_env("ACL__ENABLE_PERMISSIONS", "true");
        jail.set_env("ACL__DEFAULT_ROLE", "ROLE_MEMBER");

        let cfg = AclConfig::load(Some(Path::new("acl.yaml"))).unwrap();
        assert!(cfg.enable_permissions);
        assert_eq!(cfg.default_role, "ROLE_MEMBER");
        Ok(())
    });
}

#[test]
fn no_sources_means_defaults() {
    Jail::expect_with(|_jail| {
        let cfg = AclConfig::load(None).unwrap();
        assert_eq!(cfg, AclConfig::default());
        assert!(AclFilter::from_config(&cfg).is_enabled());
        Ok(())
    });
}
