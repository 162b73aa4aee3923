#![allow(clippy::unwrap_used, clippy::expect_used)]

use acl_security::{Mask, MaskBuilder, Permission, PermissionDefinition, PermissionError};

fn mask_of(names: &[&str]) -> Mask {
    let mut builder = MaskBuilder::new();
    for name in names {
        builder.add_permission(name).unwrap();
    }
    builder.build()
}

#[test]
fn union_of_sets_is_or_of_masks() {
    let sets: [&[&str]; 4] = [
        &["view"],
        &["edit", "delete"],
        &["publish", "view"],
        &["owner", "master", "create"],
    ];
    for a in sets {
        for b in sets {
            let union: Vec<&str> = a.iter().chain(b.iter()).copied().collect();
            assert_eq!(mask_of(&union), mask_of(a) | mask_of(b), "{a:?} + {b:?}");
        }
    }
}

#[test]
fn insertion_order_does_not_matter() {
    assert_eq!(
        mask_of(&["view", "edit", "unpublish"]),
        mask_of(&["unpublish", "view", "edit"])
    );
}

#[test]
fn decoded_mask_contains_every_requested_permission() {
    let requested = [Permission::Edit, Permission::Publish, Permission::Owner];
    let mut builder = MaskBuilder::new();
    for p in requested {
        builder.add(p);
    }
    let decoded = builder.build().permissions();
    for p in requested {
        assert!(decoded.contains(&p), "{p} missing from {decoded:?}");
    }
}

#[test]
fn definition_fails_fast_on_unknown_name() {
    let def = PermissionDefinition::new(["view", "approve"], "Node", Some("n")).unwrap();
    assert!(matches!(def.mask(), Err(PermissionError::Unknown(name)) if name == "approve"));
}
