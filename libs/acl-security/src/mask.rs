//! Permission names and the bitmasks stored in `acl_entries.mask`.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use crate::error::PermissionError;

/// A named permission with exactly one entry in the mask table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Permission {
    View,
    Create,
    Edit,
    Delete,
    Publish,
    Unpublish,
    Master,
    Owner,
    /// Every bit set. Reserved for super administrators.
    Iddqd,
}

/// Single-bit permissions in pattern order, lowest bit first.
const SINGLE_BITS: [(Permission, char); 8] = [
    (Permission::View, 'V'),
    (Permission::Create, 'C'),
    (Permission::Edit, 'E'),
    (Permission::Delete, 'D'),
    (Permission::Publish, 'P'),
    (Permission::Unpublish, 'U'),
    (Permission::Master, 'M'),
    (Permission::Owner, 'N'),
];

impl Permission {
    pub const ALL: [Permission; 9] = [
        Permission::View,
        Permission::Create,
        Permission::Edit,
        Permission::Delete,
        Permission::Publish,
        Permission::Unpublish,
        Permission::Master,
        Permission::Owner,
        Permission::Iddqd,
    ];

    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Permission::View => 1,
            Permission::Create => 1 << 1,
            Permission::Edit => 1 << 2,
            Permission::Delete => 1 << 3,
            Permission::Publish => 1 << 4,
            Permission::Unpublish => 1 << 5,
            Permission::Master => 1 << 6,
            Permission::Owner => 1 << 7,
            Permission::Iddqd => 0x3FFF_FFFF,
        }
    }

    /// Lower-case name as used in permission definitions.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Permission::View => "view",
            Permission::Create => "create",
            Permission::Edit => "edit",
            Permission::Delete => "delete",
            Permission::Publish => "publish",
            Permission::Unpublish => "unpublish",
            Permission::Master => "master",
            Permission::Owner => "owner",
            Permission::Iddqd => "iddqd",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Permission {
    type Err = PermissionError;

    /// Names are matched case-insensitively, so `"VIEW"` and `"view"` are the same permission.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Permission::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| PermissionError::Unknown(name.to_owned()))
    }
}

/// Combined permission bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Mask(u32);

impl Mask {
    pub const EMPTY: Mask = Mask(0);

    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if every bit of `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Mask) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if `self` and `other` share at least one bit.
    /// This is the test the ACL join applies to stored entries.
    #[must_use]
    pub const fn intersects(self, other: Mask) -> bool {
        self.0 & other.0 != 0
    }

    /// Named permissions fully contained in this mask.
    #[must_use]
    pub fn permissions(self) -> Vec<Permission> {
        Permission::ALL
            .iter()
            .copied()
            .filter(|p| self.contains(Mask::from(*p)))
            .collect()
    }
}

impl From<Permission> for Mask {
    fn from(p: Permission) -> Self {
        Mask(p.bits())
    }
}

impl BitOr for Mask {
    type Output = Mask;

    fn bitor(self, rhs: Mask) -> Mask {
        Mask(self.0 | rhs.0)
    }
}

impl BitOrAssign for Mask {
    fn bitor_assign(&mut self, rhs: Mask) {
        self.0 |= rhs.0;
    }
}

/// Renders the single-bit permissions, highest bit on the left, `.` for unset bits.
impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (permission, code) in SINGLE_BITS.iter().rev() {
            let c = if self.contains(Mask::from(*permission)) {
                *code
            } else {
                '.'
            };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Accumulates permissions into a [`Mask`].
#[derive(Debug, Clone, Default)]
pub struct MaskBuilder {
    mask: Mask,
}

impl MaskBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, permission: Permission) -> &mut Self {
        self.mask |= Mask::from(permission);
        self
    }

    /// Add a permission by name.
    ///
    /// # Errors
    /// Returns `PermissionError::Unknown` if the name has no bit mapping.
    /// The builder is left untouched in that case.
    pub fn add_permission(&mut self, name: &str) -> Result<&mut Self, PermissionError> {
        let permission = name.parse::<Permission>()?;
        Ok(self.add(permission))
    }

    #[must_use]
    pub fn build(&self) -> Mask {
        self.mask
    }

    pub fn reset(&mut self) {
        self.mask = Mask::EMPTY;
    }
}
