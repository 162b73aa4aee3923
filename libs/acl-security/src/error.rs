/// Errors raised while turning permission names into a mask.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PermissionError {
    /// The permission name has no bit in the mask table.
    #[error("unknown permission: {0}")]
    Unknown(String),

    /// A permission definition was built without any permission.
    #[error("a permission definition needs at least one permission")]
    Empty,
}
