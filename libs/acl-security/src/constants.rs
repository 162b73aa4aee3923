/// Identity granted to every caller, authenticated or not.
pub const ANONYMOUS_IDENTITY: &str = "IS_AUTHENTICATED_ANONYMOUSLY";

/// Identity used for publicly readable objects.
pub const PUBLIC_ACCESS_IDENTITY: &str = "PUBLIC_ACCESS";

/// Role every authenticated user carries implicitly.
/// Grants on it would match all users, so it never takes part in ACL lookups.
pub const DEFAULT_ROLE: &str = "ROLE_USER";
