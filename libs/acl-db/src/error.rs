use acl_security::PermissionError;

/// Errors raised while adding the ACL join to a query.
///
/// Every variant except `Db` is returned before the query is touched.
#[derive(thiserror::Error, Debug)]
pub enum AclFilterError {
    /// A permission name could not be turned into a mask.
    #[error(transparent)]
    Permission(#[from] PermissionError),

    /// The entity is not keyed by exactly one column.
    #[error("entity {entity} must have a single-column primary key, found {key_columns:?}")]
    UnsupportedSchema {
        entity: String,
        key_columns: Vec<String>,
    },

    /// A native query was filtered without naming the alias of the ACL'd table.
    #[error("permission definition for {entity} has no SQL alias")]
    MissingAlias { entity: String },

    /// Database error while reading ACL rows.
    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),
}

/// Errors raised while loading [`crate::AclConfig`].
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid ACL configuration: {0}")]
    Figment(#[from] figment::Error),
}
