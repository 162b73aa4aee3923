use acl_security::PermissionDefinition;
use sea_orm::{DbBackend, EntityTrait, Select};

use crate::error::AclFilterError;
use crate::filter::{AclContext, AclFilter};

/// Adds `.with_acl(...)` to `SeaORM` selects.
///
/// # Example
/// ```rust,ignore
/// use acl_db::{AclContext, AclFilter, AclSelectExt};
/// use acl_security::PermissionDefinition;
///
/// let def = PermissionDefinition::new(["view"], "App\\Entity\\Article", None)?;
/// let ctx = AclContext::new(Some(&token), &hierarchy);
/// let articles = article::Entity::find()
///     .filter(article::Column::Published.eq(true))
///     .with_acl(&filter, &def, db.get_database_backend(), &ctx)?
///     .order_by_asc(article::Column::Title)
///     .all(&db)
///     .await?;
/// ```
pub trait AclSelectExt<E: EntityTrait>: Sized {
    /// Restrict this select to rows the caller may access.
    ///
    /// # Errors
    /// See [`AclFilter::apply`].
    fn with_acl(
        self,
        filter: &AclFilter,
        def: &PermissionDefinition,
        backend: DbBackend,
        ctx: &AclContext<'_>,
    ) -> Result<Select<E>, AclFilterError>;
}

impl<E> AclSelectExt<E> for Select<E>
where
    E: EntityTrait,
{
    fn with_acl(
        self,
        filter: &AclFilter,
        def: &PermissionDefinition,
        backend: DbBackend,
        ctx: &AclContext<'_>,
    ) -> Result<Select<E>, AclFilterError> {
        filter.apply(self, def, backend, ctx)
    }
}
