//! Joins the set of permitted object ids onto list queries.

use std::fmt;

use acl_security::{
    AuthToken, IdentityResolver, Mask, PermissionDefinition, RoleHierarchy, SecurityIdentities,
};
use sea_orm::sea_query::{
    Alias, BinOper, Condition, Expr, JoinType, Order, Query, SelectStatement, SimpleExpr,
};
use sea_orm::{ConnectionTrait, DbBackend, EntityTrait, QueryTrait, Select};
use tracing::{debug, trace};

use crate::config::AclConfig;
use crate::error::AclFilterError;
use crate::metadata::{key_columns, single_key_column};
use crate::platform::object_identifier_cast;
use crate::schema::{AclClasses, AclEntries, AclObjectIdentities, AclSecurityIdentities};

/// Alias of the derived table joined onto the caller's query.
pub const PERMS_ALIAS: &str = "perms_";

/// Who is asking: the caller's token (if any) and the hierarchy its roles expand through.
#[derive(Clone, Copy)]
pub struct AclContext<'a> {
    token: Option<&'a AuthToken>,
    hierarchy: &'a dyn RoleHierarchy,
}

impl fmt::Debug for AclContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AclContext")
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

impl<'a> AclContext<'a> {
    #[must_use]
    pub fn new(token: Option<&'a AuthToken>, hierarchy: &'a dyn RoleHierarchy) -> Self {
        Self { token, hierarchy }
    }

    #[must_use]
    pub fn anonymous(hierarchy: &'a dyn RoleHierarchy) -> Self {
        Self::new(None, hierarchy)
    }

    #[must_use]
    pub fn token(&self) -> Option<&'a AuthToken> {
        self.token
    }
}

/// Row-level ACL filter.
///
/// Stateless between calls: the mask and the identities are recomputed for
/// every query, nothing is cached.
#[derive(Debug, Clone)]
pub struct AclFilter {
    enabled: bool,
    resolver: IdentityResolver,
}

impl Default for AclFilter {
    fn default() -> Self {
        Self::new(true, IdentityResolver::default())
    }
}

impl AclFilter {
    #[must_use]
    pub fn new(enabled: bool, resolver: IdentityResolver) -> Self {
        Self { enabled, resolver }
    }

    #[must_use]
    pub fn from_config(config: &AclConfig) -> Self {
        Self::new(
            config.enable_permissions,
            IdentityResolver::new(config.default_role.clone()),
        )
    }

    /// A filter that lets every query through untouched.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(false, IdentityResolver::default())
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Restrict a `SeaORM` select on `E` to the rows the caller may access.
    ///
    /// The join targets the definition's alias, or the entity's table name when
    /// the definition has none. Existing filters, joins and ordering are kept.
    ///
    /// # Errors
    /// - `AclFilterError::UnsupportedSchema` if `E` has a composite primary key
    /// - `AclFilterError::Permission` if a permission name is unknown
    ///
    /// `select` is consumed and dropped when an error is returned. Build it
    /// again, or use [`AclFilter::apply_statement`] on `select.query()` to keep
    /// the statement on failure.
    pub fn apply<E>(
        &self,
        mut select: Select<E>,
        def: &PermissionDefinition,
        backend: DbBackend,
        ctx: &AclContext<'_>,
    ) -> Result<Select<E>, AclFilterError>
    where
        E: EntityTrait,
    {
        if !self.enabled {
            debug!(entity = def.entity(), "permissions disabled, ACL filter skipped");
            return Ok(select);
        }

        let entity = E::default();
        let alias = def.alias().unwrap_or_else(|| entity.table_name());
        let keys = key_columns::<E>();

        let join = self.permitted_join(def, &keys, backend, ctx)?;
        join.attach(select.query(), alias);
        Ok(select)
    }

    /// Restrict a native `SeaQuery` select. The definition must carry the alias
    /// under which the ACL'd table appears in `stmt`.
    ///
    /// # Errors
    /// - `AclFilterError::MissingAlias` if the definition has no alias
    /// - `AclFilterError::UnsupportedSchema` unless `key_columns` has exactly one entry
    /// - `AclFilterError::Permission` if a permission name is unknown
    ///
    /// `stmt` is not modified when an error is returned.
    pub fn apply_statement<S>(
        &self,
        stmt: &mut SelectStatement,
        def: &PermissionDefinition,
        key_columns: &[S],
        backend: DbBackend,
        ctx: &AclContext<'_>,
    ) -> Result<(), AclFilterError>
    where
        S: AsRef<str>,
    {
        if !self.enabled {
            debug!(entity = def.entity(), "permissions disabled, ACL filter skipped");
            return Ok(());
        }

        let alias = def.alias().ok_or_else(|| AclFilterError::MissingAlias {
            entity: def.entity().to_owned(),
        })?;

        let join = self.permitted_join(def, key_columns, backend, ctx)?;
        join.attach(stmt, alias);
        Ok(())
    }

    /// Object identifiers of `def.entity()` the caller may access, sorted.
    ///
    /// Returns `None` when permissions are disabled, meaning "no restriction".
    ///
    /// # Errors
    /// - `AclFilterError::Permission` if a permission name is unknown
    /// - `AclFilterError::Db` if the ACL tables cannot be read
    pub async fn allowed_object_identifiers<C>(
        &self,
        conn: &C,
        def: &PermissionDefinition,
        ctx: &AclContext<'_>,
    ) -> Result<Option<Vec<String>>, AclFilterError>
    where
        C: ConnectionTrait,
    {
        if !self.enabled {
            return Ok(None);
        }

        let mask = def.mask()?;
        let identities = self.resolver.resolve(ctx.token, ctx.hierarchy);
        let mut query = permitted_ids_query(def.entity(), &identities, mask, None);
        query.order_by((Alias::new("o"), AclObjectIdentities::ObjectIdentifier), Order::Asc);

        let stmt = conn.get_database_backend().build(&query);
        let rows = conn.query_all(stmt).await?;
        let ids = rows
            .iter()
            .map(|row| row.try_get::<String>("", "id"))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            entity = def.entity(),
            count = ids.len(),
            "resolved allowed object identifiers"
        );
        Ok(Some(ids))
    }

    /// Resolves everything the join needs. Nothing is mutated here, so any
    /// error leaves the caller's query as it was.
    fn permitted_join<'k, S>(
        &self,
        def: &PermissionDefinition,
        key_columns: &'k [S],
        backend: DbBackend,
        ctx: &AclContext<'_>,
    ) -> Result<PermittedJoin<'k>, AclFilterError>
    where
        S: AsRef<str>,
    {
        let key_column = single_key_column(def.entity(), key_columns)?;
        let mask = def.mask()?;
        let identities = self.resolver.resolve(ctx.token, ctx.hierarchy);
        trace!(identities = ?identities.to_strings(), "ACL identities");

        debug!(
            entity = def.entity(),
            key_column,
            mask = mask.bits(),
            identities = identities.len(),
            "ACL filter applied"
        );

        Ok(PermittedJoin {
            subquery: permitted_ids_query(
                def.entity(),
                &identities,
                mask,
                object_identifier_cast(backend),
            ),
            key_column,
        })
    }
}

struct PermittedJoin<'k> {
    subquery: SelectStatement,
    key_column: &'k str,
}

impl PermittedJoin<'_> {
    /// `INNER JOIN (<subquery>) perms_ ON perms_.id = <alias>.<key>`
    fn attach(self, stmt: &mut SelectStatement, alias: &str) {
        stmt.join_subquery(
            JoinType::InnerJoin,
            self.subquery,
            Alias::new(PERMS_ALIAS),
            Expr::col((Alias::new(PERMS_ALIAS), Alias::new("id")))
                .equals((Alias::new(alias), Alias::new(self.key_column))),
        );
    }
}

/// Distinct object identifiers of `entity` on which any of `identities` holds
/// an entry intersecting `mask`, selected as `id`.
///
/// Entries with a NULL object identity are class-scoped and match every
/// object of the class.
pub(crate) fn permitted_ids_query(
    entity: &str,
    identities: &SecurityIdentities,
    mask: Mask,
    cast: Option<&'static str>,
) -> SelectStatement {
    let o = || Alias::new("o");
    let c = || Alias::new("c");
    let e = || Alias::new("e");
    let s = || Alias::new("s");

    let object_identifier = Expr::col((o(), AclObjectIdentities::ObjectIdentifier));
    let id_expr: SimpleExpr = match cast {
        Some(ty) => object_identifier.cast_as(Alias::new(ty)),
        None => object_identifier.into(),
    };

    let mask_test = SimpleExpr::Binary(
        Box::new(Expr::col((e(), AclEntries::Mask)).into()),
        BinOper::BitAnd,
        Box::new(Expr::val(i64::from(mask.bits())).into()),
    );

    Query::select()
        .distinct()
        .expr_as(id_expr, Alias::new("id"))
        .from_as(AclObjectIdentities::Table, o())
        .join_as(
            JoinType::InnerJoin,
            AclClasses::Table,
            c(),
            Expr::col((c(), AclClasses::Id)).equals((o(), AclObjectIdentities::ClassId)),
        )
        .join_as(
            JoinType::LeftJoin,
            AclEntries::Table,
            e(),
            Condition::all()
                .add(
                    Expr::col((e(), AclEntries::ClassId))
                        .equals((o(), AclObjectIdentities::ClassId)),
                )
                .add(
                    Condition::any()
                        .add(
                            Expr::col((e(), AclEntries::ObjectIdentityId))
                                .equals((o(), AclObjectIdentities::Id)),
                        )
                        .add(Expr::col((e(), AclEntries::ObjectIdentityId)).is_null()),
                ),
        )
        .join_as(
            JoinType::LeftJoin,
            AclSecurityIdentities::Table,
            s(),
            Expr::col((s(), AclSecurityIdentities::Id))
                .equals((e(), AclEntries::SecurityIdentityId)),
        )
        .and_where(Expr::col((c(), AclClasses::ClassType)).eq(entity))
        .and_where(
            Expr::col((s(), AclSecurityIdentities::Identifier)).is_in(identities.to_strings()),
        )
        .and_where(Expr::expr(mask_test).gt(0))
        .to_owned()
}
