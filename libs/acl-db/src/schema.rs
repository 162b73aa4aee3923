//! Tables of the ACL storage schema.
//!
//! The filter only reads these tables. [`install`] exists for applications
//! and tests that own the schema themselves.

use sea_orm::sea_query::{ColumnDef, Table, TableCreateStatement};
use sea_orm::{ConnectionTrait, DbErr, DeriveIden};
use tracing::debug;

#[derive(DeriveIden, Clone, Copy)]
pub enum AclClasses {
    Table,
    Id,
    ClassType,
}

#[derive(DeriveIden, Clone, Copy)]
pub enum AclObjectIdentities {
    Table,
    Id,
    ClassId,
    ObjectIdentifier,
}

#[derive(DeriveIden, Clone, Copy)]
pub enum AclEntries {
    Table,
    Id,
    ClassId,
    ObjectIdentityId,
    SecurityIdentityId,
    Mask,
}

#[derive(DeriveIden, Clone, Copy)]
pub enum AclSecurityIdentities {
    Table,
    Id,
    Identifier,
}

/// `CREATE TABLE IF NOT EXISTS` statements for the four ACL tables.
#[must_use]
pub fn create_statements() -> Vec<TableCreateStatement> {
    vec![
        Table::create()
            .table(AclClasses::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(AclClasses::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(
                ColumnDef::new(AclClasses::ClassType)
                    .string_len(200)
                    .not_null()
                    .unique_key(),
            )
            .to_owned(),
        Table::create()
            .table(AclSecurityIdentities::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(AclSecurityIdentities::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(
                ColumnDef::new(AclSecurityIdentities::Identifier)
                    .string_len(200)
                    .not_null()
                    .unique_key(),
            )
            .to_owned(),
        Table::create()
            .table(AclObjectIdentities::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(AclObjectIdentities::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(
                ColumnDef::new(AclObjectIdentities::ClassId)
                    .integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(AclObjectIdentities::ObjectIdentifier)
                    .string_len(100)
                    .not_null(),
            )
            .to_owned(),
        Table::create()
            .table(AclEntries::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(AclEntries::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(AclEntries::ClassId).integer().not_null())
            .col(ColumnDef::new(AclEntries::ObjectIdentityId).integer().null())
            .col(
                ColumnDef::new(AclEntries::SecurityIdentityId)
                    .integer()
                    .not_null(),
            )
            .col(ColumnDef::new(AclEntries::Mask).integer().not_null())
            .to_owned(),
    ]
}

/// Create the ACL tables on `conn` unless they already exist.
///
/// # Errors
/// Returns `DbErr` if a `CREATE TABLE` statement fails.
pub async fn install<C>(conn: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let backend = conn.get_database_backend();
    for stmt in create_statements() {
        conn.execute(backend.build(&stmt)).await?;
    }
    debug!(?backend, "ACL schema installed");
    Ok(())
}
