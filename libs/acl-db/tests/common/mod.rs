#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(dead_code)]

use anyhow::Result;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, Schema, Statement,
    Value,
};

pub const ARTICLE_CLASS: &str = "App\\Entity\\Article";
pub const USER_CLASS: &str = "App\\Entity\\User";

pub mod article {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "article")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub title: String,
        pub published: bool,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod translation {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "translation")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub locale: String,
        #[sea_orm(primary_key, auto_increment = false)]
        pub keyword: String,
        pub text: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Fresh in-memory database with the ACL schema, the `article` table and
/// articles 1..=3 (article 3 unpublished).
pub async fn bring_up_sqlite() -> Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await?;

    acl_db::schema::install(&db).await?;

    let schema = Schema::new(DbBackend::Sqlite);
    db.execute(DbBackend::Sqlite.build(&schema.create_table_from_entity(article::Entity)))
        .await?;

    db.execute_unprepared(
        "INSERT INTO article (id, title, published) VALUES \
         (1, 'First', 1), (2, 'Second', 1), (3, 'Draft', 0)",
    )
    .await?;

    Ok(db)
}

/// Writes rows into the ACL tables with explicit ids.
pub struct AclFixture<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AclFixture<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    async fn insert(&self, sql: &str, values: Vec<Value>) -> Result<()> {
        self.db
            .execute(Statement::from_sql_and_values(DbBackend::Sqlite, sql, values))
            .await?;
        Ok(())
    }

    pub async fn class(&self, id: i32, class_type: &str) -> Result<()> {
        self.insert(
            "INSERT INTO acl_classes (id, class_type) VALUES (?, ?)",
            vec![id.into(), class_type.into()],
        )
        .await
    }

    pub async fn object(&self, id: i32, class_id: i32, object_identifier: &str) -> Result<()> {
        self.insert(
            "INSERT INTO acl_object_identities (id, class_id, object_identifier) VALUES (?, ?, ?)",
            vec![id.into(), class_id.into(), object_identifier.into()],
        )
        .await
    }

    pub async fn identity(&self, id: i32, identifier: &str) -> Result<()> {
        self.insert(
            "INSERT INTO acl_security_identities (id, identifier) VALUES (?, ?)",
            vec![id.into(), identifier.into()],
        )
        .await
    }

    pub async fn entry(
        &self,
        class_id: i32,
        object_identity_id: Option<i32>,
        security_identity_id: i32,
        mask: i32,
    ) -> Result<()> {
        self.insert(
            "INSERT INTO acl_entries (class_id, object_identity_id, security_identity_id, mask) \
             VALUES (?, ?, ?, ?)",
            vec![
                class_id.into(),
                object_identity_id.into(),
                security_identity_id.into(),
                mask.into(),
            ],
        )
        .await
    }

    /// Registers the article class (id 1) and one object identity per article (ids 1..=3).
    pub async fn articles(&self) -> Result<()> {
        self.class(1, ARTICLE_CLASS).await?;
        for id in 1..=3 {
            self.object(id, 1, &id.to_string()).await?;
        }
        Ok(())
    }
}
