use sea_orm::DbBackend;

/// SQL type `acl_object_identities.object_identifier` is cast to before it is
/// compared with an integer primary key, or `None` when the backend compares
/// text and integers without help.
///
/// PostgreSQL refuses `varchar = bigint`, so the identifier is widened to `BIGINT`.
#[must_use]
pub fn object_identifier_cast(backend: DbBackend) -> Option<&'static str> {
    match backend {
        DbBackend::Postgres => Some("BIGINT"),
        _ => None,
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_only_postgres_casts() {
        assert_eq!(object_identifier_cast(DbBackend::Postgres), Some("BIGINT"));
        assert_eq!(object_identifier_cast(DbBackend::Sqlite), None);
        assert_eq!(object_identifier_cast(DbBackend::MySql), None);
    }
}
