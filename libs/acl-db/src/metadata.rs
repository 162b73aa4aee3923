use sea_orm::{EntityTrait, IdenStatic, Iterable, PrimaryKeyToColumn};
use tracing::warn;

use crate::error::AclFilterError;

/// Primary-key column names of `E`, in declaration order.
#[must_use]
pub fn key_columns<E>() -> Vec<String>
where
    E: EntityTrait,
{
    E::PrimaryKey::iter()
        .map(|pk| pk.into_column().as_str().to_owned())
        .collect()
}

/// The single primary-key column of `entity`.
///
/// Only single-column keys can be matched against `acl_object_identities.object_identifier`.
///
/// # Errors
/// Returns `AclFilterError::UnsupportedSchema` for composite or missing keys.
pub fn single_key_column<'a, S>(entity: &str, columns: &'a [S]) -> Result<&'a str, AclFilterError>
where
    S: AsRef<str>,
{
    match columns {
        [only] => Ok(only.as_ref()),
        _ => {
            warn!(
                entity,
                key_columns = columns.len(),
                "ACL filtering needs a single-column primary key"
            );
            Err(AclFilterError::UnsupportedSchema {
                entity: entity.to_owned(),
                key_columns: columns.iter().map(|c| c.as_ref().to_owned()).collect(),
            })
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_single_column_is_returned() {
        assert_eq!(single_key_column("Article", &["id"]).unwrap(), "id");
    }

    #[test]
    fn test_composite_key_is_rejected() {
        let err = single_key_column("Translation", &["locale", "key"]).unwrap_err();
        match err {
            AclFilterError::UnsupportedSchema {
                entity,
                key_columns,
            } => {
                assert_eq!(entity, "Translation");
                assert_eq!(key_columns, vec!["locale", "key"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let none: [&str; 0] = [];
        assert!(single_key_column("View", &none).is_err());
    }
}
