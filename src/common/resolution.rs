use crate::{
    Error, Result,
    common::{is_null_attribute_value, key::Key, key_schema::KeySchema},
};

use aws_sdk_dynamodb::types;

/// Key values bound to the key attribute names of one index.
///
/// Partition names and values always have the same length, equal to the number of partition
/// keys the index declares. Sort names are the prefix of the declared sort keys that the key
/// supplies values for.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyResolution {
    partition_names: Vec<String>,
    partition_values: Vec<types::AttributeValue>,
    sort_names: Vec<String>,
    sort_values: Vec<types::AttributeValue>,
}

impl KeyResolution {
    /// Partition key names and their values, position aligned.
    pub fn partition(&self) -> (&[String], &[types::AttributeValue]) {
        (&self.partition_names, &self.partition_values)
    }

    /// Bound sort key names and their values, position aligned.
    pub fn sort(&self) -> (&[String], &[types::AttributeValue]) {
        (&self.sort_names, &self.sort_values)
    }

    /// Whether at least one sort value was bound.
    pub fn has_sort_keys(&self) -> bool {
        !self.sort_values.is_empty()
    }
}

/// Bind the values of a key to the key attributes of an index.
///
/// All partition keys of the index must be supplied. Sort values may cover only the leading
/// sort keys, and only the last supplied one may be the null marker.
///
/// ```rust
/// use dynamodb_enhanced::common::{
///     key::Key,
///     key_schema::{StaticKeySchema, PRIMARY_INDEX_NAME},
///     resolution::resolve_keys,
/// };
///
/// let key_schema = StaticKeySchema::builder()
///     .add_index_partition_key(PRIMARY_INDEX_NAME, "id")
///     .add_index_sort_key(PRIMARY_INDEX_NAME, "sort")
///     .build();
/// let key = Key::builder().partition_value("id-1")?.build()?;
/// let resolution = resolve_keys(&key, &key_schema, PRIMARY_INDEX_NAME)?;
/// assert_eq!(resolution.partition().0, ["id"]);
/// assert!(!resolution.has_sort_keys());
/// # Ok::<(), dynamodb_enhanced::Error>(())
/// ```
pub fn resolve_keys<S: KeySchema + ?Sized>(
    key: &Key,
    key_schema: &S,
    index_name: &str,
) -> Result<KeyResolution> {
    let partition_keys = key_schema.index_partition_keys(index_name)?;
    let partition_values = key.partition_values();
    if partition_values.len() != partition_keys.len() {
        return Err(Error::PartitionKeyCount {
            index_name: index_name.to_string(),
            expected: partition_keys.len(),
            actual: partition_values.len(),
        });
    }

    let sort_values = key.sort_values();
    let mut sort_names: &[String] = &[];
    if !sort_values.is_empty() {
        let sort_keys = key_schema.index_sort_keys(index_name)?;
        // a single trailing null stands for "no sort value" against partition-only indexes
        let is_null_only = sort_values.len() == 1 && is_null_attribute_value(&sort_values[0]);
        if sort_keys.is_empty() && !is_null_only {
            return Err(Error::SortKeyNotSupported {
                index_name: index_name.to_string(),
            });
        }
        if sort_values.len() > sort_keys.len() && !is_null_only {
            return Err(Error::SortKeyCount {
                index_name: index_name.to_string(),
                expected: sort_keys.len(),
                actual: sort_values.len(),
            });
        }
        if let Some(position) = sort_values[..sort_values.len() - 1]
            .iter()
            .position(is_null_attribute_value)
        {
            return Err(Error::NullSortValueInComposite { position });
        }
        sort_names = &sort_keys[..sort_values.len().min(sort_keys.len())];
    }

    // a trailing null against an index without sort keys has nothing to bind to
    let bound_sort_values = &sort_values[..sort_names.len()];
    Ok(KeyResolution {
        partition_names: partition_keys.to_vec(),
        partition_values: partition_values.to_vec(),
        sort_names: sort_names.to_vec(),
        sort_values: bound_sort_values.to_vec(),
    })
}
