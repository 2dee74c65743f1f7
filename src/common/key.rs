use crate::{
    Error, Result,
    common::{
        is_null_attribute_value,
        key_schema::{KeySchema, PRIMARY_INDEX_NAME},
        resolution,
    },
};

use aws_sdk_dynamodb::types;
use serde::Serialize;
use serde_dynamo::to_attribute_value;
use std::collections;

/// Maximum number of partition values, and of sort values, a key may carry.
pub const MAX_KEY_ATTRIBUTES: usize = 4;

/// Key of an item or of a query, made of ordered partition values and ordered sort values.
///
/// Values carry no attribute names: they are bound by position to the key attributes an
/// index declares (see [`KeySchema`]). A key always has at least one partition value and
/// never a null one.
///
/// ```rust
/// use dynamodb_enhanced::common::key::Key;
///
/// let key = Key::builder()
///     .partition_value("id-1")?
///     .sort_value(42)?
///     .build()?;
/// assert_eq!(key.partition_values().len(), 1);
/// assert!(key.sort_value().is_some());
/// # Ok::<(), dynamodb_enhanced::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Key {
    partition_values: Vec<types::AttributeValue>,
    sort_values: Vec<types::AttributeValue>,
}

impl Key {
    /// Create a key from already converted attribute values.
    pub fn new(
        partition_values: Vec<types::AttributeValue>,
        sort_values: Vec<types::AttributeValue>,
    ) -> Result<Self> {
        Self::builder()
            .partition_values(partition_values)
            .sort_values(sort_values)
            .build()
    }

    /// Start building a key.
    pub fn builder() -> KeyBuilder {
        KeyBuilder::default()
    }

    /// A builder holding a copy of this key's values.
    pub fn to_builder(&self) -> KeyBuilder {
        KeyBuilder {
            partition_values: self.partition_values.clone(),
            sort_values: self.sort_values.clone(),
        }
    }

    /// Ordered partition values (never empty).
    pub fn partition_values(&self) -> &[types::AttributeValue] {
        &self.partition_values
    }

    /// Ordered sort values (possibly empty).
    pub fn sort_values(&self) -> &[types::AttributeValue] {
        &self.sort_values
    }

    /// The first partition value.
    pub fn partition_value(&self) -> &types::AttributeValue {
        // the builder rejects keys without partition values
        &self.partition_values[0]
    }

    /// The first sort value, if any.
    pub fn sort_value(&self) -> Option<&types::AttributeValue> {
        self.sort_values.first()
    }

    /// Attribute name to value map identifying one item through the keys of an index.
    ///
    /// Every key attribute of the index must be bound; a trailing null sort value counts as
    /// absent.
    pub fn key_map<S: KeySchema + ?Sized>(
        &self,
        key_schema: &S,
        index_name: &str,
    ) -> Result<collections::HashMap<String, types::AttributeValue>> {
        let resolution = resolution::resolve_keys(self, key_schema, index_name)?;
        let (partition_names, partition_values) = resolution.partition();
        let (mut sort_names, mut sort_values) = resolution.sort();
        if sort_values.last().is_some_and(is_null_attribute_value) {
            sort_names = &sort_names[..sort_names.len() - 1];
            sort_values = &sort_values[..sort_values.len() - 1];
        }
        let expected = key_schema.index_sort_keys(index_name)?.len();
        if sort_values.len() != expected {
            return Err(Error::SortKeyCount {
                index_name: index_name.to_string(),
                expected,
                actual: sort_values.len(),
            });
        }
        let keys = partition_names
            .iter()
            .zip(partition_values)
            .chain(sort_names.iter().zip(sort_values))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        Ok(keys)
    }

    /// [`Key::key_map`] against the table's primary key.
    pub fn primary_key_map<S: KeySchema + ?Sized>(
        &self,
        key_schema: &S,
    ) -> Result<collections::HashMap<String, types::AttributeValue>> {
        self.key_map(key_schema, PRIMARY_INDEX_NAME)
    }
}

/// Builder of a [`Key`].
///
/// Typed setters go through [`serde_dynamo`], so anything serializable to a DynamoDB scalar can
/// be used as a key value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyBuilder {
    partition_values: Vec<types::AttributeValue>,
    sort_values: Vec<types::AttributeValue>,
}

impl KeyBuilder {
    /// Replace the partition values with a single value.
    pub fn partition_value<T: Serialize>(mut self, value: T) -> Result<Self> {
        self.partition_values = vec![to_attribute_value(value)?];
        Ok(self)
    }

    /// Replace the sort values with a single value.
    pub fn sort_value<T: Serialize>(mut self, value: T) -> Result<Self> {
        self.sort_values = vec![to_attribute_value(value)?];
        Ok(self)
    }

    /// Append a partition value after the ones already set.
    pub fn add_partition_value<T: Serialize>(mut self, value: T) -> Result<Self> {
        self.partition_values.push(to_attribute_value(value)?);
        Ok(self)
    }

    /// Append a sort value after the ones already set.
    pub fn add_sort_value<T: Serialize>(mut self, value: T) -> Result<Self> {
        self.sort_values.push(to_attribute_value(value)?);
        Ok(self)
    }

    /// Replace the partition values.
    pub fn partition_values(mut self, values: Vec<types::AttributeValue>) -> Self {
        self.partition_values = values;
        self
    }

    /// Replace the sort values.
    pub fn sort_values(mut self, values: Vec<types::AttributeValue>) -> Self {
        self.sort_values = values;
        self
    }

    /// Validate and build the key.
    pub fn build(self) -> Result<Key> {
        if self.partition_values.is_empty() {
            return Err(Error::EmptyPartitionValues);
        }
        if self.partition_values.iter().any(is_null_attribute_value) {
            return Err(Error::NullPartitionValue);
        }
        for (kind, values) in [
            ("partition", &self.partition_values),
            ("sort", &self.sort_values),
        ] {
            if values.len() > MAX_KEY_ATTRIBUTES {
                return Err(Error::TooManyKeyValues {
                    kind,
                    maximum: MAX_KEY_ATTRIBUTES,
                    actual: values.len(),
                });
            }
        }
        Ok(Key {
            partition_values: self.partition_values,
            sort_values: self.sort_values,
        })
    }
}
