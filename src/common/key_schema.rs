use crate::{Error, Result};

use indexmap::IndexMap;

/// Name under which the table's own primary key is registered.
pub const PRIMARY_INDEX_NAME: &str = "$PRIMARY_INDEX";

/// Source of the ordered key attribute names of a table and its indexes.
///
/// Composite keys are position ordered: the n-th key value of a [`Key`](crate::common::key::Key)
/// binds to the n-th attribute name returned here.
pub trait KeySchema {
    /// Ordered partition key attribute names of an index (never empty on success).
    fn index_partition_keys(&self, index_name: &str) -> Result<&[String]>;

    /// Ordered sort key attribute names of an index (possibly empty).
    fn index_sort_keys(&self, index_name: &str) -> Result<&[String]>;

    /// Partition key attribute names followed by sort key attribute names.
    fn index_keys(&self, index_name: &str) -> Result<Vec<&str>> {
        let partition_keys = self.index_partition_keys(index_name)?;
        let sort_keys = self.index_sort_keys(index_name)?;
        let keys = partition_keys
            .iter()
            .chain(sort_keys)
            .map(String::as_str)
            .collect();
        Ok(keys)
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct IndexKeys {
    partition_keys: Vec<String>,
    sort_keys: Vec<String>,
}

/// Key schema declared up front, index by index.
///
/// ```rust
/// use dynamodb_enhanced::common::key_schema::{KeySchema, StaticKeySchema, PRIMARY_INDEX_NAME};
///
/// let schema = StaticKeySchema::builder()
///     .add_index_partition_key(PRIMARY_INDEX_NAME, "id")
///     .add_index_sort_key(PRIMARY_INDEX_NAME, "sort")
///     .add_index_partition_key("gsi1", "gsiKey1")
///     .add_index_partition_key("gsi1", "gsiKey2")
///     .build();
/// assert_eq!(schema.index_partition_keys("gsi1").unwrap(), ["gsiKey1", "gsiKey2"]);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StaticKeySchema {
    indexes: IndexMap<String, IndexKeys>,
}

impl StaticKeySchema {
    /// Start declaring a key schema.
    pub fn builder() -> StaticKeySchemaBuilder {
        StaticKeySchemaBuilder::default()
    }

    fn index(&self, index_name: &str) -> Result<&IndexKeys> {
        let index = self
            .indexes
            .get(index_name)
            .filter(|index| !index.partition_keys.is_empty() || !index.sort_keys.is_empty());
        match index {
            Some(index) => Ok(index),
            None if index_name == PRIMARY_INDEX_NAME => Err(Error::MissingPartitionKeys {
                index_name: index_name.to_string(),
            }),
            None => Err(Error::UnknownIndex {
                index_name: index_name.to_string(),
            }),
        }
    }
}

impl KeySchema for StaticKeySchema {
    fn index_partition_keys(&self, index_name: &str) -> Result<&[String]> {
        let index = self.index(index_name)?;
        if !index.partition_keys.is_empty() {
            return Ok(&index.partition_keys);
        }
        // local secondary indexes share the partition key of the table
        if index_name != PRIMARY_INDEX_NAME && !index.sort_keys.is_empty() {
            return self.index_partition_keys(PRIMARY_INDEX_NAME);
        }
        Err(Error::MissingPartitionKeys {
            index_name: index_name.to_string(),
        })
    }

    fn index_sort_keys(&self, index_name: &str) -> Result<&[String]> {
        let index = self.index(index_name)?;
        Ok(&index.sort_keys)
    }
}

/// Builder of a [`StaticKeySchema`].
#[derive(Clone, Debug, Default)]
pub struct StaticKeySchemaBuilder {
    indexes: IndexMap<String, IndexKeys>,
}

impl StaticKeySchemaBuilder {
    /// Append a partition key attribute to an index, after the ones already declared.
    pub fn add_index_partition_key(
        mut self,
        index_name: impl Into<String>,
        attribute_name: impl Into<String>,
    ) -> Self {
        self.indexes
            .entry(index_name.into())
            .or_default()
            .partition_keys
            .push(attribute_name.into());
        self
    }

    /// Append a sort key attribute to an index, after the ones already declared.
    pub fn add_index_sort_key(
        mut self,
        index_name: impl Into<String>,
        attribute_name: impl Into<String>,
    ) -> Self {
        self.indexes
            .entry(index_name.into())
            .or_default()
            .sort_keys
            .push(attribute_name.into());
        self
    }

    /// Freeze the declared indexes.
    pub fn build(self) -> StaticKeySchema {
        StaticKeySchema {
            indexes: self.indexes,
        }
    }
}
