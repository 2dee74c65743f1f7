use crate::{Result, common, read};

use aws_sdk_dynamodb::{Client, types};
use serde::de::DeserializeOwned;
use serde_dynamo::from_item;
use std::collections;

/// get item operation
#[derive(Clone, Debug, Default, PartialEq)]
struct GetItemInput {
    keys: collections::HashMap<String, types::AttributeValue>,
    return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    single_read_operation: read::common::SingleReadInput,
}

/// Get item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_enhanced::{common, read};
/// use serde_json::Value;
///
/// # async fn example(
/// #     client: &Client,
/// #     key_schema: &common::key_schema::StaticKeySchema,
/// # ) -> Result<(), Box<dyn std::error::Error>> {
/// let get_item = read::get_item::GetItem {
///     key: common::key::Key::builder().partition_value("1")?.build()?,
///     return_consumed_capacity: None,
///     single_read_args: read::common::SingleReadArgs {
///         table_name: "users".to_string(),
///         ..Default::default()
///     },
/// };
/// let item: Option<Value> = get_item.send(client, key_schema).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GetItem {
    /// The primary key of the item to retrieve.
    pub key: common::key::Key,
    /// Whether to return the consumed capacity information.
    pub return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    /// Additional read operation arguments (table name, consistent read, projection).
    pub single_read_args: read::common::SingleReadArgs,
}

impl GetItem {
    fn into_input<S: common::key_schema::KeySchema + ?Sized>(
        self,
        key_schema: &S,
    ) -> Result<GetItemInput> {
        let keys = self.key.primary_key_map(key_schema)?;
        let single_read_operation: read::common::SingleReadInput =
            self.single_read_args.try_into()?;
        let operation = GetItemInput {
            keys,
            return_consumed_capacity: self.return_consumed_capacity,
            single_read_operation,
        };
        Ok(operation)
    }

    /// Execute the get item operation; `None` when no item has the key.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_enhanced.get_item", skip(client, key_schema), err)
    )]
    pub async fn send<T, S>(self, client: &Client, key_schema: &S) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        S: common::key_schema::KeySchema + ?Sized,
    {
        let get_item = self.into_input(key_schema)?;
        let builder = client
            .get_item()
            .set_key(Some(get_item.keys))
            .set_return_consumed_capacity(get_item.return_consumed_capacity);
        let output = crate::apply_single_read_operation!(builder, get_item.single_read_operation)
            .send()
            .await?;
        let item = output.item.map(from_item).transpose()?;
        Ok(item)
    }
}
