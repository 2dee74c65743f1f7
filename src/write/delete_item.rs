use crate::{Result, common, write};

use aws_sdk_dynamodb::{Client, operation, types};
use std::collections;

/// delete item operation
#[derive(Debug, PartialEq)]
struct DeleteItemInput {
    keys: collections::HashMap<String, types::AttributeValue>,
    write_operation: write::common::WriteInput,
}

/// Delete item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_enhanced::{common, write};
///
/// # async fn example(
/// #     client: &Client,
/// #     key_schema: &common::key_schema::StaticKeySchema,
/// # ) -> Result<(), Box<dyn std::error::Error>> {
/// let delete_item = write::delete_item::DeleteItem {
///     key: common::key::Key::builder().partition_value("1")?.build()?,
///     write_args: write::common::WriteArgs {
///         table_name: "users".to_string(),
///         ..Default::default()
///     },
/// };
/// delete_item.send(client, key_schema).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DeleteItem {
    /// The primary key of the item to delete.
    pub key: common::key::Key,
    /// Additional write operation arguments (table name, condition, return values, etc.).
    pub write_args: write::common::WriteArgs,
}

impl DeleteItem {
    fn into_input<S: common::key_schema::KeySchema + ?Sized>(
        self,
        key_schema: &S,
    ) -> Result<DeleteItemInput> {
        let keys = self.key.primary_key_map(key_schema)?;
        let write_operation: write::common::WriteInput = self.write_args.try_into()?;
        let operation = DeleteItemInput {
            keys,
            write_operation,
        };
        Ok(operation)
    }

    /// Execute the delete item operation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_enhanced.delete_item", skip(client, key_schema), err)
    )]
    pub async fn send<S: common::key_schema::KeySchema + ?Sized>(
        self,
        client: &Client,
        key_schema: &S,
    ) -> Result<operation::delete_item::DeleteItemOutput> {
        let delete_item = self.into_input(key_schema)?;
        let builder = client.delete_item().set_key(Some(delete_item.keys));
        let output = crate::apply_write_operation!(builder, delete_item.write_operation)
            .send()
            .await?;
        Ok(output)
    }
}
