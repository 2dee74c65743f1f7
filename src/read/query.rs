use crate::{Result, common, read};

use aws_sdk_dynamodb::{Client, types};
use serde::de::DeserializeOwned;

/// query operation
#[derive(Clone, Debug, Default, PartialEq)]
struct QueryInput {
    key_condition_expression: String,
    multiple_read_operation: read::common::MultipleReadInput,
    return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    scan_index_forward: Option<bool>,
}

/// Query operation.
///
/// The key condition is built against the index named in the read arguments, or the table's
/// primary key when none is named.
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
/// let key = common::key::Key::builder().partition_value("1")?.build()?;
/// let query = read::query::Query {
///     multiple_read_args: read::common::MultipleReadArgs {
///         table_name: "users".to_string(),
///         ..Default::default()
///     },
///     query_conditional: common::conditional::QueryConditional::key_equal_to(key),
///     return_consumed_capacity: None,
///     scan_index_forward: None,
/// };
/// let pages: Vec<read::common::Page<Value>> = query.send(client, key_schema).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    /// Additional read operation arguments (table name, index, filter, projection, etc.).
    pub multiple_read_args: read::common::MultipleReadArgs,
    /// The key condition of the query.
    pub query_conditional: common::conditional::QueryConditional,
    /// Whether to return the consumed capacity information.
    pub return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    /// Whether to scan the index forward (ascending) or backward (descending).
    pub scan_index_forward: Option<bool>,
}

impl Query {
    fn into_input<S: common::key_schema::KeySchema + ?Sized>(
        self,
        key_schema: &S,
    ) -> Result<QueryInput> {
        let key_condition = self
            .query_conditional
            .expression(key_schema, self.multiple_read_args.index_name())?;
        let mut multiple_read_operation: read::common::MultipleReadInput =
            self.multiple_read_args.try_into()?;
        let key_condition_expression = key_condition.merge_into(
            &mut multiple_read_operation.expression_attribute_names,
            &mut multiple_read_operation.expression_attribute_values,
        )?;
        let operation = QueryInput {
            key_condition_expression,
            multiple_read_operation,
            return_consumed_capacity: self.return_consumed_capacity,
            scan_index_forward: self.scan_index_forward,
        };
        Ok(operation)
    }

    /// Execute the query operation, reading every page.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_enhanced.query", skip(client, key_schema), err)
    )]
    pub async fn send<T, S>(
        self,
        client: &Client,
        key_schema: &S,
    ) -> Result<Vec<read::common::Page<T>>>
    where
        T: DeserializeOwned,
        S: common::key_schema::KeySchema + ?Sized,
    {
        let query = self.into_input(key_schema)?;
        let builder = client
            .query()
            .key_condition_expression(query.key_condition_expression)
            .set_return_consumed_capacity(query.return_consumed_capacity)
            .set_scan_index_forward(query.scan_index_forward);
        let mut paginator =
            crate::apply_multiple_read_operation!(builder, query.multiple_read_operation)
                .into_paginator()
                .send();
        crate::get_pages!(paginator)
    }
}
