use crate::{
    Error, Result,
    common::{
        expression::Expression,
        key_schema::PRIMARY_INDEX_NAME,
        projection::{NestedAttributeName, ProjectionExpression},
    },
};

use aws_sdk_dynamodb::types;
use serde::de::DeserializeOwned;
use serde_dynamo::from_items;
use std::collections;

/// Projection of the given paths as an expression, absent when there is nothing to project.
fn projection(attributes_to_project: &[NestedAttributeName]) -> Option<Expression> {
    let (expression_names, projection_expression) =
        ProjectionExpression::create(attributes_to_project).into_parts();
    projection_expression.map(|expression| Expression {
        expression,
        expression_names,
        ..Default::default()
    })
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct SingleReadInput {
    pub(crate) consistent_read: Option<bool>,
    pub(crate) expression_attribute_names: Option<collections::HashMap<String, String>>,
    pub(crate) projection_expression: Option<String>,
    pub(crate) table_name: String,
}

/// Arguments for single-item read operations (GetItem).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SingleReadArgs {
    /// Attributes to retrieve; all of them when empty.
    pub attributes_to_project: Vec<NestedAttributeName>,
    /// Whether to use a strongly consistent read.
    pub consistent_read: Option<bool>,
    /// The name of the table to read from.
    pub table_name: String,
}

impl TryFrom<SingleReadArgs> for SingleReadInput {
    type Error = Error;

    fn try_from(single_read_args: SingleReadArgs) -> Result<Self> {
        let mut expression_attribute_names = None;
        let projection_expression = projection(&single_read_args.attributes_to_project)
            .map(|projection| projection.merge_into(&mut expression_attribute_names, &mut None))
            .transpose()?;
        let operation = Self {
            consistent_read: single_read_args.consistent_read,
            expression_attribute_names,
            projection_expression,
            table_name: single_read_args.table_name,
        };
        Ok(operation)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct MultipleReadInput {
    pub(crate) consistent_read: Option<bool>,
    pub(crate) exclusive_start_key: Option<collections::HashMap<String, types::AttributeValue>>,
    pub(crate) expression_attribute_names: Option<collections::HashMap<String, String>>,
    pub(crate) expression_attribute_values:
        Option<collections::HashMap<String, types::AttributeValue>>,
    pub(crate) filter_expression: Option<String>,
    pub(crate) index_name: Option<String>,
    pub(crate) limit: Option<i32>,
    pub(crate) projection_expression: Option<String>,
    pub(crate) select: Option<types::Select>,
    pub(crate) table_name: String,
}

/// Arguments for multiple-item read operations (Query, Scan).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultipleReadArgs {
    /// Attributes to retrieve; all of them when empty.
    pub attributes_to_project: Vec<NestedAttributeName>,
    /// Whether to use a strongly consistent read.
    pub consistent_read: Option<bool>,
    /// Key to resume from, usually the `last_evaluated_key` of a previous [`Page`].
    pub exclusive_start_key: Option<collections::HashMap<String, types::AttributeValue>>,
    /// Filter applied to the items read, after the key condition of a query.
    ///
    /// Its placeholders share the request maps with the key condition and the projection; a
    /// placeholder bound to two different values fails the request before it is sent.
    pub filter_expression: Option<Expression>,
    /// Secondary index to read; the table itself when `None` or
    /// [`PRIMARY_INDEX_NAME`].
    pub index_name: Option<String>,
    /// The maximum number of items to evaluate per page.
    pub limit: Option<i32>,
    /// Which attributes to return.
    pub select: Option<types::Select>,
    /// The name of the table to read from.
    pub table_name: String,
}

impl MultipleReadArgs {
    /// Name of the index read, [`PRIMARY_INDEX_NAME`] for the table itself.
    pub fn index_name(&self) -> &str {
        self.index_name.as_deref().unwrap_or(PRIMARY_INDEX_NAME)
    }
}

impl TryFrom<MultipleReadArgs> for MultipleReadInput {
    type Error = Error;

    fn try_from(multiple_read_args: MultipleReadArgs) -> Result<Self> {
        let mut expression_attribute_names = None;
        let mut expression_attribute_values = None;
        let filter_expression = multiple_read_args
            .filter_expression
            .map(|filter| {
                filter.merge_into(
                    &mut expression_attribute_names,
                    &mut expression_attribute_values,
                )
            })
            .transpose()?;
        let projection_expression = projection(&multiple_read_args.attributes_to_project)
            .map(|projection| {
                projection.merge_into(
                    &mut expression_attribute_names,
                    &mut expression_attribute_values,
                )
            })
            .transpose()?;
        let index_name = multiple_read_args
            .index_name
            .filter(|index_name| index_name != PRIMARY_INDEX_NAME);
        let operation = Self {
            consistent_read: multiple_read_args.consistent_read,
            exclusive_start_key: multiple_read_args.exclusive_start_key,
            expression_attribute_names,
            expression_attribute_values,
            filter_expression,
            index_name,
            limit: multiple_read_args.limit,
            projection_expression,
            select: multiple_read_args.select,
            table_name: multiple_read_args.table_name,
        };
        Ok(operation)
    }
}

/// One page of a query or scan, with its items deserialized.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    /// Items of the page.
    pub items: Vec<T>,
    /// Key to pass as `exclusive_start_key` to read the next page; `None` on the last page.
    pub last_evaluated_key: Option<collections::HashMap<String, types::AttributeValue>>,
    /// Number of items returned after filtering.
    pub count: i32,
    /// Number of items evaluated before filtering.
    pub scanned_count: i32,
    /// Capacity consumed by the page, when requested.
    pub consumed_capacity: Option<types::ConsumedCapacity>,
}

impl<T: DeserializeOwned> Page<T> {
    pub(crate) fn new(
        items: Option<Vec<collections::HashMap<String, types::AttributeValue>>>,
        last_evaluated_key: Option<collections::HashMap<String, types::AttributeValue>>,
        count: i32,
        scanned_count: i32,
        consumed_capacity: Option<types::ConsumedCapacity>,
    ) -> Result<Self> {
        let items = from_items(items.unwrap_or_default())?;
        let page = Self {
            items,
            last_evaluated_key,
            count,
            scanned_count,
            consumed_capacity,
        };
        Ok(page)
    }
}

/// collect every page of a paginated query or scan
#[macro_export]
macro_rules! get_pages {
    ($paginator:expr) => {{
        let mut pages = Vec::new();
        while let Some(output) = $paginator.next().await {
            let output = output?;
            let page = $crate::read::common::Page::new(
                output.items,
                output.last_evaluated_key,
                output.count,
                output.scanned_count,
                output.consumed_capacity,
            )?;
            pages.push(page);
        }
        Ok(pages)
    }};
}

/// apply common single read operation settings to a builder
#[macro_export]
macro_rules! apply_single_read_operation {
    ($builder:expr, $single_read_operation:expr) => {
        $builder
            .set_consistent_read($single_read_operation.consistent_read)
            .set_expression_attribute_names($single_read_operation.expression_attribute_names)
            .set_projection_expression($single_read_operation.projection_expression)
            .table_name($single_read_operation.table_name)
    };
}

/// apply common multiple read operation settings to a builder
#[macro_export]
macro_rules! apply_multiple_read_operation {
    ($builder:expr, $multiple_read_operation:expr) => {
        $builder
            .set_consistent_read($multiple_read_operation.consistent_read)
            .set_exclusive_start_key($multiple_read_operation.exclusive_start_key)
            .set_expression_attribute_names($multiple_read_operation.expression_attribute_names)
            .set_expression_attribute_values($multiple_read_operation.expression_attribute_values)
            .set_filter_expression($multiple_read_operation.filter_expression)
            .set_index_name($multiple_read_operation.index_name)
            .set_limit($multiple_read_operation.limit)
            .set_projection_expression($multiple_read_operation.projection_expression)
            .set_select($multiple_read_operation.select)
            .table_name($multiple_read_operation.table_name)
    };
}
