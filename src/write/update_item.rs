use crate::{
    Result,
    common::{
        self,
        expression::{Expression, ExpressionNames, ExpressionValues},
    },
    write,
};

use aws_sdk_dynamodb::{Client, operation, types};
use serde::Serialize;
use serde_dynamo::to_item;
use std::collections;

/// Separator between the actions of one update clause.
const ACTION_SEPARATOR: &str = ", ";

/// SET operation for updating attributes.
///
/// ```rust
/// use aws_sdk_dynamodb::types::AttributeValue;
/// use dynamodb_enhanced::write::update_item;
///
/// let assign = update_item::SetInput::Assign(AttributeValue::S("value".to_string()));
/// let increment = update_item::SetInput::Increment(AttributeValue::N("10".to_string()));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum SetInput {
    /// Assign a new value to the attribute (replaces existing value).
    Assign(types::AttributeValue),
    /// Increment a numeric attribute by the specified value.
    Increment(types::AttributeValue),
    /// Decrement a numeric attribute by the specified value.
    Decrement(types::AttributeValue),
    /// Append values to the end of a list attribute.
    ListAppend(types::AttributeValue),
    /// Prepend values to the beginning of a list attribute.
    ListPrepend(types::AttributeValue),
    /// Assign a value only if the attribute doesn't exist.
    IfNotExists(types::AttributeValue),
}

impl SetInput {
    fn set_expression(self, path: &str, value_placeholder: &str) -> (types::AttributeValue, String) {
        match self {
            Self::Assign(value) => (value, format!("{path} = {value_placeholder}")),
            Self::Increment(value) => (value, format!("{path} = {path} + {value_placeholder}")),
            Self::Decrement(value) => (value, format!("{path} = {path} - {value_placeholder}")),
            Self::ListAppend(value) => (
                value,
                format!("{path} = list_append({path}, {value_placeholder})"),
            ),
            Self::ListPrepend(value) => (
                value,
                format!("{path} = list_append({value_placeholder}, {path})"),
            ),
            Self::IfNotExists(value) => (
                value,
                format!("{path} = if_not_exists({path}, {value_placeholder})"),
            ),
        }
    }
}

/// One action of an update expression, on a top level attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum UpdateAction {
    /// SET the attribute.
    Set(String, SetInput),
    /// REMOVE the attribute from the item.
    Remove(String),
    /// ADD the value to a number or a set.
    Add(String, types::AttributeValue),
    /// DELETE the values from a set.
    Delete(String, types::AttributeValue),
}

impl UpdateAction {
    /// Name of the attribute the action applies to.
    pub fn attribute_name(&self) -> &str {
        match self {
            Self::Set(name, _) | Self::Remove(name) | Self::Add(name, _) | Self::Delete(name, _) => {
                name
            }
        }
    }

    fn clause_position(&self) -> usize {
        match self {
            Self::Set(..) => 0,
            Self::Remove(_) => 1,
            Self::Delete(..) => 2,
            Self::Add(..) => 3,
        }
    }
}

/// Build an update expression out of actions.
///
/// Actions are grouped into `SET`, `REMOVE`, `DELETE` and `ADD` clauses, in that order, keeping
/// their relative order inside each clause. Two actions binding different values to the same
/// attribute are an error.
///
/// ```rust
/// use aws_sdk_dynamodb::types::AttributeValue;
/// use dynamodb_enhanced::write::update_item::{SetInput, UpdateAction, update_expression};
///
/// let expression = update_expression(vec![
///     UpdateAction::Remove("b".to_string()),
///     UpdateAction::Set("a".to_string(), SetInput::Assign(AttributeValue::S("x".to_string()))),
/// ])?;
/// assert_eq!(
///     expression.expression,
///     "SET #AMZN_MAPPED_a = :AMZN_MAPPED_a REMOVE #AMZN_MAPPED_b"
/// );
/// # Ok::<(), dynamodb_enhanced::Error>(())
/// ```
pub fn update_expression(actions: Vec<UpdateAction>) -> Result<Expression> {
    let mut clauses: [Vec<String>; 4] = Default::default();
    let mut expression_names = ExpressionNames::new();
    let mut expression_values = ExpressionValues::new();
    for action in actions {
        let position = action.clause_position();
        let name = action.attribute_name().to_string();
        let path = common::name_placeholder(&name);
        let value_placeholder = common::value_placeholder(&name);
        let (text, value) = match action {
            UpdateAction::Set(_, set_input) => {
                let (value, text) = set_input.set_expression(&path, &value_placeholder);
                (text, Some(value))
            }
            UpdateAction::Remove(_) => (path.clone(), None),
            UpdateAction::Add(_, value) | UpdateAction::Delete(_, value) => {
                (format!("{path} {value_placeholder}"), Some(value))
            }
        };
        expression_names =
            Expression::join_names(expression_names, ExpressionNames::from([(path, name)]))?;
        if let Some(value) = value {
            expression_values = Expression::join_values(
                expression_values,
                ExpressionValues::from([(value_placeholder, value)]),
            )?;
        }
        clauses[position].push(text);
    }
    let expression = ["SET", "REMOVE", "DELETE", "ADD"]
        .into_iter()
        .zip(clauses)
        .filter(|(_, texts)| !texts.is_empty())
        .map(|(keyword, texts)| format!("{keyword} {}", texts.join(ACTION_SEPARATOR)))
        .collect::<Vec<_>>()
        .join(" ");
    Ok(Expression {
        expression,
        expression_names,
        expression_values,
    })
}

/// update item operation
#[derive(Debug, PartialEq)]
struct UpdateItemInput {
    keys: collections::HashMap<String, types::AttributeValue>,
    update_expression: Option<String>,
    write_operation: write::common::WriteInput,
}

/// Update item operation.
///
/// Attributes of `item` other than the primary key become `SET` actions. Null attributes become
/// `REMOVE` actions unless `ignore_nulls` is set or an explicit action already targets them.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::{Client, types::AttributeValue};
/// use dynamodb_enhanced::{common, write};
/// use serde_json::json;
///
/// # async fn example(
/// #     client: &Client,
/// #     key_schema: &common::key_schema::StaticKeySchema,
/// # ) -> Result<(), Box<dyn std::error::Error>> {
/// let update_item = write::update_item::UpdateItem {
///     key: common::key::Key::builder().partition_value("1")?.build()?,
///     item: Some(json!({"name": "New", "nickname": null})),
///     ignore_nulls: false,
///     actions: vec![write::update_item::UpdateAction::Add(
///         "visits".to_string(),
///         AttributeValue::N("1".to_string()),
///     )],
///     write_args: write::common::WriteArgs {
///         table_name: "users".to_string(),
///         ..Default::default()
///     },
/// };
/// update_item.send(client, key_schema).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateItem<T> {
    /// The primary key of the item to update.
    pub key: common::key::Key,
    /// Attributes to write, keyed by name.
    pub item: Option<T>,
    /// Leave attributes that are null in `item` untouched instead of removing them.
    pub ignore_nulls: bool,
    /// Explicit actions, applied after the ones derived from `item`.
    pub actions: Vec<UpdateAction>,
    /// Additional write operation arguments (table name, condition, return values, etc.).
    pub write_args: write::common::WriteArgs,
}

impl<T: Serialize> UpdateItem<T> {
    fn into_input<S: common::key_schema::KeySchema + ?Sized>(
        self,
        key_schema: &S,
    ) -> Result<UpdateItemInput> {
        let keys = self.key.primary_key_map(key_schema)?;
        let mut actions = Vec::new();
        if let Some(item) = self.item {
            let item: collections::HashMap<String, types::AttributeValue> = to_item(item)?;
            let mut attributes: Vec<_> = item
                .into_iter()
                .filter(|(name, _)| !keys.contains_key(name))
                .collect();
            attributes.sort_by(|(left, _), (right, _)| left.cmp(right));
            for (name, value) in attributes {
                if !common::is_null_attribute_value(&value) {
                    actions.push(UpdateAction::Set(name, SetInput::Assign(value)));
                } else if !self.ignore_nulls
                    && !self
                        .actions
                        .iter()
                        .any(|action| action.attribute_name() == name)
                {
                    actions.push(UpdateAction::Remove(name));
                }
            }
        }
        actions.extend(self.actions);

        let mut write_operation: write::common::WriteInput = self.write_args.try_into()?;
        let update_expression = if actions.is_empty() {
            None
        } else {
            let expression = update_expression(actions)?.merge_into(
                &mut write_operation.expression_attribute_names,
                &mut write_operation.expression_attribute_values,
            )?;
            Some(expression)
        };
        let operation = UpdateItemInput {
            keys,
            update_expression,
            write_operation,
        };
        Ok(operation)
    }

    /// Execute the update item operation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_enhanced.update_item", skip_all, err)
    )]
    pub async fn send<S: common::key_schema::KeySchema + ?Sized>(
        self,
        client: &Client,
        key_schema: &S,
    ) -> Result<operation::update_item::UpdateItemOutput> {
        let update_item = self.into_input(key_schema)?;
        let builder = client
            .update_item()
            .set_key(Some(update_item.keys))
            .set_update_expression(update_item.update_expression);
        let output = crate::apply_write_operation!(builder, update_item.write_operation)
            .send()
            .await?;
        Ok(output)
    }
}
