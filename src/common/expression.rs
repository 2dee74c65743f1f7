use crate::{Error, Result};

use aws_sdk_dynamodb::types;
use indexmap::IndexMap;
use std::{collections, ops};

/// Placeholder to attribute name map of an expression.
pub type ExpressionNames = IndexMap<String, String>;

/// Placeholder to attribute value map of an expression.
pub type ExpressionValues = IndexMap<String, types::AttributeValue>;

/// Logical operator for combining expressions.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LogicalOperator {
    /// Logical AND - both expressions must be true.
    And,
    /// Logical OR - at least one expression must be true.
    Or,
}

impl ops::Deref for LogicalOperator {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::And => " AND ",
            Self::Or => " OR ",
        }
    }
}

/// A DynamoDB expression together with its placeholder maps.
///
/// Both maps keep insertion order, so an expression built twice from the same inputs is
/// identical, maps included.
///
/// ```rust
/// use aws_sdk_dynamodb::types::AttributeValue;
/// use dynamodb_enhanced::common::expression::Expression;
///
/// let expression = Expression::new("#a = :a")
///     .with_name("#a", "a")
///     .with_value(":a", AttributeValue::S("b".to_string()));
/// assert_eq!(expression.expression, "#a = :a");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Expression {
    /// The expression text, referring to names and values through placeholders.
    pub expression: String,
    /// Name placeholder to real attribute name.
    pub expression_names: ExpressionNames,
    /// Value placeholder to attribute value.
    pub expression_values: ExpressionValues,
}

impl Expression {
    /// Create an expression without any placeholder.
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            ..Default::default()
        }
    }

    /// Add a name placeholder.
    pub fn with_name(mut self, placeholder: impl Into<String>, name: impl Into<String>) -> Self {
        self.expression_names.insert(placeholder.into(), name.into());
        self
    }

    /// Add a value placeholder.
    pub fn with_value(
        mut self,
        placeholder: impl Into<String>,
        value: types::AttributeValue,
    ) -> Self {
        self.expression_values.insert(placeholder.into(), value);
        self
    }

    /// Join two optional expressions, wrapping each side in parentheses.
    ///
    /// When one side is absent the other is returned untouched.
    pub fn join(
        left: Option<Self>,
        right: Option<Self>,
        operator: LogicalOperator,
    ) -> Result<Option<Self>> {
        let joined = match (left, right) {
            (Some(left), Some(right)) => Some(Self {
                expression: Self::join_expressions(&left.expression, &right.expression, operator),
                expression_names: Self::join_names(left.expression_names, right.expression_names)?,
                expression_values: Self::join_values(
                    left.expression_values,
                    right.expression_values,
                )?,
            }),
            (Some(expression), None) | (None, Some(expression)) => Some(expression),
            (None, None) => None,
        };
        Ok(joined)
    }

    /// Join any number of expressions, wrapping each one in parentheses.
    ///
    /// ```rust
    /// use dynamodb_enhanced::common::expression::{Expression, LogicalOperator};
    ///
    /// let joined = Expression::join_all(
    ///     LogicalOperator::And,
    ///     vec![Expression::new("one"), Expression::new("two")],
    /// )
    /// .unwrap();
    /// assert_eq!(joined.expression, "(one) AND (two)");
    /// ```
    pub fn join_all(operator: LogicalOperator, expressions: Vec<Self>) -> Result<Self> {
        let mut joined = Self::default();
        let mut texts = Vec::with_capacity(expressions.len());
        for expression in expressions {
            joined.expression_names =
                Self::join_names(joined.expression_names, expression.expression_names)?;
            joined.expression_values =
                Self::join_values(joined.expression_values, expression.expression_values)?;
            texts.push(format!("({})", expression.expression));
        }
        joined.expression = texts.join(&*operator);
        Ok(joined)
    }

    /// Join two expression texts, e.g. `(one) AND (two)`.
    pub fn join_expressions(left: &str, right: &str, operator: LogicalOperator) -> String {
        format!("({left}){}({right})", &*operator)
    }

    /// Union of two name maps; a placeholder mapped to two different names is an error.
    pub fn join_names(left: ExpressionNames, right: ExpressionNames) -> Result<ExpressionNames> {
        join_maps(left, right, |placeholder| Error::ConflictingExpressionName {
            placeholder,
        })
    }

    /// Union of two value maps; a placeholder mapped to two different values is an error.
    pub fn join_values(
        left: ExpressionValues,
        right: ExpressionValues,
    ) -> Result<ExpressionValues> {
        join_maps(left, right, |placeholder| Error::ConflictingExpressionValue {
            placeholder,
        })
    }

    /// Merge the placeholder maps of this expression into request-level maps and return the text.
    pub(crate) fn merge_into(
        self,
        names: &mut Option<collections::HashMap<String, String>>,
        values: &mut Option<collections::HashMap<String, types::AttributeValue>>,
    ) -> Result<String> {
        merge_map_into(names, self.expression_names, |placeholder| {
            Error::ConflictingExpressionName { placeholder }
        })?;
        merge_map_into(values, self.expression_values, |placeholder| {
            Error::ConflictingExpressionValue { placeholder }
        })?;
        Ok(self.expression)
    }
}

fn join_maps<V: PartialEq>(
    mut left: IndexMap<String, V>,
    right: IndexMap<String, V>,
    conflict: impl Fn(String) -> Error,
) -> Result<IndexMap<String, V>> {
    for (placeholder, value) in right {
        match left.get(&placeholder) {
            Some(existing) if *existing != value => return Err(conflict(placeholder)),
            Some(_) => {}
            None => {
                left.insert(placeholder, value);
            }
        }
    }
    Ok(left)
}

fn merge_map_into<V: PartialEq>(
    target: &mut Option<collections::HashMap<String, V>>,
    source: IndexMap<String, V>,
    conflict: impl Fn(String) -> Error,
) -> Result<()> {
    if source.is_empty() {
        return Ok(());
    }
    let target = target.get_or_insert_with(collections::HashMap::new);
    for (placeholder, value) in source {
        match target.get(&placeholder) {
            Some(existing) if *existing != value => return Err(conflict(placeholder)),
            Some(_) => {}
            None => {
                target.insert(placeholder, value);
            }
        }
    }
    Ok(())
}
