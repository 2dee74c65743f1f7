use crate::{
    Error, Result,
    common::{
        self,
        expression::{Expression, LogicalOperator},
        key::Key,
        key_schema::KeySchema,
        resolution::{KeyResolution, resolve_keys},
    },
};

use aws_sdk_dynamodb::types;
use std::ops;

/// Relational operator applied to the last sort value of a key.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ComparisonOperator {
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanOrEqualTo,
    /// `<`
    LessThan,
    /// `<=`
    LessThanOrEqualTo,
}

impl ops::Deref for ComparisonOperator {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqualTo => ">=",
            Self::LessThan => "<",
            Self::LessThanOrEqualTo => "<=",
        }
    }
}

/// Key condition of a query.
///
/// Every partition value is matched with `=`. Sort values other than the last one are also
/// matched with `=`, and the last one receives the variant's operator.
///
/// ```rust
/// use dynamodb_enhanced::common::{
///     conditional::QueryConditional,
///     key::Key,
///     key_schema::{StaticKeySchema, PRIMARY_INDEX_NAME},
/// };
///
/// let key_schema = StaticKeySchema::builder()
///     .add_index_partition_key(PRIMARY_INDEX_NAME, "id")
///     .add_index_sort_key(PRIMARY_INDEX_NAME, "sort")
///     .build();
/// let key = Key::builder().partition_value("id-1")?.sort_value("2024")?.build()?;
/// let expression = QueryConditional::sort_begins_with(key).expression(&key_schema, PRIMARY_INDEX_NAME)?;
/// assert_eq!(
///     expression.expression,
///     "#AMZN_MAPPED_id = :AMZN_MAPPED_id AND begins_with(#AMZN_MAPPED_sort, :AMZN_MAPPED_sort)"
/// );
/// # Ok::<(), dynamodb_enhanced::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum QueryConditional {
    /// Every supplied key value must match exactly.
    EqualTo(Key),
    /// The last sort value is compared with a relational operator.
    Compare(Key, ComparisonOperator),
    /// The last sort value lies between the values of two keys, both inclusive.
    Between(Key, Key),
    /// The last sort value is a prefix of the stored one.
    BeginsWith(Key),
}

impl QueryConditional {
    /// Items whose key matches every value of `key`.
    pub fn key_equal_to(key: Key) -> Self {
        Self::EqualTo(key)
    }

    /// Items whose last sort value is greater than the one of `key`.
    pub fn sort_greater_than(key: Key) -> Self {
        Self::Compare(key, ComparisonOperator::GreaterThan)
    }

    /// Items whose last sort value is greater than or equal to the one of `key`.
    pub fn sort_greater_than_or_equal_to(key: Key) -> Self {
        Self::Compare(key, ComparisonOperator::GreaterThanOrEqualTo)
    }

    /// Items whose last sort value is less than the one of `key`.
    pub fn sort_less_than(key: Key) -> Self {
        Self::Compare(key, ComparisonOperator::LessThan)
    }

    /// Items whose last sort value is less than or equal to the one of `key`.
    pub fn sort_less_than_or_equal_to(key: Key) -> Self {
        Self::Compare(key, ComparisonOperator::LessThanOrEqualTo)
    }

    /// Items whose last sort value lies between the ones of `key1` and `key2`.
    ///
    /// The two keys must agree on everything but their last sort value. This is checked when
    /// the expression is built.
    pub fn sort_between(key1: Key, key2: Key) -> Self {
        Self::Between(key1, key2)
    }

    /// Items whose last sort value starts with the one of `key`.
    pub fn sort_begins_with(key: Key) -> Self {
        Self::BeginsWith(key)
    }

    /// Build the key condition expression against an index of the key schema.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamodb_enhanced.query_conditional",
            skip(key_schema),
            err
        )
    )]
    pub fn expression<S: KeySchema + ?Sized>(
        &self,
        key_schema: &S,
        index_name: &str,
    ) -> Result<Expression> {
        match self {
            Self::EqualTo(key) => {
                let resolution = resolve_keys(key, key_schema, index_name)?;
                let mut builder = KeyConditionBuilder::default();
                let (partition_names, partition_values) = resolution.partition();
                builder.equal_all(partition_names, partition_values)?;
                let (sort_names, mut sort_values) = resolution.sort();
                // a trailing null means "no sort condition"
                if sort_values.last().is_some_and(common::is_null_attribute_value) {
                    sort_values = &sort_values[..sort_values.len() - 1];
                }
                builder.equal_all(sort_names, sort_values)?;
                Ok(builder.build())
            }
            Self::Compare(key, operator) => {
                let resolution = resolve_keys(key, key_schema, index_name)?;
                let (mut builder, sort_name, sort_value) =
                    KeyConditionBuilder::with_leading_components(&resolution, operator)?;
                builder.push(
                    format!(
                        "{} {} {}",
                        common::name_placeholder(sort_name),
                        &**operator,
                        common::value_placeholder(sort_name)
                    ),
                    sort_name,
                )?;
                builder.bind(common::value_placeholder(sort_name), sort_value)?;
                Ok(builder.build())
            }
            Self::Between(key1, key2) => {
                let lower = resolve_keys(key1, key_schema, index_name)?;
                let upper = resolve_keys(key2, key_schema, index_name)?;
                let (mut builder, sort_name, lower_value) =
                    KeyConditionBuilder::with_leading_components(&lower, "BETWEEN")?;
                let upper_value = terminal_sort_value(&upper, "BETWEEN")?;
                if !bounds_agree(&lower, &upper) {
                    return Err(Error::MismatchedBetweenBounds);
                }
                let value_placeholder = common::value_placeholder(sort_name);
                let other_value_placeholder = common::other_value_placeholder(sort_name);
                builder.push(
                    format!(
                        "{} BETWEEN {value_placeholder} AND {other_value_placeholder}",
                        common::name_placeholder(sort_name)
                    ),
                    sort_name,
                )?;
                builder.bind(value_placeholder, lower_value)?;
                builder.bind(other_value_placeholder, upper_value)?;
                Ok(builder.build())
            }
            Self::BeginsWith(key) => {
                let resolution = resolve_keys(key, key_schema, index_name)?;
                let (mut builder, sort_name, sort_value) =
                    KeyConditionBuilder::with_leading_components(&resolution, "begins_with")?;
                if matches!(sort_value, types::AttributeValue::N(_)) {
                    return Err(Error::NumericBeginsWith);
                }
                builder.push(
                    format!(
                        "begins_with({}, {})",
                        common::name_placeholder(sort_name),
                        common::value_placeholder(sort_name)
                    ),
                    sort_name,
                )?;
                builder.bind(common::value_placeholder(sort_name), sort_value)?;
                Ok(builder.build())
            }
        }
    }
}

fn terminal_sort_value<'a>(
    resolution: &'a KeyResolution,
    operator: &str,
) -> Result<&'a types::AttributeValue> {
    let (_, sort_values) = resolution.sort();
    match sort_values.last() {
        None => Err(Error::MissingSortValue),
        Some(value) if common::is_null_attribute_value(value) => Err(Error::NullSortValue {
            operator: operator.to_string(),
        }),
        Some(value) => Ok(value),
    }
}

fn bounds_agree(lower: &KeyResolution, upper: &KeyResolution) -> bool {
    let (_, lower_sort_values) = lower.sort();
    let (_, upper_sort_values) = upper.sort();
    let prefix = lower_sort_values.len() - 1;
    lower.partition().1 == upper.partition().1
        && lower_sort_values.len() == upper_sort_values.len()
        && lower_sort_values[..prefix] == upper_sort_values[..prefix]
}

#[derive(Default)]
struct KeyConditionBuilder {
    conditions: Vec<String>,
    expression: Expression,
}

impl KeyConditionBuilder {
    /// Equality on every partition value and every sort value but the last one, which is
    /// returned with its attribute name.
    fn with_leading_components<'a>(
        resolution: &'a KeyResolution,
        operator: &str,
    ) -> Result<(Self, &'a str, &'a types::AttributeValue)> {
        let sort_value = terminal_sort_value(resolution, operator)?;
        let mut builder = Self::default();
        let (partition_names, partition_values) = resolution.partition();
        builder.equal_all(partition_names, partition_values)?;
        let (sort_names, sort_values) = resolution.sort();
        let last = sort_names.len() - 1;
        builder.equal_all(&sort_names[..last], &sort_values[..last])?;
        Ok((builder, &sort_names[last], sort_value))
    }

    fn equal_all(&mut self, names: &[String], values: &[types::AttributeValue]) -> Result<()> {
        for (name, value) in names.iter().zip(values) {
            let value_placeholder = common::value_placeholder(name);
            self.push(
                format!("{} = {value_placeholder}", common::name_placeholder(name)),
                name,
            )?;
            self.bind(value_placeholder, value)?;
        }
        Ok(())
    }

    /// Key attributes whose placeholders clash are rejected rather than overwritten.
    fn push(&mut self, condition: String, name: &str) -> Result<()> {
        let placeholder = common::name_placeholder(name);
        match self.expression.expression_names.get(&placeholder) {
            Some(existing) if existing != name => {
                return Err(Error::ConflictingExpressionName { placeholder });
            }
            Some(_) => {}
            None => {
                self.expression
                    .expression_names
                    .insert(placeholder, name.to_string());
            }
        }
        self.conditions.push(condition);
        Ok(())
    }

    fn bind(&mut self, value_placeholder: String, value: &types::AttributeValue) -> Result<()> {
        match self.expression.expression_values.get(&value_placeholder) {
            Some(existing) if existing != value => Err(Error::ConflictingExpressionValue {
                placeholder: value_placeholder,
            }),
            Some(_) => Ok(()),
            None => {
                self.expression
                    .expression_values
                    .insert(value_placeholder, value.clone());
                Ok(())
            }
        }
    }

    fn build(mut self) -> Expression {
        self.expression.expression = self.conditions.join(&*LogicalOperator::And);
        self.expression
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::common::{
        expression::ExpressionNames,
        key_schema::{PRIMARY_INDEX_NAME, StaticKeySchema},
        null_attribute_value,
    };

    use rstest::{fixture, rstest};

    fn string_value(value: &str) -> types::AttributeValue {
        types::AttributeValue::S(value.to_string())
    }

    fn string_key(partition_values: &[&str], sort_values: &[&str]) -> Key {
        Key::new(
            partition_values.iter().map(|value| string_value(value)).collect(),
            sort_values.iter().map(|value| string_value(value)).collect(),
        )
        .unwrap()
    }

    #[fixture]
    fn key_schema() -> StaticKeySchema {
        let mut builder = StaticKeySchema::builder()
            .add_index_partition_key(PRIMARY_INDEX_NAME, "id")
            .add_index_sort_key(PRIMARY_INDEX_NAME, "sort")
            .add_index_partition_key("gsi1", "gsiKey1")
            .add_index_partition_key("gsi1", "gsiKey2")
            .add_index_sort_key("gsi1", "gsiSort1")
            .add_index_sort_key("gsi1", "gsiSort2")
            .add_index_partition_key("gsi_partition_only", "gsi-id");
        for position in 1..=4 {
            builder = builder
                .add_index_partition_key("max_keys", format!("pk{position}"))
                .add_index_sort_key("max_keys", format!("sk{position}"));
        }
        builder.build()
    }

    #[rstest]
    fn test_key_equal_to_partition_only(key_schema: StaticKeySchema) {
        let expression = QueryConditional::key_equal_to(string_key(&["test"], &[]))
            .expression(&key_schema, PRIMARY_INDEX_NAME)
            .unwrap();
        assert_eq!(expression.expression, "#AMZN_MAPPED_id = :AMZN_MAPPED_id");
        assert_eq!(
            expression.expression_names,
            ExpressionNames::from([("#AMZN_MAPPED_id".to_string(), "id".to_string())])
        );
        assert_eq!(expression.expression_values.len(), 1);
        assert_eq!(
            expression.expression_values[":AMZN_MAPPED_id"],
            string_value("test")
        );
    }

    #[rstest]
    #[case::partition_only(
        string_key(&["key1", "key2"], &[]),
        "#AMZN_MAPPED_gsiKey1 = :AMZN_MAPPED_gsiKey1 AND \
         #AMZN_MAPPED_gsiKey2 = :AMZN_MAPPED_gsiKey2",
        2
    )]
    #[case::partial_sort(
        string_key(&["key1", "key2"], &["sort1"]),
        "#AMZN_MAPPED_gsiKey1 = :AMZN_MAPPED_gsiKey1 AND \
         #AMZN_MAPPED_gsiKey2 = :AMZN_MAPPED_gsiKey2 AND \
         #AMZN_MAPPED_gsiSort1 = :AMZN_MAPPED_gsiSort1",
        3
    )]
    #[case::full(
        string_key(&["key1", "key2"], &["sort1", "sort2"]),
        "#AMZN_MAPPED_gsiKey1 = :AMZN_MAPPED_gsiKey1 AND \
         #AMZN_MAPPED_gsiKey2 = :AMZN_MAPPED_gsiKey2 AND \
         #AMZN_MAPPED_gsiSort1 = :AMZN_MAPPED_gsiSort1 AND \
         #AMZN_MAPPED_gsiSort2 = :AMZN_MAPPED_gsiSort2",
        4
    )]
    fn test_key_equal_to_composite(
        key_schema: StaticKeySchema,
        #[case] key: Key,
        #[case] expected: &str,
        #[case] expected_len: usize,
    ) {
        let expression = QueryConditional::key_equal_to(key)
            .expression(&key_schema, "gsi1")
            .unwrap();
        assert_eq!(expression.expression, expected);
        assert_eq!(expression.expression_names.len(), expected_len);
        assert_eq!(expression.expression_values.len(), expected_len);
        assert_eq!(expression.expression_names["#AMZN_MAPPED_gsiKey2"], "gsiKey2");
        assert_eq!(
            expression.expression_values[":AMZN_MAPPED_gsiKey1"],
            string_value("key1")
        );
    }

    #[rstest]
    fn test_key_equal_to_ignores_trailing_null_sort_value(key_schema: StaticKeySchema) {
        let key = Key::new(vec![string_value("test")], vec![null_attribute_value()]).unwrap();
        let expression = QueryConditional::key_equal_to(key)
            .expression(&key_schema, PRIMARY_INDEX_NAME)
            .unwrap();
        assert_eq!(expression.expression, "#AMZN_MAPPED_id = :AMZN_MAPPED_id");
        assert_eq!(expression.expression_values.len(), 1);
    }

    #[rstest]
    fn test_key_equal_to_max_keys(key_schema: StaticKeySchema) {
        let key = string_key(&["p1", "p2", "p3", "p4"], &["s1", "s2", "s3", "s4"]);
        let expression = QueryConditional::key_equal_to(key)
            .expression(&key_schema, "max_keys")
            .unwrap();
        let expected = (1..=4)
            .map(|position| format!("#AMZN_MAPPED_pk{position} = :AMZN_MAPPED_pk{position}"))
            .chain((1..=4).map(|position| {
                format!("#AMZN_MAPPED_sk{position} = :AMZN_MAPPED_sk{position}")
            }))
            .collect::<Vec<_>>()
            .join(" AND ");
        assert_eq!(expression.expression, expected);
        assert_eq!(expression.expression_names.len(), 8);
        assert_eq!(
            expression.expression_values.keys().collect::<Vec<_>>(),
            [
                ":AMZN_MAPPED_pk1",
                ":AMZN_MAPPED_pk2",
                ":AMZN_MAPPED_pk3",
                ":AMZN_MAPPED_pk4",
                ":AMZN_MAPPED_sk1",
                ":AMZN_MAPPED_sk2",
                ":AMZN_MAPPED_sk3",
                ":AMZN_MAPPED_sk4",
            ]
        );
    }

    #[rstest]
    #[case::greater_than(
        QueryConditional::sort_greater_than(string_key(&["test"], &["a"])),
        "#AMZN_MAPPED_id = :AMZN_MAPPED_id AND #AMZN_MAPPED_sort > :AMZN_MAPPED_sort"
    )]
    #[case::greater_than_or_equal_to(
        QueryConditional::sort_greater_than_or_equal_to(string_key(&["test"], &["a"])),
        "#AMZN_MAPPED_id = :AMZN_MAPPED_id AND #AMZN_MAPPED_sort >= :AMZN_MAPPED_sort"
    )]
    #[case::less_than(
        QueryConditional::sort_less_than(string_key(&["test"], &["a"])),
        "#AMZN_MAPPED_id = :AMZN_MAPPED_id AND #AMZN_MAPPED_sort < :AMZN_MAPPED_sort"
    )]
    #[case::less_than_or_equal_to(
        QueryConditional::sort_less_than_or_equal_to(string_key(&["test"], &["a"])),
        "#AMZN_MAPPED_id = :AMZN_MAPPED_id AND #AMZN_MAPPED_sort <= :AMZN_MAPPED_sort"
    )]
    #[case::begins_with(
        QueryConditional::sort_begins_with(string_key(&["test"], &["a"])),
        "#AMZN_MAPPED_id = :AMZN_MAPPED_id AND begins_with(#AMZN_MAPPED_sort, :AMZN_MAPPED_sort)"
    )]
    #[case::between(
        QueryConditional::sort_between(
            string_key(&["test"], &["sortA"]),
            string_key(&["test"], &["sortZ"]),
        ),
        "#AMZN_MAPPED_id = :AMZN_MAPPED_id AND \
         #AMZN_MAPPED_sort BETWEEN :AMZN_MAPPED_sort AND :AMZN_MAPPED_sort2"
    )]
    fn test_sort_conditionals(
        key_schema: StaticKeySchema,
        #[case] conditional: QueryConditional,
        #[case] expected: &str,
    ) {
        let expression = conditional
            .expression(&key_schema, PRIMARY_INDEX_NAME)
            .unwrap();
        assert_eq!(expression.expression, expected);
        assert_eq!(
            expression.expression_names.keys().collect::<Vec<_>>(),
            ["#AMZN_MAPPED_id", "#AMZN_MAPPED_sort"]
        );
    }

    #[rstest]
    fn test_between_values(key_schema: StaticKeySchema) {
        let expression = QueryConditional::sort_between(
            string_key(&["test"], &["sortA"]),
            string_key(&["test"], &["sortZ"]),
        )
        .expression(&key_schema, PRIMARY_INDEX_NAME)
        .unwrap();
        assert_eq!(
            expression.expression_values.into_iter().collect::<Vec<_>>(),
            [
                (":AMZN_MAPPED_id".to_string(), string_value("test")),
                (":AMZN_MAPPED_sort".to_string(), string_value("sortA")),
                (":AMZN_MAPPED_sort2".to_string(), string_value("sortZ")),
            ]
        );
    }

    #[rstest]
    fn test_between_composite_suffixes_last_component_only(key_schema: StaticKeySchema) {
        let expression = QueryConditional::sort_between(
            string_key(&["key1", "key2"], &["sort1", "a"]),
            string_key(&["key1", "key2"], &["sort1", "z"]),
        )
        .expression(&key_schema, "gsi1")
        .unwrap();
        assert_eq!(
            expression.expression,
            "#AMZN_MAPPED_gsiKey1 = :AMZN_MAPPED_gsiKey1 AND \
             #AMZN_MAPPED_gsiKey2 = :AMZN_MAPPED_gsiKey2 AND \
             #AMZN_MAPPED_gsiSort1 = :AMZN_MAPPED_gsiSort1 AND \
             #AMZN_MAPPED_gsiSort2 BETWEEN :AMZN_MAPPED_gsiSort2 AND :AMZN_MAPPED_gsiSort22"
        );
        assert!(!expression.expression_values.contains_key(":AMZN_MAPPED_gsiSort12"));
        assert_eq!(expression.expression_values.len(), 5);
    }

    #[rstest]
    fn test_composite_relational_applies_to_last_supplied_sort_value(key_schema: StaticKeySchema) {
        let expression =
            QueryConditional::sort_less_than_or_equal_to(string_key(&["key1", "key2"], &["sort1"]))
                .expression(&key_schema, "gsi1")
                .unwrap();
        assert_eq!(
            expression.expression,
            "#AMZN_MAPPED_gsiKey1 = :AMZN_MAPPED_gsiKey1 AND \
             #AMZN_MAPPED_gsiKey2 = :AMZN_MAPPED_gsiKey2 AND \
             #AMZN_MAPPED_gsiSort1 <= :AMZN_MAPPED_gsiSort1"
        );
    }

    #[rstest]
    fn test_reserved_characters_are_cleaned(key_schema: StaticKeySchema) {
        let expression = QueryConditional::key_equal_to(string_key(&["a"], &[]))
            .expression(&key_schema, "gsi_partition_only")
            .unwrap();
        assert_eq!(expression.expression, "#AMZN_MAPPED_gsi_id = :AMZN_MAPPED_gsi_id");
        assert_eq!(expression.expression_names["#AMZN_MAPPED_gsi_id"], "gsi-id");
    }

    #[rstest]
    fn test_expression_is_deterministic(key_schema: StaticKeySchema) {
        let conditional = QueryConditional::sort_between(
            string_key(&["p1", "p2", "p3", "p4"], &["s1", "s2", "a"]),
            string_key(&["p1", "p2", "p3", "p4"], &["s1", "s2", "z"]),
        );
        let first = conditional.expression(&key_schema, "max_keys").unwrap();
        let second = conditional.expression(&key_schema, "max_keys").unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.expression_values.keys().collect::<Vec<_>>(),
            second.expression_values.keys().collect::<Vec<_>>()
        );
    }

    #[rstest]
    #[case::null_upper_bound(
        string_key(&["test"], &["sortA"]),
        Key::new(vec![string_value("test")], vec![null_attribute_value()]).unwrap()
    )]
    #[case::null_lower_bound(
        Key::new(vec![string_value("test")], vec![null_attribute_value()]).unwrap(),
        string_key(&["test"], &["sortZ"])
    )]
    fn test_between_null_bound_fails_at_expression(
        key_schema: StaticKeySchema,
        #[case] key1: Key,
        #[case] key2: Key,
    ) {
        let conditional = QueryConditional::sort_between(key1, key2);
        let error = conditional
            .expression(&key_schema, PRIMARY_INDEX_NAME)
            .unwrap_err();
        assert!(matches!(error, Error::NullSortValue { operator } if operator == "BETWEEN"));
    }

    #[rstest]
    fn test_key_attributes_sharing_a_name_placeholder() {
        let key_schema = StaticKeySchema::builder()
            .add_index_partition_key(PRIMARY_INDEX_NAME, "a-b")
            .add_index_sort_key(PRIMARY_INDEX_NAME, "a.b")
            .build();
        let error = QueryConditional::key_equal_to(string_key(&["x"], &["y"]))
            .expression(&key_schema, PRIMARY_INDEX_NAME)
            .unwrap_err();
        assert!(matches!(
            error,
            Error::ConflictingExpressionName { placeholder } if placeholder == "#AMZN_MAPPED_a_b"
        ));
    }

    #[rstest]
    #[case::different_values("p", Some(":AMZN_MAPPED_sort2"))]
    #[case::same_value("z", None)]
    fn test_between_upper_bound_sharing_a_value_placeholder(
        #[case] partition_value: &str,
        #[case] conflicting_placeholder: Option<&str>,
    ) {
        let key_schema = StaticKeySchema::builder()
            .add_index_partition_key(PRIMARY_INDEX_NAME, "sort2")
            .add_index_sort_key(PRIMARY_INDEX_NAME, "sort")
            .build();
        let result = QueryConditional::sort_between(
            string_key(&[partition_value], &["a"]),
            string_key(&[partition_value], &["z"]),
        )
        .expression(&key_schema, PRIMARY_INDEX_NAME);
        match conflicting_placeholder {
            Some(expected) => assert!(matches!(
                result,
                Err(Error::ConflictingExpressionValue { placeholder })
                    if placeholder == expected
            )),
            None => assert_eq!(
                result.unwrap().expression,
                "#AMZN_MAPPED_sort2 = :AMZN_MAPPED_sort2 AND \
                 #AMZN_MAPPED_sort BETWEEN :AMZN_MAPPED_sort AND :AMZN_MAPPED_sort2"
            ),
        }
    }

    #[rstest]
    #[case::different_partition(
        string_key(&["key1", "key2"], &["sort1", "a"]),
        string_key(&["key1", "other"], &["sort1", "z"])
    )]
    #[case::different_leading_sort(
        string_key(&["key1", "key2"], &["sort1", "a"]),
        string_key(&["key1", "key2"], &["other", "z"])
    )]
    #[case::different_sort_count(
        string_key(&["key1", "key2"], &["sort1", "a"]),
        string_key(&["key1", "key2"], &["z"])
    )]
    fn test_between_mismatched_bounds(
        key_schema: StaticKeySchema,
        #[case] key1: Key,
        #[case] key2: Key,
    ) {
        let error = QueryConditional::sort_between(key1, key2)
            .expression(&key_schema, "gsi1")
            .unwrap_err();
        assert!(matches!(error, Error::MismatchedBetweenBounds));
    }

    #[rstest]
    fn test_begins_with_numeric_sort_value(key_schema: StaticKeySchema) {
        let key = Key::builder()
            .partition_values(vec![string_value("key1"), string_value("key2")])
            .add_sort_value(123)
            .unwrap()
            .build()
            .unwrap();
        let error = QueryConditional::sort_begins_with(key)
            .expression(&key_schema, "gsi1")
            .unwrap_err();
        assert!(matches!(error, Error::NumericBeginsWith));
        assert!(error.is_invalid_argument());
    }

    #[rstest]
    #[case::greater_than(QueryConditional::sort_greater_than(string_key(&["test"], &[])))]
    #[case::begins_with(QueryConditional::sort_begins_with(string_key(&["test"], &[])))]
    #[case::between(QueryConditional::sort_between(
        string_key(&["test"], &[]),
        string_key(&["test"], &["z"]),
    ))]
    fn test_sort_conditionals_without_sort_value(
        key_schema: StaticKeySchema,
        #[case] conditional: QueryConditional,
    ) {
        let error = conditional
            .expression(&key_schema, PRIMARY_INDEX_NAME)
            .unwrap_err();
        assert!(matches!(error, Error::MissingSortValue));
    }

    #[rstest]
    #[case::less_than(
        QueryConditional::sort_less_than(
            Key::new(vec![string_value("test")], vec![null_attribute_value()]).unwrap()
        ),
        "<"
    )]
    #[case::begins_with(
        QueryConditional::sort_begins_with(
            Key::new(vec![string_value("test")], vec![null_attribute_value()]).unwrap()
        ),
        "begins_with"
    )]
    fn test_sort_conditionals_with_null_sort_value(
        key_schema: StaticKeySchema,
        #[case] conditional: QueryConditional,
        #[case] expected_operator: &str,
    ) {
        let error = conditional
            .expression(&key_schema, PRIMARY_INDEX_NAME)
            .unwrap_err();
        assert!(matches!(
            error,
            Error::NullSortValue { operator } if operator == expected_operator
        ));
    }

    #[rstest]
    fn test_sort_value_against_partition_only_index(key_schema: StaticKeySchema) {
        let error = QueryConditional::sort_greater_than(string_key(&["a"], &["b"]))
            .expression(&key_schema, "gsi_partition_only")
            .unwrap_err();
        assert!(matches!(
            error,
            Error::SortKeyNotSupported { index_name } if index_name == "gsi_partition_only"
        ));
    }

    #[rstest]
    #[case::incomplete_partition(string_key(&["key1"], &[]))]
    #[case::too_many_sort_values(string_key(&["key1", "key2"], &["s1", "s2", "s3"]))]
    fn test_cardinality_errors(key_schema: StaticKeySchema, #[case] key: Key) {
        let error = QueryConditional::key_equal_to(key)
            .expression(&key_schema, "gsi1")
            .unwrap_err();
        assert!(matches!(
            error,
            Error::PartitionKeyCount { .. } | Error::SortKeyCount { .. }
        ));
    }

    #[rstest]
    fn test_null_inside_composite_sort_values(key_schema: StaticKeySchema) {
        let key = Key::new(
            vec![string_value("key1"), string_value("key2")],
            vec![null_attribute_value(), string_value("sort2")],
        )
        .unwrap();
        let error = QueryConditional::sort_greater_than(key)
            .expression(&key_schema, "gsi1")
            .unwrap_err();
        assert!(matches!(
            error,
            Error::NullSortValueInComposite { position: 0 }
        ));
    }

    #[rstest]
    #[case::greater_than(ComparisonOperator::GreaterThan, ">")]
    #[case::greater_than_or_equal_to(ComparisonOperator::GreaterThanOrEqualTo, ">=")]
    #[case::less_than(ComparisonOperator::LessThan, "<")]
    #[case::less_than_or_equal_to(ComparisonOperator::LessThanOrEqualTo, "<=")]
    fn test_comparison_operator(#[case] operator: ComparisonOperator, #[case] expected: &str) {
        assert_eq!(&*operator, expected);
    }
}
