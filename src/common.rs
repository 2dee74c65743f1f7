//! Common utilities for DynamoDB expressions.
//!
//! This module provides the shared building blocks used by read and write operations:
//! keys and key schemas, query conditionals, projection expressions, and the placeholder
//! naming rules they all agree on.

/// Query conditionals that turn keys into key condition expressions.
pub mod conditional;

/// Expression values and the rules for joining them.
pub mod expression;

/// Key types for identifying items in DynamoDB tables and indexes.
pub mod key;

/// Key schema lookup for tables and their secondary indexes.
pub mod key_schema;

/// Projection expressions over (possibly nested) attribute paths.
pub mod projection;

/// Binding of key values to the key attribute names of an index.
pub mod resolution;

use aws_sdk_dynamodb::types;

/// Prefix of every generated expression attribute name placeholder.
pub const NAME_PLACEHOLDER_PREFIX: &str = "#AMZN_MAPPED_";

/// Prefix of every generated expression attribute value placeholder.
pub const VALUE_PLACEHOLDER_PREFIX: &str = ":AMZN_MAPPED_";

/// Suffix of the second value placeholder of a single attribute (upper bound of a between).
pub const OTHER_VALUE_PLACEHOLDER_SUFFIX: &str = "2";

/// Replace every character that is not allowed in an expression placeholder with `_`.
///
/// ```rust
/// use dynamodb_enhanced::common;
///
/// assert_eq!(common::clean_attribute_name("a.b-c#d:e*f"), "a_b_c_d_e_f");
/// ```
pub fn clean_attribute_name(attribute_name: &str) -> String {
    attribute_name
        .chars()
        .map(|character| match character {
            '*' | '.' | '-' | '#' | ':' => '_',
            other => other,
        })
        .collect()
}

/// Name placeholder of an attribute, e.g. `#AMZN_MAPPED_id`.
pub fn name_placeholder(attribute_name: &str) -> String {
    format!(
        "{NAME_PLACEHOLDER_PREFIX}{}",
        clean_attribute_name(attribute_name)
    )
}

/// Value placeholder of an attribute, e.g. `:AMZN_MAPPED_id`.
pub fn value_placeholder(attribute_name: &str) -> String {
    format!(
        "{VALUE_PLACEHOLDER_PREFIX}{}",
        clean_attribute_name(attribute_name)
    )
}

/// Second value placeholder of an attribute, e.g. `:AMZN_MAPPED_sort2`.
pub fn other_value_placeholder(attribute_name: &str) -> String {
    format!(
        "{}{OTHER_VALUE_PLACEHOLDER_SUFFIX}",
        value_placeholder(attribute_name)
    )
}

/// The explicit null attribute value.
///
/// It is distinct from an absent value: a key may carry it, a query may not compare with it.
pub fn null_attribute_value() -> types::AttributeValue {
    types::AttributeValue::Null(true)
}

pub(crate) fn is_null_attribute_value(value: &types::AttributeValue) -> bool {
    *value == null_attribute_value()
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::plain("id", "id")]
    #[case::dot("test.com", "test_com")]
    #[case::dash("MyAttribute-1", "MyAttribute_1")]
    #[case::every_reserved_character("*.-#:", "_____")]
    #[case::unicode("naïve:ü", "naïve_ü")]
    #[case::empty("", "")]
    fn test_clean_attribute_name(#[case] attribute_name: &str, #[case] expected: &str) {
        assert_eq!(clean_attribute_name(attribute_name), expected);
    }

    #[rstest]
    #[case::plain("sort", "#AMZN_MAPPED_sort", ":AMZN_MAPPED_sort", ":AMZN_MAPPED_sort2")]
    #[case::reserved(
        "gsi-sort.1",
        "#AMZN_MAPPED_gsi_sort_1",
        ":AMZN_MAPPED_gsi_sort_1",
        ":AMZN_MAPPED_gsi_sort_12"
    )]
    fn test_placeholders(
        #[case] attribute_name: &str,
        #[case] expected_name: &str,
        #[case] expected_value: &str,
        #[case] expected_other_value: &str,
    ) {
        assert_eq!(name_placeholder(attribute_name), expected_name);
        assert_eq!(value_placeholder(attribute_name), expected_value);
        assert_eq!(other_value_placeholder(attribute_name), expected_other_value);
    }

    #[rstest]
    #[case::null(null_attribute_value(), true)]
    #[case::null_false(types::AttributeValue::Null(false), false)]
    #[case::string(types::AttributeValue::S("null".to_string()), false)]
    fn test_is_null_attribute_value(#[case] value: types::AttributeValue, #[case] expected: bool) {
        assert_eq!(is_null_attribute_value(&value), expected);
    }
}
