use crate::{
    Error, Result,
    common::{self, expression::ExpressionNames},
};

use indexmap::{IndexMap, IndexSet};
use std::collections;

/// Path to a possibly nested attribute, one element per level (`a.b.c` is `["a", "b", "c"]`).
///
/// Elements are attribute names, not expressions: a `.` inside an element is part of the name.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct NestedAttributeName {
    elements: Vec<String>,
}

impl NestedAttributeName {
    /// Path to a top level attribute.
    pub fn create(attribute_name: impl Into<String>) -> Self {
        Self {
            elements: vec![attribute_name.into()],
        }
    }

    /// Path through nested attributes, outermost first.
    pub fn new(elements: Vec<String>) -> Result<Self> {
        if elements.is_empty() {
            return Err(Error::EmptyNestedAttributeName);
        }
        Ok(Self { elements })
    }

    /// The path elements, outermost first.
    pub fn elements(&self) -> &[String] {
        &self.elements
    }
}

/// Projection expression over nested attribute paths.
///
/// Each distinct element gets one name placeholder across all paths. When two different
/// elements clean to the same placeholder (`MyAttribute-1` and `MyAttribute.1`), each of them
/// is numbered in the order it is first met. Numbers whose placeholder already names another
/// element are skipped.
///
/// ```rust
/// use dynamodb_enhanced::common::projection::{NestedAttributeName, ProjectionExpression};
///
/// let projection = ProjectionExpression::create(&[
///     NestedAttributeName::new(vec!["a".to_string(), "b".to_string()])?,
///     NestedAttributeName::create("c"),
/// ]);
/// assert_eq!(
///     projection.projection_expression_as_string(),
///     Some("#AMZN_MAPPED_a.#AMZN_MAPPED_b,#AMZN_MAPPED_c")
/// );
/// # Ok::<(), dynamodb_enhanced::Error>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectionExpression {
    expression_attribute_names: ExpressionNames,
    projection_expression: Option<String>,
}

impl ProjectionExpression {
    /// Build the projection of the given paths.
    pub fn create(nested_attribute_names: &[NestedAttributeName]) -> Self {
        if nested_attribute_names.is_empty() {
            return Self::default();
        }

        let mut groups: IndexMap<String, Vec<&str>> = IndexMap::new();
        for element in nested_attribute_names
            .iter()
            .flat_map(NestedAttributeName::elements)
        {
            let group = groups
                .entry(common::name_placeholder(element))
                .or_default();
            if !group.contains(&element.as_str()) {
                group.push(element.as_str());
            }
        }

        // plain placeholders stay reserved, numbering skips over them
        let mut taken: collections::HashSet<String> = groups
            .iter()
            .filter(|(_, elements)| elements.len() == 1)
            .map(|(placeholder, _)| placeholder.clone())
            .collect();
        let mut placeholders = collections::HashMap::new();
        let mut expression_attribute_names = ExpressionNames::with_capacity(groups.len());
        for (placeholder, elements) in groups {
            if let [element] = elements[..] {
                placeholders.insert(element, placeholder.clone());
                expression_attribute_names.insert(placeholder, element.to_string());
                continue;
            }
            #[cfg(feature = "tracing")]
            tracing::debug!(
                placeholder = %placeholder,
                elements = ?elements,
                "disambiguating colliding projection placeholders"
            );
            let cleaned = common::clean_attribute_name(elements[0]);
            let mut position = 0;
            for element in elements {
                let disambiguated = loop {
                    let candidate = format!(
                        "{}{position}_{cleaned}",
                        common::NAME_PLACEHOLDER_PREFIX
                    );
                    position += 1;
                    if taken.insert(candidate.clone()) {
                        break candidate;
                    }
                };
                placeholders.insert(element, disambiguated.clone());
                expression_attribute_names.insert(disambiguated, element.to_string());
            }
        }

        let paths: IndexSet<String> = nested_attribute_names
            .iter()
            .map(|nested_attribute_name| {
                nested_attribute_name
                    .elements()
                    .iter()
                    .map(|element| placeholders[element.as_str()].as_str())
                    .collect::<Vec<_>>()
                    .join(".")
            })
            .collect();
        let projection_expression = paths.into_iter().collect::<Vec<_>>().join(",");

        Self {
            expression_attribute_names,
            projection_expression: Some(projection_expression),
        }
    }

    /// Name placeholder to attribute name, for every placeholder of the projection.
    pub fn expression_attribute_names(&self) -> &ExpressionNames {
        &self.expression_attribute_names
    }

    /// The projection expression, absent when no path was given.
    pub fn projection_expression_as_string(&self) -> Option<&str> {
        self.projection_expression.as_deref()
    }

    pub(crate) fn into_parts(self) -> (ExpressionNames, Option<String>) {
        (self.expression_attribute_names, self.projection_expression)
    }
}

/// Projection built without disambiguation.
///
/// Elements that clean to the same placeholder share it, and the name map keeps the last one
/// seen. Kept for callers relying on that output.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProjectionExpressionConvertor {
    nested_attribute_names: Vec<NestedAttributeName>,
}

impl ProjectionExpressionConvertor {
    /// Wrap the paths to convert.
    pub fn create(nested_attribute_names: Vec<NestedAttributeName>) -> Self {
        Self {
            nested_attribute_names,
        }
    }

    /// Placeholder to attribute name for every element of every path.
    pub fn convert_to_expression_map(&self) -> ExpressionNames {
        let mut expression_attribute_names = ExpressionNames::new();
        for element in self
            .nested_attribute_names
            .iter()
            .flat_map(NestedAttributeName::elements)
        {
            expression_attribute_names.insert(common::name_placeholder(element), element.clone());
        }
        expression_attribute_names
    }

    /// Distinct paths rendered with base placeholders, absent when no path was given.
    pub fn convert_to_projection_expression(&self) -> Option<String> {
        if self.nested_attribute_names.is_empty() {
            return None;
        }
        let paths: IndexSet<String> = self
            .nested_attribute_names
            .iter()
            .map(|nested_attribute_name| {
                nested_attribute_name
                    .elements()
                    .iter()
                    .map(|element| common::name_placeholder(element))
                    .collect::<Vec<_>>()
                    .join(".")
            })
            .collect();
        Some(paths.into_iter().collect::<Vec<_>>().join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn nested(elements: &[&str]) -> NestedAttributeName {
        NestedAttributeName::new(elements.iter().map(|element| element.to_string()).collect())
            .unwrap()
    }

    fn names(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(placeholder, name)| (placeholder.to_string(), name.to_string()))
            .collect()
    }

    #[test]
    fn test_nested_attribute_name_requires_elements() {
        let error = NestedAttributeName::new(vec![]).unwrap_err();
        assert!(matches!(error, Error::EmptyNestedAttributeName));
    }

    #[rstest]
    #[case::empty(vec![], None, vec![])]
    #[case::single(
        vec![NestedAttributeName::create("a")],
        Some("#AMZN_MAPPED_a"),
        names(&[("#AMZN_MAPPED_a", "a")])
    )]
    #[case::nested(
        vec![nested(&["a", "b", "c"])],
        Some("#AMZN_MAPPED_a.#AMZN_MAPPED_b.#AMZN_MAPPED_c"),
        names(&[("#AMZN_MAPPED_a", "a"), ("#AMZN_MAPPED_b", "b"), ("#AMZN_MAPPED_c", "c")])
    )]
    #[case::shared_elements(
        vec![nested(&["a", "b"]), nested(&["a", "c"]), nested(&["b"])],
        Some("#AMZN_MAPPED_a.#AMZN_MAPPED_b,#AMZN_MAPPED_a.#AMZN_MAPPED_c,#AMZN_MAPPED_b"),
        names(&[("#AMZN_MAPPED_a", "a"), ("#AMZN_MAPPED_b", "b"), ("#AMZN_MAPPED_c", "c")])
    )]
    #[case::duplicate_paths(
        vec![nested(&["a", "b"]), NestedAttributeName::create("c"), nested(&["a", "b"])],
        Some("#AMZN_MAPPED_a.#AMZN_MAPPED_b,#AMZN_MAPPED_c"),
        names(&[("#AMZN_MAPPED_a", "a"), ("#AMZN_MAPPED_b", "b"), ("#AMZN_MAPPED_c", "c")])
    )]
    #[case::dot_inside_element(
        vec![NestedAttributeName::create("test.com")],
        Some("#AMZN_MAPPED_test_com"),
        names(&[("#AMZN_MAPPED_test_com", "test.com")])
    )]
    #[case::collision(
        vec![NestedAttributeName::create("MyAttribute-1"), NestedAttributeName::create("MyAttribute.1")],
        Some("#AMZN_MAPPED_0_MyAttribute_1,#AMZN_MAPPED_1_MyAttribute_1"),
        names(&[
            ("#AMZN_MAPPED_0_MyAttribute_1", "MyAttribute-1"),
            ("#AMZN_MAPPED_1_MyAttribute_1", "MyAttribute.1"),
        ])
    )]
    #[case::collision_reversed(
        vec![NestedAttributeName::create("MyAttribute.1"), NestedAttributeName::create("MyAttribute-1")],
        Some("#AMZN_MAPPED_0_MyAttribute_1,#AMZN_MAPPED_1_MyAttribute_1"),
        names(&[
            ("#AMZN_MAPPED_0_MyAttribute_1", "MyAttribute.1"),
            ("#AMZN_MAPPED_1_MyAttribute_1", "MyAttribute-1"),
        ])
    )]
    #[case::collision_in_nested_paths(
        vec![nested(&["a-b", "c"]), nested(&["d", "a.b"]), nested(&["a-b"])],
        Some(
            "#AMZN_MAPPED_0_a_b.#AMZN_MAPPED_c,\
             #AMZN_MAPPED_d.#AMZN_MAPPED_1_a_b,\
             #AMZN_MAPPED_0_a_b"
        ),
        names(&[
            ("#AMZN_MAPPED_0_a_b", "a-b"),
            ("#AMZN_MAPPED_1_a_b", "a.b"),
            ("#AMZN_MAPPED_c", "c"),
            ("#AMZN_MAPPED_d", "d"),
        ])
    )]
    #[case::numbered_placeholder_already_taken(
        vec![
            NestedAttributeName::create("a-b"),
            NestedAttributeName::create("a.b"),
            NestedAttributeName::create("0_a_b"),
        ],
        Some("#AMZN_MAPPED_1_a_b,#AMZN_MAPPED_2_a_b,#AMZN_MAPPED_0_a_b"),
        names(&[
            ("#AMZN_MAPPED_1_a_b", "a-b"),
            ("#AMZN_MAPPED_2_a_b", "a.b"),
            ("#AMZN_MAPPED_0_a_b", "0_a_b"),
        ])
    )]
    fn test_projection_expression(
        #[case] nested_attribute_names: Vec<NestedAttributeName>,
        #[case] expected_expression: Option<&str>,
        #[case] expected_names: Vec<(String, String)>,
    ) {
        let projection = ProjectionExpression::create(&nested_attribute_names);
        assert_eq!(
            projection.projection_expression_as_string(),
            expected_expression
        );
        let actual_names: Vec<(String, String)> = projection
            .expression_attribute_names()
            .clone()
            .into_iter()
            .collect();
        assert_eq!(actual_names, expected_names);
    }

    #[test]
    fn test_projection_expression_is_deterministic() {
        let nested_attribute_names = vec![
            NestedAttributeName::create("x:y"),
            nested(&["x*y", "x#y"]),
            NestedAttributeName::create("x-y"),
        ];
        let first = ProjectionExpression::create(&nested_attribute_names);
        let second = ProjectionExpression::create(&nested_attribute_names);
        assert_eq!(first, second);
        assert_eq!(
            first.projection_expression_as_string(),
            Some(
                "#AMZN_MAPPED_0_x_y,\
                 #AMZN_MAPPED_1_x_y.#AMZN_MAPPED_2_x_y,\
                 #AMZN_MAPPED_3_x_y"
            )
        );
    }

    #[rstest]
    #[case::empty(vec![], None, vec![])]
    #[case::nested(
        vec![nested(&["a", "b"]), nested(&["a", "b"]), NestedAttributeName::create("c")],
        Some("#AMZN_MAPPED_a.#AMZN_MAPPED_b,#AMZN_MAPPED_c"),
        names(&[("#AMZN_MAPPED_a", "a"), ("#AMZN_MAPPED_b", "b"), ("#AMZN_MAPPED_c", "c")])
    )]
    #[case::collision_keeps_last(
        vec![NestedAttributeName::create("MyAttribute-1"), NestedAttributeName::create("MyAttribute.1")],
        Some("#AMZN_MAPPED_MyAttribute_1"),
        names(&[("#AMZN_MAPPED_MyAttribute_1", "MyAttribute.1")])
    )]
    fn test_projection_expression_convertor(
        #[case] nested_attribute_names: Vec<NestedAttributeName>,
        #[case] expected_expression: Option<&str>,
        #[case] expected_names: Vec<(String, String)>,
    ) {
        let convertor = ProjectionExpressionConvertor::create(nested_attribute_names);
        assert_eq!(
            convertor.convert_to_projection_expression().as_deref(),
            expected_expression
        );
        let actual_names: Vec<(String, String)> =
            convertor.convert_to_expression_map().into_iter().collect();
        assert_eq!(actual_names, expected_names);
    }
}
