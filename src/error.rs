//! Error type shared by every operation of the crate.
//!
//! Almost every variant is an argument error: it is raised synchronously while an
//! expression or request is being built, so a malformed query never reaches DynamoDB.
//! Only [`Error::Serialization`] and [`Error::Service`] come from collaborators.

use aws_sdk_dynamodb::error;

/// Errors produced while building keys, expressions and requests, or while executing them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The same placeholder was mapped to two different attribute names.
    #[error(
        "attempt to coalesce two expressions with conflicting expression names: {placeholder}"
    )]
    ConflictingExpressionName {
        /// The placeholder present in both expressions.
        placeholder: String,
    },
    /// The same placeholder was mapped to two different attribute values.
    #[error(
        "attempt to coalesce two expressions with conflicting expression values: {placeholder}"
    )]
    ConflictingExpressionValue {
        /// The placeholder present in both expressions.
        placeholder: String,
    },
    /// A nested attribute name was built without any path element.
    #[error("a nested attribute name must contain at least one element")]
    EmptyNestedAttributeName,
    /// A key was built without partition values.
    #[error("partitionValues should not be null or empty")]
    EmptyPartitionValues,
    /// The two bound keys of a between conditional disagree outside the last sort value.
    #[error(
        "the lower and upper bound keys of a between conditional must share their partition \
         values and all but the last sort value"
    )]
    MismatchedBetweenBounds,
    /// The index declares no partition key attribute.
    #[error(
        "attempt to execute an operation against an index that requires partition keys without \
         assigning partition keys to that index. Index name: {index_name}"
    )]
    MissingPartitionKeys {
        /// The index being queried.
        index_name: String,
    },
    /// A relational, between or begins_with conditional was given no sort value.
    #[error("a query conditional requires a sort key to compare with, however one was not provided")]
    MissingSortValue,
    /// A partition value was the explicit null marker.
    #[error("partitionValue should not be null")]
    NullPartitionValue,
    /// The sort value that receives the operator is the explicit null marker.
    #[error("attempt to query using a '{operator}' condition operator against a null sort key")]
    NullSortValue {
        /// The operator that was requested.
        operator: String,
    },
    /// A null sort value appears before the last supplied sort value.
    #[error("sort value at position {position} is null but is followed by further sort values")]
    NullSortValueInComposite {
        /// Zero-based position of the null sort value.
        position: usize,
    },
    /// `begins_with` was requested against a numeric sort value.
    #[error("attempt to query using a 'beginsWith' condition operator against a numeric sort key")]
    NumericBeginsWith,
    /// The number of partition values does not match the index declaration.
    #[error(
        "index {index_name} declares {expected} partition key attribute(s) but {actual} \
         partition value(s) were supplied"
    )]
    PartitionKeyCount {
        /// The index being queried.
        index_name: String,
        /// Declared partition key attributes.
        expected: usize,
        /// Supplied partition values.
        actual: usize,
    },
    /// More sort values were supplied than the index declares.
    #[error(
        "index {index_name} declares {expected} sort key attribute(s) but {actual} sort \
         value(s) were supplied"
    )]
    SortKeyCount {
        /// The index being queried.
        index_name: String,
        /// Declared sort key attributes.
        expected: usize,
        /// Supplied sort values.
        actual: usize,
    },
    /// A sort condition was requested against an index without a sort key.
    #[error(
        "a sort key was supplied as part of a query conditional against an index that does not \
         support a sort key. Index: {index_name}"
    )]
    SortKeyNotSupported {
        /// The index being queried.
        index_name: String,
    },
    /// A key was built with more values than DynamoDB allows for one key kind.
    #[error("Maximum {maximum} {kind} keys supported, but {actual} were supplied")]
    TooManyKeyValues {
        /// `partition` or `sort`.
        kind: &'static str,
        /// The supported maximum.
        maximum: usize,
        /// Supplied values.
        actual: usize,
    },
    /// The index is not described by the key schema.
    #[error(
        "attempt to execute an operation that requires an index without defining the index \
         attributes in the table metadata. Index name: {index_name}"
    )]
    UnknownIndex {
        /// The requested index.
        index_name: String,
    },
    /// A value could not be converted to or from a DynamoDB attribute value.
    #[error(transparent)]
    Serialization(#[from] serde_dynamo::Error),
    /// The DynamoDB service call failed.
    #[error(transparent)]
    Service(#[from] aws_sdk_dynamodb::Error),
}

impl Error {
    /// Whether the error is a caller-correctable argument error.
    ///
    /// ```rust
    /// use dynamodb_enhanced::Error;
    ///
    /// assert!(Error::MissingSortValue.is_invalid_argument());
    /// ```
    pub fn is_invalid_argument(&self) -> bool {
        !matches!(self, Self::Serialization(_) | Self::Service(_))
    }
}

impl<E, R> From<error::SdkError<E, R>> for Error
where
    aws_sdk_dynamodb::Error: From<error::SdkError<E, R>>,
{
    fn from(sdk_error: error::SdkError<E, R>) -> Self {
        Self::Service(sdk_error.into())
    }
}

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
