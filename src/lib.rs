#![deny(missing_docs)]
#![deny(warnings)]

//! # DynamoDB Enhanced
//!
//! Typed keys, query conditionals and projection expressions for Amazon DynamoDB.
//!
//! ## Overview
//!
//! Instead of writing key condition and projection strings by hand, describe the key you are
//! looking for and let the crate bind it to the key attributes of the table or index:
//! - Composite keys with up to four partition and four sort attributes
//! - Equality, relational, between and begins_with key conditions
//! - Projection of nested attributes with collision-free placeholders
//! - Query, Scan, GetItem, PutItem, UpdateItem and DeleteItem requests built from those pieces
//!
//! Every malformed key or conditional is reported as an [`Error`] before anything is sent.
//!
//! ## Quick Example
//!
//! ```rust
//! use dynamodb_enhanced::common::{
//!     conditional::QueryConditional,
//!     key::Key,
//!     key_schema::StaticKeySchema,
//! };
//!
//! let key_schema = StaticKeySchema::builder()
//!     .add_index_partition_key("gsi1", "gsiKey1")
//!     .add_index_partition_key("gsi1", "gsiKey2")
//!     .build();
//! let key = Key::builder()
//!     .add_partition_value("key1")?
//!     .add_partition_value("key2")?
//!     .build()?;
//! let expression = QueryConditional::key_equal_to(key).expression(&key_schema, "gsi1")?;
//! assert_eq!(
//!     expression.expression,
//!     "#AMZN_MAPPED_gsiKey1 = :AMZN_MAPPED_gsiKey1 AND #AMZN_MAPPED_gsiKey2 = :AMZN_MAPPED_gsiKey2"
//! );
//! # Ok::<(), dynamodb_enhanced::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`mod@common`] - Keys, key schemas, conditionals, projections and expressions
//! - [`mod@read`] - Read operations (GetItem, Query, Scan)
//! - [`mod@write`] - Write operations (PutItem, UpdateItem, DeleteItem)

/// Keys, key schemas, query conditionals and projection expressions.
pub mod common;

/// Error type of the crate.
pub mod error;

/// Read operations for retrieving data from DynamoDB tables.
///
/// This module provides operations for:
/// - Getting individual items by key
/// - Querying items with a query conditional
/// - Scanning entire tables or indexes
pub mod read;

/// Write operations for modifying data in DynamoDB tables.
///
/// This module provides operations for:
/// - Putting new items or replacing existing ones
/// - Updating attributes of existing items
/// - Deleting items by key
pub mod write;

pub use error::{Error, Result};
