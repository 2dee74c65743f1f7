//! Read operations for retrieving data from DynamoDB tables.
//!
//! Query and Scan read every page and return them deserialized; GetItem returns the item, if
//! any.

/// Common utilities and types for read operations.
pub mod common;

/// Get item operation for retrieving a single item by primary key.
pub mod get_item;

/// Query operation for retrieving items matching a query conditional.
pub mod query;

/// Scan operation for retrieving all items from a table or index.
pub mod scan;
