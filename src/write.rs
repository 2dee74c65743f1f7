//! Write operations for modifying data in DynamoDB tables.

/// Common utilities and types for write operations.
pub mod common;

/// Delete item operation for removing items from tables.
pub mod delete_item;

/// Put item operation for creating or replacing items.
pub mod put_item;

/// Update item operation for modifying attributes of an existing item.
pub mod update_item;
