//! Canonical table and column metadata.
//!
//! Every schema provider normalizes its catalog into these types; the
//! generators consume nothing else.

use serde::{Deserialize, Serialize};

use crate::drivers::Driver;
use crate::typemap::{map_native_type, MappedType};

/// Table metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Table name as stored in the catalog.
    pub name: String,

    /// Table comment, empty when the catalog has none.
    pub comment: String,

    /// Columns in catalog ordinal order.
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: String::new(),
            columns: Vec::new(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Every column flagged as part of the primary key, in ordinal order.
    pub fn primary_key_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.is_primary_key).collect()
    }

    /// The designated single-column key: the first primary-key column.
    pub fn primary_key(&self) -> Option<&Column> {
        self.columns.iter().find(|c| c.is_primary_key)
    }

    /// Check if the table has more than one primary-key column.
    pub fn has_composite_key(&self) -> bool {
        self.columns.iter().filter(|c| c.is_primary_key).count() > 1
    }
}

/// Column metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,

    /// Declared type as reported by the catalog (e.g. `varchar(255)`).
    pub native_type: String,

    /// Go type derived from `native_type` and `nullable`.
    pub mapped_type: MappedType,

    /// Whether the column accepts NULL.
    pub nullable: bool,

    /// Whether the column is part of the primary key.
    pub is_primary_key: bool,

    /// Whether the database assigns the value on insert.
    pub is_auto_increment: bool,

    /// Default value expression, if any.
    pub default_value: Option<String>,

    /// Column comment, empty when none.
    pub comment: String,
}

impl Column {
    /// Create a column, deriving its Go type with the dialect's type table.
    pub fn new(
        driver: Driver,
        name: impl Into<String>,
        native_type: impl Into<String>,
        nullable: bool,
    ) -> Self {
        let native_type = native_type.into();
        let mapped_type = map_native_type(driver, &native_type, nullable);
        Self {
            name: name.into(),
            native_type,
            mapped_type,
            nullable,
            is_primary_key: false,
            is_auto_increment: false,
            default_value: None,
            comment: String::new(),
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.is_auto_increment = true;
        self
    }

    pub fn with_default(mut self, default_value: Option<String>) -> Self {
        self.default_value = default_value;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}
