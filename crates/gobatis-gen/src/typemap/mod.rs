//! Native column type to Go type mapping.
//!
//! Each dialect has a fixed table from base type keyword to one of the
//! [`TargetKind`] scalars. Nullability is applied afterwards by
//! [`MappedType`]: nullable columns become pointers unless the kind is the
//! `interface{}` fallback.

mod mysql;
mod postgres;
mod sqlite;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::drivers::Driver;

/// Closed set of target scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    Int,
    Int64,
    Float32,
    Float64,
    String,
    Bool,
    Time,
    Bytes,
    Json,
    /// Unknown native type, rendered as `interface{}`.
    Dynamic,
}

impl TargetKind {
    /// Go spelling of the kind.
    pub fn go_type(self) -> &'static str {
        match self {
            TargetKind::Int => "int",
            TargetKind::Int64 => "int64",
            TargetKind::Float32 => "float32",
            TargetKind::Float64 => "float64",
            TargetKind::String => "string",
            TargetKind::Bool => "bool",
            TargetKind::Time => "time.Time",
            TargetKind::Bytes => "[]byte",
            TargetKind::Json => "json.RawMessage",
            TargetKind::Dynamic => "interface{}",
        }
    }

    /// True for kinds rendered with a pointer when the column is nullable.
    pub fn wraps_when_nullable(self) -> bool {
        self != TargetKind::Dynamic
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            TargetKind::Int | TargetKind::Int64 | TargetKind::Float32 | TargetKind::Float64
        )
    }

    pub fn is_text(self) -> bool {
        self == TargetKind::String
    }

    /// Go package the kind needs imported, if any.
    pub fn import(self) -> Option<&'static str> {
        match self {
            TargetKind::Time => Some("time"),
            TargetKind::Json => Some("encoding/json"),
            _ => None,
        }
    }
}

/// A column's Go type: scalar kind plus nullability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MappedType {
    pub kind: TargetKind,
    pub nullable: bool,
}

impl MappedType {
    /// True when the rendered type carries a pointer prefix.
    pub fn is_wrapped(&self) -> bool {
        self.nullable && self.kind.wraps_when_nullable()
    }
}

impl fmt::Display for MappedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_wrapped() {
            write!(f, "*{}", self.kind.go_type())
        } else {
            f.write_str(self.kind.go_type())
        }
    }
}

/// Map a native column type for the given dialect.
pub fn map_native_type(driver: Driver, native_type: &str, nullable: bool) -> MappedType {
    let kind = native_kind(driver, native_type);
    MappedType { kind, nullable }
}

/// Resolve only the scalar kind for a native type.
pub fn native_kind(driver: Driver, native_type: &str) -> TargetKind {
    match driver {
        Driver::Mysql => mysql::kind(native_type),
        Driver::Postgres => postgres::kind(native_type),
        Driver::Sqlite => sqlite::kind(native_type),
    }
}

/// Lowercase the type and drop any `(...)` parameterization.
fn base_type(native_type: &str) -> String {
    let lower = native_type.trim().to_lowercase();
    let base = match lower.find('(') {
        Some(idx) => {
            let after = lower[idx..].find(')').map(|end| &lower[idx + end + 1..]);
            format!("{}{}", &lower[..idx], after.unwrap_or(""))
        }
        None => lower,
    };
    base.split_whitespace().collect::<Vec<_>>().join(" ")
}
