//! PostgreSQL type table.

use super::{base_type, TargetKind};

pub(super) fn kind(native_type: &str) -> TargetKind {
    match base_type(native_type).as_str() {
        "smallint" | "int2" | "integer" | "int" | "int4" | "smallserial" | "serial" => {
            TargetKind::Int
        }
        "bigint" | "int8" | "bigserial" => TargetKind::Int64,
        "real" | "float4" => TargetKind::Float32,
        "double precision" | "float8" | "numeric" | "decimal" => TargetKind::Float64,
        "character varying" | "varchar" | "character" | "char" | "bpchar" | "text" | "uuid"
        | "citext" => TargetKind::String,
        "timestamp"
        | "timestamp without time zone"
        | "timestamp with time zone"
        | "timestamptz"
        | "date"
        | "time"
        | "time without time zone"
        | "time with time zone"
        | "timetz" => TargetKind::Time,
        "boolean" | "bool" => TargetKind::Bool,
        "json" | "jsonb" => TargetKind::Json,
        "bytea" => TargetKind::Bytes,
        _ => TargetKind::Dynamic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_types() {
        assert_eq!(kind("integer"), TargetKind::Int);
        assert_eq!(kind("smallint"), TargetKind::Int);
        assert_eq!(kind("int4"), TargetKind::Int);
        assert_eq!(kind("bigint"), TargetKind::Int64);
        assert_eq!(kind("int8"), TargetKind::Int64);
    }

    #[test]
    fn test_float_types() {
        assert_eq!(kind("real"), TargetKind::Float32);
        assert_eq!(kind("double precision"), TargetKind::Float64);
        assert_eq!(kind("numeric(12,2)"), TargetKind::Float64);
    }

    #[test]
    fn test_string_types() {
        assert_eq!(kind("character varying"), TargetKind::String);
        assert_eq!(kind("character varying(255)"), TargetKind::String);
        assert_eq!(kind("text"), TargetKind::String);
        assert_eq!(kind("uuid"), TargetKind::String);
        assert_eq!(kind("character"), TargetKind::String);
    }

    #[test]
    fn test_temporal_types() {
        assert_eq!(kind("timestamp without time zone"), TargetKind::Time);
        assert_eq!(kind("timestamp with time zone"), TargetKind::Time);
        assert_eq!(kind("date"), TargetKind::Time);
        assert_eq!(kind("time without time zone"), TargetKind::Time);
    }

    #[test]
    fn test_other_types() {
        assert_eq!(kind("boolean"), TargetKind::Bool);
        assert_eq!(kind("jsonb"), TargetKind::Json);
        assert_eq!(kind("bytea"), TargetKind::Bytes);
        assert_eq!(kind("ARRAY"), TargetKind::Dynamic);
        assert_eq!(kind("USER-DEFINED"), TargetKind::Dynamic);
    }
}
