//! MySQL / MariaDB type table.

use super::{base_type, TargetKind};

pub(super) fn kind(native_type: &str) -> TargetKind {
    let lower = native_type.trim().to_lowercase();
    if lower.starts_with("tinyint(1)") || lower == "bit(1)" {
        return TargetKind::Bool;
    }

    let base = base_type(&lower);
    // int unsigned, bigint zerofill, double precision
    let keyword = base.split_whitespace().next().unwrap_or("");

    match keyword {
        "tinyint" | "smallint" | "mediumint" | "int" | "integer" | "year" => TargetKind::Int,
        "bigint" => TargetKind::Int64,
        "float" => TargetKind::Float32,
        "double" | "real" | "decimal" | "numeric" => TargetKind::Float64,
        "char" | "varchar" | "tinytext" | "text" | "mediumtext" | "longtext" | "enum" | "set" => {
            TargetKind::String
        }
        "date" | "datetime" | "timestamp" | "time" => TargetKind::Time,
        "bool" | "boolean" => TargetKind::Bool,
        "json" => TargetKind::Json,
        "tinyblob" | "blob" | "mediumblob" | "longblob" | "binary" | "varbinary" => {
            TargetKind::Bytes
        }
        _ => TargetKind::Dynamic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_types() {
        assert_eq!(kind("int"), TargetKind::Int);
        assert_eq!(kind("int(11)"), TargetKind::Int);
        assert_eq!(kind("int(10) unsigned"), TargetKind::Int);
        assert_eq!(kind("smallint"), TargetKind::Int);
        assert_eq!(kind("mediumint"), TargetKind::Int);
        assert_eq!(kind("tinyint(4)"), TargetKind::Int);
        assert_eq!(kind("bigint(20)"), TargetKind::Int64);
        assert_eq!(kind("BIGINT UNSIGNED"), TargetKind::Int64);
    }

    #[test]
    fn test_boolean_types() {
        assert_eq!(kind("tinyint(1)"), TargetKind::Bool);
        assert_eq!(kind("tinyint(1) unsigned"), TargetKind::Bool);
        assert_eq!(kind("boolean"), TargetKind::Bool);
        assert_eq!(kind("bit(1)"), TargetKind::Bool);
    }

    #[test]
    fn test_float_types() {
        assert_eq!(kind("float"), TargetKind::Float32);
        assert_eq!(kind("double"), TargetKind::Float64);
        assert_eq!(kind("decimal(10,2)"), TargetKind::Float64);
        assert_eq!(kind("numeric"), TargetKind::Float64);
    }

    #[test]
    fn test_string_types() {
        assert_eq!(kind("varchar(255)"), TargetKind::String);
        assert_eq!(kind("char(36)"), TargetKind::String);
        assert_eq!(kind("longtext"), TargetKind::String);
        assert_eq!(kind("enum('a','b')"), TargetKind::String);
    }

    #[test]
    fn test_temporal_types() {
        assert_eq!(kind("datetime"), TargetKind::Time);
        assert_eq!(kind("datetime(6)"), TargetKind::Time);
        assert_eq!(kind("timestamp"), TargetKind::Time);
        assert_eq!(kind("date"), TargetKind::Time);
        assert_eq!(kind("time"), TargetKind::Time);
    }

    #[test]
    fn test_binary_and_json() {
        assert_eq!(kind("json"), TargetKind::Json);
        assert_eq!(kind("longblob"), TargetKind::Bytes);
        assert_eq!(kind("varbinary(16)"), TargetKind::Bytes);
    }

    #[test]
    fn test_unknown_falls_back_to_dynamic() {
        assert_eq!(kind("geometry"), TargetKind::Dynamic);
        assert_eq!(kind("bit(8)"), TargetKind::Dynamic);
        assert_eq!(kind(""), TargetKind::Dynamic);
    }
}
