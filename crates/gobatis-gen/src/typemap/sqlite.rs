//! SQLite affinity-style type rules.
//!
//! SQLite accepts any declared type, so matching is by substring in a fixed
//! order rather than by exact keyword.

use super::TargetKind;

pub(super) fn kind(native_type: &str) -> TargetKind {
    let t = native_type.to_lowercase();

    if t.contains("int") {
        if t.contains("big") {
            TargetKind::Int64
        } else {
            TargetKind::Int
        }
    } else if t.contains("real") || t.contains("floa") || t.contains("doub") {
        TargetKind::Float64
    } else if t.contains("decimal") || t.contains("numeric") {
        TargetKind::Float64
    } else if t.contains("char") || t.contains("clob") || t.contains("text") {
        TargetKind::String
    } else if t.contains("blob") {
        TargetKind::Bytes
    } else if t.contains("bool") {
        TargetKind::Bool
    } else if t.contains("date") || t.contains("time") {
        TargetKind::Time
    } else {
        TargetKind::Dynamic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_affinity() {
        assert_eq!(kind("INTEGER"), TargetKind::Int);
        assert_eq!(kind("int"), TargetKind::Int);
        assert_eq!(kind("BIGINT"), TargetKind::Int64);
        assert_eq!(kind("UNSIGNED BIG INT"), TargetKind::Int64);
    }

    #[test]
    fn test_real_and_numeric() {
        assert_eq!(kind("REAL"), TargetKind::Float64);
        assert_eq!(kind("DOUBLE"), TargetKind::Float64);
        assert_eq!(kind("FLOAT"), TargetKind::Float64);
        assert_eq!(kind("NUMERIC(10,2)"), TargetKind::Float64);
    }

    #[test]
    fn test_text_blob_bool_time() {
        assert_eq!(kind("VARCHAR(100)"), TargetKind::String);
        assert_eq!(kind("TEXT"), TargetKind::String);
        assert_eq!(kind("BLOB"), TargetKind::Bytes);
        assert_eq!(kind("BOOLEAN"), TargetKind::Bool);
        assert_eq!(kind("DATETIME"), TargetKind::Time);
        assert_eq!(kind("DATE"), TargetKind::Time);
    }

    #[test]
    fn test_order_matters() {
        // "point" contains "int"
        assert_eq!(kind("POINT"), TargetKind::Int);
        // "character" is text even though it has no "text"
        assert_eq!(kind("CHARACTER(20)"), TargetKind::String);
    }

    #[test]
    fn test_untyped_column_is_dynamic() {
        assert_eq!(kind(""), TargetKind::Dynamic);
        assert_eq!(kind("ANY"), TargetKind::Dynamic);
    }
}
