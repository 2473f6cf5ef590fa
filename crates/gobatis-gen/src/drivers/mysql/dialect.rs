//! MySQL/MariaDB SQL dialect.

use crate::core::traits::Dialect;

/// MySQL/MariaDB dialect implementation.
#[derive(Debug, Clone, Default)]
pub struct MysqlDialect;

impl MysqlDialect {
    /// Create a new MySQL dialect instance.
    pub fn new() -> Self {
        Self
    }
}

impl Dialect for MysqlDialect {
    fn name(&self) -> &str {
        "mysql"
    }

    fn param_placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn contains_pattern(&self, placeholder: &str) -> String {
        // || is logical OR unless PIPES_AS_CONCAT is set
        format!("CONCAT('%', {}, '%')", placeholder)
    }

    fn default_values_insert(&self, table: &str) -> String {
        format!("INSERT INTO {} () VALUES ()", table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_placeholder() {
        let dialect = MysqlDialect::new();
        assert_eq!(dialect.param_placeholder(1), "?");
        assert_eq!(dialect.param_placeholder(5), "?");
    }

    #[test]
    fn test_contains_pattern() {
        assert_eq!(
            MysqlDialect::new().contains_pattern("?"),
            "CONCAT('%', ?, '%')"
        );
    }

    #[test]
    fn test_default_values_insert() {
        assert_eq!(
            MysqlDialect::new().default_values_insert("seqs"),
            "INSERT INTO seqs () VALUES ()"
        );
    }
}
