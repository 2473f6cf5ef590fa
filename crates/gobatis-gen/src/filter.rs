//! Table selection rules.
//!
//! Rules are checked in order per table: include list (exact), exclude list
//! (exact, or substring for entries containing `*`), then required prefix.
//! Filtering is stable and never reorders tables.

use crate::config::TablesConfig;
use crate::core::schema::Table;
use tracing::debug;

/// Why a table was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotIncluded,
    Excluded,
    MissingPrefix,
}

/// Borrowed view of the include/exclude/prefix rules.
#[derive(Debug, Clone, Copy)]
pub struct TableFilter<'a> {
    include: &'a [String],
    exclude: &'a [String],
    prefix: &'a str,
}

impl<'a> TableFilter<'a> {
    pub fn new(include: &'a [String], exclude: &'a [String], prefix: &'a str) -> Self {
        Self {
            include,
            exclude,
            prefix,
        }
    }

    pub fn from_config(config: &'a TablesConfig) -> Self {
        Self::new(&config.include, &config.exclude, &config.prefix)
    }

    /// Check a table name against the rules, returning the first rule it fails.
    pub fn check(&self, name: &str) -> Result<(), Rejection> {
        if !self.include.is_empty() && !self.include.iter().any(|t| t == name) {
            return Err(Rejection::NotIncluded);
        }
        if self.exclude.iter().any(|pattern| exclude_matches(pattern, name)) {
            return Err(Rejection::Excluded);
        }
        if !self.prefix.is_empty() && !name.starts_with(self.prefix) {
            return Err(Rejection::MissingPrefix);
        }
        Ok(())
    }

    pub fn matches(&self, name: &str) -> bool {
        self.check(name).is_ok()
    }

    /// Keep the tables that pass every rule, in their original order.
    pub fn apply(&self, tables: Vec<Table>) -> Vec<Table> {
        tables
            .into_iter()
            .filter(|t| match self.check(&t.name) {
                Ok(()) => true,
                Err(reason) => {
                    debug!("Skipping table {}: {:?}", t.name, reason);
                    false
                }
            })
            .collect()
    }
}

/// `temp_*` matches any name containing `temp_`; other entries match exactly.
fn exclude_matches(pattern: &str, name: &str) -> bool {
    if pattern.contains('*') {
        name.contains(&pattern.replace('*', ""))
    } else {
        pattern == name
    }
}

/// Apply the configured rules to a table list.
pub fn filter_tables(tables: Vec<Table>, rules: &TablesConfig) -> Vec<Table> {
    TableFilter::from_config(rules).apply(tables)
}
