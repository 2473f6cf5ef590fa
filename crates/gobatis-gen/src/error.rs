//! Error types for the generator library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for schema introspection and artifact generation.
#[derive(Error, Debug)]
pub enum GenError {
    /// Configuration error (invalid YAML value, missing field, unsupported driver)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Could not reach or authenticate to the database
    #[error("Connection to {driver} failed: {source}")]
    Connection {
        driver: String,
        #[source]
        source: sqlx::Error,
    },

    /// A catalog query failed
    #[error("Catalog query failed while {context}: {source}")]
    Query {
        context: String,
        #[source]
        source: sqlx::Error,
    },

    /// Template expansion or name derivation failed for a table
    #[error("Render failed for table {table}: {message}")]
    Render { table: String, message: String },

    /// Artifact could not be written
    #[error("Write failed for {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Any per-table failure, tagged with the table it happened on
    #[error("Table {table}: {source}")]
    Table {
        table: String,
        #[source]
        source: Box<GenError>,
    },

    /// Filtering left nothing to generate
    #[error("No tables matched the include/exclude/prefix rules")]
    NoMatchingTables,

    /// One or more tables failed while the rest were generated
    #[error("Generation incomplete: {} table(s) failed: {}", failed.len(), failed.join(", "))]
    Incomplete { failed: Vec<String> },

    /// IO error (file operations outside artifact writes)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GenError {
    /// Create a Query error with context about where it occurred
    pub fn query(source: sqlx::Error, context: impl Into<String>) -> Self {
        GenError::Query {
            context: context.into(),
            source,
        }
    }

    /// Create a Render error
    pub fn render(table: impl Into<String>, message: impl Into<String>) -> Self {
        GenError::Render {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Create a Write error
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Write {
            path: path.into(),
            source,
        }
    }

    /// Attach a table name to an error raised while processing that table.
    pub fn for_table(self, table: impl Into<String>) -> Self {
        GenError::Table {
            table: table.into(),
            source: Box::new(self),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            GenError::Config(_) | GenError::Yaml(_) => 1,
            GenError::Connection { .. } => 2,
            GenError::Query { .. } => 3,
            GenError::Render { .. }
            | GenError::Write { .. }
            | GenError::Table { .. }
            | GenError::Incomplete { .. } => 4,
            GenError::NoMatchingTables => 5,
            GenError::Io(_) | GenError::Json(_) => 7,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for generator operations.
pub type Result<T> = std::result::Result<T, GenError>;
