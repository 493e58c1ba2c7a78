//! Defines the `Dialect` trait for database-specific SQL syntax.

pub trait Dialect: Send + Sync {
    /// Wraps an identifier (like a table or column name) in the correct
    /// quotation marks for the dialect.
    ///
    /// - PostgreSQL uses double quotes: `"my_column"`
    /// - MySQL uses backticks: `` `my_column` ``
    fn quote_identifier(&self, ident: &str) -> String;

    /// Returns the placeholder for a parameterized query.
    ///
    /// - PostgreSQL uses `$1`, `$2`, etc.
    /// - MySQL uses `?`
    fn placeholder(&self, index: usize) -> String;

    /// Produces a scalar reference into a string-keyed map column, with the
    /// key supplied through `placeholder` rather than concatenated into the
    /// SQL text.
    fn map_value_ref(&self, column: &str, placeholder: &str) -> String;

    /// Returns the name of the dialect (e.g., "PostgreSQL", "MySQL").
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone)]
pub struct Postgres;

impl Dialect for Postgres {
    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#""{}""#, ident)
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index + 1)
    }

    fn map_value_ref(&self, column: &str, placeholder: &str) -> String {
        format!("{}->>{}", column, placeholder)
    }

    fn name(&self) -> &'static str {
        "PostgreSQL"
    }
}

#[derive(Debug, Clone)]
pub struct MySql;

impl Dialect for MySql {
    fn quote_identifier(&self, ident: &str) -> String {
        format!("`{}`", ident)
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn map_value_ref(&self, column: &str, placeholder: &str) -> String {
        format!(
            "JSON_UNQUOTE(JSON_EXTRACT({}, CONCAT('$.', {})))",
            column, placeholder
        )
    }

    fn name(&self) -> &'static str {
        "MySQL"
    }
}
