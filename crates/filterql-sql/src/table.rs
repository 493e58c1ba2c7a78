//! Field metadata supplied by the persistence layer: the mapping from
//! logical (external) field names to physical columns, plus the table
//! alias used to qualify emitted column references.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Scalar,
    /// A string-keyed, string-valued map column, addressable through a
    /// dotted path `field.key`.
    StringMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMeta {
    pub column: String,
    pub kind: ColumnKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableMeta {
    pub table: String,
    pub alias: String,
    columns: HashMap<String, ColumnMeta>,
}

impl TableMeta {
    pub fn new(table: impl Into<String>, alias: impl Into<String>) -> Self {
        TableMeta {
            table: table.into(),
            alias: alias.into(),
            columns: HashMap::new(),
        }
    }

    /// Registers a scalar column under its logical field name.
    pub fn column(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.columns.insert(
            field.into(),
            ColumnMeta {
                column: column.into(),
                kind: ColumnKind::Scalar,
            },
        );
        self
    }

    /// Registers a string-keyed string-valued map column.
    pub fn map_column(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.columns.insert(
            field.into(),
            ColumnMeta {
                column: column.into(),
                kind: ColumnKind::StringMap,
            },
        );
        self
    }

    pub fn get(&self, field: &str) -> Option<&ColumnMeta> {
        self.columns.get(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_logical_name() {
        let table = TableMeta::new("test_users", "test_user")
            .column("firstName", "first_name")
            .map_column("props", "props");

        let meta = table.get("firstName").unwrap();
        assert_eq!(meta.column, "first_name");
        assert_eq!(meta.kind, ColumnKind::Scalar);

        assert_eq!(table.get("props").unwrap().kind, ColumnKind::StringMap);
        assert!(table.get("first_name").is_none());
    }
}
