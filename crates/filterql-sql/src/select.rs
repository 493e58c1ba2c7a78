//! A small SELECT builder wiring the filter compiler into a full query.

use crate::{
    compiler::apply_filter,
    config::FilterConfig,
    dialect::Dialect,
    error::FilterError,
    sink::WhereClause,
    table::TableMeta,
};
use filterql_syntax::Value;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderDir {
    Asc,
    Desc,
}

pub struct SelectQuery<'a> {
    dialect: &'a dyn Dialect,
    table: &'a TableMeta,
    columns: Vec<String>,
    where_clause: WhereClause<'a>,
    order_by: Vec<(String, OrderDir)>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl<'a> SelectQuery<'a> {
    pub fn new(dialect: &'a dyn Dialect, table: &'a TableMeta) -> Self {
        SelectQuery {
            dialect,
            table,
            columns: Vec::new(),
            where_clause: WhereClause::new(dialect),
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Adds a physical column to the select list. With no columns the
    /// query selects `*`.
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.columns.push(column.into());
        self
    }

    /// Compiles `input` against `config` and this query's table metadata,
    /// appending the resulting predicates to the WHERE clause.
    pub fn filter(mut self, input: &str, config: &FilterConfig) -> Result<Self, FilterError> {
        apply_filter(input, config, self.table, &mut self.where_clause)?;
        Ok(self)
    }

    pub fn order_by(mut self, column: impl Into<String>, direction: OrderDir) -> Self {
        self.order_by.push((column.into(), direction));
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Renders the query, returning the SQL string and bound parameters.
    pub fn build(self) -> (String, Vec<Value>) {
        let alias = self.dialect.quote_identifier(&self.table.alias);

        // 1. SELECT clause
        let mut sql = String::from("SELECT ");
        if self.columns.is_empty() {
            sql.push('*');
        } else {
            for (i, column) in self.columns.iter().enumerate() {
                if i > 0 {
                    sql.push_str(", ");
                }
                sql.push_str(&alias);
                sql.push('.');
                sql.push_str(&self.dialect.quote_identifier(column));
            }
        }

        // 2. FROM
        sql.push_str(" FROM ");
        sql.push_str(&self.dialect.quote_identifier(&self.table.table));
        sql.push_str(" AS ");
        sql.push_str(&alias);

        // 3. WHERE
        let (where_sql, params) = self.where_clause.finish();
        if !where_sql.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
        }

        // 4. ORDER BY
        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            for (i, (column, direction)) in self.order_by.iter().enumerate() {
                if i > 0 {
                    sql.push_str(", ");
                }
                sql.push_str(&alias);
                sql.push('.');
                sql.push_str(&self.dialect.quote_identifier(column));
                sql.push_str(match direction {
                    OrderDir::Asc => " ASC",
                    OrderDir::Desc => " DESC",
                });
            }
        }

        // 5. LIMIT / OFFSET
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }
        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {}", offset));
        }

        (sql, params)
    }
}
