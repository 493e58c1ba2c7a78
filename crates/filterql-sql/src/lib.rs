//! SQL predicate compilation for filter expressions.
//!
//! Takes a [`Filter`](filterql_syntax::Filter) produced by
//! `filterql-syntax`, resolves each condition against table metadata,
//! runs per-field rewrite hooks, and emits injection-safe parameterized
//! WHERE fragments through a [`QuerySink`].

pub mod compiler;
pub mod config;
pub mod dialect;
pub mod error;
pub mod select;
pub mod sink;
pub mod table;

pub use compiler::{apply_filter, escape_like};
pub use config::{FilterConfig, FilterHook, HookAction, map_values, rename_and_map_values};
pub use dialect::{Dialect, MySql, Postgres};
pub use error::{FilterError, HookError};
pub use select::{OrderDir, SelectQuery};
pub use sink::{QuerySink, WhereClause};
pub use table::{ColumnKind, ColumnMeta, TableMeta};
