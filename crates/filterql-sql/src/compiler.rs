//! Compiles a parsed filter into parameterized predicate fragments.

use crate::{
    config::{FilterConfig, HookAction},
    dialect::Dialect,
    error::FilterError,
    sink::QuerySink,
    table::{ColumnKind, TableMeta},
};
use filterql_syntax::{Condition, Operator, Value};
use tracing::debug;

/// Parses `input` and appends one AND-combined predicate fragment per
/// condition to `sink`, in source order.
///
/// The sink is mutated incrementally; if compilation fails mid-way the
/// fragments already emitted remain, so callers must discard the whole
/// query object on error.
pub fn apply_filter(
    input: &str,
    config: &FilterConfig,
    table: &TableMeta,
    sink: &mut dyn QuerySink,
) -> Result<(), FilterError> {
    let filter = filterql_syntax::parse(input)?;
    debug!(
        conditions = filter.conditions.len(),
        table = %table.table,
        dialect = sink.dialect().name(),
        "applying filter expression"
    );

    for mut condition in filter.conditions {
        if let Some(hook) = config.get(&condition.field) {
            let field = condition.field.clone();
            let action = hook
                .apply(&mut condition)
                .map_err(|source| FilterError::Hook {
                    field: field.clone(),
                    source,
                })?;
            if action == HookAction::Skip {
                debug!(field = %field, "hook skipped condition");
                continue;
            }
        }

        emit(condition, table, sink)?;
    }

    Ok(())
}

fn emit(
    condition: Condition,
    table: &TableMeta,
    sink: &mut dyn QuerySink,
) -> Result<(), FilterError> {
    let (column, key_param) = resolve(&condition.field, table, sink.dialect())?;

    // The map key, if any, binds to the first marker in the fragment.
    let mut params: Vec<Value> = key_param.into_iter().collect();

    let not_prefix = if condition.not { "NOT " } else { "" };
    let not_infix = if condition.not { " NOT" } else { "" };

    let fragment = match condition.op {
        Operator::Equal
        | Operator::NotEqual
        | Operator::Less
        | Operator::Greater
        | Operator::LessOrEqual
        | Operator::GreaterOrEqual => {
            check_arity(&condition, 1)?;
            let symbol = comparison_symbol(condition.op);
            params.extend(condition.values);
            format!("{}{} {} ?", not_prefix, column, symbol)
        }

        Operator::In => {
            if condition.values.is_empty() {
                return Err(FilterError::EmptyIn {
                    field: condition.field,
                });
            }
            let markers = vec!["?"; condition.values.len()].join(", ");
            params.extend(condition.values);
            format!("{}{} IN ({})", column, not_infix, markers)
        }

        Operator::Range => {
            // Bounds bind in source order; an out-of-order range yields an
            // empty result set rather than an error.
            check_arity(&condition, 2)?;
            params.extend(condition.values);
            format!("{}{} BETWEEN ? AND ?", column, not_infix)
        }

        Operator::Contains => {
            check_arity(&condition, 1)?;
            let needle = condition.values[0]
                .as_str()
                .ok_or_else(|| FilterError::ContainsType {
                    field: condition.field.clone(),
                })?;
            params.push(Value::String(format!("%{}%", escape_like(needle))));
            format!("{}{} LIKE ?", column, not_infix)
        }
    };

    sink.push_predicate(fragment, params);
    Ok(())
}

/// Resolves a (possibly dotted) field path to a qualified column reference,
/// plus the leading key parameter for map access.
fn resolve(
    field: &str,
    table: &TableMeta,
    dialect: &dyn Dialect,
) -> Result<(String, Option<Value>), FilterError> {
    let segments: Vec<&str> = field.split('.').collect();
    match segments.as_slice() {
        [name] => {
            let meta = lookup(name, table)?;
            Ok((qualified(&meta.column, table, dialect), None))
        }
        [name, key] => {
            let meta = lookup(name, table)?;
            if meta.kind != ColumnKind::StringMap {
                return Err(FilterError::NotAMap {
                    field: (*name).to_string(),
                });
            }
            let column = qualified(&meta.column, table, dialect);
            Ok((
                dialect.map_value_ref(&column, "?"),
                Some(Value::String((*key).to_string())),
            ))
        }
        _ => Err(FilterError::NestedPath {
            field: field.to_string(),
        }),
    }
}

fn lookup<'t>(name: &str, table: &'t TableMeta) -> Result<&'t crate::table::ColumnMeta, FilterError> {
    table.get(name).ok_or_else(|| FilterError::UnknownField {
        field: name.to_string(),
        table: table.table.clone(),
    })
}

fn qualified(column: &str, table: &TableMeta, dialect: &dyn Dialect) -> String {
    format!(
        "{}.{}",
        dialect.quote_identifier(&table.alias),
        dialect.quote_identifier(column)
    )
}

fn check_arity(condition: &Condition, expected: usize) -> Result<(), FilterError> {
    if condition.values.len() != expected {
        return Err(FilterError::Arity {
            field: condition.field.clone(),
            op: condition.op,
            expected,
            got: condition.values.len(),
        });
    }
    Ok(())
}

fn comparison_symbol(op: Operator) -> &'static str {
    match op {
        Operator::Equal => "=",
        Operator::NotEqual => "<>",
        Operator::Less => "<",
        Operator::Greater => ">",
        Operator::LessOrEqual => "<=",
        Operator::GreaterOrEqual => ">=",
        Operator::Contains | Operator::In | Operator::Range => {
            unreachable!("not a comparison operator")
        }
    }
}

/// Escapes LIKE metacharacters in one deterministic pass: `\` becomes `\\`,
/// `%` becomes `\%`, a literal `.` becomes `\.`. Applied to the raw
/// captured string before wildcard wrapping.
pub fn escape_like(expr: &str) -> String {
    let mut out = String::with_capacity(expr.len());
    for c in expr.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '%' => out.push_str("\\%"),
            '.' => out.push_str("\\."),
            _ => out.push(c),
        }
    }
    out
}
