//! End-to-end tests: expression text -> WHERE clause SQL and parameters.

use filterql_sql::{
    FilterConfig, FilterError, HookAction, HookError, MySql, OrderDir, Postgres, SelectQuery,
    TableMeta, WhereClause, apply_filter, rename_and_map_values,
};
use filterql_syntax::{Condition, Value};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn table() -> TableMeta {
    TableMeta::new("test_users", "test_user")
        .column("createTime", "create_time")
        .column("createBy", "create_by")
        .column("firstName", "first_name")
        .column("lastName", "last_name")
        .column("isAdmin", "is_admin")
        .column("loginCount", "login_count")
        .map_column("props", "props")
        .column("datname", "datname")
}

fn compile(expr: &str, config: &FilterConfig) -> Result<(String, Vec<Value>), FilterError> {
    init_tracing();
    let table = table();
    let mut clause = WhereClause::new(&Postgres);
    apply_filter(expr, config, &table, &mut clause)?;
    Ok(clause.finish())
}

fn s(v: &str) -> Value {
    Value::String(v.to_string())
}

#[test]
fn test_operator_coverage() {
    let config = FilterConfig::new();
    let tests: Vec<(&str, &str, &str, Vec<Value>)> = vec![
        (
            "eq and eq",
            r#"firstName = "Attila" lastName = "Molnar""#,
            r#"("test_user"."first_name" = $1) AND ("test_user"."last_name" = $2)"#,
            vec![s("Attila"), s("Molnar")],
        ),
        (
            "not eq and eq",
            r#"not firstName = "Attila" lastName = "Molnar""#,
            r#"(NOT "test_user"."first_name" = $1) AND ("test_user"."last_name" = $2)"#,
            vec![s("Attila"), s("Molnar")],
        ),
        (
            "ne",
            r#"firstName != "fn""#,
            r#"("test_user"."first_name" <> $1)"#,
            vec![s("fn")],
        ),
        (
            "greater than and less than",
            "loginCount > 0 loginCount < 5",
            r#"("test_user"."login_count" > $1) AND ("test_user"."login_count" < $2)"#,
            vec![Value::Int(0), Value::Int(5)],
        ),
        (
            "gte and lte",
            "loginCount >= 0 loginCount <= 5",
            r#"("test_user"."login_count" >= $1) AND ("test_user"."login_count" <= $2)"#,
            vec![Value::Int(0), Value::Int(5)],
        ),
        (
            "string in",
            r#"firstName in ("A", "B", "C")"#,
            r#"("test_user"."first_name" IN ($1, $2, $3))"#,
            vec![s("A"), s("B"), s("C")],
        ),
        (
            "not string in",
            r#"not firstName in ("foo", "Bar", "BAZ")"#,
            r#"("test_user"."first_name" NOT IN ($1, $2, $3))"#,
            vec![s("foo"), s("Bar"), s("BAZ")],
        ),
        (
            "int in with spaces",
            "loginCount in ( 1 , 2 ,  3 )",
            r#"("test_user"."login_count" IN ($1, $2, $3))"#,
            vec![Value::Int(1), Value::Int(2), Value::Int(3)],
        ),
        (
            "int range",
            "loginCount: [1, 100]",
            r#"("test_user"."login_count" BETWEEN $1 AND $2)"#,
            vec![Value::Int(1), Value::Int(100)],
        ),
        (
            "not int range",
            "not loginCount: [1, 100]",
            r#"("test_user"."login_count" NOT BETWEEN $1 AND $2)"#,
            vec![Value::Int(1), Value::Int(100)],
        ),
        (
            "date range",
            r#"createTime: ["2020-10-01T12:34:56Z", "2022-11-02T21:43:46Z"]"#,
            r#"("test_user"."create_time" BETWEEN $1 AND $2)"#,
            vec![s("2020-10-01T12:34:56Z"), s("2022-11-02T21:43:46Z")],
        ),
        (
            "string contains",
            r#"firstName: "A%.\\""#,
            r#"("test_user"."first_name" LIKE $1)"#,
            vec![s(r"%A\%\.\\%")],
        ),
        (
            "not string contains",
            r#"not firstName: "B""#,
            r#"("test_user"."first_name" NOT LIKE $1)"#,
            vec![s("%B%")],
        ),
        (
            "bool eq",
            "isAdmin = true",
            r#"("test_user"."is_admin" = $1)"#,
            vec![Value::Boolean(true)],
        ),
        (
            "bool ne",
            "isAdmin != false",
            r#"("test_user"."is_admin" <> $1)"#,
            vec![Value::Boolean(false)],
        ),
        (
            "nested field eq",
            r#"props.prop_one = "42""#,
            r#"("test_user"."props"->>$1 = $2)"#,
            vec![s("prop_one"), s("42")],
        ),
        (
            "not nested field eq",
            r#"not props.prop_one = "42""#,
            r#"(NOT "test_user"."props"->>$1 = $2)"#,
            vec![s("prop_one"), s("42")],
        ),
        (
            "nested field in",
            r#"props.prop_one IN ("1", "2")"#,
            r#"("test_user"."props"->>$1 IN ($2, $3))"#,
            vec![s("prop_one"), s("1"), s("2")],
        ),
        (
            "combined",
            r#"not createBy in ("users/1","users/2") props.p in ("3","2","1") firstName: "l" createTime: ["2020-10-01T00:00:00Z", "2025-10-01T00:00:00Z"]"#,
            concat!(
                r#"("test_user"."create_by" NOT IN ($1, $2))"#,
                r#" AND ("test_user"."props"->>$3 IN ($4, $5, $6))"#,
                r#" AND ("test_user"."first_name" LIKE $7)"#,
                r#" AND ("test_user"."create_time" BETWEEN $8 AND $9)"#,
            ),
            vec![
                s("users/1"),
                s("users/2"),
                s("p"),
                s("3"),
                s("2"),
                s("1"),
                s("%l%"),
                s("2020-10-01T00:00:00Z"),
                s("2025-10-01T00:00:00Z"),
            ],
        ),
    ];

    for (name, expr, want_sql, want_params) in tests {
        let (sql, params) = compile(expr, &config).unwrap_or_else(|e| panic!("{}: {}", name, e));
        assert_eq!(sql, want_sql, "{}", name);
        assert_eq!(params, want_params, "{}", name);
    }
}

#[test]
fn test_empty_expression_emits_nothing() {
    let (sql, params) = compile("", &FilterConfig::new()).unwrap();
    assert_eq!(sql, "");
    assert!(params.is_empty());
}

#[test]
fn test_compilation_is_deterministic() {
    let expr = r#"not createBy in ("a","b") props.p = "1" firstName: "l""#;
    let config = FilterConfig::new();
    assert_eq!(compile(expr, &config).unwrap(), compile(expr, &config).unwrap());
}

#[test]
fn test_negation_only_changes_the_marker() {
    let config = FilterConfig::new();
    for (positive, negated) in [
        (r#"firstName = "A""#, r#"not firstName = "A""#),
        ("loginCount: [1, 2]", "not loginCount: [1, 2]"),
        (r#"firstName in ("A")"#, r#"not firstName in ("A")"#),
        (r#"firstName: "A""#, r#"not firstName: "A""#),
    ] {
        let (_, positive_params) = compile(positive, &config).unwrap();
        let (_, negated_params) = compile(negated, &config).unwrap();
        assert_eq!(positive_params, negated_params, "{}", negated);
    }
}

#[test]
fn test_twenty_element_in_list() {
    let values = (1..=20)
        .map(|i| format!("\"{}\"", i))
        .collect::<Vec<_>>()
        .join(",");
    let (sql, params) =
        compile(&format!("props.inTest in ({})", values), &FilterConfig::new()).unwrap();
    assert_eq!(params.len(), 21); // map key + 20 values
    assert!(sql.ends_with("IN ($2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21))"));
}

#[test]
fn test_unknown_field() {
    let err = compile(r#"unknown = "foo""#, &FilterConfig::new()).unwrap_err();
    assert!(matches!(err, FilterError::UnknownField { ref field, .. } if field == "unknown"));
}

#[test]
fn test_known_then_unknown_field() {
    let err = compile(r#"firstName = "fn" unknown = "foo""#, &FilterConfig::new()).unwrap_err();
    assert!(matches!(err, FilterError::UnknownField { .. }));
}

#[test]
fn test_dotted_access_on_scalar_column() {
    let err = compile(r#"lastName.foo = "bar""#, &FilterConfig::new()).unwrap_err();
    assert!(matches!(err, FilterError::NotAMap { ref field } if field == "lastName"));
}

#[test]
fn test_deep_paths_rejected() {
    let err = compile(r#"props.a.b = "c""#, &FilterConfig::new()).unwrap_err();
    assert!(matches!(err, FilterError::NestedPath { .. }));
}

#[test]
fn test_field_without_operator_fails_at_parse() {
    assert!(matches!(
        compile("lastName", &FilterConfig::new()),
        Err(FilterError::Syntax(_))
    ));
}

#[test]
fn test_hook_rename_resolves_against_new_name() {
    // The expression speaks of databaseName, the table only knows datname.
    let config = FilterConfig::new().hook(
        "databaseName",
        rename_and_map_values("datname", |v| Ok(v.clone())),
    );
    let (sql, params) = compile(r#"databaseName = "postgres""#, &config).unwrap();
    assert_eq!(sql, r#"("test_user"."datname" = $1)"#);
    assert_eq!(params, vec![s("postgres")]);
}

#[test]
fn test_hook_skip_drops_only_its_condition() {
    let config = FilterConfig::new().hook("createBy", |_: &mut Condition| {
        Ok::<_, HookError>(HookAction::Skip)
    });
    let (sql, params) = compile(r#"createBy = "me" lastName = "Molnar""#, &config).unwrap();
    assert_eq!(sql, r#"("test_user"."last_name" = $1)"#);
    assert_eq!(params, vec![s("Molnar")]);
}

#[test]
fn test_hook_error_aborts_with_field_name() {
    let config = FilterConfig::new().hook("createBy", |_: &mut Condition| {
        Err::<HookAction, _>(HookError::new("rejected"))
    });
    let err = compile(r#"createBy = "me""#, &config).unwrap_err();
    match err {
        FilterError::Hook { field, source } => {
            assert_eq!(field, "createBy");
            assert_eq!(source.to_string(), "rejected");
        }
        other => panic!("expected hook error, got {}", other),
    }
}

#[test]
fn test_contains_requires_string() {
    let err = compile("firstName: 5", &FilterConfig::new()).unwrap_err();
    assert!(matches!(err, FilterError::ContainsType { .. }));
}

#[test]
fn test_mysql_dialect() {
    let table = table();
    let mut clause = WhereClause::new(&MySql);
    apply_filter(
        r#"props.prop_one = "42" loginCount > 1"#,
        &FilterConfig::new(),
        &table,
        &mut clause,
    )
    .unwrap();
    let (sql, params) = clause.finish();
    assert_eq!(
        sql,
        "(JSON_UNQUOTE(JSON_EXTRACT(`test_user`.`props`, CONCAT('$.', ?))) = ?) \
         AND (`test_user`.`login_count` > ?)"
    );
    assert_eq!(params, vec![s("prop_one"), s("42"), Value::Int(1)]);
}

#[test]
fn test_select_query() {
    let table = table();
    let (sql, params) = SelectQuery::new(&Postgres, &table)
        .column("first_name")
        .column("last_name")
        .filter("loginCount > 0", &FilterConfig::new())
        .unwrap()
        .order_by("first_name", OrderDir::Asc)
        .limit(100)
        .offset(20)
        .build();

    assert_eq!(
        sql,
        r#"SELECT "test_user"."first_name", "test_user"."last_name" FROM "test_users" AS "test_user" WHERE ("test_user"."login_count" > $1) ORDER BY "test_user"."first_name" ASC LIMIT 100 OFFSET 20"#
    );
    assert_eq!(params, vec![Value::Int(0)]);
}

#[test]
fn test_select_query_without_filter() {
    let table = table();
    let (sql, params) = SelectQuery::new(&Postgres, &table).build();
    assert_eq!(sql, r#"SELECT * FROM "test_users" AS "test_user""#);
    assert!(params.is_empty());
}
