//! Tests for the qb module and the query description façade.

use crate::qb::{Expr, ParamList, SqlQb, delete, get_builder, insert, select, update};

#[test]
fn builder_for_any_table_has_no_predicates() {
    for table in ["users", "useraddress", "public.users", "orders"] {
        let qb = get_builder(table);
        assert_eq!(qb.table(), table);
        assert_eq!(qb.to_sql(), format!("SELECT * FROM {table}"));
        assert_eq!(qb.to_string(), format!("SELECT * FROM {table}"));
        assert!(!qb.to_sql().contains("WHERE"));
        assert!(qb.build().unwrap().params.is_empty());
    }
}

#[test]
fn one_equality_predicate_constrains_the_column() {
    let qb = get_builder("users").eq("id", 2);

    assert_eq!(qb.to_sql(), "SELECT * FROM users WHERE id = $1");
    assert_eq!(qb.to_string(), "SELECT * FROM users WHERE id = 2");

    let built = qb.build().unwrap();
    assert_eq!(built.params.len(), 1);
    assert_eq!(built.params[0].literal(), "2");
}

#[test]
fn string_predicates_are_quoted_when_inlined() {
    let qb = get_builder("users").eq("email", "it's@me.com");
    assert_eq!(
        qb.to_string(),
        "SELECT * FROM users WHERE email = 'it''s@me.com'"
    );
}

#[test]
fn narrowing_leaves_earlier_descriptions_untouched() {
    let list = get_builder("users");
    let user2 = list.clone().eq("id", 2);

    assert_eq!(list.to_sql(), "SELECT * FROM users");
    assert_eq!(user2.to_sql(), "SELECT * FROM users WHERE id = $1");
}

#[test]
fn rendering_is_repeatable() {
    let qb = get_builder("users").eq("id", 2).limit(1);
    let first = qb.build().unwrap();
    let second = qb.build().unwrap();
    assert_eq!(first.sql, second.sql);
    assert_eq!(first.params.len(), second.params.len());
}

#[test]
fn nested_expressions_number_placeholders_in_order() {
    let expr = Expr::and(vec![
        Expr::eq("name", "John Doe"),
        Expr::or(vec![
            Expr::eq("id", 1i32),
            Expr::and(vec![Expr::gt("id", 5i32), Expr::is_not_null("email")]),
        ]),
    ]);

    let mut params = ParamList::new();
    let sql = expr.build(&mut params);

    assert_eq!(
        sql,
        "name = $1 AND (id = $2 OR (id > $3 AND email IS NOT NULL))"
    );
    assert_eq!(params.len(), 3);
}

#[test]
fn not_and_empty_in_lists() {
    let qb = select("users")
        .and_expr(Expr::not(Expr::like("email", "%@doe.com")))
        .in_list::<i32>("id", vec![]);
    assert_eq!(
        qb.to_sql(),
        "SELECT * FROM users WHERE NOT (email LIKE $1) AND 1=0"
    );

    let qb = select("users").and_expr(Expr::not_in::<i32>("id", vec![]));
    assert_eq!(qb.to_sql(), "SELECT * FROM users WHERE 1=1");
}

#[test]
fn joined_select_with_limit() {
    let qb = select("users")
        .select("id")
        .inner_join("useraddress", "users.id", "useraddress.user_id")
        .eq("useraddress.address", "123 Main St")
        .order_by("users.id")
        .limit(1);

    assert_eq!(
        qb.to_sql(),
        "SELECT id FROM users INNER JOIN useraddress ON users.id = useraddress.user_id \
         WHERE useraddress.address = $1 ORDER BY users.id LIMIT 1"
    );
}

#[test]
fn statement_builders_render() {
    assert_eq!(
        insert("users").set("name", "Bam bam").to_sql(),
        "INSERT INTO users (name) VALUES ($1)"
    );
    assert_eq!(
        update("users").set("name", "John Doe").eq("id", 1).to_sql(),
        "UPDATE users SET name = $1 WHERE id = $2"
    );
    assert_eq!(
        delete("users").eq("id", 1).to_sql(),
        "DELETE FROM users WHERE id = $1"
    );
}

#[test]
fn raw_fragments_keep_their_precedence() {
    let qb = select("users").eq("id", 1).raw("a = 1 OR b = 2");
    assert_eq!(
        qb.to_sql(),
        "SELECT * FROM users WHERE id = $1 AND (a = 1 OR b = 2)"
    );

    let alone = select("users").raw("a = 1 OR b = 2");
    assert_eq!(alone.to_sql(), "SELECT * FROM users WHERE a = 1 OR b = 2");
}
