use sqlite_validator_macros::{sql_query, sql_query_unsafe};

#[test]
fn test_plain_query_is_unchanged() {
    assert_eq!(
        sql_query!("INSERT INTO my_table (my_column) VALUES ('my_value')"),
        "INSERT INTO my_table (my_column) VALUES ('my_value')"
    );
}

#[test]
fn test_table_and_column_interpolation() {
    let table_name = "users";
    let column_name = String::from("email");
    assert_eq!(
        sql_query!("SELECT {column: column_name} FROM {table: table_name}"),
        "SELECT email FROM users"
    );
}

#[test]
fn test_parenthesized_subquery() {
    let subquery = sql_query!("SELECT albumid FROM albums WHERE title = 'Let There Be Rock'");
    assert_eq!(
        sql_query!("SELECT trackid, name, albumid FROM tracks WHERE albumid = ({subquery: subquery})"),
        "SELECT trackid, name, albumid FROM tracks WHERE albumid = \
         (SELECT albumid FROM albums WHERE title = 'Let There Be Rock')"
    );
}

#[test]
fn test_clause_subquery() {
    let filter = "WHERE 1=1";
    assert_eq!(
        sql_query!("SELECT * FROM my_table {subquery: filter}"),
        "SELECT * FROM my_table WHERE 1=1"
    );
}

#[test]
fn test_escaped_braces() {
    assert_eq!(
        sql_query!("SELECT '{{}}' FROM my_table"),
        "SELECT '{}' FROM my_table"
    );
}

#[test]
#[allow(deprecated)]
fn test_checked_drop_still_expands() {
    assert_eq!(sql_query!("DROP TABLE my_table"), "DROP TABLE my_table");
}

#[test]
fn test_unsafe_drop() {
    assert_eq!(sql_query_unsafe!("DROP TABLE my_table"), "DROP TABLE my_table");
}
