//! Compile-time checked SQLite queries.
//!
//! ```ignore
//! use sqlite_validator_macros::{sql_query, sql_query_unsafe};
//!
//! let table_name = "my_table";
//! let query: String = sql_query!("SELECT * FROM {table: table_name}");
//!
//! sql_query!("SEELECT * FROM my_table");
//! // error: Keyword 'seelect' not found
//! sql_query!("SELECT *");
//! // error: Table not specified in query
//! sql_query!("SELECT * FROM my_table WHERE");
//! // error: Query incomplete
//! sql_query!("DROP TABLE my_table");
//! // warning: Dropping the table may be dangerous
//! sql_query_unsafe!("DROP TABLE my_table");
//! ```
//!
//! Interpolations must be labeled `table`, `column` or `subquery`. A
//! subquery placed inside a condition keeps its parentheses in the literal:
//!
//! ```ignore
//! let subquery = sql_query!("SELECT my_column FROM my_other_table");
//! sql_query!("SELECT * FROM my_table WHERE my_column = ({subquery: subquery})");
//! ```
//!
//! Queries are not case-sensitive. `{{` and `}}` produce literal braces.

use proc_macro::TokenStream;
use sqlite_validator::EntryPoint;

mod expand;

/// Validate a query literal at compile time and expand to the query `String`.
///
/// Destructive statements produce a warning; see [`sql_query_unsafe!`].
#[proc_macro]
pub fn sql_query(input: TokenStream) -> TokenStream {
    expand::expand(input.into(), EntryPoint::Checked).into()
}

/// Same as [`sql_query!`] with the destructive-statement warning muted.
#[proc_macro]
pub fn sql_query_unsafe(input: TokenStream) -> TokenStream {
    expand::expand(input.into(), EntryPoint::Unsafe).into()
}
