//! # Query Runner
//!
//! Evaluates each query predicate against the final Database and renders
//! it as `<query>? Yes(n)` / `<query>? No`, with the bound tuples printed
//! beneath when there's anything to show.

use crate::ast::Predicate;
use crate::database::Database;
use crate::error::Result;
use crate::eval::evaluate_predicate;
use tracing::info;

/// One query's rendered answer: the header line and, if non-empty, the
/// bound relation to print beneath it.
pub struct QueryAnswer {
    pub header: String,
    pub bindings: Option<String>,
}

pub fn run_query(query: &Predicate, database: &Database) -> Result<QueryAnswer> {
    let (result, pre_projection_size) = evaluate_predicate(query, database)?;

    let header = if pre_projection_size > 0 {
        format!("{query}? Yes({pre_projection_size})")
    } else {
        format!("{query}? No")
    };
    info!(query = %query.to_string(), matches = pre_projection_size, "query evaluated");

    let bindings = if result.is_empty() { None } else { Some(result.to_string()) };

    Ok(QueryAnswer { header, bindings })
}
