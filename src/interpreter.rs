//! # Interpreter
//!
//! Ties the pipeline together: seed the [`Database`] from `Schemes:`/
//! `Facts:`, build the rule-dependency graph, drive each strongly
//! connected component to a fixpoint in dependency order, then run the
//! queries — producing the §6 output text as a single string. Grounded on
//! `original_source/code/Interpreter.cpp::run`/`evaluateSchemes`/
//! `evaluateFacts`, generalized from one global fixpoint to one per SCC.

use crate::ast::{Parameter, Program};
use crate::database::Database;
use crate::error::{DatalogError, Result};
use crate::fixpoint::{evaluate_scc, SccResult};
use crate::graph::RuleGraph;
use crate::limits::PassLimit;
use crate::query::run_query;
use crate::relation::Relation;
use crate::scheme::Scheme;
use std::fmt::Write as _;
use tracing::info;

/// Seed an empty `Database` from a program's `Schemes:` and `Facts:`
/// sections. Every scheme becomes an empty relation; every fact is
/// inserted into its relation, which must already have been declared.
pub fn seed_database(program: &Program) -> Result<Database> {
    let mut database = Database::new();

    for scheme in &program.schemes {
        let names: Vec<String> = scheme
            .params
            .iter()
            .map(|p| {
                p.as_variable()
                    .map(ToString::to_string)
                    .ok_or_else(|| DatalogError::MalformedPredicate(scheme.name.clone(), "variables"))
            })
            .collect::<Result<_>>()?;
        database.declare(Relation::new(scheme.name.clone(), Scheme::new(names)));
    }

    for fact in &program.facts {
        let relation = database.get_mut(&fact.name)?;
        let values = fact
            .params
            .iter()
            .map(|p| match p {
                Parameter::Constant(v) => Ok(v.clone()),
                Parameter::Variable(_) => Err(DatalogError::MalformedPredicate(fact.name.clone(), "constants")),
            })
            .collect::<Result<Vec<_>>>()?;
        relation.insert(crate::tuple::Tuple::new(values))?;
    }

    Ok(database)
}

/// Evaluate every SCC of the rule-dependency graph, in dependency order,
/// mutating `database` in place. Returns one [`SccResult`] per component.
pub fn evaluate_rules(program: &Program, database: &mut Database, max_passes: Option<usize>) -> Result<Vec<SccResult>> {
    let graph = RuleGraph::build(&program.rules);
    let sccs = graph.strongly_connected_components();
    let limit = PassLimit::new(max_passes);

    let mut results = Vec::with_capacity(sccs.len());
    for component in &sccs {
        let recursive = graph.is_recursive(component);
        let result = evaluate_scc(component, &program.rules, recursive, database, &limit)?;
        info!(scc = %result.relation_names.join(","), passes = result.passes, recursive, "scc evaluated");
        results.push(result);
    }
    Ok(results)
}

/// Run a complete program end to end and render the §6 output text.
pub fn run(program: &Program, max_passes: Option<usize>) -> Result<String> {
    let mut database = seed_database(program)?;
    let scc_results = evaluate_rules(program, &mut database, max_passes)?;

    let mut out = String::new();
    writeln!(out, "Rule Evaluation").ok();
    writeln!(out).ok();

    let mut total_passes = 0usize;
    for scc in &scc_results {
        total_passes += scc.passes;
        let members: Vec<String> = scc.rule_indices.iter().map(|i| format!("R{i}")).collect();
        writeln!(out, "SCC: {}", members.join(",")).ok();
        for pass in &scc.passes_detail {
            for rule_result in pass {
                writeln!(out, "{}", rule_result.rule_text).ok();
                if !rule_result.new_tuples.is_empty() {
                    writeln!(out, "{}", rule_result.new_tuples).ok();
                }
            }
        }
    }

    writeln!(out).ok();
    writeln!(out, "Schemes populated after {total_passes} passes through the Rules.").ok();
    writeln!(out).ok();
    writeln!(out, "Query Evaluation").ok();

    for (i, query) in program.queries.iter().enumerate() {
        let answer = run_query(query, &database)?;
        if i > 0 {
            writeln!(out).ok();
        }
        writeln!(out, "{}", answer.header).ok();
        if let Some(bindings) = answer.bindings {
            writeln!(out, "{bindings}").ok();
        }
    }

    Ok(out)
}
