//! # Fixpoint Driver
//!
//! Evaluates one strongly connected component of the rule-dependency graph
//! to a fixpoint: non-recursive components run their one rule exactly
//! once; recursive ones repeat every rule in ascending index order until a
//! full pass adds no new tuple anywhere.
//!
//! Per-rule evaluation joins the Predicate Evaluator's output for each body
//! predicate left to right, projects onto the head's variables, renames to
//! the head relation's declared scheme, and unions the result into the
//! Database — the only place a relation is mutated in place.

use crate::ast::Rule;
use crate::database::Database;
use crate::error::{DatalogError, Result};
use crate::eval::evaluate_predicate;
use crate::limits::PassLimit;
use crate::relation::Relation;
use tracing::{debug, info, info_span};

/// One rule's contribution within a single pass: its surface text, for
/// tracing/printing, and the tuples it added that weren't already present.
#[derive(Debug, Clone)]
pub struct RulePassResult {
    pub rule_text: String,
    pub new_tuples: Relation,
}

/// The full trace of evaluating one SCC to a fixpoint.
#[derive(Debug, Clone)]
pub struct SccResult {
    /// The component's member rules, as declared rule indices (spec.md §4.4:
    /// "Nodes = rule indices `0 .. |rules|-1`") — what the `SCC: R<i>,R<j>,...`
    /// header names, since head relation names alone can't distinguish two
    /// rules sharing a head (e.g. both `Path` rules of a transitive closure).
    pub rule_indices: Vec<usize>,
    pub relation_names: Vec<String>,
    pub recursive: bool,
    pub passes: usize,
    pub passes_detail: Vec<Vec<RulePassResult>>,
}

/// Evaluate the rules at `rule_indices` (already in ascending order, one
/// SCC's worth) against `database` until a fixpoint, honoring `recursive`
/// (a non-recursive component takes exactly one pass regardless of
/// whether it changed anything) and an optional defensive pass cap.
pub fn evaluate_scc(
    rule_indices: &[usize],
    rules: &[Rule],
    recursive: bool,
    database: &mut Database,
    limit: &PassLimit,
) -> Result<SccResult> {
    let relation_names: Vec<String> = rule_indices.iter().map(|&i| rules[i].head.name.clone()).collect();
    let span = info_span!("scc", relations = %relation_names.join(","), recursive);
    let _guard = span.enter();

    let mut passes = 0usize;
    let mut passes_detail = Vec::new();

    loop {
        passes += 1;
        limit.check(passes, &relation_names)?;

        let mut changed = false;
        let mut this_pass = Vec::with_capacity(rule_indices.len());
        for &idx in rule_indices {
            let rule = &rules[idx];
            let diff = evaluate_rule(rule, database)?;
            if !diff.is_empty() {
                changed = true;
            }
            this_pass.push(RulePassResult {
                rule_text: rule.to_string(),
                new_tuples: diff,
            });
        }
        debug!(pass = passes, changed, "pass complete");
        passes_detail.push(this_pass);

        if !recursive || !changed {
            break;
        }
    }

    Ok(SccResult {
        rule_indices: rule_indices.to_vec(),
        relation_names,
        recursive,
        passes,
        passes_detail,
    })
}

/// Evaluate one rule's body against the current database, union the
/// result into its head relation, and return the tuples that were new.
fn evaluate_rule(rule: &Rule, database: &mut Database) -> Result<Relation> {
    let mut bodies = Vec::with_capacity(rule.body.len());
    for body_predicate in &rule.body {
        let (relation, _) = evaluate_predicate(body_predicate, database)?;
        bodies.push(relation);
    }

    let mut joined = bodies[0].clone();
    for next in &bodies[1..] {
        joined = joined.natural_join(next)?;
    }

    let head_names: Vec<String> = rule
        .head
        .params
        .iter()
        .map(|p| {
            p.as_variable()
                .map(ToString::to_string)
                .ok_or_else(|| DatalogError::MalformedPredicate(rule.head.name.clone(), "variables"))
        })
        .collect::<Result<_>>()?;

    let projected = joined.project_names(&head_names)?;

    let original = database.get(&rule.head.name)?.clone();
    let renamed = projected.rename(original.scheme().names())?;

    let unioned = original.union(&renamed)?;
    let new_tuples = unioned.difference(&original)?;
    database.replace(unioned)?;

    if !new_tuples.is_empty() {
        info!(rule = %rule.to_string(), added = new_tuples.len(), "new tuples");
    }

    Ok(new_tuples)
}
