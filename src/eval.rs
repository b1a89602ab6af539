//! # Predicate Evaluator
//!
//! Turns a single predicate reference — a scheme's relation, a fact's
//! arity check, a rule body atom, or a query — into a [`Relation`] of
//! bindings for its variables:
//!
//! 1. start from the named relation;
//! 2. select away every constant parameter;
//! 3. enforce every repeated variable with `select_eq`;
//! 4. project onto each distinct variable's first-occurrence position;
//! 5. rename those positions to the variable names.
//!
//! The pre-projection cardinality (step before 4) is also returned, since
//! the Query Runner needs it to print `Yes(n)`/`No` even when the
//! post-projection relation collapses to zero columns (an all-constant
//! query has no variables to project onto, but may still match).

use crate::ast::{Parameter, Predicate};
use crate::database::Database;
use crate::error::{DatalogError, Result};
use crate::relation::Relation;

/// Evaluate `predicate` against `database`, returning the bound relation
/// and the pre-projection match count.
pub fn evaluate_predicate(predicate: &Predicate, database: &Database) -> Result<(Relation, usize)> {
    let base = database.get(&predicate.name)?;
    if predicate.arity() != base.scheme().arity() {
        return Err(DatalogError::ArityMismatch {
            name: predicate.name.clone(),
            expected: base.scheme().arity(),
            actual: predicate.arity(),
        });
    }

    let mut current = base.clone();

    for (index, param) in predicate.params.iter().enumerate() {
        if let Parameter::Constant(value) = param {
            current = current.select_const(index, value)?;
        }
    }

    for positions in variable_groups(predicate) {
        if positions.len() > 1 {
            current = current.select_eq(&positions)?;
        }
    }

    let pre_projection_size = current.len();

    let (positions, names) = first_occurrence_bindings(predicate);
    current = current.project(&positions)?;
    current = current.rename(&names)?;

    Ok((current, pre_projection_size))
}

/// Positions sharing each distinct variable name, grouped in the order the
/// name is first seen.
fn variable_groups(predicate: &Predicate) -> Vec<Vec<usize>> {
    let mut groups: Vec<(&str, Vec<usize>)> = Vec::new();
    for (index, param) in predicate.params.iter().enumerate() {
        if let Parameter::Variable(name) = param {
            match groups.iter_mut().find(|(n, _)| *n == name.as_str()) {
                Some((_, positions)) => positions.push(index),
                None => groups.push((name.as_str(), vec![index])),
            }
        }
    }
    groups.into_iter().map(|(_, positions)| positions).collect()
}

/// For each distinct variable, in first-occurrence order: its first
/// position and its name.
fn first_occurrence_bindings(predicate: &Predicate) -> (Vec<usize>, Vec<String>) {
    let mut positions = Vec::new();
    let mut names = Vec::new();
    for name in predicate.variables_in_order() {
        let position = predicate
            .params
            .iter()
            .position(|p| p.as_variable() == Some(name))
            .expect("variable came from this predicate's own parameter list");
        positions.push(position);
        names.push(name.to_string());
    }
    (positions, names)
}
