//! # Relation — relational algebra
//!
//! A named `(Scheme, set-of-Tuples)` pair and the select/project/rename/
//! union/difference/natural-join operations the rest of the interpreter is
//! built from. Every operation here returns a fresh `Relation` — the only
//! place a relation is ever mutated in place is the [`crate::database::Database`]
//! entry for a rule's head relation during fixpoint evaluation (see
//! [`crate::fixpoint`]). That makes every algebra operation trivial to
//! reason about in isolation, and the fixpoint driver the one place that has
//! to think about mutation at all.
//!
//! Tuples are kept in a `BTreeSet` rather than a `HashSet` so iteration
//! (and therefore printing) is lexicographic by construction — no sort
//! needed at the point of use.

use crate::error::{DatalogError, Result};
use crate::scheme::Scheme;
use crate::tuple::Tuple;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone)]
pub struct Relation {
    name: String,
    scheme: Scheme,
    tuples: BTreeSet<Tuple>,
}

impl Relation {
    pub fn new(name: impl Into<String>, scheme: Scheme) -> Self {
        Relation {
            name: name.into(),
            scheme,
            tuples: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    pub fn tuples(&self) -> impl Iterator<Item = &Tuple> {
        self.tuples.iter()
    }

    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    /// Insert a tuple, failing if its arity doesn't match the scheme.
    pub fn insert(&mut self, tuple: Tuple) -> Result<()> {
        if tuple.arity() != self.scheme.arity() {
            return Err(DatalogError::ArityMismatch {
                name: self.name.clone(),
                expected: self.scheme.arity(),
                actual: tuple.arity(),
            });
        }
        self.tuples.insert(tuple);
        Ok(())
    }

    fn with_same_name_and_scheme(&self) -> Relation {
        Relation::new(self.name.clone(), self.scheme.clone())
    }

    /// Keep tuples with `tuple[index] == value`.
    pub fn select_const(&self, index: usize, value: &crate::value::Value) -> Result<Relation> {
        if index >= self.scheme.arity() {
            return Err(DatalogError::ColumnIndexOutOfRange {
                index,
                arity: self.scheme.arity(),
            });
        }
        let mut result = self.with_same_name_and_scheme();
        for tuple in &self.tuples {
            if tuple.get(index) == value {
                result.tuples.insert(tuple.clone());
            }
        }
        Ok(result)
    }

    /// Keep tuples where `tuple[positions[0]] == tuple[positions[k]]` for
    /// every `k`. Used to enforce a variable repeated within one predicate.
    pub fn select_eq(&self, positions: &[usize]) -> Result<Relation> {
        if positions.len() < 2 {
            return Err(DatalogError::SelectEqNeedsTwoPositions(positions.len()));
        }
        for &p in positions {
            if p >= self.scheme.arity() {
                return Err(DatalogError::ColumnIndexOutOfRange {
                    index: p,
                    arity: self.scheme.arity(),
                });
            }
        }
        let first = positions[0];
        let mut result = self.with_same_name_and_scheme();
        for tuple in &self.tuples {
            if positions[1..].iter().all(|&p| tuple.get(p) == tuple.get(first)) {
                result.tuples.insert(tuple.clone());
            }
        }
        Ok(result)
    }

    /// Project onto the given column positions (order preserved, duplicates
    /// allowed). An empty index list yields a relation with an empty scheme
    /// and no tuples.
    pub fn project(&self, column_indices: &[usize]) -> Result<Relation> {
        for &i in column_indices {
            if i >= self.scheme.arity() {
                return Err(DatalogError::ColumnIndexOutOfRange {
                    index: i,
                    arity: self.scheme.arity(),
                });
            }
        }
        let new_names: Vec<String> = column_indices
            .iter()
            .map(|&i| self.scheme.names()[i].clone())
            .collect();
        let mut result = Relation::new(self.name.clone(), Scheme::new(new_names));
        if column_indices.is_empty() {
            return Ok(result);
        }
        for tuple in &self.tuples {
            result.tuples.insert(tuple.project(column_indices));
        }
        Ok(result)
    }

    /// Project by column name, resolving each name to the first matching
    /// column in the scheme.
    pub fn project_names(&self, column_names: &[String]) -> Result<Relation> {
        let mut indices = Vec::with_capacity(column_names.len());
        for name in column_names {
            let idx = self
                .scheme
                .position(name)
                .ok_or_else(|| DatalogError::UnknownColumn(name.clone()))?;
            indices.push(idx);
        }
        self.project(&indices)
    }

    /// Replace the scheme column-wise; tuples are unchanged.
    pub fn rename(&self, new_names: &[String]) -> Result<Relation> {
        if new_names.len() != self.scheme.arity() {
            return Err(DatalogError::RenameArityMismatch {
                given: new_names.len(),
                arity: self.scheme.arity(),
            });
        }
        Ok(Relation {
            name: self.name.clone(),
            scheme: Scheme::new(new_names.to_vec()),
            tuples: self.tuples.clone(),
        })
    }

    fn require_same_scheme(&self, other: &Relation) -> Result<()> {
        if self.scheme.names() != other.scheme.names() {
            return Err(DatalogError::IncompatibleSchemes {
                left: self.name.clone(),
                right: other.name.clone(),
            });
        }
        Ok(())
    }

    /// Set union of tuples. Requires identical scheme (same length, same
    /// names in the same order).
    pub fn union(&self, other: &Relation) -> Result<Relation> {
        self.require_same_scheme(other)?;
        let mut result = self.clone();
        result.tuples.extend(other.tuples.iter().cloned());
        Ok(result)
    }

    /// Tuples present in `self` but not in `other`. Requires identical
    /// scheme.
    pub fn difference(&self, other: &Relation) -> Result<Relation> {
        self.require_same_scheme(other)?;
        let mut result = self.with_same_name_and_scheme();
        for tuple in self.tuples.difference(&other.tuples) {
            result.tuples.insert(tuple.clone());
        }
        Ok(result)
    }

    /// Natural join: columns shared by name between `self` and `other` must
    /// agree; the result's scheme is `self`'s scheme followed by `other`'s
    /// columns whose names don't already appear in `self`, in `other`'s
    /// original order. The result keeps `self`'s name.
    pub fn natural_join(&self, other: &Relation) -> Result<Relation> {
        let left_names = self.scheme.names();
        let right_names = other.scheme.names();

        let append_positions: Vec<usize> = right_names
            .iter()
            .enumerate()
            .filter(|(_, name)| !left_names.contains(name))
            .map(|(i, _)| i)
            .collect();

        let mut combined_names = left_names.to_vec();
        combined_names.extend(append_positions.iter().map(|&i| right_names[i].clone()));
        let combined_scheme = Scheme::new(combined_names);

        let mut result = Relation::new(self.name.clone(), combined_scheme);

        for left_tuple in &self.tuples {
            for right_tuple in &other.tuples {
                if Self::joinable(left_names, right_names, left_tuple, right_tuple) {
                    let joined = left_tuple.extended_with(right_tuple, &append_positions);
                    if joined.arity() != result.scheme.arity() {
                        return Err(DatalogError::JoinArityMismatch {
                            left: self.name.clone(),
                            right: other.name.clone(),
                        });
                    }
                    result.tuples.insert(joined);
                }
            }
        }

        Ok(result)
    }

    fn joinable(left_names: &[String], right_names: &[String], left: &Tuple, right: &Tuple) -> bool {
        for (li, left_name) in left_names.iter().enumerate() {
            for (ri, right_name) in right_names.iter().enumerate() {
                if left_name == right_name && left.get(li) != right.get(ri) {
                    return false;
                }
            }
        }
        true
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.scheme.names();
        let mut first = true;
        for tuple in &self.tuples {
            if !first {
                writeln!(f)?;
            }
            first = false;
            let pairs: Vec<String> = names
                .iter()
                .zip(tuple.values())
                .map(|(name, value)| format!("{name}={value}"))
                .collect();
            write!(f, "  {}", pairs.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn scheme(names: &[&str]) -> Scheme {
        Scheme::new(names.iter().map(|s| s.to_string()).collect())
    }

    fn tuple(values: &[&str]) -> Tuple {
        Tuple::new(values.iter().map(|v| Value::from(*v)).collect())
    }

    fn edges() -> Relation {
        let mut r = Relation::new("edge", scheme(&["X", "Y"]));
        r.insert(tuple(&["a", "b"])).unwrap();
        r.insert(tuple(&["b", "c"])).unwrap();
        r.insert(tuple(&["c", "d"])).unwrap();
        r
    }

    #[test]
    fn select_const_filters_by_column() {
        let r = edges();
        let selected = r.select_const(0, &Value::from("b")).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected.tuples().next().unwrap(), &tuple(&["b", "c"]));
    }

    #[test]
    fn select_eq_keeps_repeated_variable_matches() {
        let mut r = Relation::new("same", scheme(&["X", "Y"]));
        r.insert(tuple(&["a", "a"])).unwrap();
        r.insert(tuple(&["a", "b"])).unwrap();
        let selected = r.select_eq(&[0, 1]).unwrap();
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn project_preserves_order_and_duplicates() {
        let r = edges();
        let projected = r.project(&[1, 0, 1]).unwrap();
        assert_eq!(projected.scheme().names(), &["Y", "X", "Y"]);
        assert!(projected.tuples().any(|t| t == &tuple(&["b", "a", "b"])));
    }

    #[test]
    fn project_empty_indices_yields_empty_scheme_and_no_tuples() {
        let r = edges();
        let projected = r.project(&[]).unwrap();
        assert_eq!(projected.scheme().arity(), 0);
        assert_eq!(projected.len(), 0);
    }

    #[test]
    fn rename_requires_matching_arity() {
        let r = edges();
        assert!(r.rename(&["A".to_string()]).is_err());
        let renamed = r.rename(&["A".to_string(), "B".to_string()]).unwrap();
        assert_eq!(renamed.scheme().names(), &["A", "B"]);
    }

    #[test]
    fn union_requires_identical_scheme() {
        let r = edges();
        let mut other = Relation::new("edge", scheme(&["X", "Z"]));
        other.insert(tuple(&["x", "y"])).unwrap();
        assert!(r.union(&other).is_err());
    }

    #[test]
    fn union_is_commutative_and_idempotent() {
        let r = edges();
        let mut s = Relation::new("edge", scheme(&["X", "Y"]));
        s.insert(tuple(&["d", "e"])).unwrap();

        let ab = r.union(&s).unwrap();
        let ba = s.union(&r).unwrap();
        assert_eq!(ab.tuples().collect::<Vec<_>>(), ba.tuples().collect::<Vec<_>>());

        let idempotent = r.union(&r).unwrap();
        assert_eq!(idempotent.tuples().collect::<Vec<_>>(), r.tuples().collect::<Vec<_>>());
    }

    #[test]
    fn difference_removes_shared_tuples() {
        let r = edges();
        let mut s = Relation::new("edge", scheme(&["X", "Y"]));
        s.insert(tuple(&["a", "b"])).unwrap();
        let diff = r.difference(&s).unwrap();
        assert_eq!(diff.len(), 2);
        assert!(!diff.tuples().any(|t| t == &tuple(&["a", "b"])));
    }

    #[test]
    fn natural_join_combines_schemes_and_enforces_shared_columns() {
        let edge = edges();
        let mut path = Relation::new("path", scheme(&["Y", "Z"]));
        path.insert(tuple(&["b", "q"])).unwrap();
        path.insert(tuple(&["x", "never"])).unwrap();

        let joined = edge.natural_join(&path).unwrap();
        assert_eq!(joined.scheme().names(), &["X", "Y", "Z"]);
        assert_eq!(joined.len(), 1);
        assert_eq!(joined.tuples().next().unwrap(), &tuple(&["a", "b", "q"]));
    }

    #[test]
    fn natural_join_with_self_is_identity() {
        let r = edges();
        let joined = r.natural_join(&r).unwrap();
        assert_eq!(joined.scheme().names(), r.scheme().names());
        assert_eq!(joined.tuples().collect::<Vec<_>>(), r.tuples().collect::<Vec<_>>());
    }

    #[test]
    fn display_formats_name_value_pairs_per_tuple() {
        let mut r = Relation::new("edge", scheme(&["X", "Y"]));
        r.insert(tuple(&["a", "b"])).unwrap();
        assert_eq!(r.to_string(), "  X=a, Y=b");
    }
}
