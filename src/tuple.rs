//! # Tuple
//!
//! A single row: a fixed-length sequence of [`Value`]s, positionally
//! aligned with a [`crate::scheme::Scheme`]. `Tuple` derives `Ord` so that
//! storing tuples in a `BTreeSet` (see [`crate::relation::Relation`]) gives
//! deterministic, lexicographic iteration order for free — no per-call sort
//! needed when printing.

use crate::value::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tuple(Vec<Value>);

impl Tuple {
    pub fn new(values: Vec<Value>) -> Self {
        Tuple(values)
    }

    pub fn arity(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> &Value {
        &self.0[index]
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    /// Project onto the given positions, in the order given. Positions are
    /// assumed to already be validated against the owning scheme.
    pub fn project(&self, positions: &[usize]) -> Tuple {
        Tuple(positions.iter().map(|&i| self.0[i].clone()).collect())
    }

    /// Concatenate with another tuple, keeping only `other`'s values at the
    /// given positions (used by natural join to append the right side's
    /// non-shared columns).
    pub fn extended_with(&self, other: &Tuple, other_positions: &[usize]) -> Tuple {
        let mut values = self.0.clone();
        values.extend(other_positions.iter().map(|&i| other.0[i].clone()));
        Tuple(values)
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", rendered.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Value {
        Value::from(s)
    }

    #[test]
    fn project_reorders_and_selects() {
        let t = Tuple::new(vec![v("a"), v("b"), v("c")]);
        assert_eq!(t.project(&[2, 0]), Tuple::new(vec![v("c"), v("a")]));
    }

    #[test]
    fn ordering_is_componentwise_lexicographic() {
        let a = Tuple::new(vec![v("a"), v("z")]);
        let b = Tuple::new(vec![v("a"), v("b")]);
        assert!(b < a);
    }

    #[test]
    fn extended_with_appends_selected_right_columns() {
        let left = Tuple::new(vec![v("a"), v("b")]);
        let right = Tuple::new(vec![v("x"), v("y"), v("z")]);
        let combined = left.extended_with(&right, &[1, 2]);
        assert_eq!(combined, Tuple::new(vec![v("a"), v("b"), v("y"), v("z")]));
    }
}
