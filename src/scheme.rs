//! # Scheme
//!
//! A relation's column-name header: an ordered sequence of names, one per
//! position in every tuple stored under that scheme.

use std::fmt;

/// Ordered column names for a relation. Duplicates are permitted —
/// intermediate projections and joins can produce or require repeated
/// names — but the scheme a [`crate::relation::Relation`] is declared with
/// has distinct names for its whole life.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Scheme(Vec<String>);

impl Scheme {
    pub fn new(names: Vec<String>) -> Self {
        Scheme(names)
    }

    pub fn arity(&self) -> usize {
        self.0.len()
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|n| n == name)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.join(","))
    }
}

impl IntoIterator for Scheme {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_is_the_number_of_columns() {
        let s = Scheme::new(vec!["X".into(), "Y".into()]);
        assert_eq!(s.arity(), 2);
    }

    #[test]
    fn position_finds_first_match() {
        let s = Scheme::new(vec!["X".into(), "Y".into(), "X".into()]);
        assert_eq!(s.position("Y"), Some(1));
        assert_eq!(s.position("X"), Some(0));
        assert_eq!(s.position("Z"), None);
    }
}
