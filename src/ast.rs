//! # Program AST
//!
//! The shape a parser must produce: schemes, facts, rules, and queries
//! built from [`Predicate`]s, themselves built from [`Parameter`]s.
//! This module only models *shape* — [`crate::lexer`]/[`crate::parser`] are
//! the components that actually turn source text into one of these.

use crate::value::Value;
use std::collections::HashSet;
use std::fmt;

/// A single position in a predicate: either a literal constant or a named
/// variable. Head predicates of rules and schemes contain only `Variable`s;
/// facts contain only `Constant`s; query and body predicates may contain
/// either.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Parameter {
    Constant(Value),
    Variable(String),
}

impl Parameter {
    pub fn is_variable(&self) -> bool {
        matches!(self, Parameter::Variable(_))
    }

    pub fn as_variable(&self) -> Option<&str> {
        match self {
            Parameter::Variable(name) => Some(name),
            Parameter::Constant(_) => None,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::Constant(v) => write!(f, "{v}"),
            Parameter::Variable(name) => write!(f, "{name}"),
        }
    }
}

/// `name(param, param, ...)` — a scheme declaration, a fact, a rule
/// head/body atom, or a query, depending on where it appears in the
/// [`Program`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub name: String,
    pub params: Vec<Parameter>,
}

impl Predicate {
    pub fn new(name: impl Into<String>, params: Vec<Parameter>) -> Self {
        Predicate {
            name: name.into(),
            params,
        }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// All distinct variable names referenced, in first-occurrence order
    /// rather than lexicographic — this is the order column bindings read
    /// "left to right through the predicate" once projected.
    pub fn variables_in_order(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for param in &self.params {
            if let Parameter::Variable(name) = param {
                if seen.insert(name.as_str()) {
                    out.push(name.as_str());
                }
            }
        }
        out
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self.params.iter().map(ToString::to_string).collect();
        write!(f, "{}({})", self.name, params.join(","))
    }
}

/// `head :- body1,body2,...` — `body` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub head: Predicate,
    pub body: Vec<Predicate>,
}

impl Rule {
    pub fn new(head: Predicate, body: Vec<Predicate>) -> Self {
        Rule { head, body }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body: Vec<String> = self.body.iter().map(ToString::to_string).collect();
        write!(f, "{} :- {}.", self.head, body.join(","))
    }
}

/// A complete Datalog program, as the parser hands it to the interpreter.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub schemes: Vec<Predicate>,
    pub facts: Vec<Predicate>,
    pub rules: Vec<Rule>,
    pub queries: Vec<Predicate>,
    pub domain: HashSet<Value>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variables_in_order_dedupes_and_keeps_first_occurrence() {
        let pred = Predicate::new(
            "p",
            vec![
                Parameter::Variable("Y".into()),
                Parameter::Constant(Value::from("\"c\"")),
                Parameter::Variable("X".into()),
                Parameter::Variable("Y".into()),
            ],
        );
        assert_eq!(pred.variables_in_order(), vec!["Y", "X"]);
    }

    #[test]
    fn predicate_display_matches_datalog_surface_syntax() {
        let pred = Predicate::new(
            "edge",
            vec![
                Parameter::Variable("X".into()),
                Parameter::Constant(Value::from("\"b\"")),
            ],
        );
        assert_eq!(pred.to_string(), "edge(X,\"b\")");
    }

    #[test]
    fn rule_display_matches_datalog_surface_syntax() {
        let rule = Rule::new(
            Predicate::new("path", vec![Parameter::Variable("X".into()), Parameter::Variable("Y".into())]),
            vec![Predicate::new("edge", vec![Parameter::Variable("X".into()), Parameter::Variable("Y".into())])],
        );
        assert_eq!(rule.to_string(), "path(X,Y) :- edge(X,Y).");
    }
}
