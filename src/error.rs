//! Error types for the Datalog interpreter.
//!
//! Every fallible library function returns `Result<T, DatalogError>`. There
//! are no recoverable errors during evaluation: a Datalog program that hits
//! any of these is ill-formed (or the interpreter has a bug), and the only
//! disposition is to abort with a diagnostic naming the offending relation,
//! column, or token.

use thiserror::Error;

/// Interpreter errors, covering lex/parse failures and evaluation-time
/// invariant violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatalogError {
    /// Lex or parse error. Rendered to the user as
    /// `Failure!\n  (<token_kind>,"<lexeme>",<line>)` per the CLI contract.
    #[error("parse error at line {line}: unexpected {token_kind} \"{lexeme}\"")]
    Parse {
        token_kind: String,
        lexeme: String,
        line: usize,
    },

    /// A fact, rule head/body predicate, or query referenced a relation
    /// with no matching `Schemes:` entry.
    #[error("undeclared relation: {0}")]
    UndeclaredRelation(String),

    /// A fact or query predicate's arity didn't match its declared scheme.
    #[error("arity mismatch for '{name}': expected {expected}, got {actual}")]
    ArityMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// A `Schemes:` entry held a constant where only variables are allowed,
    /// or a `Facts:` entry held a variable where only constants are
    /// allowed (spec.md §3: "Head predicates of rules and schemes contain
    /// only Variable parameters; facts contain only Constant parameters").
    #[error("'{0}' must contain only {1}")]
    MalformedPredicate(String, &'static str),

    /// `select_const`/`select_eq` referenced a column position beyond the
    /// scheme's arity.
    #[error("column index {index} out of range for scheme of arity {arity}")]
    ColumnIndexOutOfRange { index: usize, arity: usize },

    /// `project` was asked to resolve a name not present in the scheme.
    #[error("no column named '{0}' in scheme")]
    UnknownColumn(String),

    /// `rename` was given a name list whose length didn't match the arity.
    #[error("rename list has {given} names, scheme has arity {arity}")]
    RenameArityMismatch { given: usize, arity: usize },

    /// `union`/`difference`/`natural_join`'s result construction hit two
    /// relations whose schemes aren't compatible the way the caller assumed.
    #[error("relations '{left}' and '{right}' are not union-compatible")]
    IncompatibleSchemes { left: String, right: String },

    /// Internal invariant violation: a join produced a tuple whose arity
    /// didn't match the combined scheme. Indicates a bug in the evaluator,
    /// not an ill-formed program.
    #[error("internal error: join of '{left}' and '{right}' produced a malformed tuple")]
    JoinArityMismatch { left: String, right: String },

    /// `select_eq` was called with fewer than two positions, so there's
    /// nothing for it to enforce equality between.
    #[error("select_eq needs at least two positions to compare, got {0}")]
    SelectEqNeedsTwoPositions(usize),

    /// The fixpoint driver exceeded `Config.limits.max_passes` while
    /// iterating an SCC. Defensive only — a well-formed evaluation always
    /// terminates on its own regardless of this cap.
    #[error("SCC {scc:?} did not reach a fixpoint within {limit} passes")]
    PassLimitExceeded { scc: Vec<String>, limit: usize },
}

pub type Result<T> = std::result::Result<T, DatalogError>;
