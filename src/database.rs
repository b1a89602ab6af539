//! # Database
//!
//! A name-indexed collection of [`Relation`]s. Relations are created once,
//! empty, when `Schemes:` is processed, and keep that declared scheme for
//! the rest of the run. Every other component reaches a relation through
//! here rather than holding its own reference, so the Fixpoint Driver's
//! head-relation mutation is the single place state changes.

use crate::error::{DatalogError, Result};
use crate::relation::Relation;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct Database {
    relations: HashMap<String, Relation>,
}

impl Database {
    pub fn new() -> Self {
        Database {
            relations: HashMap::new(),
        }
    }

    /// Register a relation (normally an empty one created from a scheme).
    /// Intended to be called once per name during scheme processing.
    pub fn declare(&mut self, relation: Relation) {
        self.relations.insert(relation.name().to_string(), relation);
    }

    pub fn get(&self, name: &str) -> Result<&Relation> {
        self.relations
            .get(name)
            .ok_or_else(|| DatalogError::UndeclaredRelation(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Relation> {
        self.relations
            .get_mut(name)
            .ok_or_else(|| DatalogError::UndeclaredRelation(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.relations.contains_key(name)
    }

    /// Overwrite an already-declared relation's tuples (and, incidentally,
    /// its scheme — callers are expected to preserve it). Used by the
    /// Fixpoint Driver to install a rule head's union with its new tuples.
    pub fn replace(&mut self, relation: Relation) -> Result<()> {
        if !self.contains(relation.name()) {
            return Err(DatalogError::UndeclaredRelation(relation.name().to_string()));
        }
        self.relations.insert(relation.name().to_string(), relation);
        Ok(())
    }
}
