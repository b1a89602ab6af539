//! Pass Limit
//!
//! A cooperative check the Fixpoint Driver calls once per pass so a bug in
//! the SCC/graph logic can't loop forever instead of raising
//! `DatalogError::PassLimitExceeded`. Uses cooperative checking rather than
//! preemption — the driver calls `check` at the top of every pass.

use crate::error::{DatalogError, Result};

#[derive(Debug, Clone, Copy)]
pub struct PassLimit(Option<usize>);

impl PassLimit {
    pub fn new(max_passes: Option<usize>) -> Self {
        PassLimit(max_passes)
    }

    pub fn unbounded() -> Self {
        PassLimit(None)
    }

    /// Check whether `pass` (1-indexed) is still within bounds for `scc`.
    pub fn check(&self, pass: usize, scc: &[String]) -> Result<()> {
        if let Some(limit) = self.0 {
            if pass > limit {
                return Err(DatalogError::PassLimitExceeded {
                    scc: scc.to_vec(),
                    limit,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_never_trips() {
        let limit = PassLimit::unbounded();
        assert!(limit.check(1_000_000, &["r".to_string()]).is_ok());
    }

    #[test]
    fn bounded_trips_once_exceeded() {
        let limit = PassLimit::new(Some(2));
        assert!(limit.check(1, &["r".to_string()]).is_ok());
        assert!(limit.check(2, &["r".to_string()]).is_ok());
        assert!(matches!(
            limit.check(3, &["r".to_string()]),
            Err(DatalogError::PassLimitExceeded { limit: 2, .. })
        ));
    }
}
