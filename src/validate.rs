use crate::errors::*;
use crate::*;
use error_chain::bail;
use log::debug;
use std::collections::HashSet;

/// A batch of clauses sharing one arity.
#[derive(Debug)]
pub struct Batch {
    clauses: Vec<Clause>,
    arity: usize,
}

impl Batch {
    /// Check a batch of clauses.
    ///
    /// Arity is checked across every clause before any clause is scanned for
    /// repeated literals. Clause indices in errors are 1-based.
    pub fn validate(clauses: Vec<Clause>, max_arity: u32) -> Result<Self> {
        let arity = match clauses.first() {
            None => bail!(ErrorKind::EmptyBatch),
            Some(first) => first.arity(),
        };
        if arity == 0 {
            bail!(ErrorKind::EmptyClause(1));
        }

        for (i, clause) in clauses.iter().enumerate().skip(1) {
            if clause.arity() != arity {
                if clause.arity() == 0 {
                    bail!(ErrorKind::EmptyClause(i + 1));
                }
                bail!(ErrorKind::ArityMismatch(arity, i + 1, clause.arity()));
            }
        }
        if arity > max_arity as usize {
            bail!(ErrorKind::ArityTooLarge(arity, max_arity));
        }

        for (i, clause) in clauses.iter().enumerate() {
            let mut seen = HashSet::with_capacity(arity);
            for &lit in &clause.lits {
                if !seen.insert(lit) {
                    bail!(ErrorKind::DuplicateLiteral(lit.to_dimacs(), i + 1));
                }
            }
        }

        debug!("validated {} clauses of arity {}", clauses.len(), arity);
        Ok(Batch { clauses, arity })
    }

    /// The shared clause arity `C`.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Number of clauses `M`.
    pub fn n_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// The clauses, in input order.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }
}
