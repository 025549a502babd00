use crate::errors::*;
use crate::*;
use error_chain::bail;
use log::{debug, trace};
use rayon::prelude::*;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

/// The one bit combination a clause rules out.
///
/// Bit `i` is set iff the `i`-th literal of the clause is negative.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForbiddenRow {
    bits: Vec<bool>,
}

impl ForbiddenRow {
    /// Build the row for a clause.
    ///
    /// Fails with the offending variable if the clause holds both `v` and `-v`.
    pub fn from_clause(clause: &Clause) -> std::result::Result<Self, Var> {
        let mut seen = HashSet::with_capacity(clause.arity());
        for &lit in &clause.lits {
            if seen.contains(&!lit) {
                return Err(lit.var());
            }
            seen.insert(lit);
        }
        Ok(ForbiddenRow {
            bits: clause.lits.iter().map(|lit| lit.sign()).collect(),
        })
    }

    /// Decode a key back into a row of `arity` bits, most significant first.
    pub fn from_key(key: u64, arity: usize) -> Self {
        ForbiddenRow {
            bits: (0..arity).rev().map(|b| (key >> b) & 1 == 1).collect(),
        }
    }

    /// The row read as an unsigned binary number, first bit most significant.
    pub fn key(&self) -> u64 {
        self.bits.iter().fold(0, |key, &bit| (key << 1) | bit as u64)
    }
}

/// Outcome of one worker's unit of work.
enum Slot {
    Built(ForbiddenRow),
    Contradiction(Var),
    Skipped,
}

fn build_slot(clause: &Clause, index: usize, cancelled: &AtomicBool) -> Slot {
    if cancelled.load(Ordering::Acquire) {
        return Slot::Skipped;
    }
    match ForbiddenRow::from_clause(clause) {
        Ok(row) => Slot::Built(row),
        Err(var) => {
            trace!("clause ({}) contains both {} and -{}", index + 1, var, var);
            cancelled.store(true, Ordering::Release);
            Slot::Contradiction(var)
        }
    }
}

/// Build one forbidden row per clause of the batch.
///
/// A contradictory clause raises a shared cancellation flag; workers that
/// have not started yet skip their clause. Slots are merged in clause order
/// once every worker has finished, so the lowest-indexed detected
/// contradiction is the one reported.
pub fn build_rows(batch: &Batch, parallel: bool) -> Result<Vec<ForbiddenRow>> {
    let cancelled = AtomicBool::new(false);
    let slots: Vec<Slot> = if parallel {
        batch
            .clauses()
            .par_iter()
            .enumerate()
            .map(|(i, clause)| build_slot(clause, i, &cancelled))
            .collect()
    } else {
        let mut slots = vec![];
        for (i, clause) in batch.clauses().iter().enumerate() {
            let slot = build_slot(clause, i, &cancelled);
            let stop = matches!(slot, Slot::Contradiction(_));
            slots.push(slot);
            if stop {
                break;
            }
        }
        slots
    };

    if cancelled.load(Ordering::Acquire) {
        let found = slots.iter().enumerate().find_map(|(i, slot)| match slot {
            Slot::Contradiction(var) => Some((i, *var)),
            _ => None,
        });
        let skipped = slots.iter().filter(|s| matches!(s, Slot::Skipped)).count();
        debug!("row construction cancelled, {} clauses skipped", skipped);
        if let Some((i, var)) = found {
            bail!(ErrorKind::ClauseContradiction(var.id(), i + 1));
        }
    }

    let mut rows = Vec::new();
    rows.try_reserve_exact(batch.n_clauses())?;
    for slot in slots {
        if let Slot::Built(row) = slot {
            rows.push(row);
        }
    }
    debug!("built {} forbidden rows", rows.len());
    Ok(rows)
}

/// Map every row to its forbidden key, in row order.
pub fn map_keys(rows: &[ForbiddenRow], parallel: bool) -> Result<Vec<u64>> {
    let mut keys = Vec::new();
    keys.try_reserve_exact(rows.len())?;
    if parallel {
        rows.par_iter().map(ForbiddenRow::key).collect_into_vec(&mut keys);
    } else {
        keys.extend(rows.iter().map(ForbiddenRow::key));
    }
    Ok(keys)
}
