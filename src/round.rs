use crate::errors::*;
use crate::forbidden::{build_rows, map_keys};
use crate::gaps::Solution;
use crate::keys::SortedKeys;
use crate::options::RoundOptions;
use crate::parser::BatchReader;
use crate::validate::Batch;
use crate::*;
use log::{debug, info};
use std::io::{BufRead, Write};

/// Result of a satisfiable round.
///
/// Everything a round derives is owned here and dropped with it, so no
/// state outlives the round.
#[derive(Debug)]
pub struct Round {
    keys: SortedKeys,
    solution: Solution,
}

impl Round {
    /// Sorted forbidden keys, duplicates included.
    pub fn keys(&self) -> &SortedKeys {
        &self.keys
    }

    /// Gap regions and their assignments.
    pub fn solution(&self) -> &Solution {
        &self.solution
    }
}

/// Run validation, row building, key mapping, sorting and gap enumeration
/// for one batch.
pub fn solve_batch(clauses: Vec<Clause>, options: &RoundOptions) -> Result<Round> {
    let batch = Batch::validate(clauses, options.max_arity)?;
    let rows = build_rows(&batch, options.parallel)?;
    let keys = map_keys(&rows, options.parallel)?;
    drop(rows);
    let keys = SortedKeys::sort(keys, batch.arity(), options.parallel);
    let solution = Solution::from_keys(&keys)?;
    Ok(Round { keys, solution })
}

/// Counters over all rounds a driver ran.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// Rounds read.
    pub rounds: usize,
    /// Rounds that printed assignments.
    pub satisfiable: usize,
    /// Rounds ending in a contradiction or an exhausted domain.
    pub unsatisfiable: usize,
    /// Rounds rejected by validation.
    pub invalid: usize,
}

/// Reads batches and writes one result block per batch.
pub struct Driver<R, W> {
    reader: BatchReader<R>,
    out: W,
    options: RoundOptions,
    stats: Stats,
}

impl<R: BufRead, W: Write> Driver<R, W> {
    /// Create a driver over an input and an output.
    pub fn new(input: R, out: W, options: RoundOptions) -> Self {
        Driver {
            reader: BatchReader::new(input),
            out,
            options,
            stats: Stats::default(),
        }
    }

    /// Run rounds until the input ends or the user declines another round.
    ///
    /// Round-level failures are reported in the output; only fatal errors
    /// (I/O, allocation) are returned.
    pub fn run(&mut self) -> Result<Stats> {
        while self.run_round()? {
            if self.options.confirm && !self.confirm()? {
                break;
            }
        }
        info!(
            "{} rounds: {} satisfiable, {} unsatisfiable, {} invalid",
            self.stats.rounds, self.stats.satisfiable, self.stats.unsatisfiable, self.stats.invalid
        );
        Ok(self.stats)
    }

    /// Run a single round. Returns false once the input is exhausted.
    pub fn run_round(&mut self) -> Result<bool> {
        if self.options.prompt {
            writeln!(self.out, "Enter clause(s) and blank line to finish:")?;
            self.out.flush()?;
        }
        let clauses = match self.reader.next_batch()? {
            None => return Ok(false),
            Some(clauses) => clauses,
        };
        self.stats.rounds += 1;
        debug!("round {}: {} clauses read", self.stats.rounds, clauses.len());

        writeln!(self.out, "Result:")?;
        match solve_batch(clauses, &self.options) {
            Ok(round) => {
                info!(
                    "round {}: satisfiable, {} assignments",
                    self.stats.rounds,
                    round.solution().n_assignments()
                );
                round
                    .solution()
                    .write(&mut self.out, self.options.parallel, self.options.chunk_size)?;
                self.stats.satisfiable += 1;
            }
            Err(e) if e.kind().is_round_level() => {
                info!("round {}: {}", self.stats.rounds, e);
                writeln!(self.out, "{}", e)?;
                match e.kind() {
                    ErrorKind::ClauseContradiction(..) | ErrorKind::DomainExhausted => {
                        self.stats.unsatisfiable += 1
                    }
                    _ => self.stats.invalid += 1,
                }
            }
            Err(e) => return Err(e),
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(true)
    }

    fn confirm(&mut self) -> Result<bool> {
        writeln!(self.out, "Another round? (y/n)")?;
        self.out.flush()?;
        Ok(match self.reader.read_reply()? {
            None => false,
            Some(reply) => !reply.starts_with(&['n', 'N'][..]),
        })
    }

    /// Counters so far.
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Consume the driver, returning its output.
    pub fn into_output(self) -> W {
        self.out
    }
}
