use crate::errors::*;
use crate::keys::SortedKeys;
use error_chain::bail;
use log::debug;
use rayon::prelude::*;
use std::convert::TryFrom;
use std::fmt;
use std::io::Write;
use std::ops::RangeInclusive;

/// A satisfying assignment: a domain value no forbidden key claims.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Assignment {
    value: u64,
    arity: usize,
}

impl Assignment {
    /// Create an assignment of `arity` bits.
    pub fn new(value: u64, arity: usize) -> Self {
        Assignment { value, arity }
    }

    /// The assignment as an integer.
    pub fn value(self) -> u64 {
        self.value
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut line = String::with_capacity(2 * self.arity);
        push_bits(&mut line, self.value, self.arity);
        f.write_str(&line)
    }
}

fn push_bits(buf: &mut String, value: u64, arity: usize) {
    for b in (0..arity).rev() {
        buf.push(if (value >> b) & 1 == 1 { '1' } else { '0' });
        if b > 0 {
            buf.push(' ');
        }
    }
}

/// Maximal runs of domain values absent from the sorted keys.
///
/// Runs come in ascending order: the head below the first key, then the
/// gaps between adjacent keys, then the tail above the last key.
pub fn gap_regions(keys: &SortedKeys) -> Vec<RangeInclusive<u64>> {
    let max = keys.domain_max();
    let keys = keys.as_slice();
    let (first, last) = match (keys.first(), keys.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return vec![0..=max],
    };

    let mut regions = vec![];
    if first > 0 {
        regions.push(0..=first - 1);
    }
    for w in keys.windows(2) {
        if w[1] > w[0] + 1 {
            regions.push(w[0] + 1..=w[1] - 1);
        }
    }
    if last < max {
        regions.push(last + 1..=max);
    }
    regions
}

/// The satisfying assignments of a round, as ascending gap regions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    regions: Vec<RangeInclusive<u64>>,
    arity: usize,
}

impl Solution {
    /// Enumerate the gaps of the sorted keys.
    ///
    /// Fails with `DomainExhausted` when the keys cover the whole domain.
    pub fn from_keys(keys: &SortedKeys) -> Result<Self> {
        let regions = gap_regions(keys);
        if regions.is_empty() {
            bail!(ErrorKind::DomainExhausted);
        }
        let solution = Solution {
            regions,
            arity: keys.arity(),
        };
        debug!(
            "{} gap regions hold {} assignments",
            solution.regions.len(),
            solution.n_assignments()
        );
        Ok(solution)
    }

    /// Gap regions, ascending.
    pub fn regions(&self) -> &[RangeInclusive<u64>] {
        &self.regions
    }

    /// Assignment width `C`.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Total number of assignments.
    pub fn n_assignments(&self) -> u64 {
        self.regions.iter().map(|r| r.end() - r.start() + 1).sum()
    }

    /// Assignments in ascending order.
    pub fn assignments(&self) -> impl Iterator<Item = Assignment> + '_ {
        let arity = self.arity;
        self.regions
            .iter()
            .cloned()
            .flatten()
            .map(move |value| Assignment::new(value, arity))
    }

    /// Write one line per assignment, ascending.
    ///
    /// In parallel mode the regions are cut into partitions of `chunk_size`
    /// values; a wave of partitions is rendered on the pool into separate
    /// buffers, which are then flushed in partition order.
    pub fn write<W: Write>(&self, out: &mut W, parallel: bool, chunk_size: u64) -> Result<()> {
        if !parallel {
            let mut line = String::with_capacity(2 * self.arity + 1);
            for region in &self.regions {
                for value in region.clone() {
                    line.clear();
                    push_bits(&mut line, value, self.arity);
                    line.push('\n');
                    out.write_all(line.as_bytes())?;
                }
            }
            return Ok(());
        }

        let wave = 4 * rayon::current_num_threads().max(1);
        let mut parts = partitions(&self.regions, chunk_size.max(1)).peekable();
        while parts.peek().is_some() {
            let batch: Vec<RangeInclusive<u64>> = parts.by_ref().take(wave).collect();
            let rendered: Vec<Result<String>> = batch
                .par_iter()
                .map(|part| self.render(part.clone()))
                .collect();
            for buf in rendered {
                out.write_all(buf?.as_bytes())?;
            }
        }
        Ok(())
    }

    fn render(&self, part: RangeInclusive<u64>) -> Result<String> {
        let n = usize::try_from(part.end() - part.start() + 1).unwrap_or(usize::MAX);
        // an unrepresentable size fails the reservation below as a capacity overflow
        let len = n.checked_mul(2 * self.arity.max(1)).unwrap_or(usize::MAX);
        let mut buf = String::new();
        buf.try_reserve_exact(len)?;
        for value in part {
            push_bits(&mut buf, value, self.arity);
            buf.push('\n');
        }
        Ok(buf)
    }
}

/// Split ascending regions into ascending partitions of at most `chunk` values.
fn partitions(
    regions: &[RangeInclusive<u64>],
    chunk: u64,
) -> impl Iterator<Item = RangeInclusive<u64>> + '_ {
    regions.iter().flat_map(move |region| {
        let (start, end) = (*region.start(), *region.end());
        let n = (end - start) / chunk + 1;
        (0..n).map(move |i| {
            let lo = start + i * chunk;
            let hi = lo.saturating_add(chunk - 1).min(end);
            lo..=hi
        })
    })
}
