//! `gapsat` enumerates the satisfying assignments of a conjunction of
//! fixed-arity clauses by complement enumeration.
//!
//! Every clause rules out exactly one bit pattern over its literal positions:
//! bit `i` is set iff the `i`-th literal is negative. Those forbidden patterns
//! are read as integers, sorted, and every integer of `[0, 2^C)` that no
//! clause forbids is reported as an assignment, in ascending order.
//!
//! ## An example
//!
//! ```rust
//! use gapsat::{solve_batch, Clause, RoundOptions};
//!
//! let clauses = vec![Clause::from_dimacs(&[1, 2]), Clause::from_dimacs(&[-1, 2])];
//! let round = solve_batch(clauses, &RoundOptions::default()).unwrap();
//! let lines: Vec<String> = round
//!     .solution()
//!     .assignments()
//!     .map(|a| a.to_string())
//!     .collect();
//! assert_eq!(lines, vec!["0 1", "1 1"]);
//! ```

/// Common utils
pub mod common;

/// Forbidden rows and keys
pub mod forbidden;

/// Gap enumeration
pub mod gaps;

/// Key sorting
pub mod keys;

/// Round options
pub mod options;

/// Clause batch reader
pub mod parser;

/// Per-round pipeline and the driver loop
pub mod round;

/// Batch validation
pub mod validate;

pub use common::*;
pub use gaps::{Assignment, Solution};
pub use keys::SortedKeys;
pub use options::{RoundOption, RoundOptions};
pub use round::{solve_batch, Driver, Round, Stats};
pub use validate::Batch;
