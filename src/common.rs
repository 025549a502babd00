use std::fmt;
use std::ops::Not;

/// A variable, identified by its positive DIMACS number.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct Var(u32);

impl Var {
    /// Returns the DIMACS number of the variable.
    pub fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A literal, stored as a signed DIMACS integer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Lit(i32);

impl Lit {
    /// Create lit from its DIMACS value.
    ///
    /// Zero is the clause terminator and `i32::MIN` has no negation,
    /// so neither is a literal.
    pub fn from_dimacs(value: i32) -> Option<Lit> {
        if value == 0 || value == i32::MIN {
            None
        } else {
            Some(Lit(value))
        }
    }

    /// Returns the DIMACS value of the literal.
    pub fn to_dimacs(self) -> i32 {
        self.0
    }

    /// Returns true if literal is signed (i.e. a negated literal).
    pub fn sign(self) -> bool {
        self.0 < 0
    }

    /// Returns the var corresponding to the literal.
    pub fn var(self) -> Var {
        Var(self.0.unsigned_abs())
    }
}

impl Not for Lit {
    type Output = Self;

    /// Returns x for -x and -x for x.
    fn not(self) -> Self {
        Lit(-self.0)
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A Clause.
#[derive(Clone, Debug, PartialEq)]
pub struct Clause {
    /// Literals in input order.
    pub lits: Vec<Lit>,
}

impl Clause {
    /// Create a clause from DIMACS values, dropping zeros.
    pub fn from_dimacs(values: &[i32]) -> Self {
        Clause {
            lits: values.iter().copied().filter_map(Lit::from_dimacs).collect(),
        }
    }

    /// Number of literals in the clause.
    pub fn arity(&self) -> usize {
        self.lits.len()
    }
}

/// Errors module.
#[allow(missing_docs)]
pub mod errors {
    error_chain::error_chain! {
        foreign_links {
            Io(std::io::Error);
            Alloc(std::collections::TryReserveError);
            ThreadPool(rayon::ThreadPoolBuildError);
        }

        errors {
            EmptyBatch {
                description("empty batch")
                display("Invalid input, no clauses given")
            }
            EmptyClause(clause: usize) {
                description("empty clause")
                display("Invalid input, clause ({}) has no literals", clause)
            }
            ArityMismatch(first_arity: usize, clause: usize, arity: usize) {
                description("arity mismatch")
                display(
                    "Invalid input, clause (1) has {} literals but clause ({}) has {}",
                    first_arity, clause, arity
                )
            }
            ArityTooLarge(arity: usize, max: u32) {
                description("arity too large")
                display("Invalid input, arity {} exceeds the supported maximum of {}", arity, max)
            }
            DuplicateLiteral(lit: i32, clause: usize) {
                description("duplicate literal")
                display("Invalid input, clause ({}) repeats literal {}", clause, lit)
            }
            ClauseContradiction(var: u32, clause: usize) {
                description("clause contradiction")
                display("Unsatisfiable, clause ({}) contains both {} and -{}", clause, var, var)
            }
            DomainExhausted {
                description("domain exhausted")
                display("Unsatisfiable, no head, gap or tail in the forbidden keys")
            }
        }
    }

    impl ErrorKind {
        /// Returns true for failures scoped to a single round.
        ///
        /// The driver reports these and reads the next batch; anything else
        /// ends the process.
        pub fn is_round_level(&self) -> bool {
            matches!(
                self,
                ErrorKind::EmptyBatch
                    | ErrorKind::EmptyClause(..)
                    | ErrorKind::ArityMismatch(..)
                    | ErrorKind::ArityTooLarge(..)
                    | ErrorKind::DuplicateLiteral(..)
                    | ErrorKind::ClauseContradiction(..)
                    | ErrorKind::DomainExhausted
            )
        }
    }
}
