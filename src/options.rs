/// Largest arity whose domain `[0, 2^C)` fits in a `u64` key.
pub const MAX_ARITY: u32 = 63;

/// Round options.
#[derive(Clone, Debug)]
pub struct RoundOptions {
    /// Build rows, map keys, sort and render gaps on the rayon pool.
    pub parallel: bool,
    /// Largest accepted clause arity, capped at `MAX_ARITY`.
    pub max_arity: u32,
    /// Number of assignments rendered per parallel output partition.
    pub chunk_size: u64,
    /// Print an input banner before each batch.
    pub prompt: bool,
    /// Ask whether to continue after each round.
    pub confirm: bool,
}

impl Default for RoundOptions {
    fn default() -> Self {
        RoundOptions {
            parallel: true,
            max_arity: MAX_ARITY,
            chunk_size: 4096,
            prompt: false,
            confirm: false,
        }
    }
}

/// Different round options.
pub enum RoundOption {
    /// Toggle parallel stages.
    Parallel(bool),
    /// Arity ceiling.
    MaxArity(u32),
    /// Parallel output partition size.
    ChunkSize(u64),
    /// Input banner.
    Prompt(bool),
    /// Continuation prompt.
    Confirm(bool),
}

impl RoundOptions {
    /// Add round option.
    pub fn option(&mut self, option: RoundOption) {
        match option {
            RoundOption::Parallel(v) => self.parallel = v,
            RoundOption::MaxArity(v) => self.max_arity = v.min(MAX_ARITY),
            RoundOption::ChunkSize(v) => self.chunk_size = v.max(1),
            RoundOption::Prompt(v) => self.prompt = v,
            RoundOption::Confirm(v) => self.confirm = v,
        }
    }

    /// Sequential options, mostly useful in tests.
    pub fn sequential() -> Self {
        let mut options = RoundOptions::default();
        options.option(RoundOption::Parallel(false));
        options
    }
}
