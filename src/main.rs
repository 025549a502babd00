use gapsat::errors::*;
use gapsat::{Driver, RoundOption, RoundOptions};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "gapsat",
    about = "Enumerate satisfying assignments of fixed-arity clause batches"
)]
struct Opt {
    /// Input file, one clause per line, blank line between batches [default: stdin]
    #[structopt(parse(from_os_str))]
    input: Option<PathBuf>,

    /// Run every stage on the calling thread
    #[structopt(long)]
    sequential: bool,

    /// Number of worker threads
    #[structopt(short, long)]
    threads: Option<usize>,

    /// Largest accepted clause arity
    #[structopt(long, default_value = "63")]
    max_arity: u32,

    /// Assignments rendered per parallel output partition
    #[structopt(long, default_value = "4096")]
    chunk_size: u64,

    /// Print an input banner before each batch
    #[structopt(long)]
    prompt: bool,

    /// Ask whether to continue after each round
    #[structopt(long)]
    confirm: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,

    /// Disable logging
    #[structopt(short, long)]
    quiet: bool,
}

impl Opt {
    fn level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Off;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn round_options(&self) -> RoundOptions {
        let mut options = RoundOptions::default();
        options.option(RoundOption::Parallel(!self.sequential));
        options.option(RoundOption::MaxArity(self.max_arity));
        options.option(RoundOption::ChunkSize(self.chunk_size));
        options.option(RoundOption::Prompt(self.prompt));
        options.option(RoundOption::Confirm(self.confirm));
        options
    }
}

fn run(opt: &Opt) -> Result<()> {
    if let Some(threads) = opt.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    let stdout = io::stdout();
    let out = stdout.lock();
    let stats = match &opt.input {
        Some(path) => {
            let file = File::open(path).chain_err(|| format!("cannot open {}", path.display()))?;
            Driver::new(BufReader::new(file), out, opt.round_options()).run()?
        }
        None => {
            let stdin = io::stdin();
            let input = stdin.lock();
            Driver::new(input, out, opt.round_options()).run()?
        }
    };
    log::debug!("{:?}", stats);
    Ok(())
}

fn main() {
    let opt = Opt::from_args();
    TermLogger::init(
        opt.level(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .ok();

    if let Err(e) = run(&opt) {
        eprintln!("Error: {}", e);
        for cause in e.iter().skip(1) {
            eprintln!("caused by: {}", cause);
        }
        std::process::exit(1);
    }
}
