use clap::{Parser, Subcommand};
use dhmm::baum_welch::BaumWelchParams;
use dhmm::cli;
use dhmm::error::HmmError;

#[derive(Parser, Debug)]
#[clap(author, about, version)]
struct Opts {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a random model
    Init {
        /// Number of hidden states
        #[clap(short = 'n')]
        n_states: usize,
        /// Number of observation symbols
        #[clap(short = 'm')]
        n_symbols: usize,
        /// Seed of the random initialization
        #[clap(short, long, default_value_t = 0)]
        seed: u64,
        /// Output model json filename
        #[clap(short, long)]
        output: std::path::PathBuf,
    },
    /// Print the most probable state path of each observation sequence
    Decode {
        /// Model json filename
        #[clap(short, long)]
        input: std::path::PathBuf,
        /// Observation sequences filename (one sequence per line)
        observations: std::path::PathBuf,
    },
    /// Print the log-likelihood of each observation sequence
    Score {
        /// Model json filename
        #[clap(short, long)]
        input: std::path::PathBuf,
        /// Observation sequences filename (one sequence per line)
        observations: std::path::PathBuf,
    },
    /// Re-estimate transition/emission by Baum-Welch on the first sequence
    Train {
        /// Initial model json filename
        #[clap(short, long)]
        input: std::path::PathBuf,
        /// Output model json filename
        #[clap(short, long)]
        output: std::path::PathBuf,
        /// Number of iterations
        #[clap(short = 'n', default_value_t = 100)]
        n_iter: usize,
        /// Stop when the log-likelihood improves less than this.
        /// If not specified, it always runs n_iter iterations.
        #[clap(short, long)]
        tolerance: Option<f64>,
        /// Observation sequences filename (one sequence per line)
        observations: std::path::PathBuf,
    },
    /// Sample an observation sequence from the model
    Sample {
        /// Model json filename
        #[clap(short, long)]
        input: std::path::PathBuf,
        /// Length of the sequence
        #[clap(short, long)]
        length: usize,
        /// Seed of the sampling
        #[clap(short, long, default_value_t = 0)]
        seed: u64,
    },
}

fn main() -> Result<(), HmmError> {
    env_logger::init();
    let opts: Opts = Opts::parse();
    println!("# started_at={}", chrono::Local::now());
    println!("# opts={:?}", opts);
    match &opts.command {
        Commands::Init {
            n_states,
            n_symbols,
            seed,
            output,
        } => cli::init(*n_states, *n_symbols, *seed, output)?,
        Commands::Decode {
            input,
            observations,
        } => cli::decode(input, observations)?,
        Commands::Score {
            input,
            observations,
        } => cli::score(input, observations)?,
        Commands::Train {
            input,
            output,
            n_iter,
            tolerance,
            observations,
        } => {
            let params = BaumWelchParams {
                n_iter: *n_iter,
                tolerance: *tolerance,
            };
            cli::train(input, observations, &params, output)?
        }
        Commands::Sample {
            input,
            length,
            seed,
        } => cli::sample(input, *length, *seed)?,
    }
    println!("# finished_at={}", chrono::Local::now());
    Ok(())
}
