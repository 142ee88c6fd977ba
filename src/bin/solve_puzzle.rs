use anyhow::{Context, Result};
use clap::Parser;
use secp256k1_dlog::puzzle::PuzzleSolver;
use secp256k1_dlog::traits::TracingSink;

/// Search a bounded secp256k1 keyspace for the private key behind a
/// compressed public key.
#[derive(Parser, Debug)]
#[command(name = "solve-puzzle")]
#[command(about = "Baby-step giant-step search over a private-key hex range")]
struct Args {
    /// Target compressed public key (66 hex characters, 02/03 prefix)
    public_key: String,

    /// Start of the range, hex
    start: String,

    /// End of the range (inclusive), hex
    end: String,

    /// Expected P2PKH address, compared against the derived one if given
    #[arg(long)]
    address: Option<String>,

    /// Number of scan workers (1 = sequential)
    #[arg(long, default_value_t = 1)]
    workers: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let solver = PuzzleSolver::with_workers(args.workers);
    let report = solver
        .solve(
            &args.public_key,
            args.address.as_deref(),
            &args.start,
            &args.end,
            &TracingSink,
        )
        .context("puzzle solve failed")?;

    match &report.solution {
        Some(solution) => {
            println!("Private key found: {}", solution.private_key_hex);
            println!("WIF: {}", solution.wif);
            println!("Public address: {}", solution.address);
            if solution.address_matches == Some(false) {
                println!("WARNING: derived address does not match the target address");
            }
        }
        None => println!("Private key not found."),
    }
    println!("Total time: {:.2} seconds", report.elapsed_secs);
    println!(
        "Group operations: {} ({:.0}/s)",
        report.operations, report.operations_per_sec
    );
    Ok(())
}
