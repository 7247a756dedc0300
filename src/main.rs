use atm_engine::session::{Outcome, Session, SessionOptions};
use atm_engine::{input, output};

use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::io;
use std::path::PathBuf;

/// Single-user, file-backed ATM.
///
/// Loads an account list, serves one interactive teller session on the
/// terminal, and writes the sorted account list back out.
#[derive(Parser)]
#[command(name = "atm", version)]
struct Cli {
    /// Account file to load at startup
    #[arg(long, default_value = "accounts_list.txt")]
    accounts: PathBuf,

    /// Where to write the sorted account list after the session
    #[arg(long, default_value = "output_list.txt")]
    output: PathBuf,

    /// Apply negative deposit amounts instead of rejecting them
    #[arg(long)]
    allow_negative_deposit: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let accounts_file = File::open(&cli.accounts)
        .with_context(|| format!("opening account file {}", cli.accounts.display()))?;
    let mut bank = input::load(accounts_file)
        .with_context(|| format!("loading account file {}", cli.accounts.display()))?;
    bank.sort_accounts();

    // Show the full account list before prompting.
    print!("{bank}");

    let stdin = io::stdin();
    let mut session = Session::new(
        stdin.lock(),
        io::stdout(),
        SessionOptions {
            allow_negative_deposit: cli.allow_negative_deposit,
        },
    );
    let outcome = session.run(&mut bank)?;

    // The output file is only opened once the session has completed, so an
    // aborted run never leaves a partial file behind. Quitting at the
    // identifier prompt skips persistence entirely.
    if outcome == Outcome::Completed {
        bank.sort_accounts();
        let output_file = File::create(&cli.output)
            .with_context(|| format!("creating output file {}", cli.output.display()))?;
        output::write(output_file, &bank)
            .with_context(|| format!("writing output file {}", cli.output.display()))?;
    }

    Ok(())
}
