//! pagestore shell
//!
//! Line-oriented prompt over a single table file.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use pagestore::{Config, Input, MetaCommand, Outcome, Table};
use tracing_subscriber::{fmt, EnvFilter};

/// pagestore shell
#[derive(Parser, Debug)]
#[command(name = "pagestore")]
#[command(about = "Single-table paged row store")]
#[command(version)]
struct Args {
    /// Database file (created if missing)
    db_file: PathBuf,

    /// Maximum number of pages in the table file
    #[arg(short, long, default_value = "100")]
    max_pages: usize,

    /// Skip fsync when closing the table
    #[arg(long)]
    no_sync: bool,
}

fn main() {
    // Logs go to stderr; stdout carries only the prompt protocol
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = match Config::builder()
        .path(&args.db_file)
        .max_pages(args.max_pages)
        .sync_on_close(!args.no_sync)
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let table = match Table::open(config) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("Failed to open table: {}", e);
            eprintln!("Unable to open file: {}", e);
            process::exit(1);
        }
    };

    tracing::info!("pagestore v{} on {}", pagestore::VERSION, args.db_file.display());

    if let Err(e) = run(table) {
        tracing::error!("Shell stopped: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Prompt loop; returns after `.exit` or end of input with the table closed
fn run(mut table: Table) -> pagestore::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut line = String::new();

    loop {
        write!(stdout, "db > ")?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim_end_matches(['\n', '\r']);

        match Input::parse(input) {
            Ok(Input::Meta(MetaCommand::Exit)) => break,
            Ok(Input::Meta(MetaCommand::Unrecognized(command))) => {
                writeln!(stdout, "Unrecognized command '{}'.", command)?;
            }
            Ok(Input::Statement(statement)) => match table.execute(statement) {
                Ok(Outcome::Inserted) => writeln!(stdout, "Executed.")?,
                Ok(Outcome::Selected(rows)) => {
                    for row in &rows {
                        writeln!(stdout, "{}", row)?;
                    }
                    writeln!(stdout, "Executed.")?;
                }
                Err(e) if !e.is_fatal() => writeln!(stdout, "Error: {}", e)?,
                Err(e) => return Err(e),
            },
            // Preparation errors carry their own user-facing message
            Err(e) => writeln!(stdout, "{}", e)?,
        }
    }

    table.close()?;
    Ok(())
}
