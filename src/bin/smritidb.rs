//! SmritiDB Console
//!
//! Interactive (or `--exec`) front end for a SmritiDB store.

use std::io::{self, BufRead, Write};
use std::process;

use clap::Parser;
use serde_json::json;
use smritidb::command::{parse_command, USAGE};
use smritidb::config::{Config, SelectMode, SyncMode};
use smritidb::Store;
use tracing_subscriber::{fmt, EnvFilter};

/// SmritiDB Console
#[derive(Parser, Debug)]
#[command(name = "smritidb")]
#[command(about = "Minimal persistent record store: a directory per table, a file per record")]
#[command(version)]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = "./my_database")]
    data_dir: String,

    /// fsync every record, schema and metadata write
    #[arg(long)]
    sync: bool,

    /// Log SELECT conditions without applying them
    #[arg(long)]
    unfiltered_select: bool,

    /// Trust the metadata file instead of rescanning table directories
    #[arg(long)]
    no_rescan: bool,

    /// Execute a command non-interactively (can be repeated)
    #[arg(short, long = "exec")]
    exec: Vec<String>,

    /// Print results as JSON
    #[arg(short, long)]
    json: bool,
}

fn main() {
    // Logs go to stderr so they never mix with results
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,smritidb=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .data_dir(&args.data_dir)
        .sync_mode(if args.sync {
            SyncMode::Always
        } else {
            SyncMode::OsBuffered
        })
        .select_mode(if args.unfiltered_select {
            SelectMode::Unfiltered
        } else {
            SelectMode::Filtered
        })
        .rescan_on_open(!args.no_rescan)
        .build();

    let store = match Store::open(config) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            process::exit(1);
        }
    };

    let ok = if args.exec.is_empty() {
        run_repl(&store, args.json)
    } else {
        args.exec
            .iter()
            .fold(true, |ok, line| run_line(&store, line, args.json) && ok)
    };

    if let Err(e) = store.close() {
        tracing::error!("Failed to flush metadata: {}", e);
        process::exit(1);
    }

    if !ok {
        process::exit(1);
    }
}

/// Read commands from stdin until `exit` or EOF
///
/// Returns false if reading stdin failed.
fn run_repl(store: &Store, json: bool) -> bool {
    println!(
        "SmritiDB v{} (type 'exit' to quit, 'help' for commands)",
        smritidb::VERSION
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("smritidb> ");
        let _ = io::stdout().flush();

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                tracing::error!("Failed to read input: {}", e);
                return false;
            }
            None => {
                println!();
                return true;
            }
        };

        match line.trim() {
            "" => continue,
            "exit" | "quit" => return true,
            "help" => println!("{}", USAGE),
            command => {
                run_line(store, command, json);
            }
        }
    }
}

/// Parse, execute and print one command. Returns whether it succeeded.
fn run_line(store: &Store, line: &str, json: bool) -> bool {
    let result = parse_command(line).and_then(|command| store.execute(command));

    match result {
        Ok(outcome) => {
            if json {
                println!("{}", outcome.to_json());
            } else {
                println!("{}", outcome);
            }
            true
        }
        Err(e) => {
            if json {
                println!("{}", json!({ "error": e.to_string() }));
            } else {
                println!("Error: {}", e);
            }
            false
        }
    }
}
