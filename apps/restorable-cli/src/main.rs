use anyhow::Context;
use clap::{Parser, Subcommand};
use restorable_core::{Handle, make_handle, make_restorable, make_restorable_from};
use restorable_record::{Record, SaveLog, load_record};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "restorable-cli", about = "Drive restorable values from the command line")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk through wrapping, reusing, erasing and restoring records
    Demo,
    /// Wrap one record, rename it, and optionally restore it
    Edit {
        /// Record id
        #[arg(short, long, default_value = "1")]
        id: u64,
        /// Initial record name
        #[arg(short, long, default_value = "alpha")]
        name: String,
        /// Name to apply to the working copy
        #[arg(short, long)]
        rename: String,
        /// Restore the original after renaming
        #[arg(long)]
        restore: bool,
    },
    /// Parse a record from JSON and show it through an erased handle
    Load {
        /// Record JSON, e.g. {"id": 3, "name": "gamma"}
        #[arg(short, long)]
        json: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Demo => run_demo()?,
        Commands::Edit {
            id,
            name,
            rename,
            restore,
        } => {
            let mut r = make_restorable(Record::new(id, name))
                .with_context(|| format!("saving record #{id}"))?;
            println!("before: {} changed={}", r.render_text(), r.is_changed());

            r.value_mut().name = rename;
            println!("after:  {} changed={}", r.render_text(), r.is_changed());

            if restore {
                r.restore();
                println!("restored: {} changed={}", r.render_text(), r.is_changed());
            }
        }
        Commands::Load { json } => {
            let record = Record::from_json(&json).context("parsing --json")?;
            let normalized = record.to_json()?;
            let handle: Handle = make_handle(record).context("saving loaded record")?;
            println!("loaded: {handle}");
            println!("json:   {normalized}");
        }
    }

    Ok(())
}

fn run_demo() -> anyhow::Result<()> {
    let log = SaveLog::new();

    let mut s = Record::new(1, "alpha").with_log(&log);
    let r1 = make_restorable_from(&s)?;
    println!("r1 = {}", r1.render_text());

    s = Record::new(2, "beta").with_log(&log);
    let r2 = make_restorable_from(&s)?;
    println!("r2 = {}\n", r2.render_text());

    // Reusing `s` must not reach back into r1.
    println!("r1 = {}", r1.render_text());
    println!("r2 = {}\n", r2.render_text());

    let r3 = load_record(3, "gamma", &log)?;
    println!("r3 = {r3}\n");

    let cs = Record::new(4, "delta").with_log(&log);
    let mut r4 = make_restorable(cs)?;
    println!("r4 = {} changed={}", r4.render_text(), r4.is_changed());

    r4.value_mut().name = "delta (upd.)".to_string();
    println!("r4 = {} changed={}", r4.render_text(), r4.is_changed());

    r4.restore();
    println!("r4 = {} changed={}\n", r4.render_text(), r4.is_changed());

    println!("saves: {}", log.len());
    for entry in log.entries() {
        println!("  {entry}");
    }

    Ok(())
}
