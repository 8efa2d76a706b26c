//! Campus console entry point.
//!
//! # Responsibility
//! - Resolve configuration from flags and environment.
//! - Open the database, seed demo rows and hand over to the console menu.

use campus_core::db::{open_db, open_db_in_memory};
use campus_core::{core_version, init_logging, seed_demo_data, AppConfig};
use clap::Parser;
use log::info;
use std::error::Error;
use std::io;
use std::path::PathBuf;

mod menu;

#[derive(Debug, Parser)]
#[command(name = "campus", version)]
#[command(about = "Campus - console manager for students, instructors and courses", long_about = None)]
struct Cli {
    /// SQLite database file (overrides CAMPUS_DB_PATH)
    #[arg(long, value_name = "PATH", conflicts_with = "in_memory")]
    db: Option<PathBuf>,

    /// Use a throwaway in-memory database
    #[arg(long)]
    in_memory: bool,

    /// Log level: trace|debug|info|warn|error (overrides CAMPUS_LOG_LEVEL)
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files (overrides CAMPUS_LOG_DIR)
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Skip inserting the demo students, instructors and courses
    #[arg(long)]
    no_seed: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = AppConfig::global()?;

    let log_dir = cli.log_dir.as_ref().or(config.log_dir.as_ref());
    if let Some(dir) = log_dir {
        let level = cli.log_level.as_deref().unwrap_or(config.log_level);
        let dir = dir.to_str().ok_or("log directory must be valid UTF-8")?;
        init_logging(level, dir)?;
    }
    info!(
        "event=cli_start module=cli status=start version={} in_memory={}",
        core_version(),
        cli.in_memory
    );

    let conn = if cli.in_memory {
        open_db_in_memory()?
    } else {
        let path = cli.db.as_ref().unwrap_or(&config.db_path);
        println!("Using database {}", path.display());
        open_db(path)?
    };

    if !cli.no_seed {
        let summary = seed_demo_data(&conn)?;
        info!(
            "event=cli_seed module=cli status=ok students={} instructors={} courses={}",
            summary.students, summary.instructors, summary.courses
        );
    }

    let stdin = io::stdin();
    let mut console = menu::Console::new(&conn, stdin.lock(), io::stdout());
    console.run()?;
    info!("event=cli_exit module=cli status=ok");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn flags_parse_into_overrides() {
        let cli = Cli::try_parse_from([
            "campus",
            "--db",
            "/tmp/uni.sqlite3",
            "--log-level",
            "warn",
            "--no-seed",
        ])
        .expect("valid flags");

        assert_eq!(cli.db.as_deref(), Some(std::path::Path::new("/tmp/uni.sqlite3")));
        assert_eq!(cli.log_level.as_deref(), Some("warn"));
        assert!(cli.no_seed);
        assert!(!cli.in_memory);
    }

    #[test]
    fn db_path_conflicts_with_in_memory() {
        let result = Cli::try_parse_from(["campus", "--db", "x.sqlite3", "--in-memory"]);
        assert!(result.is_err());
    }
}
