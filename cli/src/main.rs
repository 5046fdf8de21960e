use clap::{ArgAction, Parser};
use level_json::level::Level;
use std::{fs, path::PathBuf, process::ExitCode};

/// Check a commented JSON document, or load it as a level.
#[derive(Debug, Parser)]
#[command(name = "level-json", version)]
struct Cli {
    /// Document to read
    path: PathBuf,

    /// Map the document to a level and print a summary of it
    #[arg(long)]
    level: bool,

    /// More logging on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn check(cli: &Cli) -> Result<String, String> {
    if cli.level {
        let level = Level::load(&cli.path).map_err(|e| e.to_string())?;

        return Ok(format!(
            "{}: destroy {} of {} bricks, {} idols",
            level.name,
            level.destroy,
            level.bricks.len(),
            level.idols.len()
        ));
    }

    let json = fs::read_to_string(&cli.path)
        .map_err(|e| format!("Unable to open file {}: {}", cli.path.display(), e))?;

    let value = level_json::parse(&json).map_err(|e| e.to_string())?;

    Ok(format!(
        "{}: {} ending on line {}",
        cli.path.display(),
        value.value_type(),
        value.line()
    ))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let max_level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .init();

    match check(&cli) {
        Ok(summary) => {
            println!("{}", summary);
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}
