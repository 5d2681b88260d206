use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clique_reduce::reduce::{process_formula, ReductionData, EXAMPLE_FORMULAS};
use clique_reduce::server::{self, ServerConfig};
use color_eyre::Result;

#[derive(Parser)]
#[command(author, version, about = "SAT to 3-CNF to Clique reduction")]
struct Cli {
    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reduce a single formula and print the result
    Reduce {
        /// Formula, e.g. "(A OR B) AND (NOT A OR C)"
        formula: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Write the output to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Serve the reduction over HTTP
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1", env = "CLIQUE_REDUCE_HOST")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "3000", env = "CLIQUE_REDUCE_PORT")]
        port: u16,
    },

    /// Reduce the built-in example formulas
    Examples,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Human-readable stages with explanations
    Text,
    /// The JSON document served over HTTP
    Json,
    /// Graphviz graph of the Clique stage
    Dot,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for simplelog::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => simplelog::LevelFilter::Off,
            LogLevel::Error => simplelog::LevelFilter::Error,
            LogLevel::Warn => simplelog::LevelFilter::Warn,
            LogLevel::Info => simplelog::LevelFilter::Info,
            LogLevel::Debug => simplelog::LevelFilter::Debug,
            LogLevel::Trace => simplelog::LevelFilter::Trace,
        }
    }
}

fn render(data: &ReductionData, format: Format) -> Result<String> {
    let out = match format {
        Format::Text => data.to_string(),
        Format::Json => serde_json::to_string_pretty(data)? + "\n",
        Format::Dot => data.clique.to_dot()?,
    };
    Ok(out)
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    simplelog::TermLogger::init(
        cli.log_level.into(),
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    match cli.command {
        Commands::Reduce { formula, format, output } => {
            let data = process_formula(&formula)?;
            let rendered = render(&data, format)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    log::info!("Written {:?} output to {}", format, path.display());
                }
                None => print!("{}", rendered),
            }
        }

        Commands::Serve { host, port } => {
            let config = ServerConfig { host, port };
            server::serve(&config).await?;
        }

        Commands::Examples => {
            for (i, formula) in EXAMPLE_FORMULAS.iter().enumerate() {
                if i > 0 {
                    println!("----------------------------------");
                }
                let data = process_formula(formula)?;
                print!("{}", render(&data, Format::Text)?);
            }
        }
    }

    Ok(())
}
