mod replay;

use anyhow::{Context, anyhow};
use cartographer::config::{Config, LogFormat, SERVICE_NAME};
use cartographer::query::Statement;
use cartographer::{Args, Field, Repository, Resolver};
use clap::{Parser, Subcommand};
use replay::ReplayDriver;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cartographer", version, arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the statement and parameters a field lookup would run
    Explain(LookupArgs),
    /// Resolve a field against recorded store rows
    Replay(ReplayArgs),
}

#[derive(Parser)]
struct LookupArgs {
    /// Field name, e.g. `country` or `cities`
    #[arg(long)]
    field: String,

    /// Arguments as a JSON object (e.g. '{"code":"34"}')
    #[arg(long, default_value = "{}")]
    args: String,
}

#[derive(Parser)]
struct ReplayArgs {
    #[command(flatten)]
    lookup: LookupArgs,

    /// JSON array of rows the store answers with
    #[arg(long)]
    records: PathBuf,
}

impl LookupArgs {
    fn field_and_args(&self) -> anyhow::Result<(Field, Args)> {
        let field =
            Field::parse(&self.field).ok_or_else(|| anyhow!("unknown field {:?}", self.field))?;
        let args: Args =
            serde_json::from_str(&self.args).context("args must be a JSON object")?;
        Ok((field, args))
    }
}

fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_new(&config.logger.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);
    match config.logger.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.compact().init(),
    }
}

fn explain(args: LookupArgs) -> anyhow::Result<()> {
    let (field, args) = args.field_and_args()?;
    let query = field.query(&args)?;
    let statement = Statement::render(field.lookup, &query);

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &statement)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

fn replay(args: ReplayArgs) -> anyhow::Result<()> {
    let (field, lookup_args) = args.lookup.field_and_args()?;
    let driver = ReplayDriver::from_path(&args.records)?;
    let resolver = Resolver::new(Repository::new(driver));

    match resolver.resolve(field, &lookup_args) {
        Ok(value) => {
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &value)?;
            stdout.write_all(b"\n")?;
            Ok(())
        }
        Err(err) => {
            let kind = err.kind();
            Err(anyhow!("{} ({} {}): {err}", field.label, kind.status_code(), kind))
        }
    }
}

fn main() {
    let config = Config::from_env();
    init_tracing(&config);
    info!(
        service = SERVICE_NAME,
        version = env!("CARGO_PKG_VERSION"),
        store = %config.store.address,
        "starting"
    );

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Explain(args) => explain(args),
        Commands::Replay(args) => replay(args),
    };

    if let Err(err) = result {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}
