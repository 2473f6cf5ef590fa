//! gobatis-gen CLI - generate gobatis Go code from a live database schema.

use clap::{Parser, Subcommand};
use gobatis_gen::{GenError, GenerationReport, Generator, GeneratorConfig};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, Level};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

/// Config file read when `--config` is not given.
const DEFAULT_CONFIG: &str = "gobatis-gen.yaml";

#[derive(Parser)]
#[command(name = "gobatis-gen")]
#[command(about = "Generate Go models, DAO interfaces, SQL and gobatis mappers from a database schema")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file [default: gobatis-gen.yaml, used only if present]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output JSON report to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate artifacts for the selected tables
    Generate(GenerateArgs),

    /// Print version information
    Version,
}

#[derive(clap::Args, Default)]
struct GenerateArgs {
    /// Override database driver (mysql, postgres, sqlite)
    #[arg(short, long)]
    driver: Option<String>,

    /// Override connection string
    #[arg(long)]
    dsn: Option<String>,

    /// Override PostgreSQL schema
    #[arg(long)]
    schema: Option<String>,

    /// Override output directory
    #[arg(short, long)]
    output: Option<String>,

    /// Override Go package name of the record types
    #[arg(short, long)]
    package: Option<String>,

    /// Tables to include (comma-separated)
    #[arg(long, value_delimiter = ',')]
    tables: Option<Vec<String>>,

    /// Tables to exclude (comma-separated, `*` entries match by substring)
    #[arg(long, value_delimiter = ',')]
    exclude: Option<Vec<String>>,

    /// Required table-name prefix, stripped from type names
    #[arg(long)]
    prefix: Option<String>,

    /// Generate DAO interfaces and mapper XML
    #[arg(long)]
    dao: Option<bool>,

    /// Generate SQL statement files
    #[arg(long)]
    sql: Option<bool>,

    /// Add json tags to record fields
    #[arg(long)]
    json_tag: Option<bool>,

    /// Generate the Example method family
    #[arg(long)]
    example: Option<bool>,

    /// Mapper namespace template, `{struct}` is replaced by the type name
    #[arg(long)]
    namespace_format: Option<String>,

    /// Dry run: list the files that would be written
    #[arg(long)]
    dry_run: bool,
}

impl GenerateArgs {
    fn apply(self, config: &mut GeneratorConfig) {
        if let Some(driver) = self.driver {
            config.database.driver = driver;
        }
        if let Some(dsn) = self.dsn {
            config.database.dsn = dsn;
        }
        if let Some(schema) = self.schema {
            config.database.schema = Some(schema);
        }
        if let Some(dir) = self.output {
            config.output.dir = dir;
        }
        if let Some(package) = self.package {
            config.output.package = package;
        }
        if let Some(tables) = self.tables {
            config.tables.include = tables;
        }
        if let Some(exclude) = self.exclude {
            config.tables.exclude = exclude;
        }
        if let Some(prefix) = self.prefix {
            config.tables.prefix = prefix;
        }
        if let Some(dao) = self.dao {
            config.options.generate_dao = dao;
        }
        if let Some(sql) = self.sql {
            config.options.generate_sql = sql;
        }
        if let Some(json_tag) = self.json_tag {
            config.options.json_tag = json_tag;
        }
        if let Some(example) = self.example {
            config.options.generate_example = example;
        }
        if let Some(format) = self.namespace_format {
            config.options.namespace_format = format;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<(), GenError> {
    let cli = Cli::parse();

    let args = match cli.command {
        Commands::Version => {
            println!("gobatis-gen {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Commands::Generate(args) => args,
    };

    setup_logging(&cli.verbosity, &cli.log_format);

    let mut config = load_config(cli.config.as_deref())?;
    let dry_run = args.dry_run;
    args.apply(&mut config);

    let generator = Generator::new(config)?.with_dry_run(dry_run);
    let report = generator.run().await?;

    if cli.output_json {
        println!("{}", report.to_json()?);
    } else if report.dry_run {
        print_plan(&report);
    }

    report.into_result().map(|_| ())
}

/// Load the explicit config file, or the default one when it exists.
fn load_config(path: Option<&Path>) -> Result<GeneratorConfig, GenError> {
    match path {
        Some(path) => {
            let config = GeneratorConfig::load(path)?;
            info!("Loaded configuration from {:?}", path);
            Ok(config)
        }
        None if Path::new(DEFAULT_CONFIG).exists() => {
            let config = GeneratorConfig::load(DEFAULT_CONFIG)?;
            info!("Loaded configuration from {}", DEFAULT_CONFIG);
            Ok(config)
        }
        None => Ok(GeneratorConfig::default()),
    }
}

fn print_plan(report: &GenerationReport) {
    println!(
        "Dry run: {} tables, {} files would be written",
        report.tables_total,
        report.files.len()
    );
    for file in &report.files {
        println!("  {}", file);
    }
}

fn setup_logging(verbosity: &str, format: &str) {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // RUST_LOG wins over --verbosity when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
