use std::io::Write;
use std::str::FromStr;

use anyhow::Context;
use clap::Parser;
use vigil::config::{Loader, merge_override};
use vigil::counter::Counter;
use vigil::timestamp::UnixTimestamp;
use vigil_agent::config::AgentConfig;
use vigil_agent::{display, init_logger};

const BINARY: &str = env!("CARGO_BIN_NAME");

/// Main agent function.
///
/// The steps are:
/// - parse the CLI
/// - parse the config file
/// - apply the settings from CLI and config file
/// - anchor the counter and refresh the display until stopped (e.g. by Ctrl+C)
///
/// About errors: we use `anyhow::Result` and `context` instead of `expect` to get
/// nicer error messages (`expect` prints errors with `Debug`).
fn main() -> anyhow::Result<()> {
    init_logger();

    let mut args = cli::Cli::parse();
    print_welcome();

    // Run CLI commands that run before the config is loaded.
    if run_command_no_config(&args)? {
        return Ok(());
    }

    let config = load_config(&args).context("could not load config file")?;
    let start = UnixTimestamp::new(config.start_timestamp)
        .with_context(|| format!("invalid start_timestamp in config: {}", config.start_timestamp))?;
    let counter = Counter::new(start);

    // run the provided command, the default is Run
    match args.command.take().unwrap_or(cli::Command::Run) {
        cli::Command::Run => run_display_loop(counter, &config),
        cli::Command::Once => {
            println!("{}", display::render_header(&config.title, counter.start()));
            println!("{}", display::render_counter_line(&counter.elapsed_now()));
            println!();
            print!("{}", display::render_organizations(&config.organizations));
            Ok(())
        }
        _ => unreachable!("every command should have been handled at this point"),
    }
}

/// Prints a short welcome message.
fn print_welcome() {
    // It is useful to have the precise version of the agent in the logs.
    log::info!("Starting counter agent '{BINARY}' v{}", env!("CARGO_PKG_VERSION"));
}

/// If selected by the CLI user, runs a command that does not need the config file.
///
/// Returns `true` if a command was run (in which case you probably should stop here).
fn run_command_no_config(args: &cli::Cli) -> anyhow::Result<bool> {
    use cli::{Command, ConfigArgs, ConfigCommand};

    match &args.command {
        Some(Command::Config(ConfigArgs {
            command: ConfigCommand::Regen,
        })) => {
            // (re)generate the default config
            let file = &args.common.config;
            let content = toml::ser::to_string_pretty(&AgentConfig::default())
                .context("could not serialize the default configuration")?;
            std::fs::write(file, content)?;
            log::info!("Default configuration file written to: {file}");
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Loads the agent configuration, applying CLI overrides on top of the file.
fn load_config(args: &cli::Cli) -> anyhow::Result<AgentConfig> {
    let config_override = parse_config_overrides(&args.common).context("invalid config overrides")?;

    let mut loader = Loader::parse_file(&args.common.config).with_override(config_override);
    if !args.common.no_default_config {
        loader = loader.or_default(default_config_table, true);
    }
    let table = loader.load()?;
    let mut config: AgentConfig = table.try_into().context("invalid config values")?;

    // cli arguments win over the config file
    if let Some(interval) = args.common.interval {
        config.refresh_interval = interval;
    }
    Ok(config)
}

/// Generates the default configuration, to be written on the first run.
fn default_config_table() -> anyhow::Result<toml::Table> {
    Ok(toml::Table::try_from(AgentConfig::default())?)
}

/// Parses the config overrides provided on the command line, and merges them into a single table.
fn parse_config_overrides(common: &cli::CommonArgs) -> anyhow::Result<toml::Table> {
    let mut config_override = toml::Table::new();
    if let Some(overrides) = &common.config_override {
        for o in overrides {
            let parsed_override =
                toml::Table::from_str(o).with_context(|| format!("config override is not a valid TOML table: {o}"))?;
            merge_override(&mut config_override, parsed_override);
        }
    }
    Ok(config_override)
}

/// Renders the header once, then refreshes the counter line on a fixed
/// interval until the process is interrupted.
fn run_display_loop(counter: Counter, config: &AgentConfig) -> anyhow::Result<()> {
    println!("{}", display::render_header(&config.title, counter.start()));
    print!("{}", display::render_organizations(&config.organizations));
    println!();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the display runtime")?;

    runtime.block_on(async {
        let mut ticks = tokio::time::interval(config.refresh_interval);
        ticks.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                _ = ticks.tick() => {
                    let line = display::render_counter_line(&counter.elapsed_now());
                    print!("\r\x1b[K{line}");
                    std::io::stdout().flush()?;
                }
                res = &mut ctrl_c => {
                    res.context("failed to listen for the shutdown signal")?;
                    println!();
                    log::info!("shutting down");
                    break;
                }
            }
        }
        Ok(())
    })
}

/// Agent command-line interface (CLI).
///
/// We use `clap` to parse these options, therefore the structs
/// derive [`clap::Parser`] or other clap trait implementations.
mod cli {
    use clap::{Args, Parser, Subcommand};
    use std::time::Duration;

    // NOTE: the doc comment attached to `Cli` is used by clap as the description of
    // the application. It is displayed at the start of the help message.

    /// Vigil agent: display the solidarity counter in a terminal.
    #[derive(Parser)]
    #[command(version)]
    pub struct Cli {
        #[command(subcommand)]
        pub command: Option<Command>,

        #[command(flatten)]
        pub common: CommonArgs,
    }

    #[derive(Subcommand)]
    pub enum Command {
        /// Run the agent and refresh the counter until interrupted.
        ///
        /// This is the default command.
        Run,

        /// Print a single reading of the counter and exit.
        Once,

        /// Manipulate the configuration.
        Config(ConfigArgs),
    }

    #[derive(Args)]
    pub struct ConfigArgs {
        #[command(subcommand)]
        pub command: ConfigCommand,
    }

    #[derive(Subcommand)]
    pub enum ConfigCommand {
        /// Regenerate the configuration file and stop.
        ///
        /// If the file exists, it will be overwritten.
        Regen,
    }

    /// Common CLI arguments.
    #[derive(Args, Clone)]
    pub struct CommonArgs {
        /// Path to the config file.
        #[arg(long, env = "VIGIL_CONFIG", default_value = "vigil-config.toml")]
        pub config: String,

        /// If set, the config file must exist, otherwise the agent will fail to start with an error.
        #[arg(long, default_value_t = false)]
        pub no_default_config: bool,

        /// Config options overrides.
        ///
        /// Use dots to separate TOML levels, ex. `refresh_interval='500ms'`
        #[arg(long)]
        pub config_override: Option<Vec<String>>,

        /// How often to refresh the displayed counter (overrides the config file).
        #[arg(long, value_parser = humantime_serde::re::humantime::parse_duration)]
        pub interval: Option<Duration>,
    }
}
