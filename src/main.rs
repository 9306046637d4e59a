// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use resjson_sync::app_config::{Config, ConfigOverrides, LogLevel};
use resjson_sync::app_controller::Controller;

/// Default configuration file, looked up in the working directory
const DEFAULT_CONFIG_FILE: &str = "transifex-config.resjson";

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the resources of the project
    Resources,

    /// Download translations into the locale directories and reorder them
    Pull {
        /// Languages to pull, e.g. fi-FI,sr-latn (default: every language team)
        #[arg(long, value_delimiter = ',')]
        langs: Vec<String>,
    },

    /// Upload every source-language resource
    PushResources,

    /// Upload translation files
    PushTranslations {
        /// Only upload this locale directory
        #[arg(long)]
        lang: Option<String>,
    },

    /// Create a new resource from a source-language file
    AddResource {
        /// Resource slug, the file name without extension
        slug: String,

        /// Display name of the resource (default: the slug)
        #[arg(long)]
        name: Option<String>,

        /// Add the resource even if it is listed in ignoredResources
        #[arg(long)]
        force: bool,
    },

    /// Upload the translations of a single key
    PushKey {
        /// Resource slug
        resource: String,

        /// String key
        key: String,

        /// Locales to read the key from (default: every locale directory)
        #[arg(long, value_delimiter = ',')]
        langs: Option<Vec<String>>,
    },

    /// Create a language team, or every local language with 'all'
    CreateLanguage {
        /// Language code in either notation, or 'all'
        code: String,
    },

    /// Set translator instructions for a source string
    AddInstruction {
        /// Resource slug
        resource: String,

        /// String key
        key: String,

        /// Instruction text
        comment: String,
    },

    /// Reorder translation files to follow the source files
    Order {
        /// Locale directories to reorder (default: all)
        #[arg(long, value_delimiter = ',')]
        langs: Option<Vec<String>>,

        /// Resources to reorder (default: all)
        #[arg(long, value_delimiter = ',')]
        resources: Option<Vec<String>>,
    },

    /// Generate shell completions for resjson-sync
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct GlobalOptions {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Provider API base URL
    #[arg(long, global = true, env = "TRANSIFEX_API")]
    api: Option<String>,

    /// Provider project slug
    #[arg(long, global = true)]
    project: Option<String>,

    /// Provider user name
    #[arg(long, global = true, env = "TRANSIFEX_USER")]
    user: Option<String>,

    /// Provider password
    #[arg(long, global = true, env = "TRANSIFEX_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

impl GlobalOptions {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api: self.api.clone(),
            project_slug: self.project.clone(),
            user: self.user.clone(),
            pass: self.password.clone(),
            log_level: self.log_level.clone().map(LogLevel::from),
            ..ConfigOverrides::default()
        }
    }
}

/// resjson-sync - keep .resjson string resources in step with Transifex
#[derive(Parser, Debug)]
#[command(name = "resjson-sync")]
#[command(version)]
#[command(about = "Sync .resjson localization resources with Transifex")]
#[command(long_about = "resjson-sync pushes source strings and translations to Transifex and
pulls reviewed translations back into per-locale directories.

EXAMPLES:
    resjson-sync resources                          # List project resources
    resjson-sync push-resources                     # Upload all source resources
    resjson-sync pull --langs fi-FI,sr-latn         # Pull two languages
    resjson-sync push-key resources app.title       # Upload one key's translations
    resjson-sync create-language all               # Create every local language
    resjson-sync completions bash > resjson-sync.bash

CONFIGURATION:
    Configuration is read from transifex-config.resjson by default. Use
    --config to point at another file. Command line options override the
    values from the file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOptions,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, tag) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {} {}\x1B[0m",
                colour,
                now,
                tag,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Level from the command line applies at once; the config file may lower
    // or raise it once loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "resjson-sync", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(level) = &cli.global.log_level {
        log::set_max_level(LogLevel::from(level.clone()).to_level_filter());
    }

    let config = Config::load(&cli.global.config)?.with_overrides(&cli.global.overrides());
    log::set_max_level(config.log_level.to_level_filter());
    debug!("Using configuration from {:?}", cli.global.config);

    let controller = Controller::with_config(config)?;
    run_command(&controller, cli.command).await
}

async fn run_command(controller: &Controller, command: Commands) -> Result<()> {
    match command {
        Commands::Resources => controller.list_resources().await,
        Commands::Pull { langs } => controller.pull_translations(&langs).await,
        Commands::PushResources => controller.push_resources().await,
        Commands::PushTranslations { lang } => controller.push_translations(lang.as_deref()).await,
        Commands::AddResource { slug, name, force } => {
            controller.add_resource(&slug, name.as_deref(), force).await
        }
        Commands::PushKey { resource, key, langs } => {
            controller
                .push_translation_key(&resource, &key, langs.as_deref())
                .await
        }
        Commands::CreateLanguage { code } => controller.create_language(&code).await,
        Commands::AddInstruction { resource, key, comment } => {
            controller.add_instruction(&resource, &key, &comment).await
        }
        Commands::Order { langs, resources } => {
            controller.order_translations(resources.as_deref(), langs.as_deref())
        }
        Commands::Completions { .. } => Ok(()),
    }
}
