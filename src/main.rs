// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chatrelay::app_config::{Config, LogLevel, TranslationServiceKind};
use chatrelay::errors::AppError;
use chatrelay::filter::MessageOrigin;
use chatrelay::pipeline::ChatPipeline;
use chatrelay::providers::TranslatorRegistry;
use chatrelay::translation::{
    ChatLineEvent, HostEffect, MainThreadQueue, MainThreadReceiver, RecipientType, TranslationCoordinator,
};

/// CLI Wrapper for MessageOrigin to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOrigin {
    Foreground,
    Background,
}

impl From<CliOrigin> for MessageOrigin {
    fn from(origin: CliOrigin) -> Self {
        match origin {
            CliOrigin::Foreground => MessageOrigin::Foreground,
            CliOrigin::Background => MessageOrigin::Background,
        }
    }
}

/// CLI Wrapper for TranslationServiceKind to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliService {
    Google,
    PigLatin,
}

impl From<CliService> for TranslationServiceKind {
    fn from(service: CliService) -> Self {
        match service {
            CliService::Google => TranslationServiceKind::GoogleApi,
            CliService::PigLatin => TranslationServiceKind::PigLatin,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
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
    /// Read chat lines from stdin and print the ones the filter lets through
    Filter {
        /// Channel the lines arrived through
        #[arg(short, long, value_enum, default_value = "foreground")]
        origin: CliOrigin,
    },

    /// Read info lines from stdin and print what the host would display
    Translate {
        /// Target language (ISO code or English name)
        #[arg(short, long)]
        target_language: Option<String>,

        /// Translation service
        #[arg(short, long, value_enum)]
        service: Option<CliService>,

        /// Hide the original line and show only the translation
        #[arg(long)]
        drop_original: bool,
    },

    /// Generate shell completions for chatrelay
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// chatrelay - chat filtering and translation
///
/// Runs game chat lines through the message filter and translation
/// pipeline the way a game client would.
#[derive(Parser, Debug)]
#[command(name = "chatrelay")]
#[command(version)]
#[command(about = "Filter and translate game chat lines")]
#[command(long_about = "chatrelay filters and translates game chat lines, keeping formatting codes intact.

EXAMPLES:
    chatrelay filter < chat.log                     # Print lines that pass the filter
    chatrelay filter -o background < narration.log  # Filter narration duplicates
    chatrelay translate -t fr < chat.log            # Translate to French via Google
    chatrelay translate -s pig-latin < chat.log     # Offline pig latin
    chatrelay completions bash > chatrelay.bash     # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file does not
    exist, a default one is created.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
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

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Load the config file, creating a default one if it is missing
fn load_or_create_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        return Config::load(config_path);
    }

    warn!("Config file not found at '{}', creating default config.", config_path);
    let config = Config::default();
    config.save(config_path)?;
    Ok(config)
}

/// Read every line from `reader`; unreadable input is a file error
fn read_lines<R: BufRead>(reader: R) -> Result<Vec<String>, AppError> {
    reader
        .lines()
        .collect::<std::io::Result<Vec<String>>>()
        .map_err(AppError::from)
}

fn read_stdin_lines() -> Result<Vec<String>> {
    read_lines(std::io::stdin().lock()).context("Failed to read lines from stdin")
}

#[tokio::main]
async fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "chatrelay", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = load_or_create_config(&cli.config_path)?;
    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    match cli.command {
        Commands::Filter { origin } => run_filter(config, origin.into()).await,
        Commands::Translate {
            target_language,
            service,
            drop_original,
        } => {
            config.translation.enabled = true;
            if let Some(language) = target_language {
                config.translation.language_name = language;
            }
            if let Some(service) = service {
                config.translation.translation_service = service.into();
            }
            if drop_original {
                config.translation.keep_original = false;
            }
            run_translate(config).await
        }
        Commands::Completions { .. } => Ok(()),
    }
}

fn build_pipeline(config: Config) -> Result<(ChatPipeline, MainThreadReceiver)> {
    let registry = TranslatorRegistry::with_defaults(
        config
            .translation
            .cache_translations
            .then_some(config.translation.cache_max_entries),
        Duration::from_secs(config.translation.request_timeout_secs),
    );
    let (queue, receiver) = MainThreadQueue::new();
    let coordinator = TranslationCoordinator::new(registry, Arc::new(queue), tokio::runtime::Handle::current());
    let pipeline = ChatPipeline::new(config, coordinator)?;
    Ok((pipeline, receiver))
}

async fn run_filter(mut config: Config, origin: MessageOrigin) -> Result<()> {
    config.translation.enabled = false;
    let (pipeline, _receiver) = build_pipeline(config)?;

    let lines = read_stdin_lines()?;
    let mut hidden = 0;
    let mut stdout = std::io::stdout().lock();

    for line in &lines {
        let verdict = pipeline.on_chat_line(&ChatLineEvent::new(line.as_str(), origin, RecipientType::Info));
        if verdict.suppressed {
            hidden += 1;
        } else {
            writeln!(stdout, "{}", line)?;
        }
    }

    info!("Filtered {} of {} line(s)", hidden, lines.len());
    Ok(())
}

async fn run_translate(config: Config) -> Result<()> {
    let (pipeline, mut receiver) = build_pipeline(config)?;

    for line in read_stdin_lines()? {
        let verdict = pipeline.on_chat_line(&ChatLineEvent::new(line.as_str(), MessageOrigin::Foreground, RecipientType::Info));
        if !verdict.cancel_original() {
            println!("{}", line);
        }
        verdict.dispatch.completion().await;

        // Main loop tick: apply scheduled effects
        for effect in receiver.drain() {
            if let HostEffect::DisplayMessage(text) = effect {
                println!("{}", text);
            }
        }
    }

    Ok(())
}
