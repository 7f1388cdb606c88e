// # slam-gen - Configuration Generator
//
// The slam-gen binary is a THIN integration layer only. All generation
// logic lives in slam-gen-core. It is responsible for:
// 1. Reading configuration from environment variables
// 2. Loading the generator config and the resolved inventory
// 3. Running a fresh generation or an in-place update
// 4. Reporting duplicates and mapping the outcome to an exit code
//
// ## Configuration
//
// - `SLAM_GEN_CONFIG`: Path to the generator config (JSON)
// - `SLAM_GEN_RECORDS`: Path to the inventory records (JSON), `-` for stdin
// - `SLAM_GEN_MODE`: `create` (default) or `update`
// - `SLAM_GEN_STRICT`: `true` refuses to publish when duplicates are found
// - `SLAM_GEN_LOG_LEVEL`: trace, debug, info (default), warn, error
//
// ## Example
//
// ```bash
// export SLAM_GEN_CONFIG=/etc/slam/bind.json
// export SLAM_GEN_RECORDS=/var/lib/slam/hosts.json
// export SLAM_GEN_MODE=update
//
// slam-gen
// ```

use anyhow::{Context, Result};
use slam_gen_core::{Generator, GeneratorConfig, HostRecord, OutputTarget};
use std::env;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
#[derive(Debug, Clone, Copy)]
enum SlamExitCode {
    /// Output generated
    Success = 0,
    /// Configuration error
    ConfigError = 1,
    /// Generation failed
    RuntimeError = 2,
    /// Duplicates found in strict mode, nothing published
    DuplicatesFound = 3,
}

impl From<SlamExitCode> for ExitCode {
    fn from(code: SlamExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Generation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Create,
    Update,
}

/// Application configuration
#[derive(Debug)]
struct Config {
    generator_config: PathBuf,
    records: String,
    mode: Mode,
    strict: bool,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let generator_config = lookup("SLAM_GEN_CONFIG")
            .filter(|s| !s.is_empty())
            .context(
                "SLAM_GEN_CONFIG is required. \
                Set it via: export SLAM_GEN_CONFIG=/etc/slam/bind.json",
            )?;

        let records = lookup("SLAM_GEN_RECORDS")
            .filter(|s| !s.is_empty())
            .context(
                "SLAM_GEN_RECORDS is required. \
                Set it to a JSON inventory file or '-' for standard input",
            )?;

        let mode = match lookup("SLAM_GEN_MODE")
            .unwrap_or_else(|| "create".to_string())
            .to_lowercase()
            .as_str()
        {
            "create" => Mode::Create,
            "update" => Mode::Update,
            other => anyhow::bail!(
                "SLAM_GEN_MODE '{}' is not valid. Valid modes: create, update",
                other
            ),
        };

        let strict = match lookup("SLAM_GEN_STRICT")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "" | "false" | "0" | "no" => false,
            "true" | "1" | "yes" => true,
            other => anyhow::bail!("SLAM_GEN_STRICT '{}' is not a boolean", other),
        };

        Ok(Self {
            generator_config: PathBuf::from(generator_config),
            records,
            mode,
            strict,
            log_level: lookup("SLAM_GEN_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Map the configured log level
    fn level(&self) -> Result<Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => anyhow::bail!(
                "SLAM_GEN_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }
    }
}

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return SlamExitCode::ConfigError.into();
        }
    };

    let log_level = match config.level() {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return SlamExitCode::ConfigError.into();
        }
    };

    // Generated documents may go to stdout, so logs go to stderr.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return SlamExitCode::ConfigError.into();
    }

    let generator = match load_generator(&config) {
        Ok(generator) => generator,
        Err(e) => {
            error!("Configuration error: {:#}", e);
            return SlamExitCode::ConfigError.into();
        }
    };

    match run(&config, &generator) {
        Ok(code) => code.into(),
        Err(e) => {
            error!("Generation failed: {:#}", e);
            SlamExitCode::RuntimeError.into()
        }
    }
}

fn load_generator(config: &Config) -> Result<Generator> {
    let generator_config = GeneratorConfig::from_json_file(&config.generator_config)
        .with_context(|| {
            format!(
                "failed to load generator config {}",
                config.generator_config.display()
            )
        })?;

    if config.mode == Mode::Update
        && generator_config.outputfile == OutputTarget::Stdout
        && config.records == "-"
    {
        anyhow::bail!(
            "update mode on standard output reads the existing document from stdin; \
            SLAM_GEN_RECORDS cannot be '-' as well"
        );
    }

    Ok(Generator::new(generator_config)?)
}

fn run(config: &Config, generator: &Generator) -> Result<SlamExitCode> {
    let records = load_records(&config.records)?;
    info!(
        "Loaded {} host record(s) for {}",
        records.len(),
        generator.config()
    );

    // Check files are scanned once; the publish calls below skip the scan.
    let duplicates = generator.check_duplicates(&records)?;
    if !duplicates.is_empty() {
        if config.strict {
            warn!(
                "Refusing to publish {}: {} duplicate(s) found",
                generator.config(),
                duplicates.len()
            );
            return Ok(SlamExitCode::DuplicatesFound);
        }
        warn!("{} duplicate(s) reported; output published anyway", duplicates.len());
    }

    match config.mode {
        Mode::Create => generator.write_fresh(&records)?,
        Mode::Update => generator.write_update(&records)?,
    }

    Ok(SlamExitCode::Success)
}

fn load_records(source: &str) -> Result<Vec<HostRecord>> {
    let content = if source == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("failed to read records from stdin")?;
        content
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("failed to read records file {}", source))?
    };

    serde_json::from_str(&content).context("records are not a valid JSON host list")
}
