//! Application configuration loading for CLI defaults.
//!
//! Settings come from three layers, highest priority first: command-line
//! flags, the optional config file, built-in defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use md5mirror_core::{DEFAULT_BASE_URL, DEFAULT_JOBS, MAX_JOBS, RunConfig};

use crate::cli::Args;

/// TOML-style file configuration for mirror defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Default base URL.
    pub base_url: Option<String>,
    /// Default output directory.
    pub output_dir: Option<PathBuf>,
    /// Keep files that still mismatch after their retry.
    pub keep: Option<bool>,
    /// Delete the manifest after processing.
    pub delete_manifest: Option<bool>,
    /// Entries verified concurrently.
    pub jobs: Option<u8>,
    /// Default verbosity mode.
    pub verbosity: Option<VerbositySetting>,
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

impl VerbositySetting {
    /// Tracing filter directive for this setting.
    #[must_use]
    pub fn filter(self) -> &'static str {
        match self {
            Self::Default => "error",
            Self::Verbose => "info",
            Self::Quiet => "off",
            Self::Debug => "debug",
        }
    }
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/md5mirror/config.toml`
/// 2. `$HOME/.config/md5mirror/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("md5mirror")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("md5mirror")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from the default path if present.
pub fn load_default_file_config() -> Result<LoadedConfig> {
    let path = resolve_default_config_path();
    let config = match path.as_deref() {
        Some(path_ref) if path_ref.exists() => Some(load_file_config(path_ref)?),
        _ => None,
    };
    Ok(LoadedConfig { path, config })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line_number = line_index + 1;
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!("Invalid config syntax on line {line_number}: expected key = value");
        };

        let key = raw_key.trim();
        let value = raw_value.trim();

        match key {
            "base_url" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `base_url` value on line {line_number}"))?;
                if parsed.trim().is_empty() {
                    bail!("Invalid `base_url` value on line {line_number}: must not be empty");
                }
                cfg.base_url = Some(parsed);
            }
            "output_dir" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `output_dir` value on line {line_number}"))?;
                cfg.output_dir = Some(PathBuf::from(parsed));
            }
            "keep" => {
                let parsed = parse_boolean(value)
                    .with_context(|| format!("Invalid `keep` value on line {line_number}"))?;
                cfg.keep = Some(parsed);
            }
            "delete_manifest" => {
                let parsed = parse_boolean(value).with_context(|| {
                    format!("Invalid `delete_manifest` value on line {line_number}")
                })?;
                cfg.delete_manifest = Some(parsed);
            }
            "jobs" => {
                let parsed = parse_jobs(value)
                    .with_context(|| format!("Invalid `jobs` value on line {line_number}"))?;
                cfg.jobs = Some(parsed);
            }
            "verbosity" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `verbosity` value on line {line_number}"))?;
                cfg.verbosity = Some(parse_verbosity(&parsed).with_context(|| {
                    format!("Invalid `verbosity` value '{parsed}' on line {line_number}")
                })?);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_number}");
            }
        }
    }
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_boolean(raw_value: &str) -> Result<bool> {
    match raw_value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => bail!("Expected boolean value (true/false)"),
    }
}

fn parse_jobs(raw_value: &str) -> Result<u8> {
    let value = raw_value.parse::<u16>()?;
    let max = u16::try_from(MAX_JOBS).unwrap_or(u16::MAX);
    if !(1..=max).contains(&value) {
        bail!("Expected range: 1..={MAX_JOBS}");
    }
    Ok(u8::try_from(value)?)
}

fn parse_verbosity(value: &str) -> Result<VerbositySetting> {
    match value {
        "default" => Ok(VerbositySetting::Default),
        "verbose" => Ok(VerbositySetting::Verbose),
        "quiet" => Ok(VerbositySetting::Quiet),
        "debug" => Ok(VerbositySetting::Debug),
        _ => bail!("Expected one of: default, verbose, quiet, debug"),
    }
}

/// Builds the run configuration: flags first, then config file, then defaults.
///
/// Boolean flags can only switch an option on; the config file decides when
/// the flag is absent.
#[must_use]
pub fn build_run_config(args: &Args, file: Option<&FileConfig>) -> RunConfig {
    let base_url = args
        .url
        .clone()
        .or_else(|| file.and_then(|f| f.base_url.clone()))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let output_dir = args
        .output_dir
        .clone()
        .or_else(|| file.and_then(|f| f.output_dir.clone()))
        .unwrap_or_else(|| PathBuf::from("."));
    let jobs = args
        .jobs
        .or_else(|| file.and_then(|f| f.jobs))
        .map_or(DEFAULT_JOBS, usize::from);
    let keep = args.keep || file.and_then(|f| f.keep).unwrap_or(false);
    let delete_manifest = args.delete || file.and_then(|f| f.delete_manifest).unwrap_or(false);

    RunConfig::new(base_url)
        .with_output_dir(output_dir)
        .with_jobs(jobs)
        .with_keep_mismatched(keep)
        .with_delete_manifest(delete_manifest)
}

/// Picks the tracing filter directive.
///
/// Priority: quiet flag > verbose flag > config file verbosity > default.
/// `RUST_LOG` still overrides the result when set.
#[must_use]
pub fn resolve_log_level(args: &Args, file: Option<&FileConfig>) -> &'static str {
    if args.quiet {
        return VerbositySetting::Quiet.filter();
    }
    match args.verbose {
        0 => file
            .and_then(|f| f.verbosity)
            .unwrap_or(VerbositySetting::Default)
            .filter(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
