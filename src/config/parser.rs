//! Retention configuration parser
//!
//! A small state machine driven by the token lines of a [`LineScanner`]:
//!
//! ```text
//! Root --plan NAME {--> Plan --keep/path/protect--> Plan
//!                       Plan --}--> End --valid--> Root
//! Root --EOF--> Done
//! ```
//!
//! The first error halts the machine; no partial plans are kept.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::duration::parse_duration;
use super::scanner::{trim, LineScanner};
use super::types::{Config, Period, Plan};
use crate::error::{ConfigError, ConfigResult};

const PLAN_IDENTIFIER: &str = "plan";
const KEEP_IDENTIFIER: &str = "keep";
const PATH_IDENTIFIER: &str = "path";
const PROTECT_IDENTIFIER: &str = "protect";

const KEEP_FOR: &str = "for";
const KEEP_LATEST: &str = "latest";

const BLOCK_START: &str = "{";
const BLOCK_END: &str = "}";

/// Prefix marking a `protect` value as a file of snapshot names.
const PROTECT_FILE_PREFIX: char = '<';

/// Parser state. Each variant owns whatever is under construction.
#[derive(Debug)]
enum State {
    /// Between plans
    Root,
    /// Inside `plan NAME { ... }`
    Plan(Plan),
    /// The closing `}` was read; the plan still has to be validated
    End(Plan),
    Done,
}

impl State {
    /// Consume at most one token line and return the next state.
    fn next(self, scanner: &mut LineScanner<'_>, config: &mut Config) -> ConfigResult<State> {
        match self {
            State::Root => root_line(scanner),
            State::Plan(plan) => plan_line(scanner, plan),
            State::End(plan) => {
                plan.validate()?;
                debug!(plan = %plan.name, paths = plan.paths.len(), "parsed plan");
                config.plans.push(plan);
                Ok(State::Root)
            }
            State::Done => Ok(State::Done),
        }
    }
}

fn root_line(scanner: &mut LineScanner<'_>) -> ConfigResult<State> {
    let Some(fields) = scanner.scan_line()? else {
        return Ok(State::Done);
    };

    match fields_str(&fields).as_slice() {
        [PLAN_IDENTIFIER, name, BLOCK_START] => Ok(State::Plan(Plan::new(*name))),
        _ => Err(ConfigError::Unparsable(fields.clone())),
    }
}

fn plan_line(scanner: &mut LineScanner<'_>, mut plan: Plan) -> ConfigResult<State> {
    let Some(fields) = scanner.scan_line()? else {
        return Err(ConfigError::UnterminatedPlan);
    };

    match fields_str(&fields).as_slice() {
        [KEEP_IDENTIFIER, frequency, KEEP_FOR, age] => {
            plan.periods.push(parse_period(frequency, age)?);
        }
        [KEEP_IDENTIFIER, KEEP_LATEST, count] => {
            plan.latest = parse_latest(count)?;
        }
        [PATH_IDENTIFIER, path] => {
            plan.paths.push(path.to_string());
        }
        [PROTECT_IDENTIFIER, value] => match value.strip_prefix(PROTECT_FILE_PREFIX) {
            Some(file) => {
                let names = read_protect_file(&scanner.resolve(file))?;
                plan.protect.extend(names);
            }
            None => plan.protect.push(value.to_string()),
        },
        [BLOCK_END] => return Ok(State::End(plan)),
        _ => return Err(ConfigError::Unparsable(fields.clone())),
    }

    Ok(State::Plan(plan))
}

fn fields_str(fields: &[String]) -> Vec<&str> {
    fields.iter().map(String::as_str).collect()
}

fn parse_period(frequency: &str, age: &str) -> ConfigResult<Period> {
    let frequency = parse_duration(frequency)?;
    let age = parse_duration(age)?;

    if frequency > age {
        return Err(ConfigError::FrequencyTooBig);
    }

    Ok(Period::new(frequency, age))
}

fn parse_latest(count: &str) -> ConfigResult<usize> {
    let num: i64 = count
        .parse()
        .map_err(|source| ConfigError::InvalidLatest {
            value: count.to_string(),
            source,
        })?;

    if num < 1 {
        return Err(ConfigError::Latest1);
    }

    usize::try_from(num).map_err(|_| ConfigError::Latest1)
}

/// Read snapshot names from a file, one per line. Comments and blank lines
/// are skipped the same way as in the configuration.
///
/// Within a configuration, a relative `protect <FILE` resolves the same way
/// as `include` patterns do.
pub fn read_protect_file(path: &Path) -> ConfigResult<Vec<String>> {
    let protect_error = |source| ConfigError::ProtectRead {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(protect_error)?;
    let mut names = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(protect_error)?;
        let name = trim(&line);
        if !name.is_empty() {
            names.push(name.to_string());
        }
    }

    Ok(names)
}

impl Plan {
    /// Check the invariants a plan must satisfy once its block is closed.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.paths.is_empty() {
            return Err(ConfigError::NoPaths);
        }

        if !self.has_keeps() {
            return Err(ConfigError::NoKeeps);
        }

        Ok(())
    }
}

impl Config {
    /// Read a configuration. Relative `include` patterns resolve against the
    /// working directory.
    pub fn read(reader: impl BufRead) -> ConfigResult<Config> {
        parse(LineScanner::new(reader))
    }

    /// Read a configuration file. Relative `include` patterns resolve
    /// against the directory containing `path`.
    pub fn load(path: &Path) -> ConfigResult<Config> {
        let file = File::open(path).map_err(|source| ConfigError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Self::read_relative_to(BufReader::new(file), base_dir)
    }

    /// Read a configuration with relative `include` patterns resolved
    /// against `base_dir`.
    pub fn read_relative_to(
        reader: impl BufRead,
        base_dir: impl Into<PathBuf>,
    ) -> ConfigResult<Config> {
        parse(LineScanner::new(reader).with_base_dir(base_dir))
    }
}

fn parse(mut scanner: LineScanner<'_>) -> ConfigResult<Config> {
    let mut config = Config::default();
    let mut state = State::Root;

    while !matches!(state, State::Done) {
        state = state.next(&mut scanner, &mut config)?;
    }

    Ok(config)
}
