use thiserror::Error;

use crate::unit_value::UnitValue;

/// A string did not match the `<number>(px|rem)` grammar.
///
/// Carries no payload; callers wrap it with the context they have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid unit value")]
pub struct UnitParseError;

/// Failures while parsing a `"<screen> <size>, <screen> <size>"` shorthand
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShorthandError {
    #[error("'{input}' contains too {} {}.", quantity(.segments, 2), plural(.segments, 2, "argument"))]
    ArgumentCount { input: String, segments: usize },

    #[error("'{segment}' contains too {} {} in '{input}'.", quantity(.tokens, 2), plural(.tokens, 2, "value"))]
    ValueCount {
        segment: String,
        input: String,
        tokens: usize,
    },

    #[error("Screen is omitted, but no default screen is set.")]
    MissingDefaultScreen,

    #[error("The '{screen}' is an invalid key for 'screens' option.")]
    ScreenKeyCollision { screen: String },

    #[error("The '{screen}' screen does not exist in 'screens' option.")]
    UnknownScreen { screen: String },

    #[error("Failed to parse '{raw}' of 'screens.{screen}'.")]
    InvalidScreenEntry { screen: String, raw: String },

    #[error("Failed to parse '{size}' in '{input}'.")]
    InvalidSize { size: String, input: String },
}

/// Which side of an anchor pair a validation failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    From,
    To,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Side::From => "from",
            Side::To => "to",
        })
    }
}

/// Failures while turning an anchor pair into a CSS value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculateError {
    #[error("'{side}.screen' must be larger than 0, but got '{screen}'.")]
    NonPositiveScreen { side: Side, screen: UnitValue },

    #[error("The both 'screen's must have same unit.")]
    MismatchedScreenUnits,

    #[error("The both 'size's must have same unit.")]
    MismatchedSizeUnits,

    #[error("The 'value's for both 'screen's must be different.")]
    IdenticalScreens,
}

/// Main error type for the fluid-sizing crate
#[derive(Debug, Error)]
pub enum FluidError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Pattern error: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Glob error: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Shorthand(#[from] ShorthandError),

    #[error(transparent)]
    Calculate(#[from] CalculateError),

    #[error("No files found matching the provided patterns")]
    NoFilesFound,

    #[error("Failed to write output to {path}: {message}")]
    OutputError { path: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Input error: {0}")]
    InputError(String),
}

pub type Result<T> = std::result::Result<T, FluidError>;

fn quantity(count: &usize, expected: usize) -> &'static str {
    if *count > expected {
        "many"
    } else {
        "few"
    }
}

/// Singular only when exactly one item is extra.
fn plural(count: &usize, expected: usize, noun: &str) -> String {
    if *count == expected + 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}
