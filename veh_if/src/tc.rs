//! # Telecommand module
//!
//! This module provides the telecommands accepted by the hover control
//! executable, along with their command-line style text parser.
//!
//! A command line is a command name followed by positional arguments,
//! separated by whitespace, e.g. `setHeight 25.5`. Command names are matched
//! case-insensitively. Arguments may be wrapped in quotes, which is useful
//! for negative values (`modHeight "-5"`).

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A telecommand, i.e. an instruction sent to the vehicle by the operator.
///
/// Most variants map to a pure transition of the hover control mode state, so
/// that a failed parse can never leave the state half-mutated. `Adjust` is
/// the exception: it sets the continuous operator input channel, standing in
/// for the cockpit stick the operator would otherwise hold.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub enum Tc {
    /// Set the target levitation height in meters.
    SetHeight(f64),

    /// Add a delta to the target levitation height in meters.
    ModHeight(f64),

    /// Toggle hover mode on or off.
    ToggleHover,

    /// Toggle manual height adjustment on or off.
    ManualMode,

    /// Reset the target levitation height to the default.
    ResetHeight,

    /// Set the continuous manual adjustment rate in meters/tick. The rate
    /// holds until the next `Adjust`, and only moves the target while manual
    /// adjust mode is set.
    Adjust(f64),
}

/// Possible parsing errors.
///
/// All variants carry human-readable messages. None of them is fatal - a
/// command line which fails to parse results in no state change at all.
#[derive(Debug, Error)]
pub enum TcParseError {
    #[error("No command specified")]
    Empty,

    #[error("Unknown command {0}")]
    UnknownCommand(String),

    #[error("Command {0} expects a numeric argument but none was given")]
    MissingArgument(&'static str),

    #[error("Invalid numeric argument \"{arg}\" for command {cmd}")]
    InvalidArgument { cmd: &'static str, arg: String },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Tc {
    /// Parse a new TC from a command line.
    pub fn from_line(line: &str) -> Result<Self, TcParseError> {
        let mut tokens = line.split_whitespace();

        // Get the command name
        let name = match tokens.next() {
            Some(n) => n,
            None => return Err(TcParseError::Empty),
        };

        match name.to_ascii_lowercase().as_str() {
            "setheight" => Ok(Tc::SetHeight(parse_arg("setHeight", tokens.next())?)),
            "modheight" => Ok(Tc::ModHeight(parse_arg("modHeight", tokens.next())?)),
            "togglehover" => Ok(Tc::ToggleHover),
            "manualmode" => Ok(Tc::ManualMode),
            "resetheight" => Ok(Tc::ResetHeight),
            "adjust" => Ok(Tc::Adjust(parse_arg("adjust", tokens.next())?)),
            _ => Err(TcParseError::UnknownCommand(name.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Parse a numeric positional argument, stripping any surrounding quotes.
fn parse_arg(cmd: &'static str, token: Option<&str>) -> Result<f64, TcParseError> {
    let arg = match token {
        Some(t) => t.trim_matches('"'),
        None => return Err(TcParseError::MissingArgument(cmd)),
    };

    match arg.parse::<f64>() {
        Ok(v) => Ok(v),
        Err(_) => Err(TcParseError::InvalidArgument {
            cmd,
            arg: arg.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_valid_commands() {
        assert_eq!(Tc::from_line("setHeight 25.5").unwrap(), Tc::SetHeight(25.5));
        assert_eq!(Tc::from_line("modHeight \"-5\"").unwrap(), Tc::ModHeight(-5.0));
        assert_eq!(Tc::from_line("toggleHover").unwrap(), Tc::ToggleHover);
        assert_eq!(Tc::from_line("manualMode").unwrap(), Tc::ManualMode);
        assert_eq!(Tc::from_line("resetHeight").unwrap(), Tc::ResetHeight);
        assert_eq!(Tc::from_line("adjust 0.05").unwrap(), Tc::Adjust(0.05));
        assert_eq!(Tc::from_line("adjust \"-0.05\"").unwrap(), Tc::Adjust(-0.05));
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(Tc::from_line("TOGGLEHOVER").unwrap(), Tc::ToggleHover);
        assert_eq!(Tc::from_line("setheight 10").unwrap(), Tc::SetHeight(10.0));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Tc::from_line(""), Err(TcParseError::Empty)));
        assert!(matches!(Tc::from_line("   "), Err(TcParseError::Empty)));
        assert!(matches!(
            Tc::from_line("wibble"),
            Err(TcParseError::UnknownCommand(_))
        ));
        assert!(matches!(
            Tc::from_line("setHeight"),
            Err(TcParseError::MissingArgument(_))
        ));
        assert!(matches!(
            Tc::from_line("setHeight ten"),
            Err(TcParseError::InvalidArgument { .. })
        ));
    }
}
