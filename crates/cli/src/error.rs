//! Exit codes for `electric-border`.
//!
//! | code | cause |
//! |------|-------|
//! | 2    | clap rejected the arguments |
//! | 10   | nothing to draw: `-W`/`-H` leave an empty content box, or `render` ends with a 0x0 surface |
//! | 11   | the PNG could not be written |
//! | 12   | bad `--color`, `--preset`, `--style`/`--settings` JSON, or `--fps` ≤ 0 |
//! | 13   | `--json` output could not be serialized |

use electric_border_core::BorderError;
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    /// The host box yields no surface to draw on.
    Engine(BorderError),
    Io(String),
    /// Rejected flag value; the message names the flag where it can.
    Input(String),
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Engine(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                f.write_str(msg)
            }
        }
    }
}

/// Style parsing failures come from flags, so they are input errors. A PNG
/// write failure arrives as `BorderError::Io`.
impl From<BorderError> for CliError {
    fn from(e: BorderError) -> Self {
        match e {
            BorderError::Io(msg) => CliError::Io(msg),
            BorderError::InvalidColor(_)
            | BorderError::InvalidStyle(_)
            | BorderError::UnknownPreset(_) => CliError::Input(e.to_string()),
            other => CliError::Engine(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
