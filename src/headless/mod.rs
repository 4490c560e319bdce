//! Headless mode - one-shot commands with JSON output
//!
//! Each subcommand performs a single call against the translation layer and
//! prints the decoded response as pretty JSON on stdout, so scripts can use
//! dlayer without the TUI. Failures go to stderr with a non-zero exit code.
//!
//! # Example
//!
//! ```bash
//! dlayer status
//! dlayer tree --extension sd-webui-controlnet
//! dlayer set txt2img_cfg_scale 7.5
//! dlayer values --alwayson adetailer --alwayson controlnet
//! ```

pub mod runner;

use clap::Subcommand;
use serde_json::Value;

pub use runner::run_command;

/// Headless subcommands
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Show whether the translation layer is active
    Status,

    /// List supported, encountered and unsupported component types
    Types,

    /// List installed extensions with their compatibility
    Extensions,

    /// Dump the component tree
    Tree {
        /// Only this extension's subtree
        #[arg(long, short)]
        extension: Option<String>,
    },

    /// Show one component and its current value
    Node { id: String },

    /// Read a component's current value
    Get { id: String },

    /// Write a component's value (JSON; bare words are sent as strings)
    Set { id: String, value: String },

    /// Fire an event on a component
    Trigger {
        id: String,

        #[arg(default_value = "click")]
        event: String,

        /// JSON payload sent as `data`
        #[arg(long)]
        data: Option<String>,
    },

    /// Show current extension argument values
    Values {
        /// Build the `alwayson_scripts` payload for these extensions instead
        #[arg(long = "alwayson", value_name = "EXTENSION")]
        alwayson: Vec<String>,
    },

    /// Drop all components tracked by the backend
    Clear,
}

/// Parse a value given on the command line.
///
/// Anything that is not valid JSON is taken as a plain string, so
/// `dlayer set prompt hello` works without quoting.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_value_json() {
        assert_eq!(parse_value("7.5"), json!(7.5));
        assert_eq!(parse_value("true"), json!(true));
        assert_eq!(parse_value("[1, 2]"), json!([1, 2]));
        assert_eq!(parse_value("\"quoted\""), json!("quoted"));
    }

    #[test]
    fn test_parse_value_bare_word_is_string() {
        assert_eq!(parse_value("hello"), json!("hello"));
        assert_eq!(parse_value("a cat, 4k"), json!("a cat, 4k"));
    }
}
