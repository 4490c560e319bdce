//! dlayer - Terminal client for the Stable Diffusion translation layer
//!
//! Without a subcommand, runs the TUI. Subcommands run headlessly and print
//! JSON (see [`headless::Command`]).

mod headless;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};

use dlayer_app::config::resolve_settings;
use dlayer_client::TranslationLayerClient;

use headless::Command;

/// dlayer - Terminal client for the Stable Diffusion translation layer
#[derive(Parser, Debug)]
#[command(name = "dlayer", version)]
#[command(about = "Render and drive a Stable Diffusion backend's extension UI from the terminal", long_about = None)]
struct Args {
    /// Backend base URL (overrides config file and DLAYER_BASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    url: Option<String>,

    /// Config file (defaults to <config dir>/dlayer/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    // Logging to file, the TUI owns stdout
    dlayer_core::logging::init().wrap_err("Failed to initialize logging")?;

    let settings = resolve_settings(args.config.as_deref(), args.url.as_deref());

    match args.command {
        None => {
            dlayer_tui::run(settings).await?;
        }
        Some(command) => {
            let client = TranslationLayerClient::new(settings.client_config()?)?;
            let output = headless::run_command(&client, command)
                .await
                .wrap_err_with(|| format!("Request to {} failed", client.base_url()))?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    tracing::info!("dlayer exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_runs_tui() {
        let args = Args::try_parse_from(["dlayer", "--url", "http://gpu-box:7860"]).unwrap();
        assert_eq!(args.url.as_deref(), Some("http://gpu-box:7860"));
        assert!(args.command.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args =
            Args::try_parse_from(["dlayer", "status", "--config", "/tmp/dlayer.toml"]).unwrap();
        assert_eq!(args.command, Some(Command::Status));
        assert_eq!(args.config, Some(PathBuf::from("/tmp/dlayer.toml")));
    }

    #[test]
    fn test_trigger_defaults_to_click() {
        let args = Args::try_parse_from(["dlayer", "trigger", "btn_7"]).unwrap();
        assert_eq!(
            args.command,
            Some(Command::Trigger {
                id: "btn_7".into(),
                event: "click".into(),
                data: None,
            })
        );
    }

    #[test]
    fn test_values_collects_alwayson() {
        let args = Args::try_parse_from([
            "dlayer",
            "values",
            "--alwayson",
            "adetailer",
            "--alwayson",
            "controlnet",
        ])
        .unwrap();
        assert_eq!(
            args.command,
            Some(Command::Values {
                alwayson: vec!["adetailer".into(), "controlnet".into()],
            })
        );
    }

    #[test]
    fn test_set_requires_value() {
        assert!(Args::try_parse_from(["dlayer", "set", "a"]).is_err());
    }
}
