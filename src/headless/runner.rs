//! Headless command execution

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use dlayer_client::TranslationLayerClient;
use dlayer_core::prelude::*;

use super::{parse_value, Command};

/// Run one headless command and return its JSON result
pub async fn run_command(client: &TranslationLayerClient, command: Command) -> Result<Value> {
    info!("Headless command: {:?}", command);

    match command {
        Command::Status => to_json(client.try_fetch_status().await?),
        Command::Types => to_json(client.try_fetch_supported_types().await?),
        Command::Extensions => to_json(client.try_fetch_extensions().await?),

        Command::Tree { extension } => {
            let response = client.try_fetch_tree().await?;
            match extension {
                Some(name) if response.active => to_json(response.tree.extension(&name)?),
                _ => to_json(response),
            }
        }

        Command::Node { id } => to_json(client.try_fetch_node(&id).await?),
        Command::Get { id } => to_json(client.try_fetch_value(&id).await?),

        Command::Set { id, value } => {
            let ack = client.try_set_value(&id, parse_value(&value)).await?;
            if !ack.success {
                warn!("Backend rejected value for {}", id);
            }
            to_json(ack)
        }

        Command::Trigger { id, event, data } => {
            let data = data.as_deref().map(parse_value);
            to_json(client.try_trigger_event(&id, &event, data).await?)
        }

        Command::Values { alwayson } => {
            let values = client.try_fetch_extension_values().await?;
            if alwayson.is_empty() {
                to_json(values)
            } else {
                let enabled: HashSet<String> = alwayson.into_iter().collect();
                Ok(Value::Object(values.alwayson_scripts(&enabled)))
            }
        }

        Command::Clear => to_json(client.try_clear().await?),
    }
}

fn to_json(value: impl Serialize) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}
