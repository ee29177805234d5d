//! Wiring between configuration, the processor and the CLI commands.

use std::sync::Arc;

use clipsend_dispatch::{Dispatcher, HttpTransmitter, Processor, TransferParams};
use clipsend_history::JsonFileHistory;
use serde_json::{Value, json};

use crate::cli::Command;
use crate::config::Config;

/// Builds a processor sending over HTTP and recording to the history file.
pub fn build_processor(config: &Config) -> anyhow::Result<Processor> {
    let dispatch = config.dispatch_config();
    let transmitter = HttpTransmitter::new(&dispatch.receiver_endpoint, dispatch.request_timeout)?;
    let history = JsonFileHistory::new(&config.history_path);

    tracing::debug!(
        receiver = %transmitter.endpoint(),
        pool_size = dispatch.pool_size,
        history = %history.path().display(),
        "processor ready"
    );

    let dispatcher = Dispatcher::new(Arc::new(transmitter), &dispatch);
    Ok(Processor::new(dispatcher, Arc::new(history)))
}

/// Runs one command and returns the JSON document to print.
pub async fn run(config: &Config, command: Command) -> anyhow::Result<Value> {
    let processor = build_processor(config)?;

    match command {
        Command::Process {
            filename,
            option,
            compression_level,
        } => {
            let path = config.resolve_upload(&filename);
            let params = TransferParams { compression_level };
            let result = processor.process(&path, &option, &params).await;
            Ok(serde_json::to_value(result)?)
        }
        Command::History => Ok(serde_json::to_value(processor.history()?)?),
        Command::ClearHistory => {
            let message = if processor.clear_history()? {
                "History cleared successfully"
            } else {
                "No history to clear"
            };
            Ok(json!({ "message": message }))
        }
    }
}
