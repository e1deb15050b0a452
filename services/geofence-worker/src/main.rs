mod actor;
mod protocol;

use actor::EngineHandle;
use geofence_config::ServiceConfig;
use geofence_engine::{telemetry, GeofenceEngine};
use geofence_observability::{init, log_startup, ObservabilityConfig};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServiceConfig::from_env("geofence-worker");
    let observability = init(&ObservabilityConfig::from(&config));
    telemetry::describe_metrics();
    log_startup(&observability, &config.session_policy.to_string());

    let (engine, actor) =
        EngineHandle::spawn(GeofenceEngine::new(config.session_policy), config.command_buffer);

    let mut input = BufReader::new(tokio::io::stdin());
    let mut line = Vec::new();
    let mut stdout = tokio::io::stdout();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        line.clear();
        let read = tokio::select! {
            read = input.read_until(b'\n', &mut line) => read?,
            result = &mut shutdown => {
                if let Err(err) = result {
                    tracing::error!("failed to listen for ctrl-c: {}", err);
                }
                tracing::info!("shutdown requested");
                break;
            }
        };
        if read == 0 {
            tracing::info!("input closed");
            break;
        }

        let replies = match protocol::decode(&line) {
            Ok(None) => continue,
            Ok(Some(command)) => match engine.call(command).await {
                Some(replies) => replies,
                None => {
                    tracing::error!("engine actor stopped unexpectedly");
                    break;
                }
            },
            Err(reply) => {
                tracing::warn!(bytes = line.len(), "skipping unreadable command");
                vec![reply]
            }
        };

        for reply in replies {
            let mut encoded = serde_json::to_vec(&reply)?;
            encoded.push(b'\n');
            stdout.write_all(&encoded).await?;
        }
        stdout.flush().await?;
    }

    drop(engine);
    actor.await?;
    Ok(())
}
