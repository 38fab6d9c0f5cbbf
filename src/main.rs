use clap::Parser;
use morse_relay::adapters::{ConsoleNotifier, HostCapabilityGate, HttpDispatchClient, NmcliAssociator};
use morse_relay::utils::{logger, validation::Validate};
use morse_relay::{RelayConfig, RelayOrchestrator, RelayPlan};
use std::time::Duration;

const ASSOCIATION_WAIT: Duration = Duration::from_secs(30);
const DISPATCH_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = RelayConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting morse-relay CLI");
    if config.verbose {
        tracing::debug!("Relay config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let plan = RelayPlan::from_settings(&config)?;
    let orchestrator = RelayOrchestrator::new(
        plan,
        NmcliAssociator::new(ASSOCIATION_WAIT),
        HttpDispatchClient::new(DISPATCH_TIMEOUT)?,
        HostCapabilityGate,
        ConsoleNotifier,
    );

    match orchestrator.start(&config.message).await {
        Ok(report) => {
            tracing::info!("✅ Relay completed");
            if config.verbose {
                tracing::debug!("Relay report: {}", serde_json::to_string(&report)?);
            }
            println!(
                "✅ Relay completed in {} ms (Morse window {} ms)",
                report.total_duration_ms, report.delay_ms
            );
        }
        Err(e) => {
            tracing::error!("❌ Relay failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
