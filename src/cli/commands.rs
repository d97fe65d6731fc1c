use anyhow::{anyhow, bail, Context, Result};
use clap::ArgMatches;
use log::info;

use crate::config::Config;
use crate::devices::{Measurement, ProducerRegistry};
use crate::output::{formatter_for, DevicePlan, ModelInfo, PlanFormatter};
use crate::services::PlanService;

/// Run the selected subcommand. Returns false when none was given.
pub fn handle_subcommands(matches: &ArgMatches, registry: &ProducerRegistry) -> Result<bool> {
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("console");
    let formatter = formatter_for(format).ok_or_else(|| anyhow!("unknown format {}", format))?;

    let output = match matches.subcommand() {
        Some(("models", _)) => list_models(registry, formatter.as_ref()),
        Some(("plan", sub)) => show_plan(registry, formatter.as_ref(), required(sub, "model")?)?,
        Some(("probe", sub)) => show_probe(registry, formatter.as_ref(), required(sub, "model")?)?,
        Some(("decode", sub)) => decode_payload(
            registry,
            formatter.as_ref(),
            required(sub, "model")?,
            required(sub, "measurement")?,
            required(sub, "payload")?,
        )?,
        Some(("validate", sub)) => validate_config(
            registry,
            formatter.as_ref(),
            sub.get_one::<String>("config").map(String::as_str),
            sub.get_one::<String>("devices").map(String::as_str),
        )?,
        _ => return Ok(false),
    };

    print!("{}", formatter.format_header());
    print!("{}", output);
    Ok(true)
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing argument <{}>", name))
}

pub fn list_models(registry: &ProducerRegistry, formatter: &dyn PlanFormatter) -> String {
    let models: Vec<ModelInfo> = registry
        .names()
        .into_iter()
        .map(|name| {
            let description = registry
                .lookup(name)
                .map(|p| p.description().to_string())
                .unwrap_or_else(|e| format!("unavailable: {}", e));
            (name.to_string(), description)
        })
        .collect();

    formatter.format_models(&models)
}

pub fn show_plan(registry: &ProducerRegistry, formatter: &dyn PlanFormatter, model: &str) -> Result<String> {
    let producer = registry.lookup(model)?;
    info!("🔍 Read plan for {}", producer.description());
    Ok(formatter.format_operations(producer.description(), &producer.produce()))
}

pub fn show_probe(registry: &ProducerRegistry, formatter: &dyn PlanFormatter, model: &str) -> Result<String> {
    let producer = registry.lookup(model)?;
    Ok(formatter.format_operations(producer.description(), &[producer.probe()]))
}

pub fn decode_payload(
    registry: &ProducerRegistry,
    formatter: &dyn PlanFormatter,
    model: &str,
    measurement: &str,
    payload: &str,
) -> Result<String> {
    let producer = registry.lookup(model)?;
    let measurement: Measurement = measurement.parse()?;

    let operation = producer
        .operation(measurement)
        .ok_or_else(|| anyhow!("{} does not expose {}", producer.description(), measurement))?;

    let cleaned: String = payload
        .trim()
        .trim_start_matches("0x")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let bytes = hex::decode(&cleaned).with_context(|| format!("invalid hex payload '{}'", payload))?;

    let reading = operation.read(&bytes)?;
    Ok(formatter.format_readings(producer.description(), &[reading]))
}

pub fn validate_config(
    registry: &ProducerRegistry,
    formatter: &dyn PlanFormatter,
    config_path: Option<&str>,
    devices: Option<&str>,
) -> Result<String> {
    let mut config = match config_path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(devices) = devices {
        config = config.with_devices(devices)?;
    }

    if config.enabled_devices().is_empty() {
        bail!("no enabled devices configured");
    }

    let service = PlanService::new(&config, registry)?;
    info!("✅ Configuration valid: {} devices", service.devices().len());

    let plan: Vec<DevicePlan> = service
        .poll_plan()
        .into_iter()
        .map(|(address, operations)| {
            let label = service
                .device(address)
                .map(|d| d.config.display_name())
                .unwrap_or_else(|| address.to_string());
            (label, operations)
        })
        .collect();

    Ok(formatter.format_plan(&plan))
}
