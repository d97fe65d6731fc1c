use anyhow::Result;
use log::{debug, info};

use modbus_meters::cli::{build_cli, handle_subcommands};
use modbus_meters::devices::ProducerRegistry;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut cli = build_cli();
    let matches = cli.get_matches_mut();

    // Registration happens once, before anything resolves a model
    let registry = ProducerRegistry::with_builtin_models()?;
    debug!("Registered models: {}", registry.names().join(", "));
    info!("🖥️  Modbus Meters v{} ({} device models)", modbus_meters::VERSION, registry.len());

    if !handle_subcommands(&matches, &registry)? {
        cli.print_help()?;
    }

    Ok(())
}
