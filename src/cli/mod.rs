pub mod commands;

use clap::{Arg, Command};

pub use commands::handle_subcommands;

pub fn build_cli() -> Command {
    Command::new("modbus-meters")
        .version(crate::VERSION)
        .about("Register maps and read plans for Modbus smart meters")
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .global(true)
                .default_value("console")
                .value_parser(["console", "json", "csv"])
                .help("Output format"),
        )
        .subcommand(Command::new("models").about("List supported device models"))
        .subcommand(
            Command::new("plan")
                .about("Show every read operation for a model")
                .arg(Arg::new("model").required(true)),
        )
        .subcommand(
            Command::new("probe")
                .about("Show the probe operation for a model")
                .arg(Arg::new("model").required(true)),
        )
        .subcommand(
            Command::new("decode")
                .about("Decode a captured register payload")
                .arg(Arg::new("model").required(true))
                .arg(Arg::new("measurement").required(true))
                .arg(Arg::new("payload").required(true).help("Hex bytes, e.g. 43660000")),
        )
        .subcommand(
            Command::new("validate")
                .about("Validate a device configuration against the supported models")
                .arg(Arg::new("config").long("config").short('c').help("TOML config file"))
                .arg(
                    Arg::new("devices")
                        .long("devices")
                        .short('d')
                        .help("Comma separated MODEL:ADDRESS list, e.g. SDM630:1,SDM220:2"),
                ),
        )
}
