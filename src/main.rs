// SPDX-License-Identifier: MPL-2.0
use smartstudy::app::{self, paths, Flags};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
SmartStudy

USAGE:
  smartstudy [OPTIONS]

OPTIONS:
  --data-dir DIR     Directory holding storage.cbor
  --config-dir DIR   Directory holding settings.toml
  --heartbeat        Show simulated study notifications
  -h, --help         Print this help
";

fn setup_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("smartstudy=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

fn parse_flags() -> Result<Flags, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let flags = Flags {
        data_dir: args.opt_value_from_str("--data-dir")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        heartbeat: args.contains("--heartbeat"),
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        tracing::warn!(?remaining, "ignoring unknown arguments");
    }
    Ok(flags)
}

fn main() -> iced::Result {
    setup_tracing();

    let flags = match parse_flags() {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    paths::init_cli_overrides(flags.data_dir.clone(), flags.config_dir.clone());
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting SmartStudy");

    app::run(flags)
}
