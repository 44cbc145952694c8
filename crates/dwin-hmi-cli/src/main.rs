//! `dwin-hmi`: register access to DWIN DGUS displays from the shell.

mod args;
mod config;
mod session;

use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use dwin_hmi_metrics::MetricLabels;
use dwin_hmi_protocol::{ClientConfig, HmiClient};
use dwin_hmi_serial::{available_ports, SerialTransport};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::args::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Command::Ports => {
            let ports = available_ports()?;
            if ports.is_empty() {
                println!("no serial ports found");
            }
            for port in ports {
                println!("{}", port);
            }
        }
        Command::Register(command) => {
            let serial = config::resolve(&cli.connection)?;
            let transport = SerialTransport::open(&serial)?;
            let client_config = ClientConfig {
                poll_interval: Duration::from_micros(cli.connection.poll_interval_us),
                labels: MetricLabels::new(serial.port.clone()),
            };
            let mut hmi = HmiClient::with_config(transport, client_config);

            info!(port = %serial.port, "connected");
            session::execute(&mut hmi, command, &mut io::stdout().lock())?;
        }
    }
    Ok(())
}

/// Log to stderr. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
