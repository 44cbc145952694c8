//! Command line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Read and write registers on a DWIN DGUS HMI over a serial port
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Serial connection options. Flags win over the config file.
#[derive(Args, Debug, Default)]
pub struct ConnectionArgs {
    /// Serial port (e.g. /dev/ttyUSB0 or COM3)
    #[arg(long, env = "HMI_PORT", global = true)]
    pub port: Option<String>,

    /// Baud rate [default: 115200]
    #[arg(long, env = "HMI_BAUD", global = true)]
    pub baud: Option<u32>,

    /// Reply timeout in seconds [default: 0.1]
    #[arg(long, env = "HMI_TIMEOUT", global = true)]
    pub timeout: Option<f64>,

    /// YAML file with `port`, `baud_rate` and `timeout_secs`
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Back-off between polls of an idle port, in microseconds
    #[arg(long, default_value_t = 500, global = true)]
    pub poll_interval_us: u64,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List serial ports on this machine
    Ports,

    #[command(flatten)]
    Register(RegisterCommand),
}

/// Commands that talk to the display.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum RegisterCommand {
    /// Write a 16-bit register
    WriteReg {
        /// VP address (decimal or 0x hex)
        #[arg(value_parser = parse_word)]
        address: u16,
        /// Value (decimal or 0x hex, masked to 16 bits)
        #[arg(value_parser = parse_word)]
        value: u16,
    },

    /// Read a 16-bit register
    ReadReg {
        /// VP address (decimal or 0x hex)
        #[arg(value_parser = parse_word)]
        address: u16,
    },

    /// Write a 32-bit float to two consecutive registers
    WriteFloat {
        /// Starting VP address (decimal or 0x hex)
        #[arg(value_parser = parse_word)]
        address: u16,
        /// Value to store
        #[arg(allow_negative_numbers = true)]
        value: f32,
    },

    /// Read a 32-bit float from two consecutive registers
    ReadFloat {
        /// Starting VP address (decimal or 0x hex)
        #[arg(value_parser = parse_word)]
        address: u16,
    },

    /// Run the example session: write 0x5000, read 0x07D0, float round trip at 0x0800
    Demo,
}

/// Parse a decimal or `0x` hex number and keep its low 16 bits.
pub fn parse_word(s: &str) -> Result<u16, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse::<u64>(),
    };
    parsed
        .map(|n| (n & 0xFFFF) as u16)
        .map_err(|e| format!("invalid number '{}': {}", s, e))
}
