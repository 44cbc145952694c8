//! Executing register commands against a connected display.

use std::io::Write;

use anyhow::{Context, Result};
use dwin_hmi_protocol::{ByteTransport, HmiClient};
use tracing::{debug, info};

use crate::args::RegisterCommand;

/// Run one command and print its result to `out`.
pub fn execute<T: ByteTransport>(
    hmi: &mut HmiClient<T>,
    command: &RegisterCommand,
    out: &mut impl Write,
) -> Result<()> {
    debug!(?command, "executing");
    match *command {
        RegisterCommand::WriteReg { address, value } => {
            hmi.write_register(address, value)
                .with_context(|| format!("write register 0x{:04X}", address))?;
            writeln!(out, "0x{:04X} <- 0x{:04X} ({})", address, value, value)?;
        }
        RegisterCommand::ReadReg { address } => {
            let value = hmi
                .read_register(address)
                .with_context(|| format!("read register 0x{:04X}", address))?;
            writeln!(out, "0x{:04X} = 0x{:04X} ({})", address, value, value)?;
        }
        RegisterCommand::WriteFloat { address, value } => {
            hmi.write_float(address, value)
                .with_context(|| format!("write float at 0x{:04X}", address))?;
            writeln!(out, "0x{:04X} <- {}", address, value)?;
        }
        RegisterCommand::ReadFloat { address } => {
            let value = hmi
                .read_float(address)
                .with_context(|| format!("read float at 0x{:04X}", address))?;
            writeln!(out, "0x{:04X} = {:.4}", address, value)?;
        }
        RegisterCommand::Demo => demo(hmi, out)?,
    }
    Ok(())
}

/// The example session shipped with the library.
fn demo<T: ByteTransport>(hmi: &mut HmiClient<T>, out: &mut impl Write) -> Result<()> {
    info!("writing 0x0005 to 0x5000");
    hmi.write_register(0x5000, 0x0005)
        .context("write register 0x5000")?;

    let value = hmi
        .read_register(0x07D0)
        .context("read register 0x07D0")?;
    writeln!(out, "Register 0x07D0 = 0x{:04X}", value)?;

    info!("float round trip at 0x0800");
    hmi.write_float(0x0800, 3.1415).context("write float at 0x0800")?;
    let f = hmi.read_float(0x0800).context("read float at 0x0800")?;
    writeln!(out, "Float at 0x0800 = {:.4}", f)?;
    Ok(())
}
