use std::io::{self, Write};

use serde_json::Value;

use crate::error::CliError;

pub fn render(payload: &Value, pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_json(&mut out, payload, pretty)?;
    out.flush()?;
    Ok(())
}

fn write_json(out: &mut impl Write, payload: &Value, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, payload)?;
    } else {
        serde_json::to_writer(&mut *out, payload)?;
    }
    writeln!(out)?;
    Ok(())
}
