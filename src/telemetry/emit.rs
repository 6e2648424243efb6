use anyhow::Result;
use serde::Serialize;
use std::io::{self, Write};

use crate::output::types::{Envelope, Meta};

pub fn print_plan<T: Serialize>(op: &'static str, plan: &T, meta: Option<Meta>) -> Result<()> {
    write_envelope(&Envelope::plan(op, plan, meta)?)
}

pub fn print_result<T: Serialize>(op: &'static str, result: &T, meta: Option<Meta>) -> Result<()> {
    write_envelope(&Envelope::result(op, result, meta)?)
}

fn write_envelope(env: &Envelope) -> Result<()> {
    let mut out = io::stdout();
    serde_json::to_writer(&mut out, env)?;
    writeln!(&mut out)?;
    out.flush()?;
    Ok(())
}
