/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::io::{self, Write};

use clap::{ArgMatches, Command};

use ftps_session::FtpsHandshakePlan;

use crate::args::AppendSessionArgs;

pub(super) const COMMAND: &str = "plan";

pub(super) fn command() -> Command {
    Command::new(COMMAND)
        .about("Resolve and show the handshake plan of a session config")
        .append_session_args()
}

fn write_plan<W: Write>(w: &mut W, plan: &FtpsHandshakePlan) -> io::Result<()> {
    let mode = plan.transport_mode();
    writeln!(w, "Transport Mode: {mode}")?;
    writeln!(w, "Default Port: {}", mode.default_port())?;
    writeln!(w, "Auth Mechanism: {}", plan.negotiated_mechanism())?;
    writeln!(
        w,
        "Client Certificate: {}",
        if plan.require_client_certificate() {
            "required"
        } else {
            "not required"
        }
    )?;
    writeln!(w, "Listener: {}", plan.listener_spec().mode())?;
    writeln!(w, "Control Channel:")?;
    for (i, step) in plan.control_channel_sequence().iter().enumerate() {
        match step.command_line() {
            Some(cmd) => writeln!(w, "  {}. {step} ({cmd})", i + 1)?,
            None => writeln!(w, "  {}. {step}", i + 1)?,
        }
    }
    writeln!(w, "Data Channel (after login):")?;
    for (i, step) in plan.data_channel_sequence().iter().enumerate() {
        writeln!(w, "  {}. {step}", i + 1)?;
    }
    Ok(())
}

pub(super) fn run(args: &ArgMatches) -> anyhow::Result<()> {
    let config = crate::args::parse_session_config(args)?;
    let plan = ftps_session::resolve(&config)?;
    write_plan(&mut io::stdout().lock(), &plan)?;
    Ok(())
}
