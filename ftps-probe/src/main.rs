/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::io;

use anyhow::anyhow;
use clap::{Arg, ArgAction, Command, value_parser};
use clap_complete::Shell;

mod args;
mod control;
mod driver;
mod error;
mod logger;

mod cmd_plan;
mod cmd_probe;

const GLOBAL_ARG_COMPLETION: &str = "completion";
const GLOBAL_ARG_VERBOSE: &str = "verbose";

fn build_cli_args() -> Command {
    Command::new("ftps-probe")
        .arg(
            Arg::new(GLOBAL_ARG_COMPLETION)
                .num_args(1)
                .value_name("SHELL")
                .long("completion")
                .value_parser(value_parser!(Shell))
                .exclusive(true),
        )
        .arg(
            Arg::new(GLOBAL_ARG_VERBOSE)
                .help("show verbose message")
                .num_args(0)
                .action(ArgAction::Count)
                .short('v')
                .global(true),
        )
        .subcommand(cmd_plan::command())
        .subcommand(cmd_probe::command())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = build_cli_args().get_matches();

    if let Some(target) = args.get_one::<Shell>(GLOBAL_ARG_COMPLETION) {
        let mut app = build_cli_args();
        let bin_name = app.get_name().to_string();
        clap_complete::generate(*target, &mut app, bin_name, &mut io::stdout());
        return Ok(());
    }

    let verbose_level = args
        .get_one::<u8>(GLOBAL_ARG_VERBOSE)
        .copied()
        .unwrap_or_default();
    logger::SyncLogger::new(verbose_level)
        .into_global_logger()
        .map_err(|e| anyhow!("failed to install logger: {e}"))?;

    match args.subcommand() {
        Some((cmd_plan::COMMAND, args)) => cmd_plan::run(args),
        Some((cmd_probe::COMMAND, args)) => cmd_probe::run(args).await,
        Some((cmd, _)) => Err(anyhow!("invalid subcommand {cmd}")),
        None => Err(anyhow!("no subcommand found")),
    }
}
