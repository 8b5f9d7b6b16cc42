/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::builder::BoolishValueParser;
use clap::{Arg, ArgMatches, Command, ValueHint, value_parser};

use ftps_session::{FtpsSessionConfig, FtpsSessionConfigBuilder, FtpsSessionPreset};

const SESSION_ARG_PRESET: &str = "preset";
const SESSION_ARG_CONFIG: &str = "config";
const SESSION_ARG_CLIENT_AUTH: &str = "client-auth";
const SESSION_ARG_IMPLICIT: &str = "implicit";
const SESSION_ARG_AUTH: &str = "auth";

pub(crate) trait AppendSessionArgs {
    fn append_session_args(self) -> Self;
}

impl AppendSessionArgs for Command {
    fn append_session_args(self) -> Command {
        self.arg(
            Arg::new(SESSION_ARG_PRESET)
                .help("Use a named session preset, e.g. implicit_tls_with_client_auth")
                .value_name("PRESET")
                .long(SESSION_ARG_PRESET)
                .num_args(1)
                .conflicts_with_all([
                    SESSION_ARG_CONFIG,
                    SESSION_ARG_CLIENT_AUTH,
                    SESSION_ARG_IMPLICIT,
                    SESSION_ARG_AUTH,
                ]),
        )
        .arg(
            Arg::new(SESSION_ARG_CONFIG)
                .help("Load the session config from a yaml file")
                .value_name("CONFIG FILE")
                .long(SESSION_ARG_CONFIG)
                .short('c')
                .num_args(1)
                .value_hint(ValueHint::FilePath)
                .value_parser(value_parser!(PathBuf))
                .conflicts_with_all([
                    SESSION_ARG_CLIENT_AUTH,
                    SESSION_ARG_IMPLICIT,
                    SESSION_ARG_AUTH,
                ]),
        )
        .arg(
            Arg::new(SESSION_ARG_CLIENT_AUTH)
                .help("Whether the server requires a client certificate")
                .value_name("BOOL")
                .long(SESSION_ARG_CLIENT_AUTH)
                .num_args(1)
                .value_parser(BoolishValueParser::new()),
        )
        .arg(
            Arg::new(SESSION_ARG_IMPLICIT)
                .help("Whether to use implicit TLS instead of explicit AUTH negotiation")
                .value_name("BOOL")
                .long(SESSION_ARG_IMPLICIT)
                .num_args(1)
                .value_parser(BoolishValueParser::new()),
        )
        .arg(
            Arg::new(SESSION_ARG_AUTH)
                .help("The AUTH mechanism, TLS or SSL")
                .value_name("MECHANISM")
                .long(SESSION_ARG_AUTH)
                .num_args(1),
        )
    }
}

pub(crate) fn parse_session_config(args: &ArgMatches) -> anyhow::Result<FtpsSessionConfig> {
    if let Some(name) = args.get_one::<String>(SESSION_ARG_PRESET) {
        let preset = FtpsSessionPreset::from_str(name)?;
        return Ok(preset.config());
    }

    if let Some(file) = args.get_one::<PathBuf>(SESSION_ARG_CONFIG) {
        return FtpsSessionConfig::load_yaml_file(file);
    }

    let mut builder = FtpsSessionConfigBuilder::default();
    if let Some(v) = args.get_one::<bool>(SESSION_ARG_CLIENT_AUTH) {
        builder.set_client_auth_required(*v);
    }
    if let Some(v) = args.get_one::<bool>(SESSION_ARG_IMPLICIT) {
        builder.set_implicit_tls(*v);
    }
    if let Some(v) = args.get_one::<String>(SESSION_ARG_AUTH) {
        builder.set_auth_mechanism(v.as_str());
    }
    builder.build().context(format!(
        "use --{SESSION_ARG_PRESET}, --{SESSION_ARG_CONFIG} or all of --{SESSION_ARG_CLIENT_AUTH}, --{SESSION_ARG_IMPLICIT} and --{SESSION_ARG_AUTH}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(args: &[&str]) -> ArgMatches {
        Command::new("test")
            .append_session_args()
            .try_get_matches_from(args)
            .unwrap()
    }

    #[test]
    fn preset() {
        let args = matches(&["test", "--preset", "implicit-tls-with-client-auth"]);
        let config = parse_session_config(&args).unwrap();
        assert_eq!(config, FtpsSessionConfig::new(true, true, "TLS"));
    }

    #[test]
    fn explicit_flags() {
        let args = matches(&[
            "test",
            "--client-auth",
            "no",
            "--implicit",
            "false",
            "--auth",
            "SSL",
        ]);
        let config = parse_session_config(&args).unwrap();
        assert_eq!(config, FtpsSessionConfig::new(false, false, "SSL"));
    }

    #[test]
    fn missing_flag() {
        let args = matches(&["test", "--client-auth", "true", "--auth", "TLS"]);
        assert!(parse_session_config(&args).is_err());

        let args = matches(&["test"]);
        assert!(parse_session_config(&args).is_err());
    }

    #[test]
    fn conflicts() {
        let r = Command::new("test")
            .append_session_args()
            .try_get_matches_from([
                "test",
                "--preset",
                "explicit_tls_without_client_auth",
                "--implicit",
                "true",
            ]);
        assert!(r.is_err());
    }
}
