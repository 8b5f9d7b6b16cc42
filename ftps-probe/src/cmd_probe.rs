/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, anyhow};
use clap::{Arg, ArgMatches, Command, ValueHint, value_parser};
use rustls_pki_types::ServerName;

use ftps_session::rustls::{PemCertificateStore, build_client_config};

use crate::args::AppendSessionArgs;
use crate::driver::{FtpsProbe, FtpsProbeReport};

pub(super) const COMMAND: &str = "probe";

const COMMAND_ARG_SERVER: &str = "server";
const COMMAND_ARG_TLS_NAME: &str = "tls-name";
const COMMAND_ARG_TLS_CA_CERT: &str = "tls-ca-cert";
const COMMAND_ARG_TLS_CERT: &str = "tls-cert";
const COMMAND_ARG_TLS_KEY: &str = "tls-key";
const COMMAND_ARG_TIMEOUT: &str = "timeout";
const COMMAND_ARG_USERNAME: &str = "username";
const COMMAND_ARG_PASSWORD: &str = "password";

pub(super) fn command() -> Command {
    Command::new(COMMAND)
        .about("Drive the control channel handshake against a real FTPS server")
        .append_session_args()
        .arg(
            Arg::new(COMMAND_ARG_SERVER)
                .help("FTPS server address, the default port of the transport mode is used if absent")
                .value_name("SERVER ADDRESS")
                .num_args(1)
                .required(true),
        )
        .arg(
            Arg::new(COMMAND_ARG_TLS_NAME)
                .help("TLS server name to verify, the server host is used if absent")
                .value_name("SERVER NAME")
                .long(COMMAND_ARG_TLS_NAME)
                .num_args(1),
        )
        .arg(
            Arg::new(COMMAND_ARG_TLS_CA_CERT)
                .help("CA certificate file used to verify the server")
                .value_name("CA CERT FILE")
                .long(COMMAND_ARG_TLS_CA_CERT)
                .num_args(1)
                .required(true)
                .value_hint(ValueHint::FilePath)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(COMMAND_ARG_TLS_CERT)
                .help("Client certificate file")
                .value_name("CERT FILE")
                .long(COMMAND_ARG_TLS_CERT)
                .num_args(1)
                .requires(COMMAND_ARG_TLS_KEY)
                .value_hint(ValueHint::FilePath)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(COMMAND_ARG_TLS_KEY)
                .help("Client private key file")
                .value_name("KEY FILE")
                .long(COMMAND_ARG_TLS_KEY)
                .num_args(1)
                .requires(COMMAND_ARG_TLS_CERT)
                .value_hint(ValueHint::FilePath)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(COMMAND_ARG_TIMEOUT)
                .help("Timeout in seconds for each network operation")
                .value_name("SECONDS")
                .long(COMMAND_ARG_TIMEOUT)
                .num_args(1)
                .default_value("10")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new(COMMAND_ARG_USERNAME)
                .help("Login with this username and check data channel protection")
                .value_name("USERNAME")
                .short('u')
                .num_args(1),
        )
        .arg(
            Arg::new(COMMAND_ARG_PASSWORD)
                .help("Login password")
                .value_name("PASSWORD")
                .short('p')
                .num_args(1)
                .requires(COMMAND_ARG_USERNAME),
        )
}

/// Split `host[:port]`, with IPv6 addresses either bare or in `[addr]:port` form.
fn parse_server(s: &str) -> anyhow::Result<(String, Option<u16>)> {
    let (host, port) = if let Some(left) = s.strip_prefix('[') {
        let Some((host, right)) = left.split_once(']') else {
            return Err(anyhow!("no closing bracket in server address {s}"));
        };
        match right {
            "" => (host, None),
            _ => match right.strip_prefix(':') {
                Some(port) => (host, Some(port)),
                None => return Err(anyhow!("invalid suffix after ipv6 address in {s}")),
            },
        }
    } else {
        match s.split_once(':') {
            Some((host, port)) if !port.contains(':') => (host, Some(port)),
            _ => (s, None),
        }
    };
    if host.is_empty() {
        return Err(anyhow!("empty host in server address {s}"));
    }
    let port = match port {
        Some(p) => Some(
            p.parse::<u16>()
                .map_err(|e| anyhow!("invalid port {p} in server address {s}: {e}"))?,
        ),
        None => None,
    };
    Ok((host.to_string(), port))
}

fn print_report(report: &FtpsProbeReport) {
    println!("Greeting: {}", report.greeting);
    let steps = report
        .steps
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(" -> ");
    println!("Steps: {steps}");
    if let Some(v) = report.protocol_version {
        println!("Protocol: {v:?}");
    }
    if let Some(c) = report.cipher_suite {
        println!("Cipher Suite: {c:?}");
    }
    println!("Client Certificate Offered: {}", report.client_cert_offered);
    println!("Data Channel Protected: {}", report.data_channel_protected);
}

pub(super) async fn run(args: &ArgMatches) -> anyhow::Result<()> {
    let config = crate::args::parse_session_config(args)?;
    let plan = ftps_session::resolve(&config)?;
    log::info!("resolved plan: {plan}");

    let mut store = PemCertificateStore::default();
    if let Some(ca) = args.get_one::<PathBuf>(COMMAND_ARG_TLS_CA_CERT) {
        store.set_server_ca(ca.clone());
    }
    if let (Some(cert), Some(key)) = (
        args.get_one::<PathBuf>(COMMAND_ARG_TLS_CERT),
        args.get_one::<PathBuf>(COMMAND_ARG_TLS_KEY),
    ) {
        store.set_client_identity(cert.clone(), key.clone());
    }
    let tls_client = build_client_config(&plan, &store)?;

    let Some(server) = args.get_one::<String>(COMMAND_ARG_SERVER) else {
        return Err(anyhow!("no server address set"));
    };
    let (host, port) = parse_server(server)?;
    let port = port.unwrap_or_else(|| plan.transport_mode().default_port());

    let tls_name = args
        .get_one::<String>(COMMAND_ARG_TLS_NAME)
        .map(|s| s.as_str())
        .unwrap_or(host.as_str());
    let tls_name = ServerName::try_from(tls_name)
        .map(|n| n.to_owned())
        .map_err(|e| anyhow!("invalid tls server name {tls_name}: {e}"))?;

    let timeout = args
        .get_one::<u64>(COMMAND_ARG_TIMEOUT)
        .copied()
        .map(Duration::from_secs)
        .unwrap_or(Duration::from_secs(10));

    let mut probe = FtpsProbe::new(plan, tls_client, tls_name, timeout);
    if let Some(username) = args.get_one::<String>(COMMAND_ARG_USERNAME) {
        let password = args
            .get_one::<String>(COMMAND_ARG_PASSWORD)
            .cloned()
            .unwrap_or_default();
        probe.set_login(username.clone(), password);
    }

    let stream = probe.connect(&host, port).await?;
    let report = probe
        .run(stream)
        .await
        .context(format!("probe of {host}:{port} failed"))?;
    print_report(&report);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_address() {
        assert_eq!(
            parse_server("ftp.example.net").unwrap(),
            ("ftp.example.net".to_string(), None)
        );
        assert_eq!(
            parse_server("127.0.0.1:2121").unwrap(),
            ("127.0.0.1".to_string(), Some(2121))
        );
        assert_eq!(parse_server("::1").unwrap(), ("::1".to_string(), None));
        assert_eq!(
            parse_server("[::1]:990").unwrap(),
            ("::1".to_string(), Some(990))
        );
        assert_eq!(parse_server("[::1]").unwrap(), ("::1".to_string(), None));

        assert!(parse_server("[::1").is_err());
        assert!(parse_server("[::1]990").is_err());
        assert!(parse_server(":21").is_err());
        assert!(parse_server("host:port").is_err());
        assert!(parse_server("host:70000").is_err());
    }

    #[test]
    fn cert_requires_key() {
        let r = command().try_get_matches_from([
            COMMAND,
            "--preset",
            "explicit_tls_with_client_auth",
            "--tls-ca-cert",
            "ca.pem",
            "--tls-cert",
            "client.pem",
            "127.0.0.1",
        ]);
        assert!(r.is_err());
    }

    #[test]
    fn default_timeout() {
        let args = command()
            .try_get_matches_from([
                COMMAND,
                "--preset",
                "implicit_tls_without_client_auth",
                "--tls-ca-cert",
                "ca.pem",
                "localhost",
            ])
            .unwrap();
        assert_eq!(args.get_one::<u64>(COMMAND_ARG_TIMEOUT).copied(), Some(10));
    }
}
