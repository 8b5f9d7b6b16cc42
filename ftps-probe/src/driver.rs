/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use rustls_pki_types::ServerName;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tokio_rustls::rustls::{CipherSuite, ClientConfig, ProtocolVersion};

use ftps_session::{FtpsHandshakePlan, FtpsHandshakeStep, FtpsTransportMode};

use crate::control::{ControlChannel, ProbeStream};
use crate::error::FtpsProbeError;

#[derive(Debug, Default)]
pub(crate) struct FtpsProbeReport {
    pub(crate) steps: Vec<FtpsHandshakeStep>,
    pub(crate) greeting: String,
    pub(crate) protocol_version: Option<ProtocolVersion>,
    pub(crate) cipher_suite: Option<CipherSuite>,
    /// The client identity was loaded into the handshake. Whether it was
    /// sent depends on the server asking for it.
    pub(crate) client_cert_offered: bool,
    pub(crate) data_channel_protected: bool,
}

struct FtpsLogin {
    username: String,
    password: String,
}

/// Drives the control channel of a real server through a handshake plan.
pub(crate) struct FtpsProbe {
    plan: FtpsHandshakePlan,
    connector: TlsConnector,
    tls_name: ServerName<'static>,
    timeout: Duration,
    login: Option<FtpsLogin>,
}

impl FtpsProbe {
    pub(crate) fn new(
        plan: FtpsHandshakePlan,
        tls_client: ClientConfig,
        tls_name: ServerName<'static>,
        timeout: Duration,
    ) -> Self {
        FtpsProbe {
            plan,
            connector: TlsConnector::from(Arc::new(tls_client)),
            tls_name,
            timeout,
            login: None,
        }
    }

    pub(crate) fn set_login(&mut self, username: String, password: String) {
        self.login = Some(FtpsLogin { username, password });
    }

    pub(crate) async fn connect(&self, host: &str, port: u16) -> Result<TcpStream, FtpsProbeError> {
        match tokio::time::timeout(self.timeout, TcpStream::connect((host, port))).await {
            Ok(Ok(stream)) => {
                info!("connected to {host}:{port}");
                Ok(stream)
            }
            Ok(Err(e)) => Err(FtpsProbeError::ConnectFailed(e)),
            Err(_) => Err(FtpsProbeError::TimedOut("connect")),
        }
    }

    pub(crate) async fn run<S>(&self, stream: S) -> Result<FtpsProbeReport, FtpsProbeError>
    where
        S: ProbeStream + 'static,
    {
        let mut report = FtpsProbeReport::default();
        let mut channel = ControlChannel::new(Box::new(stream), self.timeout);

        for step in self.plan.control_channel_sequence() {
            match step {
                FtpsHandshakeStep::ConnectPlaintext => {
                    let reply = channel.expect_reply("greeting", &[220]).await?;
                    report.greeting = reply.text().to_string();
                }
                FtpsHandshakeStep::ConnectSecure => {}
                FtpsHandshakeStep::IssueAuthCommand(mechanism) => {
                    channel.send_cmd(mechanism.auth_command()).await?;
                    channel.expect_reply("auth", &[234]).await?;
                }
                FtpsHandshakeStep::TlsHandshake => {
                    let stream = channel.into_inner()?;
                    let tls_stream = match tokio::time::timeout(
                        self.timeout,
                        self.connector.connect(self.tls_name.clone(), stream),
                    )
                    .await
                    {
                        Ok(Ok(s)) => s,
                        Ok(Err(e)) => return Err(FtpsProbeError::HandshakeFailed(e)),
                        Err(_) => return Err(FtpsProbeError::TimedOut("tls handshake")),
                    };
                    let (_, conn) = tls_stream.get_ref();
                    report.protocol_version = conn.protocol_version();
                    report.cipher_suite = conn.negotiated_cipher_suite().map(|s| s.suite());
                    channel = ControlChannel::new(Box::new(tls_stream), self.timeout);
                }
                FtpsHandshakeStep::PresentClientCertificate => report.client_cert_offered = true,
            }
            debug!("step {step} done");
            report.steps.push(*step);
        }

        if self.plan.transport_mode() == FtpsTransportMode::ImplicitTls {
            let reply = channel.expect_reply("greeting", &[220]).await?;
            report.greeting = reply.text().to_string();
        }

        if let Some(login) = &self.login {
            channel.send_cmd(&format!("USER {}", login.username)).await?;
            let reply = channel.expect_reply("user", &[230, 331]).await?;
            if reply.code() == 331 {
                channel.send_cmd(&format!("PASS {}", login.password)).await?;
                channel.expect_reply("pass", &[202, 230]).await?;
            }
            for step in self.plan.data_channel_sequence() {
                channel.send_cmd(&step.command_line()).await?;
                channel.expect_reply("data channel protection", &[200]).await?;
            }
            report.data_channel_protected = true;
        }

        channel.send_cmd("QUIT").await?;
        channel.expect_reply("quit", &[221]).await?;
        Ok(report)
    }
}
