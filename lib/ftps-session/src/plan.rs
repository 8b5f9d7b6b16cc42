/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt;

use crate::{FtpsAuthMechanism, FtpsListenerMode, FtpsListenerSpec};

const IMPLICIT_TLS_DEFAULT_PORT: u16 = 990;
const EXPLICIT_TLS_DEFAULT_PORT: u16 = 21;

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum FtpsTransportMode {
    /// TLS starts right after the TCP connection is established
    ImplicitTls,
    /// plaintext control connection upgraded by the AUTH command
    ExplicitTls,
}

impl FtpsTransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FtpsTransportMode::ImplicitTls => "implicit_tls",
            FtpsTransportMode::ExplicitTls => "explicit_tls",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            FtpsTransportMode::ImplicitTls => IMPLICIT_TLS_DEFAULT_PORT,
            FtpsTransportMode::ExplicitTls => EXPLICIT_TLS_DEFAULT_PORT,
        }
    }

    pub fn listener_mode(&self) -> FtpsListenerMode {
        match self {
            FtpsTransportMode::ImplicitTls => FtpsListenerMode::TlsOnConnect,
            FtpsTransportMode::ExplicitTls => FtpsListenerMode::PlaintextThenUpgrade,
        }
    }
}

impl fmt::Display for FtpsTransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step the client takes to reach a secured control channel.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum FtpsHandshakeStep {
    ConnectPlaintext,
    ConnectSecure,
    IssueAuthCommand(FtpsAuthMechanism),
    TlsHandshake,
    PresentClientCertificate,
}

impl FtpsHandshakeStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            FtpsHandshakeStep::ConnectPlaintext => "connect-plaintext",
            FtpsHandshakeStep::ConnectSecure => "connect-secure",
            FtpsHandshakeStep::IssueAuthCommand(_) => "issue-explicit-tls",
            FtpsHandshakeStep::TlsHandshake => "tls-handshake",
            FtpsHandshakeStep::PresentClientCertificate => "present-client-cert",
        }
    }

    /// The control channel command line sent for this step, if any.
    pub fn command_line(&self) -> Option<&'static str> {
        match self {
            FtpsHandshakeStep::IssueAuthCommand(mechanism) => Some(mechanism.auth_command()),
            _ => None,
        }
    }
}

impl fmt::Display for FtpsHandshakeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data channel protection level of the `PROT` command (RFC 4217).
///
/// Only the private level is defined, a plan never falls back to a clear
/// data channel.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum FtpsProtectionLevel {
    Private,
}

impl FtpsProtectionLevel {
    pub fn code(&self) -> char {
        match self {
            FtpsProtectionLevel::Private => 'P',
        }
    }
}

/// Data channel protection commands, sent on the secured control channel
/// after login.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum FtpsDataChannelStep {
    SetProtectionBufferSize(u32),
    SetProtectionLevel(FtpsProtectionLevel),
}

impl FtpsDataChannelStep {
    pub fn command_line(&self) -> String {
        match self {
            FtpsDataChannelStep::SetProtectionBufferSize(size) => format!("PBSZ {size}"),
            FtpsDataChannelStep::SetProtectionLevel(level) => format!("PROT {}", level.code()),
        }
    }
}

impl fmt::Display for FtpsDataChannelStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct FtpsHandshakePlan {
    transport_mode: FtpsTransportMode,
    require_client_certificate: bool,
    negotiated_mechanism: FtpsAuthMechanism,
    control_channel_sequence: Vec<FtpsHandshakeStep>,
    data_channel_sequence: Vec<FtpsDataChannelStep>,
}

impl FtpsHandshakePlan {
    pub(crate) fn new(
        transport_mode: FtpsTransportMode,
        require_client_certificate: bool,
        negotiated_mechanism: FtpsAuthMechanism,
        control_channel_sequence: Vec<FtpsHandshakeStep>,
        data_channel_sequence: Vec<FtpsDataChannelStep>,
    ) -> Self {
        FtpsHandshakePlan {
            transport_mode,
            require_client_certificate,
            negotiated_mechanism,
            control_channel_sequence,
            data_channel_sequence,
        }
    }

    #[inline]
    pub fn transport_mode(&self) -> FtpsTransportMode {
        self.transport_mode
    }

    #[inline]
    pub fn require_client_certificate(&self) -> bool {
        self.require_client_certificate
    }

    #[inline]
    pub fn negotiated_mechanism(&self) -> FtpsAuthMechanism {
        self.negotiated_mechanism
    }

    #[inline]
    pub fn control_channel_sequence(&self) -> &[FtpsHandshakeStep] {
        &self.control_channel_sequence
    }

    #[inline]
    pub fn data_channel_sequence(&self) -> &[FtpsDataChannelStep] {
        &self.data_channel_sequence
    }

    pub fn has_explicit_negotiation(&self) -> bool {
        self.control_channel_sequence
            .iter()
            .any(|s| matches!(s, FtpsHandshakeStep::IssueAuthCommand(_)))
    }

    pub fn connects_directly_secure(&self) -> bool {
        self.control_channel_sequence
            .first()
            .is_some_and(|s| *s == FtpsHandshakeStep::ConnectSecure)
    }

    /// Whether the sequence reaches a secured channel: a TLS handshake is
    /// done and the only step that may follow it is the client certificate.
    pub fn ends_secured(&self) -> bool {
        let Some(pos) = self
            .control_channel_sequence
            .iter()
            .position(|s| *s == FtpsHandshakeStep::TlsHandshake)
        else {
            return false;
        };
        self.control_channel_sequence[pos + 1..]
            .iter()
            .all(|s| *s == FtpsHandshakeStep::PresentClientCertificate)
    }

    pub fn listener_spec(&self) -> FtpsListenerSpec {
        FtpsListenerSpec::new(
            self.transport_mode.listener_mode(),
            self.require_client_certificate,
        )
    }
}

impl fmt::Display for FtpsHandshakePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, client cert {}): ",
            self.transport_mode,
            self.negotiated_mechanism,
            if self.require_client_certificate {
                "required"
            } else {
                "not required"
            }
        )?;
        for (i, step) in self.control_channel_sequence.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}
