/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt;

use anyhow::anyhow;
use rustls_pki_types::{CertificateDer, PrivateKeyDer};

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum FtpsListenerMode {
    /// accept plaintext and upgrade on AUTH
    PlaintextThenUpgrade,
    /// start the TLS handshake as soon as a connection is accepted
    TlsOnConnect,
}

impl FtpsListenerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FtpsListenerMode::PlaintextThenUpgrade => "plaintext_then_upgrade",
            FtpsListenerMode::TlsOnConnect => "tls_on_connect",
        }
    }
}

impl fmt::Display for FtpsListenerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a test server listener should look like for a handshake plan.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct FtpsListenerSpec {
    mode: FtpsListenerMode,
    require_client_certificate: bool,
    port: u16,
}

impl FtpsListenerSpec {
    pub(crate) fn new(mode: FtpsListenerMode, require_client_certificate: bool) -> Self {
        FtpsListenerSpec {
            mode,
            require_client_certificate,
            port: 0,
        }
    }

    /// Bind to a fixed port instead of letting the server pick one.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[inline]
    pub fn mode(&self) -> FtpsListenerMode {
        self.mode
    }

    #[inline]
    pub fn require_client_certificate(&self) -> bool {
        self.require_client_certificate
    }

    #[inline]
    pub fn port(&self) -> u16 {
        self.port
    }
}

/// A certificate chain and its private key.
#[derive(Debug, Eq, PartialEq)]
pub struct FtpsIdentity {
    certs: Vec<CertificateDer<'static>>,
    key: PrivateKeyDer<'static>,
}

impl Clone for FtpsIdentity {
    fn clone(&self) -> Self {
        FtpsIdentity {
            certs: self.certs.clone(),
            key: self.key.clone_key(),
        }
    }
}

impl FtpsIdentity {
    pub fn new(
        certs: Vec<CertificateDer<'static>>,
        key: PrivateKeyDer<'static>,
    ) -> anyhow::Result<Self> {
        if certs.is_empty() {
            return Err(anyhow!("no certificate set"));
        }
        Ok(FtpsIdentity { certs, key })
    }

    pub fn certs(&self) -> &[CertificateDer<'static>] {
        &self.certs
    }

    pub fn into_inner(self) -> (Vec<CertificateDer<'static>>, PrivateKeyDer<'static>) {
        (self.certs, self.key)
    }
}

/// Source of the certificates used by the test server and client.
pub trait FtpsCertificateStore {
    fn server_identity(&self) -> anyhow::Result<FtpsIdentity>;

    /// The identity the client presents when client auth is required.
    fn client_identity(&self) -> anyhow::Result<Option<FtpsIdentity>>;

    /// Trust anchors the server uses to verify client certificates.
    fn client_ca_certs(&self) -> anyhow::Result<Vec<CertificateDer<'static>>>;

    /// Trust anchors the client uses to verify the server certificate.
    fn server_ca_certs(&self) -> anyhow::Result<Vec<CertificateDer<'static>>>;
}

pub trait FtpsServerHandle {
    fn local_port(&self) -> u16;

    /// Stop the server. Calling it again after a successful stop is a no-op.
    fn stop(&mut self) -> anyhow::Result<()>;
}

pub trait FtpsServerBootstrap {
    type Handle: FtpsServerHandle;

    fn start(
        &mut self,
        spec: &FtpsListenerSpec,
        certs: &dyn FtpsCertificateStore,
    ) -> anyhow::Result<Self::Handle>;
}
