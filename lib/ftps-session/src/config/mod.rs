/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use anyhow::anyhow;

mod yaml;

/// The security settings of one FTPS test fixture.
///
/// All fields are fixed at construction. A handshake plan derived from a
/// config can therefore never disagree with it.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct FtpsSessionConfig {
    client_auth_required: bool,
    implicit_tls: bool,
    auth_mechanism: String,
}

impl FtpsSessionConfig {
    pub fn new<S: Into<String>>(
        client_auth_required: bool,
        implicit_tls: bool,
        auth_mechanism: S,
    ) -> Self {
        FtpsSessionConfig {
            client_auth_required,
            implicit_tls,
            auth_mechanism: auth_mechanism.into(),
        }
    }

    #[inline]
    pub fn client_auth_required(&self) -> bool {
        self.client_auth_required
    }

    #[inline]
    pub fn implicit_tls(&self) -> bool {
        self.implicit_tls
    }

    #[inline]
    pub fn auth_mechanism(&self) -> &str {
        &self.auth_mechanism
    }
}

/// Collects the three settings one at a time.
///
/// There is no default for any of them, `build` fails if one is left unset.
#[derive(Clone, Debug, Default)]
pub struct FtpsSessionConfigBuilder {
    client_auth_required: Option<bool>,
    implicit_tls: Option<bool>,
    auth_mechanism: Option<String>,
}

impl FtpsSessionConfigBuilder {
    pub fn set_client_auth_required(&mut self, required: bool) {
        self.client_auth_required = Some(required);
    }

    pub fn set_implicit_tls(&mut self, implicit: bool) {
        self.implicit_tls = Some(implicit);
    }

    pub fn set_auth_mechanism<S: Into<String>>(&mut self, mechanism: S) {
        self.auth_mechanism = Some(mechanism.into());
    }

    pub fn check(&self) -> anyhow::Result<()> {
        if self.client_auth_required.is_none() {
            return Err(anyhow!("client auth requirement is not set"));
        }
        if self.implicit_tls.is_none() {
            return Err(anyhow!("implicit / explicit tls mode is not set"));
        }
        match &self.auth_mechanism {
            Some(s) if s.is_empty() => Err(anyhow!("auth mechanism is empty")),
            Some(_) => Ok(()),
            None => Err(anyhow!("auth mechanism is not set")),
        }
    }

    pub fn build(self) -> anyhow::Result<FtpsSessionConfig> {
        self.check()?;
        let (Some(client_auth_required), Some(implicit_tls), Some(auth_mechanism)) = (
            self.client_auth_required,
            self.implicit_tls,
            self.auth_mechanism,
        ) else {
            return Err(anyhow!("incomplete ftps session config"));
        };
        Ok(FtpsSessionConfig {
            client_auth_required,
            implicit_tls,
            auth_mechanism,
        })
    }
}
