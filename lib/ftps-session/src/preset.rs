/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;

use crate::{FtpsAuthMechanism, FtpsSessionConfig};

/// Named fixture settings, one per combination of negotiation mode,
/// auth mechanism and client certificate requirement.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum FtpsSessionPreset {
    ExplicitTlsWithoutClientAuth,
    ExplicitTlsWithClientAuth,
    ExplicitSslWithoutClientAuth,
    ExplicitSslWithClientAuth,
    ImplicitTlsWithoutClientAuth,
    ImplicitTlsWithClientAuth,
    ImplicitSslWithoutClientAuth,
    ImplicitSslWithClientAuth,
}

impl FtpsSessionPreset {
    pub const ALL: [FtpsSessionPreset; 8] = [
        FtpsSessionPreset::ExplicitTlsWithoutClientAuth,
        FtpsSessionPreset::ExplicitTlsWithClientAuth,
        FtpsSessionPreset::ExplicitSslWithoutClientAuth,
        FtpsSessionPreset::ExplicitSslWithClientAuth,
        FtpsSessionPreset::ImplicitTlsWithoutClientAuth,
        FtpsSessionPreset::ImplicitTlsWithClientAuth,
        FtpsSessionPreset::ImplicitSslWithoutClientAuth,
        FtpsSessionPreset::ImplicitSslWithClientAuth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FtpsSessionPreset::ExplicitTlsWithoutClientAuth => "explicit_tls_without_client_auth",
            FtpsSessionPreset::ExplicitTlsWithClientAuth => "explicit_tls_with_client_auth",
            FtpsSessionPreset::ExplicitSslWithoutClientAuth => "explicit_ssl_without_client_auth",
            FtpsSessionPreset::ExplicitSslWithClientAuth => "explicit_ssl_with_client_auth",
            FtpsSessionPreset::ImplicitTlsWithoutClientAuth => "implicit_tls_without_client_auth",
            FtpsSessionPreset::ImplicitTlsWithClientAuth => "implicit_tls_with_client_auth",
            FtpsSessionPreset::ImplicitSslWithoutClientAuth => "implicit_ssl_without_client_auth",
            FtpsSessionPreset::ImplicitSslWithClientAuth => "implicit_ssl_with_client_auth",
        }
    }

    pub fn implicit_tls(&self) -> bool {
        matches!(
            self,
            FtpsSessionPreset::ImplicitTlsWithoutClientAuth
                | FtpsSessionPreset::ImplicitTlsWithClientAuth
                | FtpsSessionPreset::ImplicitSslWithoutClientAuth
                | FtpsSessionPreset::ImplicitSslWithClientAuth
        )
    }

    pub fn client_auth_required(&self) -> bool {
        matches!(
            self,
            FtpsSessionPreset::ExplicitTlsWithClientAuth
                | FtpsSessionPreset::ExplicitSslWithClientAuth
                | FtpsSessionPreset::ImplicitTlsWithClientAuth
                | FtpsSessionPreset::ImplicitSslWithClientAuth
        )
    }

    pub fn auth_mechanism(&self) -> FtpsAuthMechanism {
        match self {
            FtpsSessionPreset::ExplicitTlsWithoutClientAuth
            | FtpsSessionPreset::ExplicitTlsWithClientAuth
            | FtpsSessionPreset::ImplicitTlsWithoutClientAuth
            | FtpsSessionPreset::ImplicitTlsWithClientAuth => FtpsAuthMechanism::Tls,
            FtpsSessionPreset::ExplicitSslWithoutClientAuth
            | FtpsSessionPreset::ExplicitSslWithClientAuth
            | FtpsSessionPreset::ImplicitSslWithoutClientAuth
            | FtpsSessionPreset::ImplicitSslWithClientAuth => FtpsAuthMechanism::Ssl,
        }
    }

    pub fn config(&self) -> FtpsSessionConfig {
        FtpsSessionConfig::new(
            self.client_auth_required(),
            self.implicit_tls(),
            self.auth_mechanism().as_str(),
        )
    }
}

impl fmt::Display for FtpsSessionPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FtpsSessionPreset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = crate::yaml::key::normalize(s);
        FtpsSessionPreset::ALL
            .into_iter()
            .find(|p| p.as_str() == name)
            .ok_or_else(|| anyhow!("unknown ftps session preset {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implicit_tls_with_client_auth() {
        let config = FtpsSessionPreset::ImplicitTlsWithClientAuth.config();
        assert!(config.client_auth_required());
        assert!(config.implicit_tls());
        assert_eq!(config.auth_mechanism(), "TLS");
    }

    #[test]
    fn explicit_ssl_without_client_auth() {
        let config = FtpsSessionPreset::ExplicitSslWithoutClientAuth.config();
        assert!(!config.client_auth_required());
        assert!(!config.implicit_tls());
        assert_eq!(config.auth_mechanism(), "SSL");
    }

    #[test]
    fn presets_are_distinct() {
        for (i, a) in FtpsSessionPreset::ALL.iter().enumerate() {
            for b in &FtpsSessionPreset::ALL[i + 1..] {
                assert_ne!(a.config(), b.config());
            }
        }
    }

    #[test]
    fn from_str() {
        for preset in FtpsSessionPreset::ALL {
            assert_eq!(FtpsSessionPreset::from_str(preset.as_str()).unwrap(), preset);
            assert_eq!(
                FtpsSessionPreset::from_str(&preset.to_string()).unwrap(),
                preset
            );
        }
        assert_eq!(
            FtpsSessionPreset::from_str("Implicit-TLS-With-Client-Auth").unwrap(),
            FtpsSessionPreset::ImplicitTlsWithClientAuth
        );
        assert!(FtpsSessionPreset::from_str("implicit_tls").is_err());
        assert!(FtpsSessionPreset::from_str("").is_err());
    }
}
