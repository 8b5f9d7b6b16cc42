/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::str::FromStr;

use crate::FtpsResolveError;

/// The argument of the `AUTH` command (RFC 2228), also used as the name of
/// the security protocol for implicit sessions.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum FtpsAuthMechanism {
    Tls,
    Ssl,
}

impl FtpsAuthMechanism {
    pub const ALL: [FtpsAuthMechanism; 2] = [FtpsAuthMechanism::Tls, FtpsAuthMechanism::Ssl];

    pub fn as_str(&self) -> &'static str {
        match self {
            FtpsAuthMechanism::Tls => "TLS",
            FtpsAuthMechanism::Ssl => "SSL",
        }
    }

    pub fn auth_command(&self) -> &'static str {
        match self {
            FtpsAuthMechanism::Tls => "AUTH TLS",
            FtpsAuthMechanism::Ssl => "AUTH SSL",
        }
    }
}

impl fmt::Display for FtpsAuthMechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FtpsAuthMechanism {
    type Err = FtpsResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("tls") {
            Ok(FtpsAuthMechanism::Tls)
        } else if s.eq_ignore_ascii_case("ssl") {
            Ok(FtpsAuthMechanism::Ssl)
        } else {
            Err(FtpsResolveError::UnsupportedMechanism(s.to_string()))
        }
    }
}
