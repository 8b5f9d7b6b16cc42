/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::str::FromStr;

use crate::{
    FtpsAuthMechanism, FtpsDataChannelStep, FtpsHandshakePlan, FtpsHandshakeStep,
    FtpsProtectionLevel, FtpsResolveError, FtpsSessionConfig, FtpsTransportMode,
};

const PROTECTION_BUFFER_SIZE: u32 = 0;

/// Turn the session config into the handshake plan the test client and
/// server have to follow.
///
/// This is a pure mapping. The only failure is an auth mechanism outside of
/// [`FtpsAuthMechanism`], and there is no fallback plan for it.
pub fn resolve(config: &FtpsSessionConfig) -> Result<FtpsHandshakePlan, FtpsResolveError> {
    let mechanism = FtpsAuthMechanism::from_str(config.auth_mechanism()).inspect_err(|_| {
        crate::log_msg!(
            "rejected ftps session config with auth mechanism '{}'",
            config.auth_mechanism()
        )
    })?;

    let (transport_mode, mut sequence) = if config.implicit_tls() {
        (
            FtpsTransportMode::ImplicitTls,
            vec![
                FtpsHandshakeStep::ConnectSecure,
                FtpsHandshakeStep::TlsHandshake,
            ],
        )
    } else {
        (
            FtpsTransportMode::ExplicitTls,
            vec![
                FtpsHandshakeStep::ConnectPlaintext,
                FtpsHandshakeStep::IssueAuthCommand(mechanism),
                FtpsHandshakeStep::TlsHandshake,
            ],
        )
    };
    if config.client_auth_required() {
        sequence.push(FtpsHandshakeStep::PresentClientCertificate);
    }

    let data_sequence = vec![
        FtpsDataChannelStep::SetProtectionBufferSize(PROTECTION_BUFFER_SIZE),
        FtpsDataChannelStep::SetProtectionLevel(FtpsProtectionLevel::Private),
    ];

    let plan = FtpsHandshakePlan::new(
        transport_mode,
        config.client_auth_required(),
        mechanism,
        sequence,
        data_sequence,
    );
    crate::log_msg!("resolved handshake plan {}", plan);
    Ok(plan)
}
