/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

#[cfg(test)]
#[macro_use]
mod macros;

mod debug;
pub use debug::{FTPS_DEBUG_LOG_LEVEL, FTPS_DEBUG_LOG_TARGET};

mod error;
pub use error::FtpsResolveError;

mod mechanism;
pub use mechanism::FtpsAuthMechanism;

mod config;
pub use config::{FtpsSessionConfig, FtpsSessionConfigBuilder};

mod preset;
pub use preset::FtpsSessionPreset;

mod plan;
pub use plan::{
    FtpsDataChannelStep, FtpsHandshakePlan, FtpsHandshakeStep, FtpsProtectionLevel,
    FtpsTransportMode,
};

mod resolve;
pub use resolve::resolve;

mod bootstrap;
pub use bootstrap::{
    FtpsCertificateStore, FtpsIdentity, FtpsListenerMode, FtpsListenerSpec, FtpsServerBootstrap,
    FtpsServerHandle,
};

mod fixture;
pub use fixture::FtpsServerFixture;

pub mod yaml;

#[cfg(feature = "rustls")]
pub mod rustls;
