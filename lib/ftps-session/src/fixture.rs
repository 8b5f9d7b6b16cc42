/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use anyhow::{Context, anyhow};
use log::{debug, info, warn};

use crate::{
    FtpsCertificateStore, FtpsHandshakePlan, FtpsListenerSpec, FtpsServerBootstrap,
    FtpsServerHandle, FtpsSessionConfig,
};

/// A test server started from a resolved handshake plan.
///
/// The server is stopped when the fixture is dropped, so a failing test
/// never leaves the listener behind.
pub struct FtpsServerFixture<H: FtpsServerHandle> {
    config: FtpsSessionConfig,
    plan: FtpsHandshakePlan,
    spec: FtpsListenerSpec,
    handle: H,
    stopped: bool,
}

impl<H: FtpsServerHandle> FtpsServerFixture<H> {
    pub fn setup<B>(
        config: FtpsSessionConfig,
        bootstrap: &mut B,
        certs: &dyn FtpsCertificateStore,
    ) -> anyhow::Result<Self>
    where
        B: FtpsServerBootstrap<Handle = H>,
    {
        FtpsServerFixture::setup_on_port(config, 0, bootstrap, certs)
    }

    pub fn setup_on_port<B>(
        config: FtpsSessionConfig,
        port: u16,
        bootstrap: &mut B,
        certs: &dyn FtpsCertificateStore,
    ) -> anyhow::Result<Self>
    where
        B: FtpsServerBootstrap<Handle = H>,
    {
        let plan = crate::resolve(&config).context("invalid ftps session config")?;
        if plan.require_client_certificate() {
            let identity = certs
                .client_identity()
                .context("failed to load client identity")?;
            if identity.is_none() {
                return Err(anyhow!(
                    "client auth is required but no client identity is available"
                ));
            }
        }

        let spec = plan.listener_spec().with_port(port);
        let handle = bootstrap
            .start(&spec, certs)
            .context(format!("failed to start {} ftps server", spec.mode()))?;
        info!(
            "started {} ftps server on port {}",
            spec.mode(),
            handle.local_port()
        );

        Ok(FtpsServerFixture {
            config,
            plan,
            spec,
            handle,
            stopped: false,
        })
    }

    #[inline]
    pub fn config(&self) -> &FtpsSessionConfig {
        &self.config
    }

    #[inline]
    pub fn plan(&self) -> &FtpsHandshakePlan {
        &self.plan
    }

    #[inline]
    pub fn listener_spec(&self) -> &FtpsListenerSpec {
        &self.spec
    }

    #[inline]
    pub fn local_port(&self) -> u16 {
        self.handle.local_port()
    }

    pub fn stop(mut self) -> anyhow::Result<()> {
        self.stopped = true;
        self.handle.stop()
    }
}

impl<H: FtpsServerHandle> Drop for FtpsServerFixture<H> {
    fn drop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        match self.handle.stop() {
            Ok(_) => debug!("stopped ftps server on port {}", self.handle.local_port()),
            Err(e) => warn!(
                "failed to stop ftps server on port {}: {e:?}",
                self.handle.local_port()
            ),
        }
    }
}
