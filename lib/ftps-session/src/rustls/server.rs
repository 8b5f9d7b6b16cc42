/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;

use anyhow::{Context, anyhow};
use rustls::server::WebPkiClientVerifier;
use rustls::{RootCertStore, ServerConfig};

use crate::{FtpsCertificateStore, FtpsListenerSpec};

/// Build the TLS config of a test server listener.
///
/// A verified client certificate is demanded iff the listener spec requires
/// one, in which case the store must supply the client CA certificates.
pub fn build_server_config(
    spec: &FtpsListenerSpec,
    store: &dyn FtpsCertificateStore,
) -> anyhow::Result<ServerConfig> {
    let identity = store
        .server_identity()
        .context("failed to load server identity")?;

    let config_builder = ServerConfig::builder();
    let config_builder = if spec.require_client_certificate() {
        let ca_certs = store
            .client_ca_certs()
            .context("failed to load ca certs for client auth")?;
        if ca_certs.is_empty() {
            return Err(anyhow!("no ca certificate set for client auth"));
        }
        let mut root_store = RootCertStore::empty();
        for (i, cert) in ca_certs.into_iter().enumerate() {
            root_store.add(cert).map_err(|e| {
                anyhow!("failed to add cert {i} as root certs for client auth: {e:?}")
            })?;
        }
        let verifier = WebPkiClientVerifier::builder(Arc::new(root_store))
            .build()
            .map_err(|e| anyhow!("failed to build client cert verifier: {e}"))?;
        config_builder.with_client_cert_verifier(verifier)
    } else {
        config_builder.with_no_client_auth()
    };

    let (certs, key) = identity.into_inner();
    config_builder
        .with_single_cert(certs, key)
        .map_err(|e| anyhow!("failed to set server cert pair: {e}"))
}
