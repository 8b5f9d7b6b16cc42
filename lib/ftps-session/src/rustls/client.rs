/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use anyhow::{Context, anyhow};
use rustls::{ClientConfig, RootCertStore};

use crate::{FtpsCertificateStore, FtpsHandshakePlan};

/// Build the TLS config the test client uses for the control channel.
///
/// The client identity is presented iff the plan requires a client
/// certificate.
pub fn build_client_config(
    plan: &FtpsHandshakePlan,
    store: &dyn FtpsCertificateStore,
) -> anyhow::Result<ClientConfig> {
    let ca_certs = store
        .server_ca_certs()
        .context("failed to load ca certs for server verification")?;
    if ca_certs.is_empty() {
        return Err(anyhow!("no ca certificate set for server verification"));
    }
    let mut root_store = RootCertStore::empty();
    for (i, cert) in ca_certs.into_iter().enumerate() {
        root_store
            .add(cert)
            .map_err(|e| anyhow!("failed to add cert {i} as root certs: {e:?}"))?;
    }

    let config_builder = ClientConfig::builder().with_root_certificates(root_store);
    if plan.require_client_certificate() {
        let Some(identity) = store
            .client_identity()
            .context("failed to load client identity")?
        else {
            return Err(anyhow!(
                "client auth is required but no client identity is available"
            ));
        };
        let (certs, key) = identity.into_inner();
        config_builder
            .with_client_auth_cert(certs, key)
            .map_err(|e| anyhow!("failed to set client cert pair: {e}"))
    } else {
        Ok(config_builder.with_no_client_auth())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rustls::test_data;
    use crate::{FtpsSessionPreset, resolve};

    #[test]
    fn with_client_auth() {
        let plan = resolve(&FtpsSessionPreset::ExplicitSslWithClientAuth.config()).unwrap();
        let config = build_client_config(&plan, &test_data::full_store()).unwrap();
        assert!(config.client_auth_cert_resolver.has_certs());
    }

    #[test]
    fn without_client_auth() {
        let plan = resolve(&FtpsSessionPreset::ImplicitTlsWithoutClientAuth.config()).unwrap();
        let config = build_client_config(&plan, &test_data::full_store()).unwrap();
        assert!(!config.client_auth_cert_resolver.has_certs());
    }

    #[test]
    fn missing_client_identity() {
        let plan = resolve(&FtpsSessionPreset::ImplicitTlsWithClientAuth.config()).unwrap();
        let mut store = test_data::server_only_store();
        store.set_server_ca(test_data::path("ca.pem"));
        assert!(build_client_config(&plan, &store).is_err());
    }

    #[test]
    fn missing_server_ca() {
        let plan = resolve(&FtpsSessionPreset::ExplicitTlsWithoutClientAuth.config()).unwrap();
        let store = test_data::server_only_store();
        assert!(build_client_config(&plan, &store).is_err());
    }
}
