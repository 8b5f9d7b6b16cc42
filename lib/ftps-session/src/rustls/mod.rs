/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

mod pem;
pub use pem::{PemCertificateStore, load_certs, load_key};

mod server;
pub use server::build_server_config;

mod client;
pub use client::build_client_config;

#[cfg(test)]
pub(crate) mod test_data {
    use std::path::PathBuf;

    pub(crate) fn path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("data")
            .join(name)
    }

    pub(crate) fn server_only_store() -> super::PemCertificateStore {
        let mut store = super::PemCertificateStore::default();
        store.set_server_identity(path("server.pem"), path("server-key.pem"));
        store
    }

    pub(crate) fn full_store() -> super::PemCertificateStore {
        let mut store = server_only_store();
        store.set_client_identity(path("client.pem"), path("client-key.pem"));
        store.set_client_ca(path("ca.pem"));
        store.set_server_ca(path("ca.pem"));
        store
    }
}
