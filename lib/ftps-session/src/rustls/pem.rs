/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use rustls_pki_types::{CertificateDer, PrivateKeyDer};

use crate::{FtpsCertificateStore, FtpsIdentity};

pub fn load_certs(path: &Path) -> anyhow::Result<Vec<CertificateDer<'static>>> {
    let file =
        File::open(path).map_err(|e| anyhow!("unable to open file {}: {e}", path.display()))?;
    let mut certs = Vec::new();
    for (i, r) in rustls_pemfile::certs(&mut BufReader::new(file)).enumerate() {
        let cert = r.map_err(|e| {
            anyhow!(
                "invalid certificate #{i} in file {}: {e}",
                path.display()
            )
        })?;
        certs.push(cert);
    }
    if certs.is_empty() {
        Err(anyhow!(
            "no valid certificate found in file {}",
            path.display()
        ))
    } else {
        Ok(certs)
    }
}

pub fn load_key(path: &Path) -> anyhow::Result<PrivateKeyDer<'static>> {
    let file =
        File::open(path).map_err(|e| anyhow!("unable to open file {}: {e}", path.display()))?;
    match rustls_pemfile::private_key(&mut BufReader::new(file)).map_err(|e| {
        anyhow!(
            "failed to read private key from file {}: {e}",
            path.display()
        )
    })? {
        Some(key) => Ok(key),
        None => Err(anyhow!(
            "no valid private key found in file {}",
            path.display()
        )),
    }
}

fn load_identity(cert: &Path, key: &Path) -> anyhow::Result<FtpsIdentity> {
    let certs = load_certs(cert)?;
    let key = load_key(key)?;
    FtpsIdentity::new(certs, key)
}

/// Certificates and keys read from PEM files on every access.
///
/// A server side store needs the server identity, a client side store the
/// server CA and, for client auth, the client identity.
#[derive(Clone, Debug, Default)]
pub struct PemCertificateStore {
    server_identity: Option<(PathBuf, PathBuf)>,
    client_identity: Option<(PathBuf, PathBuf)>,
    client_ca: Option<PathBuf>,
    server_ca: Option<PathBuf>,
}

impl PemCertificateStore {
    pub fn set_server_identity(&mut self, cert: PathBuf, key: PathBuf) {
        self.server_identity = Some((cert, key));
    }

    pub fn set_client_identity(&mut self, cert: PathBuf, key: PathBuf) {
        self.client_identity = Some((cert, key));
    }

    pub fn set_client_ca(&mut self, path: PathBuf) {
        self.client_ca = Some(path);
    }

    pub fn set_server_ca(&mut self, path: PathBuf) {
        self.server_ca = Some(path);
    }
}

impl FtpsCertificateStore for PemCertificateStore {
    fn server_identity(&self) -> anyhow::Result<FtpsIdentity> {
        let Some((cert, key)) = &self.server_identity else {
            return Err(anyhow!("no server identity set"));
        };
        load_identity(cert, key).context("invalid server identity")
    }

    fn client_identity(&self) -> anyhow::Result<Option<FtpsIdentity>> {
        match &self.client_identity {
            Some((cert, key)) => {
                let identity = load_identity(cert, key).context("invalid client identity")?;
                Ok(Some(identity))
            }
            None => Ok(None),
        }
    }

    fn client_ca_certs(&self) -> anyhow::Result<Vec<CertificateDer<'static>>> {
        match &self.client_ca {
            Some(path) => load_certs(path),
            None => Ok(Vec::new()),
        }
    }

    fn server_ca_certs(&self) -> anyhow::Result<Vec<CertificateDer<'static>>> {
        match &self.server_ca {
            Some(path) => load_certs(path),
            None => Ok(Vec::new()),
        }
    }
}
