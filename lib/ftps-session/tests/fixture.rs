/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::anyhow;
use rustls_pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};

use ftps_session::{
    FtpsCertificateStore, FtpsIdentity, FtpsListenerMode, FtpsListenerSpec, FtpsServerBootstrap,
    FtpsServerFixture, FtpsServerHandle, FtpsSessionConfig, FtpsSessionPreset,
};

fn identity() -> FtpsIdentity {
    FtpsIdentity::new(
        vec![CertificateDer::from(vec![0x30, 0x00])],
        PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(vec![0x30, 0x00])),
    )
    .unwrap()
}

struct MemoryStore {
    with_client: bool,
}

impl FtpsCertificateStore for MemoryStore {
    fn server_identity(&self) -> anyhow::Result<FtpsIdentity> {
        Ok(identity())
    }

    fn client_identity(&self) -> anyhow::Result<Option<FtpsIdentity>> {
        Ok(self.with_client.then(identity))
    }

    fn client_ca_certs(&self) -> anyhow::Result<Vec<CertificateDer<'static>>> {
        Ok(Vec::new())
    }

    fn server_ca_certs(&self) -> anyhow::Result<Vec<CertificateDer<'static>>> {
        Ok(Vec::new())
    }
}

struct CountingHandle {
    port: u16,
    stopped: Arc<AtomicUsize>,
}

impl FtpsServerHandle for CountingHandle {
    fn local_port(&self) -> u16 {
        self.port
    }

    fn stop(&mut self) -> anyhow::Result<()> {
        self.stopped.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
struct RecordingBootstrap {
    specs: Vec<FtpsListenerSpec>,
    stopped: Arc<AtomicUsize>,
    fail: bool,
}

impl FtpsServerBootstrap for RecordingBootstrap {
    type Handle = CountingHandle;

    fn start(
        &mut self,
        spec: &FtpsListenerSpec,
        _certs: &dyn FtpsCertificateStore,
    ) -> anyhow::Result<CountingHandle> {
        if self.fail {
            return Err(anyhow!("address in use"));
        }
        self.specs.push(*spec);
        let port = if spec.port() == 0 { 40021 } else { spec.port() };
        Ok(CountingHandle {
            port,
            stopped: self.stopped.clone(),
        })
    }
}

#[test]
fn listener_follows_plan() {
    let mut bootstrap = RecordingBootstrap::default();
    let store = MemoryStore { with_client: true };

    for preset in FtpsSessionPreset::ALL {
        let fixture = FtpsServerFixture::setup(preset.config(), &mut bootstrap, &store).unwrap();
        let spec = fixture.listener_spec();
        assert_eq!(spec.require_client_certificate(), preset.client_auth_required());
        let expected_mode = if preset.implicit_tls() {
            FtpsListenerMode::TlsOnConnect
        } else {
            FtpsListenerMode::PlaintextThenUpgrade
        };
        assert_eq!(spec.mode(), expected_mode);
        assert_eq!(fixture.local_port(), 40021);
    }
    assert_eq!(bootstrap.specs.len(), FtpsSessionPreset::ALL.len());
    assert_eq!(bootstrap.stopped.load(Ordering::SeqCst), FtpsSessionPreset::ALL.len());
}

#[test]
fn stopped_once() {
    let mut bootstrap = RecordingBootstrap::default();
    let store = MemoryStore { with_client: false };
    let config = FtpsSessionPreset::ExplicitTlsWithoutClientAuth.config();

    let fixture = FtpsServerFixture::setup_on_port(config, 2121, &mut bootstrap, &store).unwrap();
    assert_eq!(fixture.local_port(), 2121);
    fixture.stop().unwrap();
    assert_eq!(bootstrap.stopped.load(Ordering::SeqCst), 1);
}

#[test]
fn stopped_on_panic() {
    let stopped = Arc::new(AtomicUsize::new(0));
    let stopped_in_test = stopped.clone();
    let r = std::panic::catch_unwind(move || {
        let mut bootstrap = RecordingBootstrap {
            stopped: stopped_in_test,
            ..Default::default()
        };
        let store = MemoryStore { with_client: false };
        let _fixture = FtpsServerFixture::setup(
            FtpsSessionPreset::ImplicitTlsWithoutClientAuth.config(),
            &mut bootstrap,
            &store,
        )
        .unwrap();
        panic!("test body failed");
    });
    assert!(r.is_err());
    assert_eq!(stopped.load(Ordering::SeqCst), 1);
}

#[test]
fn setup_errors_start_nothing() {
    let mut bootstrap = RecordingBootstrap::default();

    let store = MemoryStore { with_client: true };
    let config = FtpsSessionConfig::new(false, true, "KERBEROS_V4");
    assert!(FtpsServerFixture::setup(config, &mut bootstrap, &store).is_err());

    let store = MemoryStore { with_client: false };
    let config = FtpsSessionPreset::ImplicitTlsWithClientAuth.config();
    assert!(FtpsServerFixture::setup(config, &mut bootstrap, &store).is_err());

    assert!(bootstrap.specs.is_empty());

    bootstrap.fail = true;
    let config = FtpsSessionPreset::ExplicitTlsWithoutClientAuth.config();
    assert!(FtpsServerFixture::setup(config, &mut bootstrap, &store).is_err());
    assert_eq!(bootstrap.stopped.load(Ordering::SeqCst), 0);
}
