/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::path::Path;

use anyhow::{Context, anyhow};
use yaml_rust::Yaml;

use super::{FtpsSessionConfig, FtpsSessionConfigBuilder};

impl FtpsSessionConfig {
    pub fn parse_yaml(value: &Yaml) -> anyhow::Result<Self> {
        match value {
            Yaml::Hash(map) => {
                let mut builder = FtpsSessionConfigBuilder::default();
                crate::yaml::foreach_kv(map, |k, v| {
                    match crate::yaml::key::normalize(k).as_str() {
                        "client_auth" | "client_auth_required" => {
                            if builder.client_auth_required.is_some() {
                                return Err(anyhow!("duplicate key {k} for client auth"));
                            }
                            let required = crate::yaml::value::as_bool(v)
                                .context(format!("invalid bool value for key {k}"))?;
                            builder.set_client_auth_required(required);
                            Ok(())
                        }
                        "implicit" | "implicit_tls" | "use_implicit" => {
                            if builder.implicit_tls.is_some() {
                                return Err(anyhow!("duplicate key {k} for implicit tls"));
                            }
                            let implicit = crate::yaml::value::as_bool(v)
                                .context(format!("invalid bool value for key {k}"))?;
                            builder.set_implicit_tls(implicit);
                            Ok(())
                        }
                        "auth_mechanism" | "auth_value" | "security_protocol" => {
                            if builder.auth_mechanism.is_some() {
                                return Err(anyhow!("duplicate key {k} for auth mechanism"));
                            }
                            let mechanism = crate::yaml::value::as_ftps_auth_mechanism(v)
                                .context(format!("invalid ftps auth mechanism value for key {k}"))?;
                            builder.set_auth_mechanism(mechanism.as_str());
                            Ok(())
                        }
                        _ => Err(anyhow!("invalid key {k}")),
                    }
                })?;
                builder.build()
            }
            Yaml::String(_) => {
                let preset = crate::yaml::value::as_ftps_session_preset(value)?;
                Ok(preset.config())
            }
            _ => Err(anyhow!("invalid yaml type")),
        }
    }

    pub fn load_yaml_file(path: &Path) -> anyhow::Result<Self> {
        let doc = crate::yaml::load_first_doc(path)?;
        FtpsSessionConfig::parse_yaml(&doc).context(format!(
            "invalid ftps session config in file {}",
            path.display()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_map_ok() {
        let yaml = yaml_doc!(
            r#"
                client_auth: "true"
                implicit: true
                auth_mechanism: TLS
            "#
        );
        let config = FtpsSessionConfig::parse_yaml(&yaml).unwrap();
        assert_eq!(config, FtpsSessionConfig::new(true, true, "TLS"));

        let yaml = yaml_doc!(
            r#"
                Client-Auth-Required: no
                use-implicit: 0
                auth_value: ssl
            "#
        );
        let config = FtpsSessionConfig::parse_yaml(&yaml).unwrap();
        assert_eq!(config, FtpsSessionConfig::new(false, false, "SSL"));
    }

    #[test]
    fn parse_preset_ok() {
        let yaml = yaml_str!("explicit_ssl_with_client_auth");
        let config = FtpsSessionConfig::parse_yaml(&yaml).unwrap();
        assert_eq!(config, FtpsSessionConfig::new(true, false, "SSL"));
    }

    #[test]
    fn parse_missing_key() {
        let yaml = yaml_doc!(
            r#"
                client_auth: true
                implicit: true
            "#
        );
        assert!(FtpsSessionConfig::parse_yaml(&yaml).is_err());

        let yaml = yaml_doc!(
            r#"
                implicit: false
                auth_mechanism: TLS
            "#
        );
        assert!(FtpsSessionConfig::parse_yaml(&yaml).is_err());
    }

    #[test]
    fn parse_err() {
        let yaml = yaml_doc!(
            r#"
                client_auth: true
                implicit: true
                auth_mechanism: TLS
                port: 990
            "#
        );
        assert!(FtpsSessionConfig::parse_yaml(&yaml).is_err());

        let yaml = yaml_doc!(
            r#"
                client_auth: "sometimes"
                implicit: true
                auth_mechanism: TLS
            "#
        );
        assert!(FtpsSessionConfig::parse_yaml(&yaml).is_err());

        let yaml = yaml_doc!(
            r#"
                client_auth: true
                implicit: true
                auth_mechanism: KERBEROS_V4
            "#
        );
        assert!(FtpsSessionConfig::parse_yaml(&yaml).is_err());

        let yaml = yaml_str!("no_such_preset");
        assert!(FtpsSessionConfig::parse_yaml(&yaml).is_err());

        assert!(FtpsSessionConfig::parse_yaml(&Yaml::Integer(1)).is_err());
        assert!(FtpsSessionConfig::parse_yaml(&Yaml::Array(vec![])).is_err());
        assert!(FtpsSessionConfig::parse_yaml(&Yaml::Null).is_err());
    }

    #[test]
    fn parse_conflicting_alias() {
        let yaml = yaml_doc!(
            r#"
                client_auth: true
                client_auth_required: false
                implicit: true
                auth_mechanism: TLS
            "#
        );
        let e = FtpsSessionConfig::parse_yaml(&yaml).unwrap_err();
        assert!(format!("{e:?}").contains("duplicate key client_auth_required"));

        let yaml = yaml_doc!(
            r#"
                client_auth: true
                implicit: true
                use_implicit: false
                auth_mechanism: TLS
            "#
        );
        assert!(FtpsSessionConfig::parse_yaml(&yaml).is_err());

        // the same value twice is still ambiguous
        let yaml = yaml_doc!(
            r#"
                client_auth: false
                implicit: false
                auth_mechanism: TLS
                security_protocol: TLS
            "#
        );
        assert!(FtpsSessionConfig::parse_yaml(&yaml).is_err());
    }

    #[test]
    fn load_yaml_file() {
        let path = std::env::temp_dir().join(format!(
            "ftps-session-config-{}.yaml",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"client_auth: false\nimplicit: false\nauth_mechanism: TLS\n")
            .unwrap();
        drop(file);

        let config = FtpsSessionConfig::load_yaml_file(&path).unwrap();
        assert_eq!(config, FtpsSessionConfig::new(false, false, "TLS"));
        std::fs::remove_file(&path).unwrap();

        assert!(FtpsSessionConfig::load_yaml_file(&path).is_err());
    }
}
