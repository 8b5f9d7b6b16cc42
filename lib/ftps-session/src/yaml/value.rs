/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::str::FromStr;

use anyhow::anyhow;
use yaml_rust::Yaml;

use crate::{FtpsAuthMechanism, FtpsSessionPreset};

pub fn as_bool(v: &Yaml) -> anyhow::Result<bool> {
    match v {
        Yaml::String(s) => match s.to_lowercase().as_str() {
            "on" | "true" | "yes" | "1" => Ok(true),
            "off" | "false" | "no" | "0" => Ok(false),
            _ => Err(anyhow!("invalid yaml string value for 'bool': {s}")),
        },
        Yaml::Boolean(value) => Ok(*value),
        Yaml::Integer(i) => Ok(*i != 0),
        _ => Err(anyhow!(
            "yaml value type for 'bool' should be 'boolean' / 'string' / 'integer'"
        )),
    }
}

pub fn as_ftps_auth_mechanism(v: &Yaml) -> anyhow::Result<FtpsAuthMechanism> {
    if let Yaml::String(s) = v {
        FtpsAuthMechanism::from_str(s).map_err(|e| anyhow!("{e}"))
    } else {
        Err(anyhow!(
            "yaml value type for 'ftps auth mechanism' should be 'string'"
        ))
    }
}

pub fn as_ftps_session_preset(v: &Yaml) -> anyhow::Result<FtpsSessionPreset> {
    if let Yaml::String(s) = v {
        FtpsSessionPreset::from_str(s)
    } else {
        Err(anyhow!(
            "yaml value type for 'ftps session preset' should be 'string'"
        ))
    }
}
