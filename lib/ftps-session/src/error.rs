/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FtpsResolveError {
    #[error("unsupported auth mechanism '{0}'")]
    UnsupportedMechanism(String),
}
