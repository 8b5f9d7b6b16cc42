/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use log::Level;

pub const FTPS_DEBUG_LOG_LEVEL: Level = Level::Debug;
pub const FTPS_DEBUG_LOG_TARGET: &str = "ftps";

#[macro_export]
macro_rules! log_msg {
    ($s:literal, $($arg:tt)+) => (
        log::log!(target: $crate::FTPS_DEBUG_LOG_TARGET, $crate::FTPS_DEBUG_LOG_LEVEL, $s, $($arg)+)
    )
}
