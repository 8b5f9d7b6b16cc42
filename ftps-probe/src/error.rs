/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum FtpsProbeError {
    #[error("connect failed: {0:?}")]
    ConnectFailed(io::Error),
    #[error("timed out at stage '{0}'")]
    TimedOut(&'static str),
    #[error("send failed: {0:?}")]
    SendFailed(io::Error),
    #[error("read failed: {0:?}")]
    ReadFailed(io::Error),
    #[error("connection closed")]
    ConnectionClosed,
    #[error("line too long")]
    LineTooLong,
    #[error("invalid reply line: {0}")]
    InvalidReplyLine(String),
    #[error("unexpected reply code {1} at stage '{0}'")]
    UnexpectedReplyCode(&'static str, u16),
    #[error("unread data left before tls handshake")]
    UnreadDataBeforeHandshake,
    #[error("tls handshake failed: {0:?}")]
    HandshakeFailed(io::Error),
}
