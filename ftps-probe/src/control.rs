/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::time::Duration;

use tokio::io::{
    AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};

use crate::error::FtpsProbeError;

const MAX_LINE_LEN: usize = 2048;
const MAX_MULTI_LINES: usize = 128;

pub(crate) trait ProbeStream: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T: AsyncRead + AsyncWrite + Unpin + Send> ProbeStream for T {}

pub(crate) type BoxedProbeStream = Box<dyn ProbeStream>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FtpReply {
    code: u16,
    lines: Vec<String>,
}

impl FtpReply {
    #[inline]
    pub(crate) fn code(&self) -> u16 {
        self.code
    }

    pub(crate) fn text(&self) -> &str {
        self.lines
            .last()
            .and_then(|s| s.get(4..))
            .unwrap_or_default()
    }
}

fn parse_code(line: &str) -> Result<(u16, Option<u8>), FtpsProbeError> {
    let b = line.as_bytes();
    if b.len() < 3 || !b[..3].iter().all(|c| c.is_ascii_digit()) {
        return Err(FtpsProbeError::InvalidReplyLine(line.to_string()));
    }
    let code = u16::from(b[0] - b'0') * 100 + u16::from(b[1] - b'0') * 10 + u16::from(b[2] - b'0');
    if !(100..600).contains(&code) {
        return Err(FtpsProbeError::InvalidReplyLine(line.to_string()));
    }
    Ok((code, b.get(3).copied()))
}

/// Line based command/reply exchange on the control connection.
pub(crate) struct ControlChannel {
    stream: BufReader<BoxedProbeStream>,
    timeout: Duration,
}

impl ControlChannel {
    pub(crate) fn new(stream: BoxedProbeStream, timeout: Duration) -> Self {
        ControlChannel {
            stream: BufReader::new(stream),
            timeout,
        }
    }

    pub(crate) async fn send_cmd(&mut self, cmd: &str) -> Result<(), FtpsProbeError> {
        if cmd.starts_with("PASS ") {
            log::debug!("> PASS ****");
        } else {
            log::debug!("> {cmd}");
        }
        let mut buf = Vec::with_capacity(cmd.len() + 2);
        buf.extend_from_slice(cmd.as_bytes());
        buf.extend_from_slice(b"\r\n");
        self.stream
            .write_all(&buf)
            .await
            .map_err(FtpsProbeError::SendFailed)?;
        self.stream.flush().await.map_err(FtpsProbeError::SendFailed)
    }

    async fn read_line(&mut self) -> Result<String, FtpsProbeError> {
        let mut buf = Vec::with_capacity(128);
        let len = (&mut self.stream)
            .take(MAX_LINE_LEN as u64)
            .read_until(b'\n', &mut buf)
            .await
            .map_err(FtpsProbeError::ReadFailed)?;
        if len == 0 {
            return Err(FtpsProbeError::ConnectionClosed);
        }
        if buf.last() != Some(&b'\n') {
            return if len >= MAX_LINE_LEN {
                Err(FtpsProbeError::LineTooLong)
            } else {
                Err(FtpsProbeError::ConnectionClosed)
            };
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\r', '\n']).to_string();
        log::debug!("< {line}");
        Ok(line)
    }

    async fn read_reply(&mut self) -> Result<FtpReply, FtpsProbeError> {
        let first = self.read_line().await?;
        let (code, sep) = parse_code(&first)?;
        let mut lines = vec![first];
        if sep != Some(b'-') {
            return Ok(FtpReply { code, lines });
        }

        let end_prefix = format!("{code} ");
        loop {
            if lines.len() >= MAX_MULTI_LINES {
                return Err(FtpsProbeError::InvalidReplyLine(
                    "too many lines in reply".to_string(),
                ));
            }
            let line = self.read_line().await?;
            let end = line.starts_with(&end_prefix) || line == end_prefix.trim_end();
            lines.push(line);
            if end {
                return Ok(FtpReply { code, lines });
            }
        }
    }

    pub(crate) async fn timed_read_reply(
        &mut self,
        stage: &'static str,
    ) -> Result<FtpReply, FtpsProbeError> {
        match tokio::time::timeout(self.timeout, self.read_reply()).await {
            Ok(r) => r,
            Err(_) => Err(FtpsProbeError::TimedOut(stage)),
        }
    }

    pub(crate) async fn expect_reply(
        &mut self,
        stage: &'static str,
        expected: &[u16],
    ) -> Result<FtpReply, FtpsProbeError> {
        let reply = self.timed_read_reply(stage).await?;
        if expected.contains(&reply.code()) {
            Ok(reply)
        } else {
            Err(FtpsProbeError::UnexpectedReplyCode(stage, reply.code()))
        }
    }

    /// Give back the raw stream, which is only valid if the peer sent
    /// nothing we have not read yet.
    pub(crate) fn into_inner(self) -> Result<BoxedProbeStream, FtpsProbeError> {
        if self.stream.buffer().is_empty() {
            Ok(self.stream.into_inner())
        } else {
            Err(FtpsProbeError::UnreadDataBeforeHandshake)
        }
    }
}
