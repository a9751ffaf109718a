//! Readers that fail on demand.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, ReadBuf};

/// Serves one good manifest line for `a.txt`, then fails every read.
#[derive(Debug, Default)]
pub struct FailAfterFirstLine {
    served: bool,
}

impl AsyncRead for FailAfterFirstLine {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        if self.served {
            return Poll::Ready(Err(io::Error::other("disk went away")));
        }
        self.served = true;
        buf.put_slice(b"0cc175b9c0f1b6a831c399e269772661 a.txt\n");
        Poll::Ready(Ok(()))
    }
}
