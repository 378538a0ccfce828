use std::time::Duration;

use tokio::{io::AsyncRead, sync::mpsc, time::sleep};

/// An [`AsyncRead`] fed one byte at a time from a channel.
///
/// Reads return whatever has arrived so far, which makes it good at catching parsers that
/// assume a whole line (or a whole request) shows up in a single read.
pub struct ChannelReader {
    rx: mpsc::Receiver<u8>,
}

impl ChannelReader {
    pub fn new(rx: mpsc::Receiver<u8>) -> Self {
        Self { rx }
    }
}

impl AsyncRead for ChannelReader {
    fn poll_read(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
        buf: &mut tokio::io::ReadBuf<'_>,
    ) -> std::task::Poll<std::io::Result<()>> {
        use std::task::Poll;
        let mut read_bytes = 0;
        while buf.remaining() > 0 {
            match self.rx.poll_recv(cx) {
                Poll::Ready(Some(byte)) => {
                    buf.put_slice(&[byte]);
                    read_bytes += 1;
                }
                Poll::Ready(None) => break,
                Poll::Pending => {
                    return if read_bytes == 0 {
                        Poll::Pending
                    } else {
                        Poll::Ready(Ok(()))
                    };
                }
            }
        }
        Poll::Ready(Ok(()))
    }
}

/// Spawns a task sending `data` byte by byte with `delay` between bytes.
///
/// Must be called from inside a tokio runtime.
pub fn drip(data: impl Into<Vec<u8>>, delay: Duration) -> ChannelReader {
    let data = data.into();
    let (tx, rx) = mpsc::channel::<u8>(32);

    tokio::spawn(async move {
        for byte in data {
            if tx.send(byte).await.is_err() {
                break;
            }
            if !delay.is_zero() {
                sleep(delay).await;
            }
        }
    });
    ChannelReader::new(rx)
}

#[cfg(test)]
mod tests {
    use tokio::io::AsyncReadExt;

    use super::*;

    const LINE: &[u8] = b"GET / HTTP/1.1\r\nHost: test\r\n\r\n";

    #[tokio::test]
    async fn read_exact_collects_dripped_bytes() {
        let mut reader = drip(LINE, Duration::from_millis(1));
        let mut buf = [0u8; LINE.len()];

        reader.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, LINE);
    }

    #[tokio::test]
    async fn read_returns_partial_chunks() {
        let mut reader = drip(LINE, Duration::from_millis(1));
        let mut buf = [0u8; LINE.len()];
        let mut bytes_read = 0;

        while bytes_read < LINE.len() {
            let n = reader.read(&mut buf[bytes_read..]).await.unwrap();
            assert_ne!(n, 0);
            bytes_read += n;
        }
        assert_eq!(&buf[..], LINE);
    }

    #[tokio::test]
    async fn reader_hits_eof_after_sender_finishes() {
        let mut reader = drip(&b"ab"[..], Duration::ZERO);
        let mut out = Vec::new();

        reader.read_to_end(&mut out).await.unwrap();
        assert_eq!(out, b"ab");
    }
}
