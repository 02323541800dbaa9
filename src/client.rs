//! Client for a tinykv server.
//!
//! Sends one request per call and returns the raw response string. The
//! server does not frame its responses, so a response is whatever arrives
//! in the next single read.

use crate::error::Result;
use crate::protocol::CodecError;
use crate::DEFAULT_READ_BUFFER_SIZE;
use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};
use tracing::trace;

/// A connection to a tinykv server.
pub struct Client {
    stream: TcpStream,
    buffer: BytesMut,
}

impl Client {
    /// Connects to the server at `addr`.
    pub async fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;

        Ok(Self {
            stream,
            buffer: BytesMut::zeroed(DEFAULT_READ_BUFFER_SIZE),
        })
    }

    /// Sets the size of the buffer used to read one response.
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.buffer = BytesMut::zeroed(size);
        self
    }

    /// Sends `request` and waits for the response.
    ///
    /// Returns `Ok(None)` if the server closed the connection instead of
    /// responding, which is what happens after `exit`.
    pub async fn request(&mut self, request: &str) -> Result<Option<String>> {
        self.stream.write_all(request.as_bytes()).await?;
        self.stream.flush().await?;
        trace!(request = %request, "Sent request");

        self.read_response().await
    }

    /// Reads one response without sending anything.
    pub async fn read_response(&mut self) -> Result<Option<String>> {
        let n = self.stream.read(&mut self.buffer[..]).await?;
        if n == 0 {
            return Ok(None);
        }

        let response = std::str::from_utf8(&self.buffer[..n]).map_err(CodecError::from)?;
        Ok(Some(response.to_string()))
    }

    /// Closes the connection.
    pub async fn close(mut self) -> Result<()> {
        self.stream.shutdown().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_request_returns_raw_response() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 64];
            let n = socket.read(&mut buf).await.unwrap();
            assert_eq!(&buf[..n], b"get greeting");
            socket.write_all(b"hello").await.unwrap();
        });

        let mut client = Client::connect(addr).await.unwrap();
        assert_eq!(client.request("get greeting").await.unwrap().as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_request_after_server_close() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 64];
            let _ = socket.read(&mut buf).await.unwrap();
        });

        let mut client = Client::connect(addr).await.unwrap();
        assert_eq!(client.request("exit").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_invalid_utf8_response() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 64];
            let _ = socket.read(&mut buf).await.unwrap();
            socket.write_all(&[0xff, 0xfe]).await.unwrap();
        });

        let mut client = Client::connect(addr).await.unwrap().buffer_size(16);
        assert!(client.request("get k").await.is_err());
    }
}
