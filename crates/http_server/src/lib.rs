//! A tiny async HTTP/1.1 server with a fixed set of routes.
//!
//! Each connection carries exactly one request. The request is parsed straight off the socket
//! ([`http::parser`]), handed to a [`Service`] (normally the [`router::Router`]), and the
//! response is written back before the connection is closed.

pub mod config;
pub mod http;
pub mod router;
pub mod service;
pub mod storage;

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use tokio::{
    io::{AsyncRead, AsyncWrite},
    net::{TcpListener, TcpSocket, TcpStream},
};

use crate::{
    http::{
        HttpVersion,
        parser::{HttpParseError, Limits, Parser, Sender},
        request::Request,
        response::{Response, StatusCode},
    },
    service::Service,
};

#[derive(Debug, thiserror::Error)]
pub enum HttpServerError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] HttpParseError),
    #[error("storage failure for {name:?}: {source}")]
    Storage {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("directory {0:?} does not exist")]
    InvalidDirectory(PathBuf),
}

pub struct HttpServer<S>(Arc<HttpServerInternal<S>>);

impl<S> Clone for HttpServer<S> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<S> HttpServer<S>
where
    S: Service<Request, Response = Response, Error = HttpServerError>,
{
    pub fn new<A: Into<SocketAddr>>(addr: A, service: S, limits: Limits) -> Self {
        Self(Arc::new(HttpServerInternal {
            addr: addr.into(),
            service,
            limits,
        }))
    }

    pub fn addr(&self) -> SocketAddr {
        self.0.addr
    }

    pub fn service(&self) -> &S {
        &self.0.service
    }

    /// Binds the configured address
    pub fn bind(&self) -> Result<TcpListener, HttpServerError> {
        let sock = match self.0.addr {
            SocketAddr::V4(_) => TcpSocket::new_v4()?,
            SocketAddr::V6(_) => TcpSocket::new_v6()?,
        };

        sock.set_reuseaddr(true)?;
        sock.bind(self.0.addr)?;
        Ok(sock.listen(1024)?)
    }

    pub async fn serve(&self) -> Result<(), HttpServerError> {
        let listener = self.bind()?;
        self.serve_on(listener).await
    }

    /// Accepts connections from `listener` forever, one task per connection
    pub async fn serve_on(&self, listener: TcpListener) -> Result<(), HttpServerError> {
        log::info!("listening on {}", listener.local_addr()?);
        loop {
            let (stream, addr) = match listener.accept().await {
                Ok(conn) => conn,
                Err(err) => {
                    log::warn!("failed to accept connection: {err}");
                    continue;
                }
            };
            tokio::spawn(HttpServerInternal::handle_connection(
                self.0.clone(),
                stream,
                addr,
            ));
        }
    }
}

pub(crate) struct HttpServerInternal<S> {
    addr: SocketAddr,
    service: S,
    limits: Limits,
}

impl<S> HttpServerInternal<S>
where
    S: Service<Request, Response = Response, Error = HttpServerError>,
{
    async fn handle_connection(sel: Arc<Self>, stream: TcpStream, addr: SocketAddr) {
        log::debug!("accepted connection from {addr}");
        if let Err(err) = serve_connection(&sel.service, stream, Some(addr), sel.limits).await {
            match err {
                HttpServerError::Parse(err) => log::warn!("{addr}: {err}"),
                err => log::error!("{addr}: {err}"),
            }
        }
    }
}

/// Runs one request/response exchange over `io` and closes it.
///
/// A request that fails to parse is answered with an error status when the failure is the
/// client's fault, and is returned as [`HttpServerError::Parse`] either way. A service error is
/// logged and answered with `500 Internal Server Error`.
pub async fn serve_connection<S, IO>(
    service: &S,
    io: IO,
    remote: Option<SocketAddr>,
    limits: Limits,
) -> Result<(), HttpServerError>
where
    S: Service<Request, Response = Response, Error = HttpServerError>,
    IO: AsyncRead + AsyncWrite + Unpin + Send,
{
    let (read_half, write_half) = tokio::io::split(io);
    let mut parser = Parser::new(read_half, limits);
    let mut sender = Sender::new(write_half);

    let mut request = match parser.parse_request().await {
        Ok(request) => request,
        Err(err) => {
            let status = err.status_code();
            if status.is_client_error() {
                let response = Response::empty(HttpVersion::HTTP_1_1, status);
                // The client may already be gone, the parse error is what gets reported
                if sender.send_response(&response).await.is_ok() {
                    let _ = sender.shutdown().await;
                }
            }
            return Err(err.into());
        }
    };
    request.remote = remote;

    let summary = format!("{} {}", request.method, request.target);
    let response = match service.call(request).await {
        Ok(response) => response,
        Err(err) => {
            log::error!("{summary} failed: {err}");
            Response::empty(HttpVersion::HTTP_1_1, StatusCode::INTERNAL_SERVER_ERROR)
        }
    };
    log::info!("{summary} -> {} {}", response.status, String::from_utf8_lossy(&response.message));

    sender.send_response(&response).await?;
    sender.shutdown().await?;
    Ok(())
}
