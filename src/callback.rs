// src/callback.rs
//! Local listener that receives the OAuth redirect and starts the backup.
//!
//! The browser is sent to `http://127.0.0.1:<port>/backup?code=...`. Every
//! hit on that path is answered with `Done!`; the first one carrying a code
//! launches the crawl. While that crawl runs, further codes are refused with
//! `409`. Once the crawl finishes the listener stops and its result is
//! returned to the caller.

use crate::constants::{CALLBACK_MAX_REQUEST_BYTES, CALLBACK_PATH};
use crate::error::AppError;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, Semaphore};
use url::Url;

/// What a single request asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackRequest {
    /// The redirect path with an authorization code
    Code(String),
    /// The redirect path without a code (e.g. the user denied access)
    NoCode,
    NotFound,
    Malformed,
}

impl CallbackRequest {
    /// Reads the request line of an HTTP request head.
    pub fn parse(head: &str) -> Self {
        let request_line = head.lines().next().unwrap_or_default();
        let mut parts = request_line.split_whitespace();
        let (Some(_method), Some(target)) = (parts.next(), parts.next()) else {
            return Self::Malformed;
        };

        let Ok(url) = Url::parse("http://127.0.0.1/").and_then(|base| base.join(target)) else {
            return Self::Malformed;
        };
        if url.path() != CALLBACK_PATH {
            return Self::NotFound;
        }

        url.query_pairs()
            .find(|(key, _)| key == "code")
            .map(|(_, value)| value.into_owned())
            .filter(|code| !code.is_empty())
            .map_or(Self::NoCode, Self::Code)
    }
}

fn http_response(status: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    )
}

/// Bound listener, not yet serving.
pub struct CallbackServer {
    listener: TcpListener,
}

impl CallbackServer {
    /// Binds `127.0.0.1:<port>`. Port 0 picks a free port.
    pub async fn bind(port: u16) -> Result<Self, AppError> {
        let listener = TcpListener::bind(("127.0.0.1", port)).await?;
        log::debug!("Callback listener bound on {}", listener.local_addr()?);
        Ok(Self { listener })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, AppError> {
        Ok(self.listener.local_addr()?)
    }

    /// The URL the authorization server redirects to.
    pub fn redirect_uri(&self) -> Result<String, AppError> {
        Ok(format!(
            "http://127.0.0.1:{}{}",
            self.local_addr()?.port(),
            CALLBACK_PATH
        ))
    }

    /// Serves until one crawl started by `on_code` has finished.
    pub async fn serve<F, Fut, T>(self, on_code: F) -> Result<T, AppError>
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, AppError>> + Send + 'static,
        T: Send + 'static,
    {
        let (done_tx, mut done_rx) = mpsc::channel(1);
        let dispatcher = Arc::new(Dispatcher {
            on_code,
            permits: Arc::new(Semaphore::new(1)),
            done: done_tx,
        });

        loop {
            tokio::select! {
                Some(result) = done_rx.recv() => {
                    log::debug!("Backup finished, closing callback listener");
                    return result;
                }
                accepted = self.listener.accept() => {
                    let (stream, peer) = match accepted {
                        Ok(connection) => connection,
                        Err(e) => {
                            log::warn!("Failed to accept callback connection: {}", e);
                            continue;
                        }
                    };
                    let dispatcher = Arc::clone(&dispatcher);
                    tokio::spawn(async move {
                        if let Err(e) = dispatcher.handle(stream).await {
                            log::warn!("Callback connection from {} failed: {}", peer, e);
                        }
                    });
                }
            }
        }
    }
}

struct Dispatcher<F, T> {
    on_code: F,
    permits: Arc<Semaphore>,
    done: mpsc::Sender<Result<T, AppError>>,
}

impl<F, Fut, T> Dispatcher<F, T>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, AppError>> + Send + 'static,
    T: Send + 'static,
{
    async fn handle(&self, mut stream: TcpStream) -> Result<(), AppError> {
        let head = read_request_head(&mut stream).await?;

        let response = match CallbackRequest::parse(&head) {
            CallbackRequest::Code(code) => match self.launch(code) {
                Ok(()) => http_response("200 OK", "Done!"),
                Err(e) => {
                    log::warn!("Ignoring authorization code: {}", e);
                    http_response("409 Conflict", "A backup is already running")
                }
            },
            CallbackRequest::NoCode => {
                log::info!("Callback hit without an authorization code");
                http_response("200 OK", "Done!")
            }
            CallbackRequest::NotFound => http_response("404 Not Found", "Not Found"),
            CallbackRequest::Malformed => http_response("400 Bad Request", "Bad Request"),
        };

        stream.write_all(response.as_bytes()).await?;
        stream.shutdown().await?;
        Ok(())
    }

    /// Starts the crawl unless one is already running.
    fn launch(&self, code: String) -> Result<(), AppError> {
        let permit = Arc::clone(&self.permits)
            .try_acquire_owned()
            .map_err(|_| AppError::CrawlBusy)?;

        log::info!("Received authorization code, starting backup");
        let crawl = (self.on_code)(code);
        let done = self.done.clone();
        tokio::spawn(async move {
            let result = crawl.await;
            // Keep the permit until the result is handed over.
            let _ = done.send(result).await;
            drop(permit);
        });
        Ok(())
    }
}

/// Reads up to the blank line ending the request head.
async fn read_request_head(stream: &mut TcpStream) -> Result<String, AppError> {
    let mut head = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];

    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        if head.len() >= CALLBACK_MAX_REQUEST_BYTES {
            return Err(AppError::Validation(format!(
                "callback request head exceeds {} bytes",
                CALLBACK_MAX_REQUEST_BYTES
            )));
        }
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            break;
        }
        head.extend_from_slice(&chunk[..read]);
    }

    Ok(String::from_utf8_lossy(&head).into_owned())
}
