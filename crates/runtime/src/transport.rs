//! WebSocket transport for console frames.
//!
//! The transport layer moves JSON values across the wire and nothing else:
//! outbound values are serialized into text frames, inbound text frames are
//! parsed back into values and pushed onto an unbounded channel consumed by
//! the connection's dispatch loop. A frame that fails to parse is logged and
//! skipped so one garbled message never stalls the read loop.

use crate::error::{Error, Result};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

/// Sending half of a transport.
///
/// Object-safe so the connection can own it as `Box<dyn Transport>` without
/// knowing the underlying stream type.
pub trait Transport: Send {
    /// Serialize and transmit one JSON value as a text frame.
    fn send(&mut self, message: Value) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Receiving half of a transport.
pub trait TransportReceiver: Send {
    /// Run the read loop until the peer closes or the consumer goes away.
    fn run(&mut self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Bundle handed to [`crate::connection::Connection::new`].
pub struct TransportParts {
    /// Boxed sending half.
    pub sender: Box<dyn Transport>,
    /// Boxed receiving half.
    pub receiver: Box<dyn TransportReceiver>,
    /// Inbound frames produced by the receiver's run loop.
    pub message_rx: mpsc::UnboundedReceiver<Value>,
}

/// WebSocket transport over any async byte stream.
///
/// Production connections use [`WebSocketTransport::connect`]; tests wrap an
/// in-memory duplex stream via [`WebSocketTransport::new`].
pub struct WebSocketTransport<S> {
    sender: WebSocketTransportSender<S>,
    receiver: WebSocketTransportReceiver<S>,
}

/// Sink half of a split WebSocket stream.
pub struct WebSocketTransportSender<S> {
    sink: SplitSink<WebSocketStream<S>, WsMessage>,
}

/// Stream half of a split WebSocket stream plus the inbound frame channel.
pub struct WebSocketTransportReceiver<S> {
    stream: SplitStream<WebSocketStream<S>>,
    inbound_tx: mpsc::UnboundedSender<Value>,
}

impl WebSocketTransport<MaybeTlsStream<TcpStream>> {
    /// Open a WebSocket to the console server endpoint.
    pub async fn connect(url: &str) -> Result<(Self, mpsc::UnboundedReceiver<Value>)> {
        let (ws_stream, _response) = connect_async(url)
            .await
            .map_err(|e| Error::ConnectionFailed(e.to_string()))?;
        tracing::debug!(%url, "WebSocket established");
        Ok(Self::new(ws_stream))
    }
}

impl<S> WebSocketTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    /// Wrap an already-established WebSocket stream.
    pub fn new(ws_stream: WebSocketStream<S>) -> (Self, mpsc::UnboundedReceiver<Value>) {
        let (sink, stream) = ws_stream.split();
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();

        let transport = Self {
            sender: WebSocketTransportSender { sink },
            receiver: WebSocketTransportReceiver { stream, inbound_tx },
        };

        (transport, inbound_rx)
    }

    /// Split into the boxed halves the connection layer consumes.
    pub fn into_transport_parts(self, message_rx: mpsc::UnboundedReceiver<Value>) -> TransportParts {
        TransportParts {
            sender: Box::new(self.sender),
            receiver: Box::new(self.receiver),
            message_rx,
        }
    }
}

impl<S> Transport for WebSocketTransportSender<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    fn send(&mut self, message: Value) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            let text = serde_json::to_string(&message)?;
            self.sink
                .send(WsMessage::Text(text))
                .await
                .map_err(|e| Error::TransportError(e.to_string()))
        })
    }
}

impl<S> TransportReceiver for WebSocketTransportReceiver<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    fn run(&mut self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            while let Some(frame) = self.stream.next().await {
                let frame = frame.map_err(|e| Error::TransportError(e.to_string()))?;
                match frame {
                    WsMessage::Text(text) => match serde_json::from_str::<Value>(&text) {
                        Ok(value) => {
                            if self.inbound_tx.send(value).is_err() {
                                // Consumer dropped; normal shutdown.
                                return Ok(());
                            }
                        }
                        Err(e) => {
                            tracing::warn!("Skipping unparseable frame: {}", e);
                        }
                    },
                    WsMessage::Close(_) => {
                        tracing::debug!("Server closed the WebSocket");
                        return Ok(());
                    }
                    WsMessage::Binary(_) => {
                        tracing::warn!("Skipping unexpected binary frame");
                    }
                    // Ping/pong handled by tungstenite; frames ignored here.
                    _ => {}
                }
            }
            Ok(())
        })
    }
}
