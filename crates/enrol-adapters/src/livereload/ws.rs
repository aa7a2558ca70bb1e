//! WebSocket listener for the live-reload dev server.

use futures_util::StreamExt;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};
use url::Url;

use enrol_core::{
    application::{ApplicationError, LiveReload},
    domain::ReloadCommand,
    error::EnrolResult,
};

/// What a listening session saw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListenSummary {
    /// Text frames received, recognized or not.
    pub received: usize,
    /// Commands acted on, in arrival order.
    pub applied: Vec<ReloadCommand>,
}

/// Connects to a live-reload endpoint and feeds text frames to a
/// [`LiveReload`] dispatcher.
#[derive(Debug, Clone)]
pub struct WsListener {
    endpoint: Url,
}

impl WsListener {
    pub fn new(endpoint: Url) -> Self {
        Self { endpoint }
    }

    /// Listener for the endpoint derived from a page URL.
    pub fn for_page(page_url: &str) -> EnrolResult<Self> {
        Ok(Self::new(LiveReload::endpoint(page_url)?))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Listen until the server closes the socket or `shutdown` fires.
    #[instrument(skip_all, fields(endpoint = %self.endpoint))]
    pub async fn listen(
        &self,
        live: &LiveReload,
        shutdown: CancellationToken,
    ) -> EnrolResult<ListenSummary> {
        let (mut stream, _response) = connect_async(self.endpoint.as_str())
            .await
            .map_err(|e| self.connection_failed(e))?;
        info!("live-reload socket connected");

        let mut summary = ListenSummary::default();
        let closed_by_us = loop {
            tokio::select! {
                _ = shutdown.cancelled() => break true,
                frame = stream.next() => match frame {
                    Some(Ok(Message::Text(text))) => {
                        summary.received += 1;
                        if let Some(command) = live.handle_message(text.as_str()) {
                            summary.applied.push(command);
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break false,
                    Some(Ok(other)) => debug!(kind = frame_kind(&other), "ignoring frame"),
                    Some(Err(e)) => {
                        warn!(error = %e, "live-reload socket failed");
                        return Err(self.connection_failed(e));
                    }
                },
            }
        };

        if closed_by_us {
            if let Err(e) = stream.close(None).await {
                debug!(error = %e, "close handshake failed");
            }
        }
        info!(received = summary.received, "live-reload socket closed");
        Ok(summary)
    }

    fn connection_failed(&self, e: impl std::fmt::Display) -> enrol_core::error::EnrolError {
        ApplicationError::ConnectionFailed {
            url: self.endpoint.to_string(),
            reason: e.to_string(),
        }
        .into()
    }
}

fn frame_kind(message: &Message) -> &'static str {
    match message {
        Message::Text(_) => "text",
        Message::Binary(_) => "binary",
        Message::Ping(_) => "ping",
        Message::Pong(_) => "pong",
        Message::Close(_) => "close",
        Message::Frame(_) => "frame",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_page_derives_endpoint() {
        let listener = WsListener::for_page("http://127.0.0.1:5500/index.html").unwrap();
        assert_eq!(
            listener.endpoint().as_str(),
            "ws://127.0.0.1:5500/index.html/ws"
        );
    }

    #[test]
    fn for_page_rejects_hostless_url() {
        assert!(WsListener::for_page("file:///index.html").is_err());
    }
}
