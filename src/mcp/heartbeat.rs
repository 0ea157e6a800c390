//! Finite server-push heartbeat for `GET /sse`.
//!
//! Not a subscription: one `ready` event, then a fixed number of ping
//! comments on a fixed cadence, then the stream ends.

use std::convert::Infallible;

use axum::response::sse::Event;
use futures_util::{stream, Stream};

use crate::weather::HeartbeatConfig;

/// Data of the first event on the stream.
pub const READY_MESSAGE: &str = r#"{"jsonrpc":"2.0","method":"ready","params":{}}"#;

/// One frame of the heartbeat stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartbeatEvent {
    Ready,
    Ping,
}

impl HeartbeatEvent {
    /// Encodes the frame as an SSE event.
    pub fn to_sse(self) -> Event {
        match self {
            HeartbeatEvent::Ready => Event::default().data(READY_MESSAGE),
            HeartbeatEvent::Ping => Event::default().comment("ping"),
        }
    }
}

/// Bounded sequence: `Ready` followed by `pings` × `Ping`.
#[derive(Debug, Clone)]
pub struct Heartbeat {
    ready_sent: bool,
    remaining: u32,
}

impl Heartbeat {
    pub fn new(pings: u32) -> Self {
        Self {
            ready_sent: false,
            remaining: pings,
        }
    }
}

impl Iterator for Heartbeat {
    type Item = HeartbeatEvent;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.ready_sent {
            self.ready_sent = true;
            return Some(HeartbeatEvent::Ready);
        }
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(HeartbeatEvent::Ping)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize + usize::from(!self.ready_sent);
        (n, Some(n))
    }
}

/// Paces a [`Heartbeat`] in real time, sleeping `interval` before each ping.
pub fn heartbeat_stream(config: HeartbeatConfig) -> impl Stream<Item = Result<Event, Infallible>> {
    stream::unfold(Heartbeat::new(config.pings), move |mut beats| async move {
        let event = beats.next()?;
        if event == HeartbeatEvent::Ping {
            tokio::time::sleep(config.interval).await;
        }
        Some((Ok::<_, Infallible>(event.to_sse()), beats))
    })
}
