//! Subscription handle for continuous position updates.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::types::PositionError;
use crate::coord::Position;

/// Samples buffered between the sensor task and the consumer.
const WATCH_BUFFER: usize = 64;

type Sample = Result<Position, PositionError>;

/// Consumer side of a position subscription.
///
/// Dropping the handle cancels the producing task.
#[derive(Debug)]
pub struct PositionWatch {
    receiver: mpsc::Receiver<Sample>,
    cancel: CancellationToken,
}

/// Producer side of a position subscription, held by the sensor task.
#[derive(Debug, Clone)]
pub struct WatchSender {
    sender: mpsc::Sender<Sample>,
    cancel: CancellationToken,
}

impl PositionWatch {
    /// Create a connected sender/watch pair.
    pub fn channel() -> (WatchSender, PositionWatch) {
        let (sender, receiver) = mpsc::channel(WATCH_BUFFER);
        let cancel = CancellationToken::new();
        (
            WatchSender {
                sender,
                cancel: cancel.clone(),
            },
            PositionWatch { receiver, cancel },
        )
    }

    /// Wait for the next sample. Returns `None` once the stream has ended.
    pub async fn next_sample(&mut self) -> Option<Sample> {
        self.receiver.recv().await
    }

    /// Stop the subscription. Samples already buffered are still delivered.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for PositionWatch {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl Stream for PositionWatch {
    type Item = Sample;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

impl WatchSender {
    /// Deliver a sample. Returns `false` once the consumer is gone.
    pub async fn send(&self, sample: Sample) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }
        self.sender.send(sample).await.is_ok()
    }

    /// Resolves when the consumer cancels or drops the watch.
    pub async fn cancelled(&self) {
        tokio::select! {
            _ = self.cancel.cancelled() => {}
            _ = self.sender.closed() => {}
        }
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled() || self.sender.is_closed()
    }
}
