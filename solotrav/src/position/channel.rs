//! Position source fed programmatically.
//!
//! Useful for embedding the controller behind another sensor API and for
//! driving sessions in tests. Samples pushed through a [`PositionFeed`] are
//! queued and consumed exactly once, first by a pending one-shot fix, then
//! by the active watch.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tracing::debug;

use super::types::{PositionError, PositionOptions, PositionSource};
use super::watch::PositionWatch;
use crate::coord::Position;

type Sample = Result<Position, PositionError>;

/// Handle used to push samples into a [`ChannelPositionSource`].
#[derive(Debug, Clone)]
pub struct PositionFeed {
    sender: mpsc::UnboundedSender<Sample>,
}

impl PositionFeed {
    /// Push a successful sample. Returns `false` if the source is gone.
    pub fn push(&self, position: Position) -> bool {
        self.sender.send(Ok(position)).is_ok()
    }

    /// Push a sensor failure. Returns `false` if the source is gone.
    pub fn push_error(&self, error: PositionError) -> bool {
        self.sender.send(Err(error)).is_ok()
    }
}

/// A [`PositionSource`] whose samples come from a [`PositionFeed`].
///
/// Dropping every feed ends the stream.
#[derive(Debug, Clone)]
pub struct ChannelPositionSource {
    receiver: Arc<Mutex<mpsc::UnboundedReceiver<Sample>>>,
}

impl ChannelPositionSource {
    /// Create a source and the feed that drives it.
    pub fn new() -> (Self, PositionFeed) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                receiver: Arc::new(Mutex::new(receiver)),
            },
            PositionFeed { sender },
        )
    }
}

impl PositionSource for ChannelPositionSource {
    async fn current_position(&self, options: &PositionOptions) -> Result<Position, PositionError> {
        let mut receiver = self.receiver.lock().await;
        match tokio::time::timeout(options.timeout, receiver.recv()).await {
            Ok(Some(sample)) => sample,
            Ok(None) => Err(PositionError::Unavailable(
                "position feed closed".to_string(),
            )),
            Err(_) => Err(PositionError::timeout(options)),
        }
    }

    fn watch(&self, options: &PositionOptions) -> PositionWatch {
        let (tx, watch) = PositionWatch::channel();
        let receiver = Arc::clone(&self.receiver);
        let options = options.clone();

        tokio::spawn(async move {
            let mut receiver = receiver.lock().await;
            loop {
                let next = tokio::select! {
                    _ = tx.cancelled() => break,
                    next = tokio::time::timeout(options.timeout, receiver.recv()) => next,
                };

                let sample = match next {
                    Ok(Some(sample)) => sample,
                    Ok(None) => break,
                    Err(_) => Err(PositionError::timeout(&options)),
                };
                if !tx.send(sample).await {
                    break;
                }
            }
            debug!("Channel position watch ended");
        });

        watch
    }
}
