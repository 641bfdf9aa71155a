//! Outbound publication seam.
//!
//! The harvester never talks to a transport directly. It hands finished
//! documents to a [`Publisher`], which in the default configuration is a
//! [`ChannelPublisher`] feeding an in-process tokio channel. Swapping the
//! transport means implementing the trait, not touching the harvest loop.

use tokio::sync::mpsc;

use crate::error::PublishError;

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One finished document ready for the outbound transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRecord {
    /// Routing key, the revision identifier `forge!product$version`.
    pub key: String,
    /// Canonical JSON encoding of the call graph document.
    pub payload: String,
}

// ---------------------------------------------------------------------------
// Publisher trait
// ---------------------------------------------------------------------------

/// Sink for finished documents.
pub trait Publisher {
    /// Hands one record to the transport.
    ///
    /// A returned error means the record was not delivered; the caller
    /// records the failure and moves on rather than retrying.
    fn publish(&self, record: OutboundRecord) -> Result<(), PublishError>;
}

// ---------------------------------------------------------------------------
// Channel-backed publisher
// ---------------------------------------------------------------------------

/// Publisher backed by an unbounded in-process channel.
///
/// The receiving half is returned from [`ChannelPublisher::new`] and is
/// typically drained by a downstream task.
#[derive(Debug, Clone)]
pub struct ChannelPublisher {
    sender: mpsc::UnboundedSender<OutboundRecord>,
}

impl ChannelPublisher {
    /// Creates a publisher together with the receiving half of its channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<OutboundRecord>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Publisher for ChannelPublisher {
    fn publish(&self, record: OutboundRecord) -> Result<(), PublishError> {
        self.sender
            .send(record)
            .map_err(|_| PublishError::ChannelClosed)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
