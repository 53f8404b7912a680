//! Publishing finished games to an external results channel.
//!
//! ## Key Types
//!
//! - `ResultEvent`: immutable `{playerName, playerScore, computerScore, rounds}` payload
//! - `ResultSink`: the external channel (implement this for a real queue)
//! - `Reporter`: binds a sink to a channel name; publish failures are logged, never returned

pub mod event;
pub mod sink;

pub use event::ResultEvent;
pub use sink::{PublishError, RecordingSink, ResultSink, TracingSink};

use tracing::{info, warn};

/// Fire-and-forget publisher for one channel.
pub struct Reporter {
    channel: String,
    sink: Box<dyn ResultSink>,
}

impl Reporter {
    pub fn new(channel: impl Into<String>, sink: impl ResultSink + 'static) -> Self {
        Self {
            channel: channel.into(),
            sink: Box::new(sink),
        }
    }

    #[must_use]
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Build and publish one event. Returns the event whether or not delivery
    /// succeeded.
    pub fn report(
        &self,
        player_name: &str,
        player_score: i32,
        computer_score: i32,
        rounds: u32,
    ) -> ResultEvent {
        let event = ResultEvent::new(player_name, player_score, computer_score, rounds);
        match self.sink.publish(&self.channel, &event) {
            Ok(()) => info!(
                channel = %self.channel,
                player = player_name,
                player_score,
                computer_score,
                rounds,
                "Published result"
            ),
            Err(err) => warn!(channel = %self.channel, error = %err, "Failed to publish result"),
        }
        event
    }
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter").field("channel", &self.channel).finish_non_exhaustive()
    }
}
