//! Turn-taking state machine for one conversation.

use core::fmt;

use parley_core::{Error, Reply, Result, Turn};

/// Where the conversation is within the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnState {
    /// Waiting for the user to submit a message
    #[default]
    AwaitingInput,
    /// A submitted message is being resolved
    Resolving,
    /// A reply is ready and waiting to be shown
    Responding,
}

impl fmt::Display for TurnState {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::AwaitingInput => "awaiting input",
            Self::Resolving => "resolving",
            Self::Responding => "responding",
        };
        formatter.write_str(label)
    }
}

/// Conversation state with sequence numbers for overlapping turns.
///
/// A new message may be submitted while an earlier one is still resolving.
/// The earlier turn then becomes stale and its completion is dropped.
#[derive(Debug, Default)]
pub struct Conversation {
    state: TurnState,
    latest: u64,
    pending: Option<Reply>,
    last_reply: Option<Reply>,
}

impl Conversation {
    /// Creates a conversation awaiting its first message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub const fn state(&self) -> TurnState {
        self.state
    }

    /// The reply most recently shown to the user.
    pub const fn last_reply(&self) -> Option<&Reply> {
        self.last_reply.as_ref()
    }

    /// Submits a message and starts a new turn.
    ///
    /// # Errors
    /// Returns `InvalidState` while a reply is waiting to be displayed.
    pub fn submit<T: Into<String>>(&mut self, input: T) -> Result<Turn> {
        if self.state == TurnState::Responding {
            return Err(self.invalid("submit"));
        }
        if self.state == TurnState::Resolving {
            tracing::debug!("Turn {} superseded before completing", self.latest);
        }

        self.latest += 1;
        self.state = TurnState::Resolving;
        Ok(Turn::new(input)
            .with_sequence(self.latest)
            .with_previous(self.last_reply.clone()))
    }

    /// Records the reply for turn `sequence`.
    ///
    /// Returns `false` and leaves the state untouched when the turn is stale.
    ///
    /// # Errors
    /// Returns `InvalidState` unless a turn is resolving.
    pub fn complete(&mut self, sequence: u64, reply: Reply) -> Result<bool> {
        if sequence < self.latest {
            tracing::debug!("Discarding stale reply for turn {sequence}");
            return Ok(false);
        }
        if self.state != TurnState::Resolving || sequence != self.latest {
            return Err(self.invalid("complete"));
        }

        self.pending = Some(reply);
        self.state = TurnState::Responding;
        Ok(true)
    }

    /// Marks the pending reply as shown and returns it.
    ///
    /// # Errors
    /// Returns `InvalidState` unless a reply is waiting.
    pub fn displayed(&mut self) -> Result<Reply> {
        if self.state != TurnState::Responding {
            return Err(self.invalid("display"));
        }
        let Some(reply) = self.pending.take() else {
            return Err(self.invalid("display"));
        };

        self.last_reply = Some(reply.clone());
        self.state = TurnState::AwaitingInput;
        Ok(reply)
    }

    fn invalid(&self, action: &str) -> Error {
        Error::InvalidState(format!("cannot {action} while {}", self.state))
    }
}
