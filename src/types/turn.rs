//! Conversation memory
//!
//! - Turn = one user message and the assistant reply to it
//! - Memory = fixed-capacity FIFO of turns, owned by one session

use std::collections::VecDeque;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::MEMORY_CAPACITY;

/// One completed exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// What the user said
    pub user: String,
    /// The normalized assistant reply
    pub assistant: String,
    /// When the turn was recorded
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    /// Create a new turn with current timestamp
    pub fn new(user: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            assistant: assistant.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Bounded conversation history, oldest first
#[derive(Debug, Clone)]
pub struct ConversationMemory {
    turns: VecDeque<ConversationTurn>,
    capacity: usize,
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationMemory {
    /// Create memory with default capacity
    pub fn new() -> Self {
        Self::with_capacity(MEMORY_CAPACITY)
    }

    /// Create memory with custom capacity (at least 1)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a turn, evicting the oldest when full
    pub fn push(&mut self, turn: ConversationTurn) {
        while self.turns.len() >= self.capacity {
            self.turns.pop_front();
        }
        self.turns.push_back(turn);
    }

    /// Get all turns (oldest first)
    pub fn turns(&self) -> impl Iterator<Item = &ConversationTurn> {
        self.turns.iter()
    }

    /// Most recent turn
    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.back()
    }

    /// Get turn count
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Clear all turns
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

// =============================================================================
// TESTS
// =============================================================================
