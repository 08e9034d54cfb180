//! Ordered message log with lookup by id.

use std::collections::HashMap;

use crate::models::ChatMessage;

/// Messages of the conversation in display order.
///
/// The orchestrator mutates entries by id while the caller reads the ordered
/// view, so both an index and an order list are kept.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: HashMap<String, ChatMessage>,
    order: Vec<String>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message. An id that is already present is replaced in place.
    pub fn push(&mut self, message: ChatMessage) {
        let id = message.id.clone();
        if self.messages.insert(id.clone(), message).is_none() {
            self.order.push(id);
        }
    }

    pub fn get(&self, id: &str) -> Option<&ChatMessage> {
        self.messages.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut ChatMessage> {
        self.messages.get_mut(id)
    }

    /// Messages in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.order.iter().filter_map(|id| self.messages.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
