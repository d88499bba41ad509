//! Editable list of questions.
//!
//! The list always holds at least one slot. The last slot is the question
//! currently being typed; `add` commits it and opens a fresh one.

use serde::{Deserialize, Serialize};

pub const SAMPLE_QUESTIONS: [&str; 4] = [
    "What is the grace period for premium payment?",
    "What are the waiting periods for pre-existing diseases?",
    "Does this policy cover maternity expenses?",
    "What is the extent of coverage for surgical procedures?",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionList {
    slots: Vec<String>,
}

impl Default for QuestionList {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionList {
    pub fn new() -> Self {
        Self { slots: vec![String::new()] }
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Never true: an empty list is normalised to one blank slot.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Text of the last slot.
    pub fn current(&self) -> &str {
        self.slots.last().map(String::as_str).unwrap_or("")
    }

    pub fn update(&mut self, index: usize, value: impl Into<String>) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = value.into();
        }
    }

    /// Commit the current question. Returns false when it is blank.
    pub fn add(&mut self) -> bool {
        let trimmed = self.current().trim().to_string();
        if trimmed.is_empty() {
            return false;
        }
        if let Some(last) = self.slots.last_mut() {
            *last = trimmed;
        }
        self.slots.push(String::new());
        true
    }

    pub fn remove(&mut self, index: usize) {
        if index < self.slots.len() {
            self.slots.remove(index);
        }
        if self.slots.is_empty() {
            self.slots.push(String::new());
        }
    }

    /// Fill the blank last slot with `question`, or append it.
    pub fn add_sample(&mut self, question: &str) {
        match self.slots.last_mut() {
            Some(last) if last.is_empty() => *last = question.to_string(),
            _ => self.slots.push(question.to_string()),
        }
    }

    /// Replace every slot with submitted form values.
    pub fn replace_all<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.slots = values.into_iter().map(Into::into).collect();
        if self.slots.is_empty() {
            self.slots.push(String::new());
        }
    }

    /// Trimmed, non-blank questions in order.
    pub fn valid_questions(&self) -> Vec<String> {
        self.slots
            .iter()
            .map(|q| q.trim())
            .filter(|q| !q.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn can_add(&self) -> bool {
        !self.current().trim().is_empty()
    }

    pub fn can_submit(&self) -> bool {
        self.slots.iter().any(|q| !q.trim().is_empty())
    }

    /// A remove button is offered for non-empty slots once there is more than one.
    pub fn is_removable(&self, index: usize) -> bool {
        self.slots.len() > 1 && self.slots.get(index).is_some_and(|q| !q.is_empty())
    }
}
