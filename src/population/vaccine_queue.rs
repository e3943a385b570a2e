//! A priority queue of people waiting for a vaccine dose.
//!
//! People are ordered by priority level (lower levels first) and, within a
//! level, by insertion order. Adding a person is *O*(log(*n*)), as is taking
//! the next one.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::PersonId;

#[derive(Debug, Clone, Default)]
pub struct VaccineQueue {
    queue: BinaryHeap<Entry>,
    counter: u64,
}

impl VaccineQueue {
    #[must_use]
    pub fn new() -> VaccineQueue {
        VaccineQueue::default()
    }

    /// Adds `person` behind everyone already waiting at `priority`.
    pub fn push(&mut self, priority: u32, person: PersonId) {
        let sequence = self.counter;
        self.queue.push(Entry {
            priority,
            sequence,
            person,
        });
        self.counter += 1;
    }

    /// Removes and returns the person with the lowest priority level that
    /// has waited longest.
    pub fn pop(&mut self) -> Option<PersonId> {
        self.queue.pop().map(|entry| entry.person)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[derive(PartialEq, Eq, Debug, Clone)]
struct Entry {
    priority: u32,
    sequence: u64,
    person: PersonId,
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// `BinaryHeap` is a max-heap, so both keys are reversed: the entry with the
/// lowest priority and then the lowest sequence number is the greatest.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.priority.cmp(&other.priority).reverse() {
            Ordering::Equal => self.sequence.cmp(&other.sequence).reverse(),
            priority_ordering => priority_ordering,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_queue() {
        let mut queue = VaccineQueue::new();
        assert!(queue.is_empty());
        assert!(queue.pop().is_none());
    }

    #[test]
    fn priority_then_fifo() {
        let mut queue = VaccineQueue::new();
        queue.push(2, PersonId(0));
        queue.push(1, PersonId(1));
        queue.push(2, PersonId(2));
        queue.push(1, PersonId(3));
        assert_eq!(queue.len(), 4);

        assert_eq!(queue.pop(), Some(PersonId(1)));
        assert_eq!(queue.pop(), Some(PersonId(3)));
        assert_eq!(queue.pop(), Some(PersonId(0)));
        assert_eq!(queue.pop(), Some(PersonId(2)));
        assert!(queue.pop().is_none());
    }
}
