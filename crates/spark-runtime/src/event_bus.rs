//! Event bus for broadcasting simulation events

/// A simple event queue that systems push to and consumers drain
pub struct EventBus<E> {
    events: Vec<E>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event onto the bus
    pub fn push(&mut self, event: E) {
        self.events.push(event);
    }

    /// Drain all events from the bus, returning them in push order
    pub fn drain(&mut self) -> Vec<E> {
        std::mem::take(&mut self.events)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Ping {
        A,
        B(u32),
    }

    #[test]
    fn test_push_and_drain() {
        let mut bus = EventBus::new();
        assert!(bus.is_empty());

        bus.push(Ping::A);
        bus.push(Ping::B(7));

        assert_eq!(bus.len(), 2);

        let events = bus.drain();
        assert_eq!(events, vec![Ping::A, Ping::B(7)]);
        assert!(bus.is_empty());
    }

    #[test]
    fn test_drain_clears() {
        let mut bus = EventBus::new();
        bus.push(Ping::A);

        let _ = bus.drain();
        let events = bus.drain();
        assert!(events.is_empty());
    }
}
