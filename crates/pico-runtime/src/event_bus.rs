//! Event bus for engine notifications

use crate::event::EngineEvent;

/// A simple event queue the engine pushes to and the host drains
pub struct EventBus {
    events: Vec<EngineEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: EngineEvent) {
        log::debug!("Engine event: {:?}", event);
        self.events.push(event);
    }

    /// Take every pending event, oldest first
    pub fn drain(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_drain() {
        let mut bus = EventBus::new();
        assert!(bus.is_empty());

        bus.push(EngineEvent::Paused);
        bus.push(EngineEvent::VolumeChanged(5));
        assert_eq!(bus.len(), 2);

        let events = bus.drain();
        assert_eq!(events, vec![EngineEvent::Paused, EngineEvent::VolumeChanged(5)]);
        assert!(bus.is_empty());
    }

    #[test]
    fn test_drain_empty() {
        let mut bus = EventBus::new();
        assert!(bus.drain().is_empty());
    }
}
