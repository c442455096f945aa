use crate::battle::state::{BattleEvent, EventBus};

/// Receives the narrated battle log. The engine disables input before it
/// resolves a round and re-enables it once the round's events are delivered,
/// unless the battle is over.
pub trait BattleObserver {
    fn disable_input(&mut self);
    fn enable_input(&mut self);
    fn receive_events(&mut self, events: &EventBus);
}

/// Observer that keeps everything it is sent, for tests and replays.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub events: Vec<BattleEvent>,
    pub input_enabled: bool,
    pub deliveries: usize,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            input_enabled: true,
            deliveries: 0,
        }
    }
}

impl BattleObserver for RecordingObserver {
    fn disable_input(&mut self) {
        self.input_enabled = false;
    }

    fn enable_input(&mut self) {
        self.input_enabled = true;
    }

    fn receive_events(&mut self, events: &EventBus) {
        self.deliveries += 1;
        self.events.extend(events.events().iter().cloned());
    }
}

/// Shared handle, so the caller can keep reading an observer the engine owns.
impl<T: BattleObserver> BattleObserver for std::rc::Rc<std::cell::RefCell<T>> {
    fn disable_input(&mut self) {
        self.borrow_mut().disable_input();
    }

    fn enable_input(&mut self) {
        self.borrow_mut().enable_input();
    }

    fn receive_events(&mut self, events: &EventBus) {
        self.borrow_mut().receive_events(events);
    }
}
