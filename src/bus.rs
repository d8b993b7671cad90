use crate::command::Outbox;
use crate::event::{Event, EventKind};
use std::collections::HashMap;

pub type Handler = Box<dyn FnMut(&Event, &mut Outbox)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// Named channels of handlers, fired synchronously in registration order.
#[derive(Default)]
pub struct EventBus {
    handlers: HashMap<EventKind, Vec<(HandlerId, Handler)>>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(&mut self, kind: EventKind, handler: F) -> HandlerId
    where
        F: FnMut(&Event, &mut Outbox) + 'static,
    {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers
            .entry(kind)
            .or_insert_with(Vec::new)
            .push((id, Box::new(handler)));
        id
    }

    /// Removes a handler. Returns false if it was not registered.
    pub fn off(&mut self, id: HandlerId) -> bool {
        for handlers in self.handlers.values_mut() {
            if let Some(pos) = handlers.iter().position(|(h, _)| *h == id) {
                handlers.remove(pos);
                return true;
            }
        }
        false
    }

    pub fn emit(&mut self, event: &Event, outbox: &mut Outbox) {
        let kind = event.kind();
        trace!("emit {}", kind);
        if let Some(handlers) = self.handlers.get_mut(&kind) {
            for (_, handler) in handlers.iter_mut() {
                handler(event, outbox);
            }
        }
    }

    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }
}
