/// Input event types the field understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The pointer moved to client (page viewport) coordinates.
    PointerMove { client_x: f32, client_y: f32 },
    /// The pointer left the drawing surface.
    PointerLeave,
    /// The viewport was resized. Rebuilds the sprite pool.
    Resize { width: f32, height: f32 },
}

/// A queue of input events.
/// The host pushes events as they arrive; the controller drains them once per frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event.
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drain all pending events, collapsing each run of consecutive pointer
    /// moves into the last one and keeping only the last resize. Hit testing
    /// is a full scan of the pool and every resize rebuilds it, so a burst of
    /// either costs at most one pass per frame.
    pub fn drain_coalesced(&mut self) -> Vec<InputEvent> {
        let last_resize = self
            .events
            .iter()
            .rposition(|e| matches!(e, InputEvent::Resize { .. }));
        let mut out: Vec<InputEvent> = Vec::with_capacity(self.events.len());
        for (i, event) in self.events.drain(..).enumerate() {
            if matches!(event, InputEvent::Resize { .. }) && Some(i) != last_resize {
                continue;
            }
            let is_move = matches!(event, InputEvent::PointerMove { .. });
            match out.last_mut() {
                Some(last @ InputEvent::PointerMove { .. }) if is_move => *last = event,
                _ => out.push(event),
            }
        }
        out
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
