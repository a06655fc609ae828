use std::collections::VecDeque;

/// Contact notifications the host physics raises for one agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEvent<A> {
    /// Touched level geometry.
    Wall,
    /// Touched another agent.
    Agent(A),
}

/// Pull-based delivery of the collisions detected during the current tick.
pub trait CollisionEventSource<A> {
    fn poll(&mut self) -> Option<CollisionEvent<A>>;
}

/// FIFO inbox the host fills during collision detection and the controller
/// drains at the start of its tick.
#[derive(Debug, Clone)]
pub struct CollisionQueue<A> {
    events: VecDeque<CollisionEvent<A>>,
}

impl<A> CollisionQueue<A> {
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
        }
    }

    pub fn push(&mut self, event: CollisionEvent<A>) {
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl<A> Default for CollisionQueue<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> CollisionEventSource<A> for CollisionQueue<A> {
    fn poll(&mut self) -> Option<CollisionEvent<A>> {
        self.events.pop_front()
    }
}
