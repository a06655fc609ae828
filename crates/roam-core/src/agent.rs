use core::fmt::Debug;

/// Identifier of an agent driven by its own state machine.
///
/// Used to name the other party of an agent-vs-agent collision and to derive
/// per-agent random streams, so it must be totally ordered and map to a
/// stable number.
pub trait AgentId: Copy + Ord + Eq + Debug {
    fn stable_id(self) -> u64;
}

impl AgentId for u64 {
    fn stable_id(self) -> u64 {
        self
    }
}

impl AgentId for u32 {
    fn stable_id(self) -> u64 {
        u64::from(self)
    }
}

impl AgentId for usize {
    fn stable_id(self) -> u64 {
        self as u64
    }
}
