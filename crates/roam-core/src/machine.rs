use std::collections::{BTreeMap, VecDeque};

use crate::{MachineError, Result, State, StateKey};

/// Scheduling engine: a registry of states keyed by variant, a cyclic default
/// pipeline, and a FIFO override queue that always runs first.
///
/// The pipeline cursor survives overrides, so once the queue drains the
/// machine resumes the pipeline where it left off.
///
/// Methods that call into states take the host `world` the states run in.
///
/// [`start`](Self::start) only marks the initial state as current without
/// starting it, so the initial state need not be registered. An unregistered
/// or never-started current state counts as finished, which makes the first
/// transition leave it for the pipeline.
pub struct StateMachine<K, S>
where
    K: StateKey,
{
    states: BTreeMap<K, S>,
    pipeline: Vec<K>,
    queue: VecDeque<K>,
    cursor: usize,
    current: Option<K>,
    initial: K,
    running: bool,
    activations: u64,
}

impl<K, S> StateMachine<K, S>
where
    K: StateKey,
{
    /// `initial` becomes current on [`start`](Self::start); it may be left
    /// unregistered.
    pub fn new(initial: K) -> Self {
        Self {
            states: BTreeMap::new(),
            pipeline: Vec::new(),
            queue: VecDeque::new(),
            cursor: 0,
            current: None,
            initial,
            running: false,
            activations: 0,
        }
    }

    pub fn add_state(&mut self, key: K, state: S, register_to_default_pipeline: bool) -> Result<()> {
        if self.states.contains_key(&key) {
            return Err(MachineError::DuplicateState(key.name()));
        }

        self.states.insert(key, state);
        if register_to_default_pipeline {
            self.pipeline.push(key);
        }
        Ok(())
    }

    /// Queue `key` to run ahead of the default pipeline.
    pub fn set_next_state(&mut self, key: K) -> Result<()> {
        if !self.states.contains_key(&key) {
            return Err(MachineError::StateNotFound(key.name()));
        }

        tracing::trace!(state = key.name(), queued = self.queue.len() + 1, "override queued");
        self.queue.push_back(key);
        Ok(())
    }

    pub fn clear_queue(&mut self) {
        self.queue.clear();
    }

    pub fn current_key(&self) -> Option<K> {
        self.current
    }

    pub fn initial_key(&self) -> K {
        self.initial
    }

    pub fn is_running(&self, key: K) -> bool {
        self.current == Some(key)
    }

    pub fn contains(&self, key: K) -> bool {
        self.states.contains_key(&key)
    }

    pub fn get(&self, key: K) -> Option<&S> {
        self.states.get(&key)
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut S> {
        self.states.get_mut(&key)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn pipeline(&self) -> &[K] {
        &self.pipeline
    }

    /// Index of the pipeline entry the next undisturbed transition activates
    /// (before wrapping).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Queued overrides, head first.
    pub fn pending(&self) -> impl Iterator<Item = K> + '_ {
        self.queue.iter().copied()
    }

    /// Number of state activations since construction.
    pub fn activations(&self) -> u64 {
        self.activations
    }

    /// Make the initial state current and rewind the pipeline.
    ///
    /// Any active state is stopped first. The initial state's `start` hook is
    /// not called.
    pub fn start<W>(&mut self, world: &mut W)
    where
        S: State<W>,
    {
        self.stop_current(world);
        self.current = Some(self.initial);
        self.cursor = 0;
        self.running = true;
        tracing::debug!(state = self.initial.name(), "state machine started");
    }

    /// Whether the machine has been started and not stopped since.
    pub fn is_started(&self) -> bool {
        self.running
    }

    pub fn update<W>(&mut self, world: &mut W)
    where
        S: State<W>,
    {
        let Some(key) = self.current else {
            return;
        };
        if let Some(state) = self.states.get_mut(&key) {
            state.update(world);
        }
    }

    /// Whether the machine is ready to move on.
    ///
    /// `false` when stopped. A running machine with no registered current
    /// state (unregistered initial state, or the active state was removed)
    /// reports `true`.
    pub fn is_finished<W>(&self, world: &W) -> bool
    where
        S: State<W>,
    {
        if !self.running {
            return false;
        }
        match self.current.and_then(|key| self.states.get(&key)) {
            Some(state) => state.finished(world),
            None => true,
        }
    }

    pub fn stop<W>(&mut self, world: &mut W)
    where
        S: State<W>,
    {
        self.stop_current(world);
        self.running = false;
    }

    fn stop_current<W>(&mut self, world: &mut W)
    where
        S: State<W>,
    {
        let Some(key) = self.current.take() else {
            return;
        };
        if let Some(state) = self.states.get_mut(&key) {
            state.stop(world);
            tracing::debug!(state = key.name(), "state stopped");
        }
    }

    /// Switch to `key` right away, bypassing both queue and pipeline.
    ///
    /// Re-selecting the active state restarts it.
    pub fn set_current_state<W>(&mut self, key: K, world: &mut W) -> Result<()>
    where
        S: State<W>,
    {
        self.activate(key, world)
    }

    /// Pick and activate the next state: queue head first, otherwise the
    /// pipeline entry under the cursor.
    ///
    /// Queued keys whose state has been removed are skipped.
    pub fn next_state<W>(&mut self, world: &mut W) -> Result<K>
    where
        S: State<W>,
    {
        while let Some(key) = self.queue.pop_front() {
            if self.states.contains_key(&key) {
                self.activate(key, world)?;
                return Ok(key);
            }
            tracing::warn!(state = key.name(), "skipping queued state that is no longer registered");
        }

        if self.pipeline.is_empty() {
            return Err(MachineError::EmptyPipeline);
        }
        if self.cursor >= self.pipeline.len() {
            self.cursor = 0;
        }

        let key = self.pipeline[self.cursor];
        self.activate(key, world)?;
        self.cursor += 1;
        Ok(key)
    }

    /// Unregister `key` and hand its instance back.
    ///
    /// Removing the active state stops it first and leaves the machine
    /// finished, so the next transition picks a new state. Entries already
    /// queued stay queued and are skipped later.
    pub fn remove_state<W>(&mut self, key: K, world: &mut W) -> Result<S>
    where
        S: State<W>,
    {
        let Some(mut state) = self.states.remove(&key) else {
            return Err(MachineError::StateNotFound(key.name()));
        };

        if self.current == Some(key) {
            state.stop(world);
            self.current = None;
            tracing::debug!(state = key.name(), "state stopped");
        }

        if let Some(index) = self.pipeline.iter().position(|k| *k == key) {
            self.pipeline.remove(index);
            // Keep the cursor on the same upcoming entry.
            if index < self.cursor {
                self.cursor -= 1;
            }
        }
        Ok(state)
    }

    fn activate<W>(&mut self, key: K, world: &mut W) -> Result<()>
    where
        S: State<W>,
    {
        if !self.states.contains_key(&key) {
            return Err(MachineError::StateNotFound(key.name()));
        }

        self.stop_current(world);

        if let Some(state) = self.states.get_mut(&key) {
            state.start(world);
        }
        self.current = Some(key);
        self.running = true;
        self.activations += 1;
        tracing::debug!(state = key.name(), cursor = self.cursor, "state started");
        Ok(())
    }
}
