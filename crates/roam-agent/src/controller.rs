use roam_core::{AgentId, DurationRange, State, StateKey, StateMachine, TimeConstrained, TimedBehavior};

use crate::{
    AgentError, AgentWorld, Behavior, BehaviorConfig, CollisionEvent, CollisionEventSource,
    Idle, MoveBackward, MoveForward, Result, RotateInPlace, RotatedMove,
};

pub type BehaviorMachine<H> = StateMachine<Behavior, Box<dyn State<H>>>;

/// Drives one agent: owns its state machine and host collaborators, reacts
/// to collisions, and advances behavior once per simulation tick.
///
/// Forward and rotated moves form the default pipeline. Rotation, backing off
/// and idling only run when a collision asks for them.
pub struct AgentController<H, A = u64>
where
    H: AgentWorld + 'static,
    A: AgentId,
{
    agent: A,
    host: H,
    machine: BehaviorMachine<H>,
    active: bool,
    shut_down: bool,
}

impl<H, A> AgentController<H, A>
where
    H: AgentWorld + 'static,
    A: AgentId,
{
    /// Register every behavior and start the machine at idle.
    pub fn new(agent: A, mut host: H, config: &BehaviorConfig) -> Result<Self> {
        if let Err(err) = config.validate() {
            tracing::error!(agent = ?agent, error = %err, "rejecting behavior config");
            return Err(err);
        }

        let durations = &config.durations;
        let bias = config.sign_bias;
        let mut machine = BehaviorMachine::new(Behavior::Idle);
        machine.add_state(
            Behavior::MoveForward,
            timed(Behavior::MoveForward, durations.forward_move, MoveForward::default())?,
            true,
        )?;
        machine.add_state(
            Behavior::RotatedMove,
            timed(Behavior::RotatedMove, durations.rotated_move, RotatedMove::new(bias))?,
            true,
        )?;
        machine.add_state(
            Behavior::Rotate,
            timed(Behavior::Rotate, durations.rotation, RotateInPlace::new(bias))?,
            false,
        )?;
        machine.add_state(
            Behavior::MoveBackward,
            timed(Behavior::MoveBackward, durations.backward_move, MoveBackward)?,
            false,
        )?;
        machine.add_state(
            Behavior::Idle,
            timed(Behavior::Idle, durations.idle, Idle)?,
            false,
        )?;
        machine.start(&mut host);

        tracing::debug!(agent = ?agent, "agent controller started");
        Ok(Self {
            agent,
            host,
            machine,
            active: true,
            shut_down: false,
        })
    }

    pub fn agent(&self) -> A {
        self.agent
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn machine(&self) -> &BehaviorMachine<H> {
        &self.machine
    }

    pub fn current(&self) -> Option<Behavior> {
        self.machine.current_key()
    }

    pub fn is_active(&self) -> bool {
        self.active && !self.shut_down
    }

    /// Pause or resume the agent. A paused agent is halted and skips ticks
    /// and collisions; its current behavior resumes when reactivated.
    pub fn set_active(&mut self, active: bool) {
        if self.active && !active {
            self.host.motion().stop();
        }
        self.active = active;
    }

    /// One simulation step: update the active behavior and, once it has run
    /// its course, move on. Returns the newly activated behavior, if any.
    pub fn tick(&mut self) -> Result<Option<Behavior>> {
        if !self.is_active() {
            return Ok(None);
        }

        self.machine.update(&mut self.host);
        if !self.machine.is_finished(&self.host) {
            return Ok(None);
        }

        match self.machine.next_state(&mut self.host) {
            Ok(next) => Ok(Some(next)),
            Err(err) => {
                tracing::error!(agent = ?self.agent, error = %err, "failed to advance behavior");
                Err(err.into())
            }
        }
    }

    /// Handle every collision raised this tick, then [`tick`](Self::tick).
    pub fn tick_with<S>(&mut self, events: &mut S) -> Result<Option<Behavior>>
    where
        S: CollisionEventSource<A> + ?Sized,
    {
        while let Some(event) = events.poll() {
            self.handle_collision(event)?;
        }
        self.tick()
    }

    pub fn handle_collision(&mut self, event: CollisionEvent<A>) -> Result<()> {
        if !self.is_active() {
            tracing::trace!(agent = ?self.agent, ?event, "ignoring collision on inactive agent");
            return Ok(());
        }

        let result = match event {
            CollisionEvent::Wall => self.on_wall_hit(),
            CollisionEvent::Agent(other) => self.on_agent_hit(other),
        };
        if let Err(err) = &result {
            tracing::error!(agent = ?self.agent, ?event, error = %err, "collision reaction failed");
        }
        result
    }

    /// Halt, idle right away, then back off and turn before resuming.
    fn on_wall_hit(&mut self) -> Result<()> {
        tracing::debug!(agent = ?self.agent, from = ?self.current().map(StateKey::name), "wall hit");
        self.host.motion().stop();
        self.machine.set_current_state(Behavior::Idle, &mut self.host)?;
        self.machine.set_next_state(Behavior::MoveBackward)?;
        self.machine.set_next_state(Behavior::Rotate)?;
        Ok(())
    }

    /// Turn away immediately; the pipeline resumes once the turn is done.
    fn on_agent_hit(&mut self, other: A) -> Result<()> {
        tracing::debug!(agent = ?self.agent, other = ?other, "agent hit");
        self.machine.set_current_state(Behavior::Rotate, &mut self.host)?;
        Ok(())
    }

    /// Bring the agent back as if freshly spawned: pending overrides are
    /// dropped, the machine restarts at idle and the agent is reactivated.
    ///
    /// Does nothing once the controller is shut down.
    pub fn restart(&mut self) {
        if self.shut_down {
            return;
        }
        self.machine.clear_queue();
        self.machine.start(&mut self.host);
        self.active = true;
        tracing::debug!(agent = ?self.agent, "agent controller restarted");
    }

    /// Stop the active behavior for good; later ticks and collisions are no-ops.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.machine.stop(&mut self.host);
        self.shut_down = true;
        tracing::debug!(agent = ?self.agent, "agent controller shut down");
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }
}

fn timed<H, B>(behavior: Behavior, range: DurationRange, inner: B) -> Result<Box<dyn State<H>>>
where
    H: AgentWorld + 'static,
    B: TimedBehavior<H> + 'static,
{
    let state = TimeConstrained::new(range, inner).map_err(|source| AgentError::InvalidDuration {
        behavior: behavior.name(),
        source,
    })?;
    Ok(Box::new(state))
}
