use roam_agent::{
    AgentController, AgentError, AgentHost, Behavior, BehaviorConfig, CollisionEvent,
    CollisionQueue, DurationConfig, MotionPort, Vec3,
};
use roam_core::{DurationError, DurationRange, ManualClock, SplitMix64};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    Move(Vec3),
    Rotate(f32),
    Stop,
}

#[derive(Debug)]
struct RecordingMotion {
    facing: Vec3,
    commands: Vec<Command>,
}

impl Default for RecordingMotion {
    fn default() -> Self {
        Self {
            facing: Vec3::FORWARD,
            commands: Vec::new(),
        }
    }
}

impl MotionPort for RecordingMotion {
    fn move_in(&mut self, direction: Vec3) {
        self.commands.push(Command::Move(direction));
    }

    fn rotate(&mut self, signed_amount: f32) {
        self.commands.push(Command::Rotate(signed_amount));
    }

    fn stop(&mut self) {
        self.commands.push(Command::Stop);
    }

    fn forward(&self) -> Vec3 {
        self.facing
    }
}

type Host = AgentHost<RecordingMotion, ManualClock, SplitMix64>;

/// Fixed, distinct durations so every transition lands on a known second.
fn config() -> BehaviorConfig {
    BehaviorConfig {
        durations: DurationConfig {
            idle: DurationRange::fixed(1.0),
            forward_move: DurationRange::fixed(2.0),
            rotated_move: DurationRange::fixed(3.0),
            rotation: DurationRange::fixed(4.0),
            backward_move: DurationRange::fixed(5.0),
        },
        ..BehaviorConfig::default()
    }
}

fn controller() -> AgentController<Host> {
    let host = AgentHost::new(RecordingMotion::default(), ManualClock::new(), SplitMix64::new(5));
    AgentController::new(1, host, &config()).unwrap()
}

fn advance_and_tick(c: &mut AgentController<Host>, seconds: f64) -> Option<Behavior> {
    c.host_mut().clock.advance(seconds);
    c.tick().unwrap()
}

fn take_commands(c: &mut AgentController<Host>) -> Vec<Command> {
    std::mem::take(&mut c.host_mut().motion.commands)
}

#[test]
fn starts_at_idle_then_cycles_forward_and_rotated_move() {
    let mut c = controller();
    assert_eq!(c.current(), Some(Behavior::Idle));
    assert_eq!(c.machine().pipeline(), &[Behavior::MoveForward, Behavior::RotatedMove]);

    // The initial idle is current but never started, so it is already done.
    assert_eq!(c.tick().unwrap(), Some(Behavior::MoveForward));
    assert_eq!(advance_and_tick(&mut c, 1.0), None);
    assert_eq!(advance_and_tick(&mut c, 1.0), Some(Behavior::RotatedMove));
    assert_eq!(advance_and_tick(&mut c, 3.0), Some(Behavior::MoveForward));
}

#[test]
fn first_tick_enters_the_pipeline_without_idling() {
    let mut c = controller();
    assert!(take_commands(&mut c).is_empty());

    assert_eq!(advance_and_tick(&mut c, 0.02), Some(Behavior::MoveForward));
    assert_eq!(c.current(), Some(Behavior::MoveForward));
    assert_eq!(c.machine().activations(), 1);
}

#[test]
fn forward_move_drives_along_the_captured_heading_each_tick() {
    let mut c = controller();
    advance_and_tick(&mut c, 1.0);
    take_commands(&mut c);

    c.host_mut().motion.facing = Vec3::new(1.0, 0.0, 0.0);
    c.tick().unwrap();
    assert_eq!(take_commands(&mut c), vec![Command::Move(Vec3::FORWARD)]);
}

#[test]
fn wall_hit_idles_then_backs_off_and_turns_before_resuming() {
    let mut c = controller();
    assert_eq!(advance_and_tick(&mut c, 1.0), Some(Behavior::MoveForward));
    take_commands(&mut c);

    c.handle_collision(CollisionEvent::Wall).unwrap();

    // Halted by the handler, then forward move releases its velocity on stop.
    assert_eq!(take_commands(&mut c), vec![Command::Stop, Command::Move(Vec3::ZERO)]);
    assert_eq!(c.current(), Some(Behavior::Idle));
    assert_eq!(
        c.machine().pending().collect::<Vec<_>>(),
        vec![Behavior::MoveBackward, Behavior::Rotate]
    );

    assert_eq!(advance_and_tick(&mut c, 1.0), Some(Behavior::MoveBackward));
    assert_eq!(advance_and_tick(&mut c, 5.0), Some(Behavior::Rotate));
    // Forward move was the last pipeline entry, so the cycle resumes after it.
    assert_eq!(advance_and_tick(&mut c, 4.0), Some(Behavior::RotatedMove));
}

#[test]
fn agent_hit_turns_immediately_without_follow_up() {
    let mut c = controller();
    advance_and_tick(&mut c, 1.0);
    assert_eq!(advance_and_tick(&mut c, 2.0), Some(Behavior::RotatedMove));

    c.handle_collision(CollisionEvent::Agent(7)).unwrap();
    assert_eq!(c.current(), Some(Behavior::Rotate));
    assert_eq!(c.machine().pending().count(), 0);

    assert_eq!(advance_and_tick(&mut c, 4.0), Some(Behavior::MoveForward));
}

#[test]
fn collisions_delivered_through_the_queue_apply_before_the_update() {
    let mut c = controller();
    advance_and_tick(&mut c, 1.0);
    take_commands(&mut c);

    let mut inbox = CollisionQueue::new();
    inbox.push(CollisionEvent::Wall);
    inbox.push(CollisionEvent::Agent(2));

    assert_eq!(c.tick_with(&mut inbox).unwrap(), None);
    assert!(inbox.is_empty());
    // The agent hit overrides the idle forced by the wall; the queued
    // back-off and turn still follow.
    assert_eq!(c.current(), Some(Behavior::Rotate));
    assert_eq!(
        c.machine().pending().collect::<Vec<_>>(),
        vec![Behavior::MoveBackward, Behavior::Rotate]
    );
    // Rotation holds the body still and turns on the same tick's update.
    let commands = take_commands(&mut c);
    assert_eq!(commands[commands.len() - 2], Command::Stop);
    assert!(matches!(commands.last(), Some(Command::Rotate(s)) if s.abs() == 1.0));
}

#[test]
fn inactive_agent_skips_ticks_and_collisions() {
    let mut c = controller();
    c.set_active(false);
    assert!(!c.is_active());
    assert_eq!(take_commands(&mut c), vec![Command::Stop]);

    c.handle_collision(CollisionEvent::Wall).unwrap();
    assert_eq!(advance_and_tick(&mut c, 10.0), None);
    assert_eq!(c.current(), Some(Behavior::Idle));
    assert_eq!(c.machine().pending().count(), 0);

    c.set_active(true);
    assert_eq!(c.tick().unwrap(), Some(Behavior::MoveForward));
}

#[test]
fn shutdown_stops_the_active_behavior_for_good() {
    let mut c = controller();
    advance_and_tick(&mut c, 1.0);
    take_commands(&mut c);

    c.shutdown();
    assert!(c.is_shut_down());
    assert_eq!(c.current(), None);
    assert_eq!(take_commands(&mut c), vec![Command::Move(Vec3::ZERO)]);

    c.handle_collision(CollisionEvent::Wall).unwrap();
    assert_eq!(advance_and_tick(&mut c, 10.0), None);
    assert_eq!(c.current(), None);
    c.shutdown();
    assert!(take_commands(&mut c).is_empty());
}

#[test]
fn malformed_durations_fail_construction() {
    let mut bad = config();
    bad.durations.backward_move = DurationRange::new(0.75, 0.5);
    let host = AgentHost::new(RecordingMotion::default(), ManualClock::new(), SplitMix64::new(5));

    let err = AgentController::<Host>::new(1, host, &bad).err().unwrap();
    assert_eq!(
        err,
        AgentError::InvalidDuration {
            behavior: "move_backward",
            source: DurationError::Inverted { min: 0.75, max: 0.5 },
        }
    );
}

#[test]
fn restart_drops_overrides_and_resumes_from_idle() {
    let mut c = controller();
    advance_and_tick(&mut c, 1.0);
    c.handle_collision(CollisionEvent::Wall).unwrap();
    c.set_active(false);
    take_commands(&mut c);

    c.restart();
    assert!(c.is_active());
    assert_eq!(c.current(), Some(Behavior::Idle));
    assert_eq!(c.machine().pending().count(), 0);
    assert_eq!(c.machine().cursor(), 0);
    // The forced idle is stopped; the fresh idle is not started.
    assert!(take_commands(&mut c).is_empty());

    // Idle keeps the window from the wall hit until it runs out.
    assert_eq!(c.tick().unwrap(), None);
    assert_eq!(advance_and_tick(&mut c, 1.0), Some(Behavior::MoveForward));
}

#[test]
fn restart_after_shutdown_is_ignored() {
    let mut c = controller();
    c.shutdown();
    c.restart();

    assert!(!c.is_active());
    assert_eq!(c.current(), None);
}
