//! Fixed-step arena simulation hosting one controller per agent.
//!
//! Each step integrates the bodies, respawns destroyed agents whose delay has
//! run out, detects wall and agent contacts (only the tick a contact begins
//! raises an event), then ticks every controller in id order with the events
//! raised for it. Destroyed agents are inactive: they neither move nor touch
//! anything until they respawn.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use roam_agent::{
    AgentController, AgentHost, CollisionEvent, CollisionQueue, KinematicBody, Vec3,
};
use roam_core::{derive_seed, ManualClock, RandomSource, SplitMix64, StateKey};
use serde::Serialize;

use crate::config::{ArenaConfig, SimulationConfig};

const SPAWN_STREAM: u64 = 0;
const BEHAVIOR_STREAM: u64 = 1;

type Host = AgentHost<KinematicBody, ManualClock, SplitMix64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Player,
    Enemy,
}

struct SimAgent {
    team: Team,
    controller: AgentController<Host>,
    inbox: CollisionQueue<u64>,
    spawn: SplitMix64,
    touching_wall: bool,
    respawn_at: Option<f64>,
    wall_hits: u64,
    agent_hits: u64,
    destroyed: u64,
    respawns: u64,
}

impl SimAgent {
    fn is_active(&self) -> bool {
        self.controller.is_active()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentSummary {
    pub id: u64,
    pub team: Team,
    pub active: bool,
    pub behavior: Option<&'static str>,
    pub position: [f32; 3],
    pub yaw_degrees: f32,
    pub activations: u64,
    pub wall_hits: u64,
    pub agent_hits: u64,
    pub destroyed: u64,
    pub respawns: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub ticks: u64,
    pub elapsed_seconds: f64,
    pub agents: Vec<AgentSummary>,
}

pub struct Simulation {
    config: SimulationConfig,
    agents: Vec<SimAgent>,
    contacts: BTreeSet<(u64, u64)>,
    tick: u64,
    now: f64,
}

/// Random point inside the arena, kept one radius away from the walls.
fn spawn_point(arena: ArenaConfig, rng: &mut SplitMix64) -> (Vec3, f32) {
    let span_x = f64::from(arena.half_width - arena.agent_radius);
    let span_z = f64::from(arena.half_depth - arena.agent_radius);
    let position = Vec3::new(
        rng.uniform(-span_x, span_x) as f32,
        0.0,
        rng.uniform(-span_z, span_z) as f32,
    );
    let yaw = rng.uniform(0.0, 360.0) as f32;
    (position, yaw)
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let mut agents = Vec::with_capacity(config.agents);
        for id in 0..config.agents as u64 {
            let team = if (id as usize) < config.players {
                Team::Player
            } else {
                Team::Enemy
            };
            let mut spawn = SplitMix64::new(derive_seed(config.seed, id, SPAWN_STREAM));
            let (position, yaw) = spawn_point(config.arena, &mut spawn);

            let host = AgentHost::new(
                KinematicBody::new(config.body, position, yaw),
                ManualClock::new(),
                SplitMix64::new(derive_seed(config.seed, id, BEHAVIOR_STREAM)),
            );
            let controller = AgentController::new(id, host, &config.behavior)
                .with_context(|| format!("Failed to build agent {id}"))?;

            tracing::debug!(agent = id, ?team, x = position.x, z = position.z, yaw, "agent spawned");
            agents.push(SimAgent {
                team,
                controller,
                inbox: CollisionQueue::new(),
                spawn,
                touching_wall: false,
                respawn_at: None,
                wall_hits: 0,
                agent_hits: 0,
                destroyed: 0,
                respawns: 0,
            });
        }

        Ok(Self {
            config,
            agents,
            contacts: BTreeSet::new(),
            tick: 0,
            now: 0.0,
        })
    }

    pub fn run(&mut self, ticks: u64) -> Result<()> {
        for _ in 0..ticks {
            self.step()?;
        }
        Ok(())
    }

    pub fn step(&mut self) -> Result<()> {
        let dt = self.config.tick_seconds;
        self.tick += 1;
        self.now += dt;

        for agent in &mut self.agents {
            let host = agent.controller.host_mut();
            host.clock.advance_to(self.now);
            host.motion.integrate(dt as f32);
        }

        self.respawn_due();
        self.detect_wall_contacts();
        self.detect_agent_contacts();

        for agent in &mut self.agents {
            let id = agent.controller.agent();
            let next = agent
                .controller
                .tick_with(&mut agent.inbox)
                .with_context(|| format!("Agent {id} failed on tick {}", self.tick))?;
            if let Some(behavior) = next {
                tracing::trace!(agent = id, tick = self.tick, behavior = behavior.name(), "behavior changed");
            }
        }
        Ok(())
    }

    fn respawn_due(&mut self) {
        let arena = self.config.arena;
        for agent in &mut self.agents {
            let Some(at) = agent.respawn_at else {
                continue;
            };
            if self.now < at || agent.controller.is_shut_down() {
                continue;
            }

            let (position, yaw) = spawn_point(arena, &mut agent.spawn);
            let body = &mut agent.controller.host_mut().motion;
            *body = KinematicBody::new(body.config(), position, yaw);
            agent.controller.restart();
            agent.respawn_at = None;
            agent.touching_wall = false;
            agent.respawns += 1;
            tracing::debug!(agent = agent.controller.agent(), tick = self.tick, x = position.x, z = position.z, "agent respawned");
        }
    }

    /// Clamp bodies to the arena; a body that was not already against a wall
    /// raises a wall event.
    fn detect_wall_contacts(&mut self) {
        let arena = self.config.arena;
        let limit_x = arena.half_width - arena.agent_radius;
        let limit_z = arena.half_depth - arena.agent_radius;

        for agent in self.agents.iter_mut().filter(|agent| agent.is_active()) {
            let body = &mut agent.controller.host_mut().motion;
            let p = body.position();
            let clamped = Vec3::new(p.x.clamp(-limit_x, limit_x), p.y, p.z.clamp(-limit_z, limit_z));
            let touching = clamped != p;
            if touching {
                body.set_position(clamped);
                if !agent.touching_wall {
                    agent.inbox.push(CollisionEvent::Wall);
                    agent.wall_hits += 1;
                    tracing::debug!(agent = agent.controller.agent(), tick = self.tick, "wall contact");
                }
            }
            agent.touching_wall = touching;
        }
    }

    /// Pairwise overlap test between active agents; each newly overlapping
    /// pair notifies both agents, and a player touching an enemy is destroyed.
    fn detect_agent_contacts(&mut self) {
        let min_distance = self.config.arena.agent_radius * 2.0;
        let positions: Vec<Option<Vec3>> = self
            .agents
            .iter()
            .map(|agent| agent.is_active().then(|| agent.controller.host().motion.position()))
            .collect();

        let mut touching = BTreeSet::new();
        for (i, a) in positions.iter().enumerate() {
            let Some(a) = a else { continue };
            for (j, b) in positions.iter().enumerate().skip(i + 1) {
                let Some(b) = b else { continue };
                if a.distance(*b) < min_distance {
                    touching.insert((i as u64, j as u64));
                }
            }
        }

        let fresh: Vec<(u64, u64)> = touching.difference(&self.contacts).copied().collect();
        for (a, b) in fresh {
            tracing::debug!(agent = a, other = b, tick = self.tick, "agent contact");
            for (me, other) in [(a, b), (b, a)] {
                let agent = &mut self.agents[me as usize];
                agent.inbox.push(CollisionEvent::Agent(other));
                agent.agent_hits += 1;
            }

            let (team_a, team_b) = (self.agents[a as usize].team, self.agents[b as usize].team);
            if team_a != team_b {
                let victim = if team_a == Team::Player { a } else { b };
                self.destroy(victim);
            }
        }
        self.contacts = touching;
    }

    fn destroy(&mut self, id: u64) {
        let respawn_at = self.now + self.config.respawn_seconds;
        let agent = &mut self.agents[id as usize];
        if !agent.is_active() {
            return;
        }

        agent.controller.set_active(false);
        agent.inbox.clear();
        agent.respawn_at = Some(respawn_at);
        agent.destroyed += 1;
        tracing::info!(agent = id, tick = self.tick, respawn_at, "agent destroyed");
    }

    pub fn summary(&self) -> SimulationSummary {
        let agents = self
            .agents
            .iter()
            .map(|agent| {
                let controller = &agent.controller;
                let body = &controller.host().motion;
                let p = body.position();
                AgentSummary {
                    id: controller.agent(),
                    team: agent.team,
                    active: controller.is_active(),
                    behavior: controller.current().map(StateKey::name),
                    position: [p.x, p.y, p.z],
                    yaw_degrees: body.yaw_degrees(),
                    activations: controller.machine().activations(),
                    wall_hits: agent.wall_hits,
                    agent_hits: agent.agent_hits,
                    destroyed: agent.destroyed,
                    respawns: agent.respawns,
                }
            })
            .collect();

        SimulationSummary {
            ticks: self.tick,
            elapsed_seconds: self.now,
            agents,
        }
    }

    pub fn shutdown(&mut self) {
        for agent in &mut self.agents {
            agent.controller.shutdown();
        }
    }

    /// Summarize the run, then shut every agent down.
    pub fn finish(mut self) -> SimulationSummary {
        let summary = self.summary();
        self.shutdown();
        summary
    }
}
