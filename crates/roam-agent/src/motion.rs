use crate::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Effect sink through which behaviors steer their entity.
///
/// Commands are fire-and-forget; the host applies them to its body
/// (velocity, orientation) however it integrates physics.
pub trait MotionPort {
    /// Set the linear velocity along `direction`, scaled by the body's speed.
    fn move_in(&mut self, direction: Vec3);

    /// Turn by `signed_amount` units this tick (scaled by the body's rotation speed).
    fn rotate(&mut self, signed_amount: f32);

    /// Halt linear motion.
    fn stop(&mut self);

    /// Current facing of the entity.
    fn forward(&self) -> Vec3;
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BodyConfig {
    /// Units per second at full throttle.
    pub move_speed: f32,
    /// Degrees of yaw per unit of `rotate` input.
    pub rotation_speed: f32,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            move_speed: 8.0,
            rotation_speed: 1.5,
        }
    }
}

/// Reference body: velocity-driven translation and instant yaw changes.
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicBody {
    config: BodyConfig,
    position: Vec3,
    velocity: Vec3,
    yaw_degrees: f32,
}

impl KinematicBody {
    pub fn new(config: BodyConfig, position: Vec3, yaw_degrees: f32) -> Self {
        Self {
            config,
            position,
            velocity: Vec3::ZERO,
            yaw_degrees: yaw_degrees.rem_euclid(360.0),
        }
    }

    pub fn config(&self) -> BodyConfig {
        self.config
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn yaw_degrees(&self) -> f32 {
        self.yaw_degrees
    }

    /// Advance the position by the current velocity.
    pub fn integrate(&mut self, dt_seconds: f32) {
        self.position += self.velocity * dt_seconds;
    }
}

impl MotionPort for KinematicBody {
    fn move_in(&mut self, direction: Vec3) {
        self.velocity = direction * self.config.move_speed;
    }

    fn rotate(&mut self, signed_amount: f32) {
        self.yaw_degrees =
            (self.yaw_degrees + signed_amount * self.config.rotation_speed).rem_euclid(360.0);
    }

    fn stop(&mut self) {
        self.velocity = Vec3::ZERO;
    }

    fn forward(&self) -> Vec3 {
        Vec3::from_yaw_degrees(self.yaw_degrees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_scales_direction_by_speed_and_integrates() {
        let mut body = KinematicBody::new(BodyConfig::default(), Vec3::ZERO, 0.0);
        body.move_in(Vec3::FORWARD);
        assert_eq!(body.velocity(), Vec3::new(0.0, 0.0, 8.0));

        body.integrate(0.5);
        assert!(body.position().approx_eq(Vec3::new(0.0, 0.0, 4.0), 1e-6));

        body.stop();
        body.integrate(1.0);
        assert!(body.position().approx_eq(Vec3::new(0.0, 0.0, 4.0), 1e-6));
    }

    #[test]
    fn rotate_wraps_yaw() {
        let mut body = KinematicBody::new(BodyConfig::default(), Vec3::ZERO, 359.0);
        body.rotate(2.0);
        assert!((body.yaw_degrees() - 2.0).abs() < 1e-4);
        body.rotate(-2.0);
        assert!((body.yaw_degrees() - 359.0).abs() < 1e-4);
    }
}
