use crate::coords::Vec2;
use crate::projection::Projection;

/// Rate at which the camera closes the gap to its target, per second.
const FOLLOW_RATE: f32 = 2.0;

/// 2D camera that eases toward a target position and zoom.
///
/// Each [`Camera::follow`] step moves by `(target - current) * FOLLOW_RATE * dt`,
/// so the remaining distance decays exponentially and large jumps settle
/// smoothly over a few frames.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub pos: Vec2,
    pub velocity: Vec2,
    pub scale: f32,
    pub scale_velocity: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    pub const fn new() -> Self {
        Self {
            pos: Vec2::zero(),
            velocity: Vec2::zero(),
            scale: 1.0,
            scale_velocity: 0.0,
        }
    }

    /// Camera resting at `pos` with zoom `scale`.
    pub const fn at(pos: Vec2, scale: f32) -> Self {
        Self { pos, scale, ..Self::new() }
    }

    /// Advances the camera by `dt` seconds toward `target` / `target_scale`.
    pub fn follow(&mut self, target: Vec2, target_scale: f32, dt: f32) {
        self.velocity = (target - self.pos) * FOLLOW_RATE;
        self.scale_velocity = (target_scale - self.scale) * FOLLOW_RATE;

        self.pos = self.pos + self.velocity * dt;
        self.scale += self.scale_velocity * dt;
    }

    /// Projection for geometry drawn through this camera.
    #[inline]
    pub fn projection(&self) -> Projection {
        Projection::camera(self.pos, self.scale)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn new_camera_is_identity() {
        let cam = Camera::new();
        assert_eq!(cam.projection(), Projection::camera(Vec2::zero(), 1.0));
    }

    #[test]
    fn follow_step_matches_rate() {
        let mut cam = Camera::new();
        cam.follow(Vec2::new(60.0, -30.0), 3.0, DT);
        assert_eq!(cam.velocity, Vec2::new(120.0, -60.0));
        assert_relative_eq!(cam.pos.x, 2.0, epsilon = 1e-5);
        assert_relative_eq!(cam.pos.y, -1.0, epsilon = 1e-5);
        assert_relative_eq!(cam.scale, 1.0 + 4.0 * DT, epsilon = 1e-6);
    }

    #[test]
    fn follow_converges_without_overshoot() {
        let target = Vec2::new(500.0, 250.0);
        let mut cam = Camera::new();
        let mut last_gap = f32::MAX;
        for _ in 0..600 {
            cam.follow(target, 2.0, DT);
            let gap = (target - cam.pos).x;
            assert!(gap >= 0.0 && gap <= last_gap);
            last_gap = gap;
        }
        assert_relative_eq!(cam.pos.x, target.x, epsilon = 1e-2);
        assert_relative_eq!(cam.pos.y, target.y, epsilon = 1e-2);
        assert_relative_eq!(cam.scale, 2.0, epsilon = 1e-4);
    }

    #[test]
    fn resting_camera_stays_put() {
        let mut cam = Camera::at(Vec2::new(10.0, 20.0), 1.5);
        cam.follow(Vec2::new(10.0, 20.0), 1.5, DT);
        assert_eq!(cam.pos, Vec2::new(10.0, 20.0));
        assert_eq!(cam.velocity, Vec2::zero());
        assert_eq!(cam.scale, 1.5);
    }
}
