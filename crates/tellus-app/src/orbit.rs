//! Orbit camera controller: drag to rotate, scroll to zoom, optional
//! carousel auto-rotation around the vertical axis.

use glam::Vec3;
use tellus_render::Camera;

/// Drag sensitivity: a full window-width drag sweeps 5 radians.
const DRAG_SENSITIVITY: f32 = 5.0;

/// Auto-rotation speed in radians per second.
const AUTO_ROTATE_SPEED: f32 = 0.025 / 0.030;

/// Closest allowed camera distance.
const MIN_DISTANCE: f32 = 0.01;

/// Half-depth of the clip volume bracketing the model around the orbit
/// distance.
const CLIP_HALF_DEPTH: f32 = 1.74;

/// Orbit state: spherical coordinates around the origin plus an
/// auto-rotation angle folded into the yaw.
pub struct OrbitController {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub auto_rotate: bool,
    auto_angle: f32,
}

impl OrbitController {
    pub fn new(distance: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance,
            auto_rotate: false,
            auto_angle: 0.0,
        }
    }

    /// Apply a mouse drag delta in physical pixels.
    pub fn rotate(&mut self, dx: f64, dy: f64, width: u32, height: u32) {
        self.yaw += dx as f32 / width.max(1) as f32 * DRAG_SENSITIVITY;
        self.pitch += dy as f32 / height.max(1) as f32 * DRAG_SENSITIVITY;
        // Keep the pitch off the poles so the view basis stays well-defined.
        let limit = std::f32::consts::FRAC_PI_2 - 1e-3;
        self.pitch = self.pitch.clamp(-limit, limit);
    }

    /// Apply a scroll delta in pixels. Positive delta zooms out.
    pub fn zoom(&mut self, delta: f32, height: u32) {
        let factor = 6.0 * delta / height.max(1) as f32 + 1.0;
        self.distance = (self.distance * factor).max(MIN_DISTANCE);
    }

    /// Advance the auto-rotation if enabled, wrapping at a full turn.
    pub fn tick(&mut self, dt: f32) {
        if self.auto_rotate {
            self.auto_angle += AUTO_ROTATE_SPEED * dt;
            if self.auto_angle > std::f32::consts::TAU {
                self.auto_angle -= std::f32::consts::TAU;
            }
        }
    }

    /// Current camera position on the orbit sphere.
    pub fn eye(&self) -> Vec3 {
        let yaw = self.yaw + self.auto_angle;
        Vec3::new(
            self.pitch.cos() * yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * yaw.cos(),
        ) * self.distance
    }

    /// Write position, orientation, and clip planes into the camera.
    pub fn apply_to(&self, camera: &mut Camera) {
        camera.position = self.eye();
        camera.look_at(Vec3::ZERO);
        camera.near = (self.distance - CLIP_HALF_DEPTH).max(0.001);
        camera.far = self.distance + CLIP_HALF_DEPTH;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_width_drag_is_five_radians() {
        let mut orbit = OrbitController::new(10.0);
        orbit.rotate(800.0, 0.0, 800, 600);
        assert!((orbit.yaw - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_pitch_clamped_below_pole() {
        let mut orbit = OrbitController::new(10.0);
        orbit.rotate(0.0, 100_000.0, 800, 600);
        assert!(orbit.pitch < std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn test_zoom_floor() {
        let mut orbit = OrbitController::new(10.0);
        orbit.zoom(-1e9, 600);
        assert_eq!(orbit.distance, MIN_DISTANCE);
    }

    #[test]
    fn test_zoom_out_increases_distance() {
        let mut orbit = OrbitController::new(10.0);
        orbit.zoom(100.0, 600);
        assert!(orbit.distance > 10.0);
    }

    #[test]
    fn test_auto_rotation_wraps() {
        let mut orbit = OrbitController::new(10.0);
        orbit.auto_rotate = true;
        // 10 seconds at ~0.83 rad/s passes 2π once.
        for _ in 0..1000 {
            orbit.tick(0.01);
        }
        assert!(orbit.auto_angle >= 0.0);
        assert!(orbit.auto_angle < std::f32::consts::TAU);
    }

    #[test]
    fn test_auto_rotation_noop_when_disabled() {
        let mut orbit = OrbitController::new(10.0);
        orbit.tick(1.0);
        assert_eq!(orbit.auto_angle, 0.0);
    }

    #[test]
    fn test_eye_distance_matches() {
        let mut orbit = OrbitController::new(10.0);
        orbit.rotate(120.0, 40.0, 800, 600);
        assert!((orbit.eye().length() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_apply_brackets_clip_planes() {
        let orbit = OrbitController::new(10.0);
        let mut camera = Camera::default();
        orbit.apply_to(&mut camera);
        assert!((camera.near - 8.26).abs() < 1e-4);
        assert!((camera.far - 11.74).abs() < 1e-4);
    }

    #[test]
    fn test_near_plane_has_floor() {
        let mut orbit = OrbitController::new(10.0);
        orbit.zoom(-1e9, 600); // distance collapses to the minimum
        let mut camera = Camera::default();
        orbit.apply_to(&mut camera);
        assert_eq!(camera.near, 0.001);
    }
}
