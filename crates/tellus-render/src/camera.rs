//! Camera system for view and projection matrix generation.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

/// Default vertical field of view: 60 degrees.
pub const DEFAULT_FOV_Y: f32 = std::f32::consts::FRAC_PI_3;

/// A perspective camera that generates view and projection matrices.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    /// Rotation as a unit quaternion.
    pub rotation: Quat,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect_ratio: f32,
    /// Near clip plane distance (always positive).
    pub near: f32,
    /// Far clip plane distance (always positive, > near).
    pub far: f32,
    /// Specular exponent uploaded alongside the camera position.
    pub shininess: f32,
}

impl Camera {
    /// Compute the view matrix (inverse of camera transform).
    pub fn view_matrix(&self) -> Mat4 {
        let rotation_matrix = Mat4::from_quat(self.rotation);
        let translation_matrix = Mat4::from_translation(self.position);
        // View = inverse(Translation * Rotation)
        (translation_matrix * rotation_matrix).inverse()
    }

    /// Compute the projection matrix with reverse-Z.
    pub fn projection_matrix(&self) -> Mat4 {
        // Reverse-Z: near plane maps to z=1, far plane maps to z=0.
        // This is handled by swapping near/far in the projection matrix.
        Mat4::perspective_rh(
            self.fov_y,
            self.aspect_ratio,
            self.far,  // swapped: far as "near" parameter
            self.near, // swapped: near as "far" parameter
        )
    }

    /// Compute the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// The forward direction vector (-Z in camera space).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// The up direction vector (+Y in camera space).
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Orient the camera so it looks at `target` from its current position.
    pub fn look_at(&mut self, target: Vec3) {
        let forward = target - self.position;
        if forward.length_squared() > 0.0 {
            let look = Mat4::look_to_rh(Vec3::ZERO, forward.normalize(), Vec3::Y);
            self.rotation = Quat::from_mat4(&look.inverse());
        }
    }

    /// Update the aspect ratio after a window resize.
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        self.aspect_ratio = width / height.max(1.0);
    }

    /// Convert the camera to a uniform suitable for GPU upload.
    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection_matrix().to_cols_array_2d(),
            camera_pos: [
                self.position.x,
                self.position.y,
                self.position.z,
                self.shininess,
            ],
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            fov_y: DEFAULT_FOV_Y,
            aspect_ratio: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
            shininess: 15.0,
        }
    }
}

/// Camera uniform data: view-projection matrix plus the camera position
/// with the specular exponent packed into the fourth component.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_camera_looks_down_neg_z() {
        let camera = Camera::default();
        let forward = camera.forward();
        assert!((forward.x).abs() < 1e-6);
        assert!((forward.y).abs() < 1e-6);
        assert!((forward.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_default_fov_is_60_degrees() {
        let camera = Camera::default();
        assert!((camera.fov_y - 60f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_set_aspect_ratio() {
        let mut camera = Camera::default();
        camera.set_aspect_ratio(1920.0, 1080.0);
        assert!((camera.aspect_ratio - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_view_matrix_inverse_is_camera_transform() {
        let mut camera = Camera::default();
        camera.position = Vec3::new(3.0, 4.0, 5.0);
        camera.rotation = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);

        let inv_view = camera.view_matrix().inverse();
        // The translation column should reconstruct the camera position.
        let reconstructed = inv_view.col(3).truncate();
        assert!((reconstructed - camera.position).length() < 1e-4);
    }

    #[test]
    fn test_look_at_points_forward_at_target() {
        let mut camera = Camera::default();
        camera.position = Vec3::new(0.0, 0.0, 10.0);
        camera.look_at(Vec3::ZERO);

        let forward = camera.forward();
        assert!((forward - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_look_at_off_axis() {
        let mut camera = Camera::default();
        camera.position = Vec3::new(5.0, 5.0, 5.0);
        camera.look_at(Vec3::ZERO);

        let expected = (Vec3::ZERO - camera.position).normalize();
        assert!((camera.forward() - expected).length() < 1e-5);
    }

    #[test]
    fn test_reverse_z_near_maps_to_one() {
        let camera = Camera {
            position: Vec3::ZERO,
            near: 1.0,
            far: 50.0,
            aspect_ratio: 1.0,
            ..Camera::default()
        };
        let proj = camera.projection_matrix();

        // A point on the near plane should map to NDC depth 1.
        let near_point = proj * glam::Vec4::new(0.0, 0.0, -1.0, 1.0);
        assert!((near_point.z / near_point.w - 1.0).abs() < 1e-4);

        // A point on the far plane should map to NDC depth 0.
        let far_point = proj * glam::Vec4::new(0.0, 0.0, -50.0, 1.0);
        assert!((far_point.z / far_point.w).abs() < 1e-4);
    }

    #[test]
    fn test_camera_uniform_layout() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 80);
        assert_eq!(std::mem::offset_of!(CameraUniform, view_proj), 0);
        assert_eq!(std::mem::offset_of!(CameraUniform, camera_pos), 64);
    }

    #[test]
    fn test_uniform_carries_position_and_shininess() {
        let mut camera = Camera::default();
        camera.position = Vec3::new(1.0, 2.0, 3.0);
        camera.shininess = 25.0;

        let uniform = camera.to_uniform();
        assert_eq!(uniform.camera_pos, [1.0, 2.0, 3.0, 25.0]);
    }
}
