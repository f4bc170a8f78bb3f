use glam::{Mat4, Vec3};

/// Fixed point every camera move re-aims at.
pub const LOOK_TARGET: Vec3 = Vec3::new(0.0, 1.0, 0.0);

pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            eye: Vec3::new(5.0, 3.0, 5.0),
            target: LOOK_TARGET,
            up: Vec3::Y,
            fov_y: 75f32.to_radians(),
            aspect: width as f32 / height as f32,
            z_near: 0.1,
            z_far: 1000.0,
        }
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn view_proj(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        let proj = Mat4::perspective_rh(self.fov_y, self.aspect, self.z_near, self.z_far);
        proj * view
    }

    /// Ray from the eye through a viewport pixel (origin top-left).
    ///
    /// The pixel is normalized to [-1, 1] device coordinates with the
    /// vertical axis flipped, then unprojected through the inverse
    /// view-projection matrix. Pixels outside the viewport still produce
    /// a valid ray; it just points past the scene.
    pub fn picking_ray(&self, px: f32, py: f32, width: f32, height: f32) -> Ray {
        let ndc_x = (px / width) * 2.0 - 1.0;
        let ndc_y = -(py / height) * 2.0 + 1.0;
        let inv = self.view_proj().inverse();
        let far = inv.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
        Ray {
            origin: self.eye,
            dir: (far - self.eye).normalize(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ray_points_at_target() {
        let mut cam = Camera::new(800, 600);
        cam.eye = Vec3::new(0.0, 2.0, 5.0);
        cam.look_at(Vec3::new(0.0, 1.0, 0.0));

        let ray = cam.picking_ray(400.0, 300.0, 800.0, 600.0);
        let expected = (cam.target - cam.eye).normalize();
        assert!(
            (ray.dir - expected).length() < 1e-4,
            "center pixel should aim at the look target, got {:?}",
            ray.dir
        );
        assert_eq!(ray.origin, cam.eye);
    }

    #[test]
    fn test_vertical_axis_is_flipped() {
        let mut cam = Camera::new(400, 400);
        cam.eye = Vec3::new(0.0, 0.0, 5.0);
        cam.look_at(Vec3::ZERO);

        let top = cam.picking_ray(200.0, 0.0, 400.0, 400.0);
        let bottom = cam.picking_ray(200.0, 400.0, 400.0, 400.0);
        assert!(top.dir.y > 0.0, "pixel row 0 is the top of the screen");
        assert!(bottom.dir.y < 0.0);
    }

    #[test]
    fn test_out_of_viewport_pixel_still_builds_a_ray() {
        let cam = Camera::new(400, 400);
        let ray = cam.picking_ray(-50.0, -50.0, 400.0, 400.0);
        assert!(ray.dir.is_finite());
        assert!((ray.dir.length() - 1.0).abs() < 1e-5);
    }
}
