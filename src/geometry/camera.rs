use crate::geometry::transform::TransformFactory;
use nalgebra::{Matrix4, Point3, Vector3};

/// 透视相机，负责管理视角与投影变换
///
/// 三个矩阵在参数变化时一并重算并缓存，
/// 渲染时直接取`view_projection_matrix`做世界→裁剪空间变换。
#[derive(Debug, Clone)]
pub struct Camera {
    /// 相机位置（眼睛位置）
    pub position: Point3<f32>,
    /// 相机观察点（轨道交互的旋转中心）
    pub target: Point3<f32>,
    /// 相机上方向
    pub up: Vector3<f32>,
    /// 垂直视场角（弧度）
    pub fov_y: f32,
    /// 宽高比（视口宽度/高度）
    pub aspect_ratio: f32,
    /// 近裁剪平面距离
    pub near: f32,
    /// 远裁剪平面距离
    pub far: f32,
    /// 视图矩阵（世界坐标 -> 相机坐标）
    pub view_matrix: Matrix4<f32>,
    /// 投影矩阵（相机坐标 -> 裁剪坐标）
    pub projection_matrix: Matrix4<f32>,
    /// 视图-投影组合矩阵（世界坐标 -> 裁剪坐标）
    pub view_projection_matrix: Matrix4<f32>,
}

impl Camera {
    pub fn new_perspective(
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        fov_y_degrees: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let mut camera = Camera {
            position,
            target,
            up: up.normalize(),
            fov_y: fov_y_degrees.to_radians(),
            aspect_ratio,
            near,
            far,
            view_matrix: Matrix4::identity(),
            projection_matrix: Matrix4::identity(),
            view_projection_matrix: Matrix4::identity(),
        };
        camera.update_matrices();
        camera
    }

    /// 重新计算并缓存全部矩阵
    pub fn update_matrices(&mut self) {
        self.view_matrix = TransformFactory::view(&self.position, &self.target, &self.up);
        self.projection_matrix =
            TransformFactory::perspective(self.aspect_ratio, self.fov_y, self.near, self.far);
        self.view_projection_matrix = self.projection_matrix * self.view_matrix;
    }

    /// 窗口尺寸变化时更新宽高比
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        if aspect_ratio > 0.0 && (aspect_ratio - self.aspect_ratio).abs() > f32::EPSILON {
            self.aspect_ratio = aspect_ratio;
            self.update_matrices();
        }
    }

    /// 轨道旋转：位置绕观察点按球面坐标旋转（转盘交互）
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        let offset = self.position - self.target;
        let radius = offset.magnitude();
        if radius < 1e-6 {
            return;
        }

        let mut yaw = offset.z.atan2(offset.x);
        let mut pitch = (offset.y / radius).asin();

        yaw += delta_yaw;
        // 俯仰角留出余量，避免与上方向共线
        pitch = (pitch + delta_pitch).clamp(-1.55, 1.55);

        self.position = self.target
            + Vector3::new(
                radius * pitch.cos() * yaw.cos(),
                radius * pitch.sin(),
                radius * pitch.cos() * yaw.sin(),
            );
        self.update_matrices();
    }

    /// 推拉：沿视线方向移动相机，保持最小距离
    pub fn dolly(&mut self, delta: f32) {
        let offset = self.position - self.target;
        let distance = offset.magnitude();
        let new_distance = (distance - delta).max(0.1);
        self.position = self.target + offset / distance * new_distance;
        self.update_matrices();
    }

    /// 平移：位置与观察点沿屏幕平面一起移动
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let forward = (self.target - self.position).normalize();
        let right = forward.cross(&self.up).normalize();
        let local_up = right.cross(&forward);

        let translation = right * dx + local_up * dy;
        self.position += translation;
        self.target += translation;
        self.update_matrices();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_camera() -> Camera {
        Camera::new_perspective(
            Point3::new(0.0, 0.0, 3.0),
            Point3::origin(),
            Vector3::y(),
            45.0,
            1.0,
            1.0,
            4.5,
        )
    }

    #[test]
    fn orbit_preserves_distance_to_target() {
        let mut camera = test_camera();
        camera.orbit(0.5, 0.3);
        let distance = (camera.position - camera.target).magnitude();
        assert!((distance - 3.0).abs() < 1e-4);
    }

    #[test]
    fn dolly_clamps_minimum_distance() {
        let mut camera = test_camera();
        camera.dolly(10.0);
        let distance = (camera.position - camera.target).magnitude();
        assert!((distance - 0.1).abs() < 1e-5);
    }

    #[test]
    fn pan_moves_position_and_target_together() {
        let mut camera = test_camera();
        let before = camera.target - camera.position;
        camera.pan(0.5, -0.2);
        let after = camera.target - camera.position;
        assert!((before - after).magnitude() < 1e-5);
    }

    #[test]
    fn aspect_ratio_change_updates_projection() {
        let mut camera = test_camera();
        let old_projection = camera.projection_matrix;
        camera.set_aspect_ratio(2.0);
        assert_ne!(camera.projection_matrix, old_projection);
    }
}
