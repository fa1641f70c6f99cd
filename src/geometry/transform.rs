use nalgebra::{Matrix4, Point3, Unit, Vector3, Vector4};

/// 变换矩阵工厂，提供创建各种变换矩阵的静态方法
pub struct TransformFactory;

impl TransformFactory {
    /// 创建视图矩阵 (lookAt)
    pub fn view(eye: &Point3<f32>, target: &Point3<f32>, up: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::look_at_rh(eye, target, &Unit::new_normalize(*up))
    }

    /// 创建透视投影矩阵
    pub fn perspective(aspect_ratio: f32, fov_y_rad: f32, near: f32, far: f32) -> Matrix4<f32> {
        Matrix4::new_perspective(aspect_ratio, fov_y_rad, near, far)
    }
}

/// 将世界坐标点批量变换为裁剪空间坐标（齐次，未除w），写入复用的输出缓冲
///
/// 齐次除法留给光栅化核心在屏幕映射时执行，此处绝不除w。
pub fn world_to_clip_into(
    world_points: &[Point3<f32>],
    view_projection_matrix: &Matrix4<f32>,
    out: &mut Vec<Vector4<f32>>,
) {
    out.clear();
    out.extend(
        world_points
            .iter()
            .map(|point| view_projection_matrix * point.to_homogeneous()),
    );
}
