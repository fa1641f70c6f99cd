use crate::core::frame_buffer::Color;
use nalgebra::{Point3, Vector3};

/// 单位坐标轴线段：三条从原点出发的线段，起点、终点成对排列，
/// 颜色依次为红(X)、绿(Y)、蓝(Z)
pub fn axes_lines() -> (Vec<Point3<f32>>, Vec<Color>) {
    let points = vec![
        Point3::origin(),
        Point3::new(1.0, 0.0, 0.0),
        Point3::origin(),
        Point3::new(0.0, 1.0, 0.0),
        Point3::origin(),
        Point3::new(0.0, 0.0, 1.0),
    ];
    let colors = vec![
        Color::new(1.0, 0.0, 0.0),
        Color::new(0.0, 1.0, 0.0),
        Color::new(0.0, 0.0, 1.0),
    ];
    (points, colors)
}

/// 生成以原点为中心的立方体网格（8顶点，12三角形）
pub fn create_box_geometry(half_extent: f32) -> (Vec<Point3<f32>>, Vec<[u32; 3]>) {
    let h = half_extent;
    let vertices = vec![
        Point3::new(-h, -h, -h),
        Point3::new(h, -h, -h),
        Point3::new(h, h, -h),
        Point3::new(-h, h, -h),
        Point3::new(-h, -h, h),
        Point3::new(h, -h, h),
        Point3::new(h, h, h),
        Point3::new(-h, h, h),
    ];

    // 每面两个三角形，从外侧看逆时针绕序
    let indices = vec![
        [0, 2, 1],
        [0, 3, 2], // 后 (z = -h)
        [4, 5, 6],
        [4, 6, 7], // 前 (z = +h)
        [0, 4, 7],
        [0, 7, 3], // 左 (x = -h)
        [1, 2, 6],
        [1, 6, 5], // 右 (x = +h)
        [0, 1, 5],
        [0, 5, 4], // 下 (y = -h)
        [3, 7, 6],
        [3, 6, 2], // 上 (y = +h)
    ];

    (vertices, indices)
}

/// 生成以原点为中心的UV球网格
///
/// `rings`为纬向分段数，`segments`为经向分段数；
/// 极点处的退化三角形由光栅化器的零面积检查跳过。
pub fn create_sphere_geometry(
    radius: f32,
    rings: u32,
    segments: u32,
) -> (Vec<Point3<f32>>, Vec<[u32; 3]>) {
    let mut vertices = Vec::with_capacity(((rings + 1) * (segments + 1)) as usize);
    let mut indices = Vec::with_capacity((rings * segments * 2) as usize);

    for ring in 0..=rings {
        let phi = std::f32::consts::PI * ring as f32 / rings as f32;
        for segment in 0..=segments {
            let theta = std::f32::consts::TAU * segment as f32 / segments as f32;
            vertices.push(Point3::new(
                radius * phi.sin() * theta.cos(),
                radius * phi.cos(),
                radius * phi.sin() * theta.sin(),
            ));
        }
    }

    let stride = segments + 1;
    for ring in 0..rings {
        for segment in 0..segments {
            let a = ring * stride + segment;
            let b = a + stride;
            indices.push([a, b, a + 1]);
            indices.push([b, b + 1, a + 1]);
        }
    }

    (vertices, indices)
}

/// 整体平移一组顶点（演示场景中球体沿x轴偏移+1）
pub fn translate_vertices(vertices: &mut [Point3<f32>], offset: &Vector3<f32>) {
    for vertex in vertices.iter_mut() {
        *vertex += offset;
    }
}
