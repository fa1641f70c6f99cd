use crate::core::frame_buffer::{Color, FrameBuffer};
use crate::core::palette::TrianglePalette;
use crate::core::{EPSILON, clip_to_screen};
use crate::io::render_settings::RenderSettings;
use log::error;
use nalgebra::{Vector2, Vector4};

/// 光栅化一个索引三角形网格
///
/// `positions`为未除w的裁剪空间顶点，`triangles`为顶点下标三元组。
/// 每个三角形依次经过：视点后剔除 → 正面剔除 → 齐次除法与屏幕映射 →
/// 取色 → 包围盒扫描 → 重心坐标覆盖判定 → 深度插值与深度测试。
/// 退化、越界深度与被剔除的三角形一律静默跳过，不视为错误。
///
/// 深度可视化模式（`show_zbuffer`）下三角形填充只写深度不写颜色，
/// 整帧的颜色由帧驱动在所有绘制调用之后统一从深度缓冲解算
/// （见[`FrameBuffer::resolve_depth_view`]）。
pub fn rasterize_mesh(
    positions: &[Vector4<f32>],
    triangles: &[[u32; 3]],
    base_color: &Color,
    palette: &TrianglePalette,
    frame_buffer: &mut FrameBuffer,
    settings: &RenderSettings,
) {
    let width = frame_buffer.width;
    let height = frame_buffer.height;
    if width == 0 || height == 0 {
        return;
    }

    for (tri_index, tri) in triangles.iter().enumerate() {
        let (Some(p0), Some(p1), Some(p2)) = (
            positions.get(tri[0] as usize),
            positions.get(tri[1] as usize),
            positions.get(tri[2] as usize),
        ) else {
            error!("三角形 {tri_index} 的顶点索引越界，已跳过");
            continue;
        };

        // 视点后剔除：任一顶点w<0时整个三角形丢弃，
        // 避免齐次除法对相机后方点产生的环绕伪影
        if settings.cull_behind_camera && (p0.w < 0.0 || p1.w < 0.0 || p2.w < 0.0) {
            continue;
        }

        // 正面剔除：对未除w的裁剪空间边向量取叉积，
        // z分量为正视作朝向相机（教学用的反转约定）。
        if settings.cull_front_faces {
            let edge1 = (p1 - p0).xyz();
            let edge2 = (p2 - p0).xyz();
            let normal = edge1.cross(&edge2);
            if normal.z > 0.0 {
                continue;
            }
        }

        let tri_color = if settings.use_random_triangle_colors {
            palette.color_for(tri_index)
        } else {
            *base_color
        };

        let (s0, z0) = clip_to_screen(p0, width, height);
        let (s1, z1) = clip_to_screen(p1, width, height);
        let (s2, z2) = clip_to_screen(p2, width, height);

        // 整数像素包围盒，夹取到渲染目标内
        let xmin = (s0.x.min(s1.x).min(s2.x).floor() as i32).max(0);
        let xmax = (s0.x.max(s1.x).max(s2.x).ceil() as i32).min(width as i32 - 1);
        let ymin = (s0.y.min(s1.y).min(s2.y).floor() as i32).max(0);
        let ymax = (s0.y.max(s1.y).max(s2.y).ceil() as i32).min(height as i32 - 1);

        // 边函数分母（两条边张成的平行四边形有向面积）
        let v0 = s1 - s0;
        let v1 = s2 - s0;
        let denom = v0.x * v1.y - v1.x * v0.y;
        if denom.abs() < EPSILON {
            continue; // 退化三角形，无面积可填充
        }
        let inv_denom = 1.0 / denom;

        for y in ymin..=ymax {
            for x in xmin..=xmax {
                // 在像素中心采样
                let v2 = Vector2::new(x as f32 + 0.5 - s0.x, y as f32 + 0.5 - s0.y);

                let beta = (v2.x * v1.y - v1.x * v2.y) * inv_denom;
                let gamma = (v0.x * v2.y - v2.x * v0.y) * inv_denom;
                let alpha = 1.0 - beta - gamma;

                // 覆盖判定：三个重心坐标均非负。
                // 不做top-left规则处理，共享边可能重写或留缝。
                if alpha < 0.0 || beta < 0.0 || gamma < 0.0 {
                    continue;
                }

                // 屏幕空间线性深度插值（不做透视校正）
                let z = alpha * z0 + beta * z1 + gamma * z2;
                if !(-1.0..=1.0).contains(&z) {
                    continue; // 深度超出近/远范围
                }

                let idx = frame_buffer.pixel_index(x as usize, y as usize);
                if !settings.use_zbuffer || z < frame_buffer.depth_buffer[idx] {
                    // 深度测试关闭时也记录深度，供可视化后处理使用
                    frame_buffer.depth_buffer[idx] = z;
                    if !settings.show_zbuffer {
                        frame_buffer.color_buffer[idx] = tri_color;
                    }
                }
            }
        }
    }
}
