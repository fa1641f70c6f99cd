use crate::core::clip_to_screen;
use crate::core::frame_buffer::{Color, FrameBuffer};
use log::error;
use nalgebra::Vector4;

/// 光栅化一组线段
///
/// `points`按起点、终点成对排列，每对对应`colors`中的一个颜色。
/// 对每条线段：两端点执行齐次除法并映射到屏幕空间，
/// 沿主轴用整数Bresenham步进，NDC深度随步进参数t在两端点间线性插值。
/// 只有位于视口内且深度在[-1,1]内的像素才会写入。
///
/// 深度测试关闭时按输入顺序无条件覆盖（后写者胜），且不更新深度缓冲；
/// 开启时仅当插值深度严格小于缓冲中的当前值才写入颜色并更新深度
/// （近者胜，相等时保留先写入者）。
///
/// 输入形状不满足约定（点数为奇数、颜色数不匹配）时记录日志并
/// 放弃本次绘制调用，不会使帧循环崩溃。
pub fn rasterize_lines(
    points: &[Vector4<f32>],
    colors: &[Color],
    frame_buffer: &mut FrameBuffer,
    use_zbuffer: bool,
) {
    let width = frame_buffer.width;
    let height = frame_buffer.height;
    if width == 0 || height == 0 {
        return;
    }

    if points.len() % 2 != 0 {
        error!("线段光栅化被拒绝: 点数 {} 不是偶数", points.len());
        return;
    }
    if colors.len() * 2 != points.len() {
        error!(
            "线段光栅化被拒绝: {} 条线段但提供了 {} 个颜色",
            points.len() / 2,
            colors.len()
        );
        return;
    }

    for (segment, color) in points.chunks_exact(2).zip(colors) {
        let (p0, z0) = clip_to_screen(&segment[0], width, height);
        let (p1, z1) = clip_to_screen(&segment[1], width, height);

        let mut x0 = p0.x.round() as i32;
        let mut y0 = p0.y.round() as i32;
        let x1 = p1.x.round() as i32;
        let y1 = p1.y.round() as i32;

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx - dy;

        // 零长度线段退化为单像素写入（steps == 0时t恒为0）
        let steps = dx.max(dy);
        let mut step = 0;

        loop {
            let t = if steps == 0 {
                0.0
            } else {
                step as f32 / steps as f32
            };
            let z = (1.0 - t) * z0 + t * z1;

            if x0 >= 0
                && x0 < width as i32
                && y0 >= 0
                && y0 < height as i32
                && (-1.0..=1.0).contains(&z)
            {
                let idx = frame_buffer.pixel_index(x0 as usize, y0 as usize);
                if !use_zbuffer {
                    frame_buffer.color_buffer[idx] = *color;
                } else if z < frame_buffer.depth_buffer[idx] {
                    frame_buffer.depth_buffer[idx] = z;
                    frame_buffer.color_buffer[idx] = *color;
                }
            }

            if x0 == x1 && y0 == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x0 += sx;
            }
            if e2 < dx {
                err += dx;
                y0 += sy;
            }

            step += 1;
        }
    }
}
