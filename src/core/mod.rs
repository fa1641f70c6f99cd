//! # 软件光栅化核心模块
//!
//! 将已投影到裁剪空间的几何体逐像素扫描转换到帧缓冲区

pub mod frame_buffer;
pub mod line_rasterizer;
pub mod palette;
pub mod renderer;
pub mod triangle_rasterizer;

use nalgebra::{Point2, Vector4};

/// 浮点比较用的小量，用于退化三角形判定
pub const EPSILON: f32 = 1e-6;

/// 齐次除法 + NDC到像素坐标的映射
///
/// 输入为未除w的裁剪空间坐标，齐次除法在此处执行且仅执行一次。
/// x、y从[-1,1]映射到[0,width-1]×[0,height-1]，
/// 返回屏幕坐标和除w后的NDC深度（可见范围[-1,1]）。
#[inline]
pub fn clip_to_screen(p: &Vector4<f32>, width: usize, height: usize) -> (Point2<f32>, f32) {
    let inv_w = 1.0 / p.w;
    let x = (p.x * inv_w + 1.0) * 0.5 * (width as f32 - 1.0);
    let y = (p.y * inv_w + 1.0) * 0.5 * (height as f32 - 1.0);
    (Point2::new(x, y), p.z * inv_w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_to_screen_maps_ndc_corners() {
        // NDC (-1,-1) -> 像素(0,0)，(1,1) -> (width-1, height-1)
        let (p, z) = clip_to_screen(&Vector4::new(-1.0, -1.0, 0.0, 1.0), 64, 48);
        assert_eq!((p.x, p.y, z), (0.0, 0.0, 0.0));

        let (p, _) = clip_to_screen(&Vector4::new(1.0, 1.0, 0.5, 1.0), 64, 48);
        assert_eq!((p.x, p.y), (63.0, 47.0));
    }

    #[test]
    fn clip_to_screen_divides_by_w_once() {
        // w=2时所有分量减半后再映射
        let (p, z) = clip_to_screen(&Vector4::new(2.0, 0.0, 1.0, 2.0), 101, 101);
        assert_eq!(p.x, 100.0);
        assert_eq!(p.y, 50.0);
        assert_eq!(z, 0.5);
    }
}
