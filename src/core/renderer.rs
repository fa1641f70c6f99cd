use crate::core::frame_buffer::{Color, FrameBuffer};
use crate::core::line_rasterizer::rasterize_lines;
use crate::core::palette::TrianglePalette;
use crate::core::triangle_rasterizer::rasterize_mesh;
use crate::io::render_settings::RenderSettings;
use log::debug;
use nalgebra::Vector4;

/// 帧驱动：持有帧缓冲区并编排每帧的光栅化序列
///
/// 一帧的固定流程为 `begin_frame` → 若干次 `draw_lines` / `draw_mesh` →
/// `end_frame`。绘制调用按调用顺序串行执行，整个序列单线程同步完成，
/// 期间缓冲区由帧驱动独占；序列结束前外部组件不得读取。
pub struct Renderer {
    pub frame_buffer: FrameBuffer,
    pub palette: TrianglePalette,
    /// 每帧清除时写入颜色缓冲的背景色
    pub background: Color,
}

impl Renderer {
    pub fn new(width: usize, height: usize, palette_seed: u64) -> Self {
        Renderer {
            frame_buffer: FrameBuffer::new(width, height),
            palette: TrianglePalette::new(palette_seed),
            background: Color::zeros(),
        }
    }

    /// 开始一帧：必要时重新分配缓冲区，然后整体清除
    ///
    /// 渲染目标任一边为零（如窗口最小化）时干净地跳过整帧，
    /// 返回`false`，调用方不应再发出本帧的绘制调用。
    pub fn begin_frame(&mut self, width: usize, height: usize) -> bool {
        if width == 0 || height == 0 {
            debug!("渲染目标尺寸为零，跳过本帧");
            return false;
        }
        if width != self.frame_buffer.width || height != self.frame_buffer.height {
            debug!(
                "渲染分辨率变化: {}x{} -> {}x{}",
                self.frame_buffer.width, self.frame_buffer.height, width, height
            );
            self.frame_buffer.resize(width, height);
        }
        self.frame_buffer.clear(&self.background);
        true
    }

    /// 光栅化一组线段（坐标轴等）
    pub fn draw_lines(&mut self, points: &[Vector4<f32>], colors: &[Color], settings: &RenderSettings) {
        rasterize_lines(points, colors, &mut self.frame_buffer, settings.use_zbuffer);
    }

    /// 光栅化一个索引三角形网格
    pub fn draw_mesh(
        &mut self,
        positions: &[Vector4<f32>],
        triangles: &[[u32; 3]],
        base_color: &Color,
        settings: &RenderSettings,
    ) {
        rasterize_mesh(
            positions,
            triangles,
            base_color,
            &self.palette,
            &mut self.frame_buffer,
            settings,
        );
    }

    /// 结束一帧：深度可视化开启时执行整缓冲后处理
    ///
    /// 该后处理依赖本帧所有绘制调用累积的共享深度缓冲，
    /// 因此必须且只能在全部绘制调用之后执行一次。
    pub fn end_frame(&mut self, settings: &RenderSettings) {
        if settings.show_zbuffer {
            self.frame_buffer.resolve_depth_view();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip_point(x: f32, y: f32, z: f32, extent: usize) -> Vector4<f32> {
        let ndc = |v: f32| v / (extent as f32 - 1.0) * 2.0 - 1.0;
        Vector4::new(ndc(x), ndc(y), z, 1.0)
    }

    fn test_settings() -> RenderSettings {
        RenderSettings {
            use_zbuffer: true,
            ..RenderSettings::default()
        }
    }

    /// 绘制一帧固定内容：一条线段和一个三角形
    fn draw_frame(renderer: &mut Renderer, settings: &RenderSettings) -> bool {
        if !renderer.begin_frame(64, 64) {
            return false;
        }
        renderer.draw_lines(
            &[clip_point(0.0, 0.0, 0.0, 64), clip_point(63.0, 63.0, 0.0, 64)],
            &[Color::new(1.0, 0.0, 0.0)],
            settings,
        );
        renderer.draw_mesh(
            &[
                clip_point(10.0, 10.0, -0.2, 64),
                clip_point(50.0, 10.0, -0.2, 64),
                clip_point(10.0, 50.0, -0.2, 64),
            ],
            &[[0, 1, 2]],
            &Color::new(0.0, 1.0, 0.0),
            settings,
        );
        renderer.end_frame(settings);
        true
    }

    #[test]
    fn repeated_frame_is_idempotent() {
        let settings = test_settings();
        let mut renderer = Renderer::new(64, 64, 0);

        assert!(draw_frame(&mut renderer, &settings));
        let first_color = renderer.frame_buffer.color_buffer.clone();
        let first_depth = renderer.frame_buffer.depth_buffer.clone();

        assert!(draw_frame(&mut renderer, &settings));
        assert_eq!(renderer.frame_buffer.color_buffer, first_color);
        assert_eq!(renderer.frame_buffer.depth_buffer, first_depth);
    }

    #[test]
    fn zero_size_target_skips_frame() {
        let mut renderer = Renderer::new(64, 64, 0);
        renderer.frame_buffer.color_buffer[0] = Color::new(1.0, 1.0, 1.0);
        assert!(!renderer.begin_frame(0, 48));
        assert!(!renderer.begin_frame(48, 0));
        // 缓冲区未被触碰
        assert_eq!(renderer.frame_buffer.color_buffer[0], Color::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn begin_frame_resizes_to_new_resolution() {
        let mut renderer = Renderer::new(100, 100, 0);
        assert!(renderer.begin_frame(50, 50));
        assert_eq!(renderer.frame_buffer.width, 50);
        assert_eq!(renderer.frame_buffer.height, 50);
        assert_eq!(renderer.frame_buffer.color_buffer.len(), 2500);
    }

    #[test]
    fn end_frame_resolves_depth_view_once_after_all_draws() {
        let mut settings = test_settings();
        settings.show_zbuffer = true;
        let mut renderer = Renderer::new(64, 64, 0);
        assert!(draw_frame(&mut renderer, &settings));

        // 三角形区域（深度-0.2）映射为 1-( -0.2+1 )/2 = 0.6 灰
        let idx = renderer.frame_buffer.pixel_index(15, 15);
        let pixel = renderer.frame_buffer.color_buffer[idx];
        assert!((pixel.x - 0.6).abs() < 1e-5, "深度可视化灰度错误: {}", pixel.x);
        assert_eq!(pixel.x, pixel.y);
        assert_eq!(pixel.y, pixel.z);
    }
}
