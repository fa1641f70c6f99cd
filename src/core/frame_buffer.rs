use nalgebra::Vector3;

/// RGB颜色，线性空间，分量范围[0.0, 1.0]
pub type Color = Vector3<f32>;

/// 深度缓冲的"远"哨兵值，每帧清除时写入
pub const FAR_DEPTH: f32 = 1.0;

/// 帧缓冲区：颜色缓冲与深度缓冲成对存储
///
/// 两个缓冲均为行主序平铺数组，像素(x, y)对应下标`y * width + x`。
/// 缓冲区在渲染分辨率变化时重新分配，每帧光栅化前整体清除，
/// 帧内由光栅化流程独占写入，帧间不保留深度数据。
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    /// 每像素一个RGB颜色值
    pub color_buffer: Vec<Color>,
    /// 每像素一个NDC深度值，数值越小越近
    pub depth_buffer: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let num_pixels = width * height;
        FrameBuffer {
            width,
            height,
            color_buffer: vec![Color::zeros(); num_pixels],
            depth_buffer: vec![FAR_DEPTH; num_pixels],
        }
    }

    /// 重新分配缓冲区以匹配新的渲染分辨率
    ///
    /// 旧内容全部丢弃，新缓冲处于已清除状态。
    pub fn resize(&mut self, width: usize, height: usize) {
        let num_pixels = width * height;
        self.width = width;
        self.height = height;
        self.color_buffer = vec![Color::zeros(); num_pixels];
        self.depth_buffer = vec![FAR_DEPTH; num_pixels];
    }

    /// 每帧光栅化前的整体清除：颜色写入背景色，深度写入远哨兵值
    pub fn clear(&mut self, background: &Color) {
        self.color_buffer.fill(*background);
        self.depth_buffer.fill(FAR_DEPTH);
    }

    /// 深度可视化后处理：用深度缓冲内容覆盖整个颜色缓冲
    ///
    /// 映射为`clamp(1 - (z + 1) / 2, 0, 1)`并复制到三个通道，
    /// 近处为白、远处为黑。该步骤每帧最多执行一次，
    /// 且必须在本帧所有共享缓冲的绘制调用之后执行。
    pub fn resolve_depth_view(&mut self) {
        for (color, &z) in self.color_buffer.iter_mut().zip(self.depth_buffer.iter()) {
            let depth_color = (1.0 - (z + 1.0) / 2.0).clamp(0.0, 1.0);
            *color = Color::new(depth_color, depth_color, depth_color);
        }
    }

    /// 获取颜色缓冲区的RGB8字节数据，用于展示或存盘
    pub fn color_buffer_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.color_buffer.len() * 3);
        for color in &self.color_buffer {
            bytes.push((color.x * 255.0).clamp(0.0, 255.0) as u8);
            bytes.push((color.y * 255.0).clamp(0.0, 255.0) as u8);
            bytes.push((color.z * 255.0).clamp(0.0, 255.0) as u8);
        }
        bytes
    }

    #[inline]
    pub fn pixel_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_reallocates_without_residue() {
        let mut fb = FrameBuffer::new(100, 100);
        fb.color_buffer[0] = Color::new(1.0, 0.0, 0.0);
        fb.depth_buffer[0] = -0.5;

        fb.resize(50, 50);
        assert_eq!(fb.color_buffer.len(), 2500);
        assert_eq!(fb.depth_buffer.len(), 2500);
        assert!(fb.color_buffer.iter().all(|c| *c == Color::zeros()));
        assert!(fb.depth_buffer.iter().all(|&z| z == FAR_DEPTH));
    }

    #[test]
    fn clear_resets_both_buffers() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.color_buffer[5] = Color::new(0.2, 0.4, 0.6);
        fb.depth_buffer[5] = 0.0;

        let bg = Color::new(0.1, 0.1, 0.1);
        fb.clear(&bg);
        assert!(fb.color_buffer.iter().all(|c| *c == bg));
        assert!(fb.depth_buffer.iter().all(|&z| z == FAR_DEPTH));
    }

    #[test]
    fn depth_view_maps_near_white_far_black() {
        let mut fb = FrameBuffer::new(2, 1);
        fb.depth_buffer[0] = -1.0; // 最近
        fb.depth_buffer[1] = 1.0; // 最远
        fb.resolve_depth_view();
        assert_eq!(fb.color_buffer[0], Color::new(1.0, 1.0, 1.0));
        assert_eq!(fb.color_buffer[1], Color::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn depth_view_clamps_out_of_range_values() {
        let mut fb = FrameBuffer::new(2, 1);
        fb.depth_buffer[0] = -3.0;
        fb.depth_buffer[1] = 5.0;
        fb.resolve_depth_view();
        assert_eq!(fb.color_buffer[0], Color::new(1.0, 1.0, 1.0));
        assert_eq!(fb.color_buffer[1], Color::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn color_bytes_are_clamped_rgb8() {
        let mut fb = FrameBuffer::new(1, 1);
        fb.color_buffer[0] = Color::new(2.0, 0.5, -1.0);
        assert_eq!(fb.color_buffer_bytes(), vec![255, 127, 0]);
    }
}
