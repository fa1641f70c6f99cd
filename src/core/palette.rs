use crate::core::frame_buffer::Color;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 调色板条目数。三角形索引超出时取模复用
/// （只要单次绘制的三角形数不超过1024，颜色即互不重复）。
const PALETTE_SIZE: usize = 1024;

/// 按三角形索引取色的确定性伪随机调色板
///
/// 由调用方持有并传入三角形光栅化器，种子可配置，
/// 同一索引在各帧之间取到的颜色稳定。
pub struct TrianglePalette {
    colors: Vec<Color>,
}

impl TrianglePalette {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let colors = (0..PALETTE_SIZE)
            .map(|_| Color::new(rng.random::<f32>(), rng.random::<f32>(), rng.random::<f32>()))
            .collect();
        TrianglePalette { colors }
    }

    /// 获取绘制调用内第`triangle_index`个三角形的颜色
    #[inline]
    pub fn color_for(&self, triangle_index: usize) -> Color {
        self.colors[triangle_index % self.colors.len()]
    }
}

impl Default for TrianglePalette {
    fn default() -> Self {
        TrianglePalette::new(0)
    }
}
