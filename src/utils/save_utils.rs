use crate::core::frame_buffer::FrameBuffer;
use image::ColorType;
use log::{error, info};
use std::path::Path;

/// 保存RGB图像数据到PNG文件
pub fn save_image(path: &str, data: &[u8], width: u32, height: u32) -> Result<(), String> {
    image::save_buffer(path, data, width, height, ColorType::Rgb8)
        .map_err(|e| format!("保存图像到 {} 时出错: {}", path, e))?;
    info!("图像已保存到 {}", path);
    Ok(())
}

/// 将当前帧缓冲内容保存为带时间戳的截图
///
/// 文件名形如`screenshot_20260831_153000.png`，成功时返回完整路径。
pub fn save_screenshot(frame_buffer: &FrameBuffer, output_dir: &str) -> Result<String, String> {
    if frame_buffer.width == 0 || frame_buffer.height == 0 {
        return Err("帧缓冲为空，无法截图".to_string());
    }

    std::fs::create_dir_all(output_dir).map_err(|e| {
        error!("创建输出目录 {} 失败: {}", output_dir, e);
        format!("创建输出目录失败: {}", e)
    })?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let path = Path::new(output_dir)
        .join(format!("screenshot_{}.png", timestamp))
        .to_str()
        .ok_or_else(|| "创建截图路径字符串失败".to_string())?
        .to_string();

    let data = frame_buffer.color_buffer_bytes();
    save_image(
        &path,
        &data,
        frame_buffer.width as u32,
        frame_buffer.height as u32,
    )?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screenshot_rejects_empty_frame_buffer() {
        let frame_buffer = FrameBuffer::new(0, 0);
        assert!(save_screenshot(&frame_buffer, "output").is_err());
    }
}
