use clap::Parser;

use crate::io::render_settings::RenderSettings;

/// 命令行参数 - 只覆盖显式给出的项，避免破坏配置文件的值
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// TOML配置文件路径
    #[arg(short, long)]
    pub config: Option<String>,

    /// 初始窗口宽度
    #[arg(long)]
    pub width: Option<usize>,

    /// 初始窗口高度
    #[arg(long)]
    pub height: Option<usize>,

    /// 降采样倍率（1为全分辨率）
    #[arg(long)]
    pub subsampling_rate: Option<u32>,

    /// 截图输出目录
    #[arg(long)]
    pub output_dir: Option<String>,

    /// 在指定路径生成示例配置文件后退出
    #[arg(long)]
    pub create_example_config: Option<String>,
}

impl Args {
    /// 将显式给出的命令行参数合并到设置中
    pub fn apply_to_settings(&self, settings: &mut RenderSettings) {
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(rate) = self.subsampling_rate {
            settings.subsampling_rate = rate;
        }
        if let Some(ref output_dir) = self.output_dir {
            settings.output_dir = output_dir.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_args_leave_settings_untouched() {
        let args = Args::default();
        let mut settings = RenderSettings::default();
        let before = settings.clone();
        args.apply_to_settings(&mut settings);
        assert_eq!(settings.width, before.width);
        assert_eq!(settings.subsampling_rate, before.subsampling_rate);
        assert_eq!(settings.output_dir, before.output_dir);
    }

    #[test]
    fn present_args_override_settings() {
        let args = Args {
            width: Some(640),
            height: Some(480),
            subsampling_rate: Some(2),
            output_dir: Some("shots".to_string()),
            ..Default::default()
        };
        let mut settings = RenderSettings::default();
        args.apply_to_settings(&mut settings);
        assert_eq!(settings.width, 640);
        assert_eq!(settings.height, 480);
        assert_eq!(settings.subsampling_rate, 2);
        assert_eq!(settings.output_dir, "shots");
    }
}
