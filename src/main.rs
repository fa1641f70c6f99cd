use clap::Parser;
use log::info;

mod core;
mod geometry;
mod io;
mod ui;
mod utils;

use io::args::Args;
use io::config_loader::TomlConfigLoader;
use io::render_settings::RenderSettings;

fn main() -> Result<(), String> {
    env_logger::init();
    let args = Args::parse();

    // 生成示例配置后直接退出
    if let Some(path) = &args.create_example_config {
        TomlConfigLoader::create_example_config(path)?;
        info!("示例配置已写入 {}", path);
        return Ok(());
    }

    // 配置文件 -> 命令行参数，后者优先
    let mut settings = match &args.config {
        Some(path) => {
            info!("加载配置文件 {}", path);
            TomlConfigLoader::load_from_file(path)?
        }
        None => RenderSettings::default(),
    };
    args.apply_to_settings(&mut settings);
    settings.validate()?;

    ui::start_gui(settings).map_err(|e| format!("启动GUI失败: {}", e))
}
