use crate::io::render_settings::RenderSettings;
use log::warn;
use std::path::Path;
use toml::Value;

/// TOML配置管理器 - 统一处理所有配置的读写
pub struct TomlConfigLoader;

impl TomlConfigLoader {
    /// 从TOML文件加载完整配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<RenderSettings, String> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("读取配置文件失败: {}", e))?;

        Self::load_from_content(&content)
    }

    /// 从TOML内容字符串加载配置
    pub fn load_from_content(content: &str) -> Result<RenderSettings, String> {
        let toml_value: Value =
            toml::from_str(content).map_err(|e| format!("解析TOML失败: {}", e))?;

        Self::parse_toml_to_settings(toml_value)
    }

    /// 保存配置到TOML文件
    pub fn save_to_file<P: AsRef<Path>>(settings: &RenderSettings, path: P) -> Result<(), String> {
        let toml_content = Self::settings_to_toml(settings);
        std::fs::write(path, toml_content).map_err(|e| format!("写入配置文件失败: {}", e))
    }

    /// 直接生成示例配置文件
    pub fn create_example_config<P: AsRef<Path>>(path: P) -> Result<(), String> {
        Self::save_to_file(&RenderSettings::default(), path)
            .map_err(|e| format!("创建示例配置失败: {}", e))
    }

    // ===== TOML -> RenderSettings 转换 =====

    fn parse_toml_to_settings(toml: Value) -> Result<RenderSettings, String> {
        let mut settings = RenderSettings::default();

        // [render] 部分
        if let Some(render) = toml.get("render").and_then(|v| v.as_table()) {
            Self::parse_render_section(&mut settings, render);
        }

        // [camera] 部分
        if let Some(camera) = toml.get("camera").and_then(|v| v.as_table()) {
            Self::parse_camera_section(&mut settings, camera);
        }

        // [colors] 部分
        if let Some(colors) = toml.get("colors").and_then(|v| v.as_table()) {
            Self::parse_colors_section(&mut settings, colors);
        }

        // [files] 部分
        if let Some(files) = toml.get("files").and_then(|v| v.as_table()) {
            Self::parse_files_section(&mut settings, files);
        }

        Ok(settings)
    }

    fn parse_render_section(settings: &mut RenderSettings, render: &toml::Table) {
        if let Some(width) = render.get("width").and_then(|v| v.as_integer()) {
            settings.width = width as usize;
        }
        if let Some(height) = render.get("height").and_then(|v| v.as_integer()) {
            settings.height = height as usize;
        }
        if let Some(rate) = render.get("subsampling_rate").and_then(|v| v.as_integer()) {
            if rate >= 1 {
                settings.subsampling_rate = rate as u32;
            } else {
                warn!("无效的降采样倍率 {}, 使用默认值4", rate);
            }
        }
        if let Some(use_zbuffer) = render.get("use_zbuffer").and_then(|v| v.as_bool()) {
            settings.use_zbuffer = use_zbuffer;
        }
        if let Some(show_zbuffer) = render.get("show_zbuffer").and_then(|v| v.as_bool()) {
            settings.show_zbuffer = show_zbuffer;
        }
        if let Some(cull_behind) = render.get("cull_behind_camera").and_then(|v| v.as_bool()) {
            settings.cull_behind_camera = cull_behind;
        }
        if let Some(cull_front) = render.get("cull_front_faces").and_then(|v| v.as_bool()) {
            settings.cull_front_faces = cull_front;
        }
        if let Some(random_colors) = render
            .get("use_random_triangle_colors")
            .and_then(|v| v.as_bool())
        {
            settings.use_random_triangle_colors = random_colors;
        }
        if let Some(seed) = render.get("palette_seed").and_then(|v| v.as_integer()) {
            settings.palette_seed = seed as u64;
        }
    }

    fn parse_camera_section(settings: &mut RenderSettings, camera: &toml::Table) {
        if let Some(from) = camera.get("from").and_then(|v| v.as_str()) {
            settings.camera_from = from.to_string();
        }
        if let Some(at) = camera.get("at").and_then(|v| v.as_str()) {
            settings.camera_at = at.to_string();
        }
        if let Some(up) = camera.get("up").and_then(|v| v.as_str()) {
            settings.camera_up = up.to_string();
        }
        if let Some(fov) = camera.get("fov").and_then(|v| v.as_float()) {
            settings.camera_fov = fov as f32;
        }
        if let Some(near) = camera.get("near").and_then(|v| v.as_float()) {
            settings.camera_near = near as f32;
        }
        if let Some(far) = camera.get("far").and_then(|v| v.as_float()) {
            settings.camera_far = far as f32;
        }
    }

    fn parse_colors_section(settings: &mut RenderSettings, colors: &toml::Table) {
        if let Some(background) = colors.get("background").and_then(|v| v.as_str()) {
            settings.background_color = background.to_string();
        }
        if let Some(box_color) = colors.get("box").and_then(|v| v.as_str()) {
            settings.box_color = box_color.to_string();
        }
        if let Some(sphere) = colors.get("sphere").and_then(|v| v.as_str()) {
            settings.sphere_color = sphere.to_string();
        }
    }

    fn parse_files_section(settings: &mut RenderSettings, files: &toml::Table) {
        if let Some(output_dir) = files.get("output_dir").and_then(|v| v.as_str()) {
            settings.output_dir = output_dir.to_string();
        }
    }

    // ===== RenderSettings -> TOML 转换 =====

    fn settings_to_toml(settings: &RenderSettings) -> String {
        format!(
            r#"# 光栅化渲染器配置文件

[render]
width = {}
height = {}
subsampling_rate = {}
use_zbuffer = {}
show_zbuffer = {}
cull_behind_camera = {}
cull_front_faces = {}
use_random_triangle_colors = {}
palette_seed = {}

[camera]
from = "{}"
at = "{}"
up = "{}"
fov = {:.1}
near = {:.1}
far = {:.1}

[colors]
background = "{}"
box = "{}"
sphere = "{}"

[files]
output_dir = "{}"
"#,
            settings.width,
            settings.height,
            settings.subsampling_rate,
            settings.use_zbuffer,
            settings.show_zbuffer,
            settings.cull_behind_camera,
            settings.cull_front_faces,
            settings.use_random_triangle_colors,
            settings.palette_seed,
            settings.camera_from,
            settings.camera_at,
            settings.camera_up,
            settings.camera_fov,
            settings.camera_near,
            settings.camera_far,
            settings.background_color,
            settings.box_color,
            settings.sphere_color,
            settings.output_dir,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults_for_missing_keys() {
        let content = r#"
[render]
subsampling_rate = 2
show_zbuffer = true

[camera]
fov = 60.0
"#;
        let settings = TomlConfigLoader::load_from_content(content).unwrap();
        assert_eq!(settings.subsampling_rate, 2);
        assert!(settings.show_zbuffer);
        assert!((settings.camera_fov - 60.0).abs() < f32::EPSILON);
        // 未覆盖的键保持默认值
        assert!(settings.use_zbuffer);
        assert_eq!(settings.camera_from, "0,0,3");
        assert!((settings.camera_near - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn invalid_subsampling_rate_falls_back_to_default() {
        let content = r#"
[render]
subsampling_rate = 0
"#;
        let settings = TomlConfigLoader::load_from_content(content).unwrap();
        assert_eq!(settings.subsampling_rate, 4);
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut settings = RenderSettings::default();
        settings.width = 800;
        settings.cull_front_faces = true;
        settings.sphere_color = "0.2,0.4,0.6".to_string();
        settings.palette_seed = 42;

        let content = TomlConfigLoader::settings_to_toml(&settings);
        let loaded = TomlConfigLoader::load_from_content(&content).unwrap();
        assert_eq!(loaded.width, 800);
        assert!(loaded.cull_front_faces);
        assert_eq!(loaded.sphere_color, "0.2,0.4,0.6");
        assert_eq!(loaded.palette_seed, 42);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(TomlConfigLoader::load_from_content("not [ valid").is_err());
    }
}
