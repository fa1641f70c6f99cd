use log::warn;
use nalgebra::{Point3, Vector3};

/// 纯数据结构 - 所有可通过TOML配置的渲染参数
///
/// 不包含clap逻辑，命令行覆盖在main里完成。
#[derive(Debug, Clone)]
pub struct RenderSettings {
    // ===== 渲染基础设置 =====
    /// 渲染目标的宽度（交互模式下由视口尺寸覆盖）
    pub width: usize,
    /// 渲染目标的高度（交互模式下由视口尺寸覆盖）
    pub height: usize,
    /// 降采样倍率：视口尺寸除以该值得到实际光栅化分辨率
    pub subsampling_rate: u32,
    /// 启用Z缓冲（深度测试）
    pub use_zbuffer: bool,
    /// 显示深度可视化而非颜色缓冲
    pub show_zbuffer: bool,
    /// 剔除任何顶点位于相机后方的三角形
    pub cull_behind_camera: bool,
    /// 剔除正面朝向的三角形（教学用的反向约定）
    pub cull_front_faces: bool,
    /// 使用伪随机三角形颜色而非物体基础色
    pub use_random_triangle_colors: bool,
    /// 伪随机调色板的种子
    pub palette_seed: u64,

    // ===== 颜色设置（字符串格式，用于TOML序列化） =====
    /// 背景颜色，格式为"r,g,b"
    pub background_color: String,
    /// 立方体基础颜色，格式为"r,g,b"
    pub box_color: String,
    /// 球体基础颜色，格式为"r,g,b"
    pub sphere_color: String,

    // ===== 相机参数 =====
    /// 相机位置（视点），格式为"x,y,z"
    pub camera_from: String,
    /// 相机目标（观察点），格式为"x,y,z"
    pub camera_at: String,
    /// 相机世界坐标系上方向，格式为"x,y,z"
    pub camera_up: String,
    /// 相机垂直视场角（度）
    pub camera_fov: f32,
    /// 近裁剪平面距离
    pub camera_near: f32,
    /// 远裁剪平面距离
    pub camera_far: f32,

    // ===== 输出设置 =====
    /// 截图输出目录
    pub output_dir: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            subsampling_rate: 4,
            use_zbuffer: true,
            show_zbuffer: false,
            cull_behind_camera: false,
            cull_front_faces: false,
            use_random_triangle_colors: false,
            palette_seed: 0,
            background_color: "0.0,0.0,0.0".to_string(),
            box_color: "1.0,1.0,1.0".to_string(),
            sphere_color: "0.0,1.0,0.0".to_string(),
            camera_from: "0,0,3".to_string(),
            camera_at: "0,0,0".to_string(),
            camera_up: "0,1,0".to_string(),
            camera_fov: 45.0,
            camera_near: 1.0,
            camera_far: 4.5,
            output_dir: "output".to_string(),
        }
    }
}

impl RenderSettings {
    /// 校验参数合法性，启动前调用
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!("无效的分辨率 {}x{}", self.width, self.height));
        }
        if self.subsampling_rate == 0 {
            return Err("降采样倍率必须大于0".to_string());
        }
        if self.camera_fov <= 0.0 || self.camera_fov >= 180.0 {
            return Err(format!("无效的视场角 {}", self.camera_fov));
        }
        if self.camera_near <= 0.0 || self.camera_far <= self.camera_near {
            return Err(format!(
                "无效的裁剪平面 near={} far={}",
                self.camera_near, self.camera_far
            ));
        }
        parse_vec3(&self.background_color).map_err(|e| format!("背景颜色解析失败: {}", e))?;
        parse_vec3(&self.box_color).map_err(|e| format!("立方体颜色解析失败: {}", e))?;
        parse_vec3(&self.sphere_color).map_err(|e| format!("球体颜色解析失败: {}", e))?;
        parse_point3(&self.camera_from).map_err(|e| format!("相机位置解析失败: {}", e))?;
        parse_point3(&self.camera_at).map_err(|e| format!("相机目标解析失败: {}", e))?;
        parse_vec3(&self.camera_up).map_err(|e| format!("相机上方向解析失败: {}", e))?;
        Ok(())
    }

    /// 获取背景颜色向量，解析失败时退回黑色
    pub fn background_color_vec(&self) -> Vector3<f32> {
        parse_vec3(&self.background_color).unwrap_or_else(|e| {
            warn!("无效的背景颜色 '{}': {}", self.background_color, e);
            Vector3::zeros()
        })
    }

    /// 获取立方体基础颜色，解析失败时退回白色
    pub fn box_color_vec(&self) -> Vector3<f32> {
        parse_vec3(&self.box_color).unwrap_or_else(|e| {
            warn!("无效的立方体颜色 '{}': {}", self.box_color, e);
            Vector3::new(1.0, 1.0, 1.0)
        })
    }

    /// 获取球体基础颜色，解析失败时退回绿色
    pub fn sphere_color_vec(&self) -> Vector3<f32> {
        parse_vec3(&self.sphere_color).unwrap_or_else(|e| {
            warn!("无效的球体颜色 '{}': {}", self.sphere_color, e);
            Vector3::new(0.0, 1.0, 0.0)
        })
    }

    pub fn camera_from_point(&self) -> Result<Point3<f32>, String> {
        parse_point3(&self.camera_from)
    }

    pub fn camera_at_point(&self) -> Result<Point3<f32>, String> {
        parse_point3(&self.camera_at)
    }

    pub fn camera_up_vec(&self) -> Result<Vector3<f32>, String> {
        parse_vec3(&self.camera_up)
    }
}

/// 辅助函数用于解析逗号分隔的浮点数
pub fn parse_vec3(s: &str) -> Result<Vector3<f32>, String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err("需要3个逗号分隔的值".to_string());
    }
    let x = parts[0]
        .trim()
        .parse::<f32>()
        .map_err(|e| format!("无效数字 '{}': {}", parts[0], e))?;
    let y = parts[1]
        .trim()
        .parse::<f32>()
        .map_err(|e| format!("无效数字 '{}': {}", parts[1], e))?;
    let z = parts[2]
        .trim()
        .parse::<f32>()
        .map_err(|e| format!("无效数字 '{}': {}", parts[2], e))?;
    Ok(Vector3::new(x, y, z))
}

pub fn parse_point3(s: &str) -> Result<Point3<f32>, String> {
    parse_vec3(s).map(Point3::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_scene() {
        let settings = RenderSettings::default();
        assert_eq!(settings.subsampling_rate, 4);
        assert!(settings.use_zbuffer);
        assert!(!settings.show_zbuffer);
        assert!(!settings.cull_behind_camera);
        assert!(!settings.cull_front_faces);
        assert!((settings.camera_fov - 45.0).abs() < f32::EPSILON);
        assert!((settings.camera_near - 1.0).abs() < f32::EPSILON);
        assert!((settings.camera_far - 4.5).abs() < f32::EPSILON);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn parse_vec3_accepts_spaces_and_negatives() {
        let v = parse_vec3(" -1.5, 0.25 ,2 ").unwrap();
        assert_eq!(v, Vector3::new(-1.5, 0.25, 2.0));
    }

    #[test]
    fn parse_vec3_rejects_wrong_arity() {
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,2,3,4").is_err());
        assert!(parse_vec3("a,b,c").is_err());
    }

    #[test]
    fn validate_rejects_bad_parameters() {
        let mut settings = RenderSettings::default();
        settings.subsampling_rate = 0;
        assert!(settings.validate().is_err());

        let mut settings = RenderSettings::default();
        settings.camera_far = 0.5;
        assert!(settings.validate().is_err());

        let mut settings = RenderSettings::default();
        settings.box_color = "not,a,color".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn color_accessors_fall_back_on_parse_failure() {
        let mut settings = RenderSettings::default();
        settings.sphere_color = "oops".to_string();
        assert_eq!(settings.sphere_color_vec(), Vector3::new(0.0, 1.0, 0.0));
    }
}
