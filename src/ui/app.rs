use crate::core::frame_buffer::Color;
use crate::core::renderer::Renderer;
use crate::geometry::camera::Camera;
use crate::geometry::primitives;
use crate::geometry::transform::world_to_clip_into;
use crate::io::render_settings::RenderSettings;
use egui::{Color32, RichText, Vec2};
use log::warn;
use nalgebra::{Point3, Vector3, Vector4};
use std::time::Instant;

use super::widgets::WidgetMethods;

/// 固定演示场景：坐标轴、立方体和偏移的球体
///
/// 世界坐标在启动时生成一次，裁剪空间缓冲每帧复用。
pub struct SceneGeometry {
    pub axes_points: Vec<Point3<f32>>,
    pub axes_colors: Vec<Color>,
    pub box_vertices: Vec<Point3<f32>>,
    pub box_triangles: Vec<[u32; 3]>,
    pub sphere_vertices: Vec<Point3<f32>>,
    pub sphere_triangles: Vec<[u32; 3]>,

    // 裁剪空间临时缓冲，避免每帧分配
    axes_clip: Vec<Vector4<f32>>,
    box_clip: Vec<Vector4<f32>>,
    sphere_clip: Vec<Vector4<f32>>,
}

impl SceneGeometry {
    pub fn new() -> Self {
        let (axes_points, axes_colors) = primitives::axes_lines();
        let (box_vertices, box_triangles) = primitives::create_box_geometry(0.5);
        let (mut sphere_vertices, sphere_triangles) = primitives::create_sphere_geometry(0.5, 16, 32);
        primitives::translate_vertices(&mut sphere_vertices, &Vector3::new(1.0, 0.0, 0.0));

        SceneGeometry {
            axes_points,
            axes_colors,
            box_vertices,
            box_triangles,
            sphere_vertices,
            sphere_triangles,
            axes_clip: Vec::new(),
            box_clip: Vec::new(),
            sphere_clip: Vec::new(),
        }
    }
}

impl Default for SceneGeometry {
    fn default() -> Self {
        Self::new()
    }
}

/// 相机交互状态
#[derive(Default)]
pub struct InterfaceInteraction {
    pub last_mouse_pos: Option<egui::Pos2>,
}

/// GUI应用状态 - 清晰分离TOML配置和GUI专用状态
pub struct RasterizerApp {
    // ===== TOML可配置参数 =====
    /// 所有TOML可配置的渲染参数
    pub settings: RenderSettings,

    // ===== 渲染运行时状态 =====
    /// 渲染器实例
    pub renderer: Renderer,
    /// 当前场景几何
    pub scene: SceneGeometry,
    /// 交互相机
    pub camera: Camera,

    // ===== GUI界面状态 =====
    /// 渲染结果纹理句柄
    pub rendered_image: Option<egui::TextureHandle>,
    /// 状态消息显示
    pub status_message: String,

    // ===== 实时渲染状态 =====
    /// 上一帧的时间戳
    pub last_frame_time: Option<Instant>,
    /// 帧率历史记录，用于平滑显示
    pub fps_history: Vec<f32>,
    /// 平均帧率
    pub avg_fps: f32,

    // ===== 相机交互状态 =====
    pub interface_interaction: InterfaceInteraction,
}

impl RasterizerApp {
    /// 创建新的GUI应用实例
    pub fn new(settings: RenderSettings, _cc: &eframe::CreationContext<'_>) -> Self {
        let camera = Self::camera_from_settings(&settings);

        let mut renderer = Renderer::new(settings.width, settings.height, settings.palette_seed);
        renderer.background = settings.background_color_vec();

        Self {
            settings,
            renderer,
            scene: SceneGeometry::new(),
            camera,
            rendered_image: None,
            status_message: String::new(),
            last_frame_time: None,
            fps_history: Vec::new(),
            avg_fps: 0.0,
            interface_interaction: InterfaceInteraction::default(),
        }
    }

    /// 从配置字符串构建相机，解析失败时退回默认视角
    fn camera_from_settings(settings: &RenderSettings) -> Camera {
        let from = settings.camera_from_point().unwrap_or_else(|e| {
            warn!("无效的相机位置 '{}': {}", settings.camera_from, e);
            Point3::new(0.0, 0.0, 3.0)
        });
        let at = settings.camera_at_point().unwrap_or_else(|e| {
            warn!("无效的相机目标 '{}': {}", settings.camera_at, e);
            Point3::origin()
        });
        let up = settings.camera_up_vec().unwrap_or_else(|e| {
            warn!("无效的相机上方向 '{}': {}", settings.camera_up, e);
            Vector3::y()
        });

        Camera::new_perspective(
            from,
            at,
            up,
            settings.camera_fov,
            settings.width as f32 / settings.height.max(1) as f32,
            settings.camera_near,
            settings.camera_far,
        )
    }

    /// 重置相机到配置文件指定的视角
    pub fn reset_camera(&mut self) {
        let aspect_ratio = self.camera.aspect_ratio;
        self.camera = Self::camera_from_settings(&self.settings);
        self.camera.set_aspect_ratio(aspect_ratio);
        self.status_message = "Camera reset".to_string();
    }

    /// 保存当前帧缓冲为截图
    pub fn take_screenshot(&mut self) {
        match crate::utils::save_utils::save_screenshot(
            &self.renderer.frame_buffer,
            &self.settings.output_dir,
        ) {
            Ok(path) => self.status_message = format!("Saved {}", path),
            Err(e) => self.status_message = format!("Screenshot failed: {}", e),
        }
    }

    /// 光栅化一帧到帧缓冲区
    ///
    /// 视口任一边为零时整帧跳过，上一帧的纹理内容保持不变。
    fn render_frame(&mut self, width: usize, height: usize) {
        self.renderer.background = self.settings.background_color_vec();

        if !self.renderer.begin_frame(width, height) {
            return;
        }

        self.camera
            .set_aspect_ratio(width as f32 / height as f32);
        let view_projection = self.camera.view_projection_matrix;

        world_to_clip_into(&self.scene.axes_points, &view_projection, &mut self.scene.axes_clip);
        self.renderer
            .draw_lines(&self.scene.axes_clip, &self.scene.axes_colors, &self.settings);

        world_to_clip_into(&self.scene.box_vertices, &view_projection, &mut self.scene.box_clip);
        let box_color = self.settings.box_color_vec();
        self.renderer.draw_mesh(
            &self.scene.box_clip,
            &self.scene.box_triangles,
            &box_color,
            &self.settings,
        );

        world_to_clip_into(
            &self.scene.sphere_vertices,
            &view_projection,
            &mut self.scene.sphere_clip,
        );
        let sphere_color = self.settings.sphere_color_vec();
        self.renderer.draw_mesh(
            &self.scene.sphere_clip,
            &self.scene.sphere_triangles,
            &sphere_color,
            &self.settings,
        );

        self.renderer.end_frame(&self.settings);
    }

    /// 将帧缓冲内容上传为egui纹理
    fn display_render_result(&mut self, ctx: &egui::Context) {
        let color_data = self.renderer.frame_buffer.color_buffer_bytes();
        let width = self.renderer.frame_buffer.width;
        let height = self.renderer.frame_buffer.height;
        if width == 0 || height == 0 {
            return;
        }

        // 将RGB数据转换为RGBA格式
        let mut rgba_data = Vec::with_capacity(color_data.len() / 3 * 4);
        for rgb in color_data.chunks_exact(3) {
            rgba_data.extend_from_slice(rgb);
            rgba_data.push(255);
        }
        let image = egui::ColorImage::from_rgba_unmultiplied([width, height], &rgba_data);

        match &mut self.rendered_image {
            Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
            None => {
                self.rendered_image = Some(ctx.load_texture(
                    "rendered_image",
                    image,
                    egui::TextureOptions::NEAREST,
                ));
            }
        }
    }

    /// 处理渲染视图上的相机交互
    fn handle_camera_interaction(&mut self, image_response: &egui::Response, ctx: &egui::Context) {
        // 鼠标拖拽：默认轨道旋转，按住Shift平移
        if image_response.dragged() {
            if let Some(last_pos) = self.interface_interaction.last_mouse_pos {
                let current_pos = image_response.interact_pointer_pos().unwrap_or_default();
                let delta = current_pos - last_pos;

                if delta.length() >= 1.0 {
                    let is_shift_pressed = ctx.input(|i| i.modifiers.shift);
                    if is_shift_pressed {
                        self.camera.pan(-delta.x * 0.005, delta.y * 0.005);
                    } else {
                        self.camera.orbit(delta.x * 0.01, -delta.y * 0.01);
                    }
                }
            }
            self.interface_interaction.last_mouse_pos = image_response.interact_pointer_pos();
        } else {
            self.interface_interaction.last_mouse_pos = None;
        }

        // 鼠标滚轮推拉
        if image_response.hovered() {
            let scroll_delta = ctx.input(|i| i.smooth_scroll_delta.y);
            if scroll_delta.abs() > 0.1 {
                self.camera.dolly(scroll_delta * 0.01);
            }
        }

        // R键重置视角
        if ctx.input(|i| i.key_pressed(egui::Key::R)) {
            self.reset_camera();
        }
    }

    /// 更新帧率统计信息
    fn update_fps_stats(&mut self) {
        const FPS_HISTORY_SIZE: usize = 30;
        let now = Instant::now();

        if let Some(last) = self.last_frame_time {
            let frame_time = now.duration_since(last).as_secs_f32();
            if frame_time > 0.0 {
                self.fps_history.push(1.0 / frame_time);
                if self.fps_history.len() > FPS_HISTORY_SIZE {
                    self.fps_history.remove(0);
                }
                let sum: f32 = self.fps_history.iter().sum();
                self.avg_fps = sum / self.fps_history.len() as f32;
            }
        }
        self.last_frame_time = Some(now);
    }

    /// 获取格式化的帧率显示文本和颜色
    pub fn fps_display(&self) -> (String, Color32) {
        let fps_color = if self.avg_fps >= 30.0 {
            Color32::from_rgb(50, 220, 50)
        } else if self.avg_fps >= 15.0 {
            Color32::from_rgb(220, 180, 50)
        } else {
            Color32::from_rgb(220, 50, 50)
        };
        (format!("FPS: {:.1}", self.avg_fps), fps_color)
    }
}

impl eframe::App for RasterizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_fps_stats();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Software Rasterizer");
                ui.separator();
                ui.label(&self.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let (fps_text, fps_color) = self.fps_display();
                    ui.label(RichText::new(fps_text).color(fps_color));
                });
            });
        });

        egui::SidePanel::left("left_panel")
            .min_width(280.0)
            .resizable(false)
            .show(ctx, |ui| {
                self.draw_side_panel(ctx, ui);
            });

        // 中央面板 - 每帧光栅化并显示，处理相机交互
        egui::CentralPanel::default().show(ctx, |ui| {
            let available_size = ui.available_size();
            let rate = self.settings.subsampling_rate.max(1) as f32;
            let render_width = (available_size.x / rate) as usize;
            let render_height = (available_size.y / rate) as usize;

            self.render_frame(render_width, render_height);
            self.display_render_result(ctx);

            if let Some(texture) = &self.rendered_image {
                let image_response = ui.add(
                    egui::Image::new(texture)
                        .fit_to_exact_size(Vec2::new(available_size.x, available_size.y))
                        .sense(egui::Sense::click_and_drag()),
                );
                self.handle_camera_interaction(&image_response, ctx);
            } else {
                ui.vertical_centered(|ui| {
                    ui.add_space(100.0);
                    ui.label(RichText::new("No output").size(24.0).color(Color32::GRAY));
                });
            }
        });

        // 连续重绘以驱动实时渲染循环
        ctx.request_repaint();
    }
}

/// 启动GUI应用
pub fn start_gui(settings: RenderSettings) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.width as f32 + 280.0, settings.height as f32 + 40.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Software Rasterizer",
        options,
        Box::new(|cc| Ok(Box::new(RasterizerApp::new(settings, cc)))),
    )
}
