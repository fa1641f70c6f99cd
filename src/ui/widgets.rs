use egui::{Color32, Context, RichText};

use super::app::RasterizerApp;

/// UI组件和工具提示相关方法的特质
pub trait WidgetMethods {
    /// 绘制UI的侧边栏
    fn draw_side_panel(&mut self, ctx: &Context, ui: &mut egui::Ui);

    /// 显示工具提示
    fn add_tooltip(response: egui::Response, ctx: &Context, text: &str) -> egui::Response;
}

impl WidgetMethods for RasterizerApp {
    /// 显示工具提示
    fn add_tooltip(response: egui::Response, _ctx: &egui::Context, text: &str) -> egui::Response {
        response.on_hover_ui(|ui| {
            ui.add(egui::Label::new(
                RichText::new(text).size(14.0).color(Color32::LIGHT_YELLOW),
            ));
        })
    }

    /// 绘制侧边栏
    fn draw_side_panel(&mut self, ctx: &Context, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            // 渲染属性设置
            ui.collapsing("Rasterizer", |ui| {
                ui.horizontal(|ui| {
                    ui.label("Subsampling:");
                    let response = ui.add(egui::Slider::new(
                        &mut self.settings.subsampling_rate,
                        1..=12,
                    ));
                    Self::add_tooltip(
                        response,
                        ctx,
                        "Viewport size is divided by this factor before rasterization",
                    );
                });

                let response = ui.checkbox(
                    &mut self.settings.use_random_triangle_colors,
                    "Use Random Triangle Colors",
                );
                Self::add_tooltip(
                    response,
                    ctx,
                    "Color each triangle from a deterministic pseudo-random palette",
                );

                let response = ui.checkbox(&mut self.settings.use_zbuffer, "Use z-Buffer");
                Self::add_tooltip(
                    response,
                    ctx,
                    "Keep the nearest fragment per pixel instead of the last drawn",
                );

                let response = ui.checkbox(&mut self.settings.show_zbuffer, "Show z-Buffer");
                Self::add_tooltip(
                    response,
                    ctx,
                    "Display the depth buffer as grayscale (near = white, far = black)",
                );

                let response =
                    ui.checkbox(&mut self.settings.cull_behind_camera, "Cull Behind Camera");
                Self::add_tooltip(
                    response,
                    ctx,
                    "Skip triangles with any vertex behind the camera",
                );

                let response = ui.checkbox(&mut self.settings.cull_front_faces, "Cull Front Faces");
                Self::add_tooltip(response, ctx, "Skip front-facing triangles");
            });

            // 相机设置
            ui.collapsing("Camera", |ui| {
                ui.horizontal(|ui| {
                    ui.label("FOV:");
                    let response = ui.add(
                        egui::Slider::new(&mut self.camera.fov_y, 0.2..=2.5).custom_formatter(
                            |v, _| format!("{:.0}°", v.to_degrees()),
                        ),
                    );
                    if response.changed() {
                        self.camera.update_matrices();
                    }
                    Self::add_tooltip(response, ctx, "Vertical field of view");
                });

                if ui.button("Reset View (R)").clicked() {
                    self.reset_camera();
                }

                ui.separator();
                ui.small("Drag - orbit");
                ui.small("Shift+Drag - pan");
                ui.small("Scroll - dolly");
            });

            // 输出
            ui.collapsing("Output", |ui| {
                ui.horizontal(|ui| {
                    ui.label("Directory:");
                    ui.text_edit_singleline(&mut self.settings.output_dir);
                });
                if ui.button("Screenshot").clicked() {
                    self.take_screenshot();
                }
            });

            ui.separator();
            ui.small(format!(
                "Resolution: {}x{}",
                self.renderer.frame_buffer.width, self.renderer.frame_buffer.height
            ));
        });
    }
}
