use crate::config::Config;
use crate::input::{Controller, PointerEvent};
use crate::render::{self, SURFACE_SIZE};
use crate::shape::{RectangleMode, ShapeKind};
use image::DynamicImage;
use std::path::{Path, PathBuf};

// ── Frame Surface ───────────────────────────────────────────────────────────

/// Still frame painted under the overlay, stretched to the surface.
struct Frame {
    path: PathBuf,
    raw: DynamicImage,
    texture: Option<egui::TextureHandle>,
}

impl Frame {
    fn open(path: &Path) -> Result<Self, image::ImageError> {
        let raw = image::open(path)?;
        tracing::info!(path = %path.display(), width = raw.width(), height = raw.height(), "frame loaded");
        Ok(Self {
            path: path.to_path_buf(),
            raw,
            texture: None,
        })
    }

    fn texture(&mut self, ctx: &egui::Context) -> &egui::TextureHandle {
        let raw = &self.raw;
        self.texture.get_or_insert_with(|| {
            let rgba = raw.to_rgba8();
            let size = [rgba.width() as usize, rgba.height() as usize];
            let pixels = rgba.as_flat_samples();
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice());
            ctx.load_texture("frame", color_image, egui::TextureOptions::LINEAR)
        })
    }
}

// ── App ─────────────────────────────────────────────────────────────────────

pub struct VideoClickApp {
    controller: Controller,
    frame: Option<Frame>,
    status: Option<String>,
}

impl VideoClickApp {
    pub fn new(config: &Config) -> Self {
        let mut app = Self {
            controller: Controller::new(config.initial_shape, config.rectangle_mode),
            frame: None,
            status: None,
        };
        if let Some(path) = &config.frame {
            app.load_frame(path);
        }
        app
    }

    fn load_frame(&mut self, path: &Path) {
        match Frame::open(path) {
            Ok(frame) => {
                self.frame = Some(frame);
                self.status = None;
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "could not load frame");
                self.status = Some(format!("Could not open {}: {err}", path.display()));
            }
        }
    }

    fn pick_frame(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "webp"])
            .pick_file()
        {
            self.load_frame(&path);
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Select Shape:");
            let mut shape = self.controller.state().shape();
            egui::ComboBox::from_id_salt("shape")
                .selected_text(shape.label())
                .show_ui(ui, |ui| {
                    for kind in ShapeKind::ALL {
                        ui.selectable_value(&mut shape, kind, kind.label());
                    }
                });
            if shape != self.controller.state().shape() {
                self.controller.reset_for_shape(shape);
            }

            if shape == ShapeKind::Rectangle {
                ui.separator();
                let mut mode = self.controller.state().rectangle_mode();
                for m in RectangleMode::ALL {
                    ui.selectable_value(&mut mode, m, m.label());
                }
                if mode != self.controller.state().rectangle_mode() {
                    self.controller.set_rectangle_mode(mode);
                }
            }

            ui.separator();
            if ui.button("Clear").clicked() {
                self.controller.reset_for_shape(shape);
            }
            if ui.button("Open frame…").clicked() {
                self.pick_frame();
            }
            if let Some(frame) = &self.frame {
                ui.separator();
                ui.label(
                    frame
                        .path
                        .file_name()
                        .unwrap_or_default()
                        .to_string_lossy()
                        .into_owned(),
                );
            }
        });
    }

    fn coordinates_list(&self, ui: &mut egui::Ui) {
        let state = self.controller.state();
        ui.heading("Click Coordinates");
        ui.label(if state.is_completed() {
            format!("{} complete", state.shape().label())
        } else {
            format!("{} in progress", state.shape().label())
        });
        ui.separator();
        egui::ScrollArea::vertical().show(ui, |ui| {
            for p in state.points() {
                ui.label(p.to_string());
            }
        });
        if let Some(status) = &self.status {
            ui.separator();
            ui.colored_label(egui::Color32::LIGHT_RED, status);
        }
    }

    /// Forward the surface response to the controller. The frame and overlay
    /// share `surface` so one origin serves both click and drag coordinates.
    fn handle_pointer(&mut self, ctx: &egui::Context, response: &egui::Response) -> bool {
        let origin = response.rect.min;
        let mut changed = false;

        if response.drag_started_by(egui::PointerButton::Primary) {
            if let Some(pos) = ctx.input(|i| i.pointer.press_origin()) {
                changed |= self
                    .controller
                    .handle(PointerEvent::Press(Controller::to_local(origin, pos)));
            }
        }

        if response.dragged_by(egui::PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                changed |= self
                    .controller
                    .handle(PointerEvent::Move(Controller::to_local(origin, pos)));
            }
        }

        if response.clicked_by(egui::PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                changed |= self
                    .controller
                    .handle(PointerEvent::Click(Controller::to_local(origin, pos)));
            }
        }

        // release may happen outside the surface
        let primary_down = ctx.input(|i| i.pointer.primary_down());
        if response.drag_stopped_by(egui::PointerButton::Primary)
            || (!primary_down && self.controller.drag_selection().is_some())
        {
            changed |= self.controller.handle(PointerEvent::Release);
        }

        changed
    }
}

// ── eframe App impl ────────────────────────────────────────────────────────

impl eframe::App for VideoClickApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.toolbar(ui));

        egui::SidePanel::right("coordinates")
            .min_width(180.0)
            .show(ctx, |ui| self.coordinates_list(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(SURFACE_SIZE, egui::Sense::click_and_drag());
            let surface = response.rect;

            // Frame first; the overlay is rebuilt from state on top every frame.
            match self.frame.as_mut() {
                Some(frame) => {
                    let tex = frame.texture(ctx);
                    painter.image(
                        tex.id(),
                        surface,
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                }
                None => {
                    painter.rect_filled(surface, 0.0, egui::Color32::from_gray(40));
                }
            }

            if self.handle_pointer(ctx, &response) {
                ctx.request_repaint();
            }

            if let Some(overlay) = render::overlay(self.controller.state()) {
                render::paint(&overlay, &painter, surface.min);
            }

            if self.controller.drag_selection().is_some() {
                ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
            }
        });
    }
}
