//! The editor window: buttons, previews, the crop gesture, and the status
//! line. Every handler is independently guarded; failures go to the error
//! window and leave the session as it was.

use std::path::PathBuf;

use eframe::egui;
use fotoforge_core::io::SUPPORTED_EXTENSIONS;
use fotoforge_core::ops::CropRect;
use fotoforge_core::{BlurKind, EdgeParams, EditError, ImageStore, Session};

use crate::preview::{screen_to_image, PreviewPane};

/// Three-phase crop interaction: press starts a drag, release applies.
#[derive(Debug, Clone, Copy, PartialEq)]
enum CropGesture {
    Idle,
    Dragging { start: egui::Pos2 },
}

pub struct EditorApp {
    session: Session,
    store: ImageStore,

    // Operation parameters bound to the controls.
    edge_params: EdgeParams,
    angle_step: i32,
    blur_kind: BlurKind,
    blur_kernel: u32,
    brightness: i32,
    contrast: i32,

    original_pane: PreviewPane,
    processed_pane: PreviewPane,
    gesture: CropGesture,

    status: String,
    error_message: Option<String>,
    previews_stale: bool,
}

impl Default for EditorApp {
    fn default() -> Self {
        Self {
            session: Session::new(),
            store: ImageStore::default(),

            edge_params: EdgeParams::default(),
            angle_step: 90,
            blur_kind: BlurKind::Gaussian,
            blur_kernel: 15,
            brightness: 0,
            contrast: 0,

            original_pane: PreviewPane::new("original"),
            processed_pane: PreviewPane::new("processed"),
            gesture: CropGesture::Idle,

            status: "Ready".to_string(),
            error_message: None,
            previews_stale: true,
        }
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.previews_stale {
            self.original_pane.refresh(ctx, self.session.original());
            self.processed_pane.refresh(ctx, self.session.processed());
            self.previews_stale = false;
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open Images…").clicked() {
                    self.open_images();
                }
                if ui.button("Save As…").clicked() {
                    self.save_with_dialog();
                }
                if ui.button("Quick Save").clicked() {
                    self.quick_save();
                }
                ui.separator();
                if ui.button("Reset").clicked() {
                    self.run("Reset", Session::reset);
                }
                ui.separator();
                if ui.button("◀ Previous").clicked() {
                    self.run("Previous image", Session::previous);
                }
                if ui.button("Next ▶").clicked() {
                    self.run("Next image", Session::next);
                }
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(self.image_info());
                });
            });
        });

        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            self.show_controls(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal_top(|ui| {
                ui.vertical(|ui| {
                    ui.heading("Original");
                    let (response, image_rect) = self.original_pane.show(ui);
                    self.handle_crop_gesture(ui, &response, image_rect);
                });
                ui.separator();
                ui.vertical(|ui| {
                    ui.heading("Processed");
                    self.processed_pane.show(ui);
                });
            });
        });

        self.show_error_window(ctx);
    }
}

impl EditorApp {
    fn show_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Equalize Histogram").clicked() {
                self.run("Histogram equalization", Session::equalize);
            }
            if ui.button("Detect Edges").clicked() {
                let params = self.edge_params;
                self.run("Edge detection", move |s| s.detect_edges(&params));
            }
            if ui.button("Invert Colors").clicked() {
                self.run("Color inversion", Session::invert);
            }
            ui.separator();
            if ui.button("Rotate").clicked() {
                let delta = self.angle_step;
                let total = self.session.cumulative_angle() + delta;
                self.run(&format!("Rotation to {total}°"), move |s| s.rotate_by(delta));
            }
            ui.add(
                egui::DragValue::new(&mut self.angle_step)
                    .speed(1)
                    .suffix("°"),
            );
        });

        ui.horizontal(|ui| {
            egui::ComboBox::from_id_salt("blur_kind")
                .selected_text(self.blur_kind.name())
                .show_ui(ui, |ui| {
                    for kind in BlurKind::ALL {
                        ui.selectable_value(&mut self.blur_kind, kind, kind.name());
                    }
                });
            ui.add(
                egui::Slider::new(&mut self.blur_kernel, 1..=31)
                    .step_by(2.0)
                    .text("Kernel"),
            );
            if ui.button("Blur").clicked() {
                let (kind, kernel) = (self.blur_kind, self.blur_kernel);
                self.run("Blur", move |s| s.blur(kind, kernel));
            }
            ui.separator();
            ui.add(egui::Slider::new(&mut self.brightness, -100..=100).text("Brightness"));
            ui.add(egui::Slider::new(&mut self.contrast, -100..=100).text("Contrast"));
            if ui.button("Adjust").clicked() {
                let (b, c) = (self.brightness, self.contrast);
                self.run("Brightness/contrast", move |s| s.adjust(b, c));
            }
        });
    }

    /// Run a session operation and route the outcome to the status line or
    /// the error window.
    fn run<F>(&mut self, action: &str, op: F)
    where
        F: FnOnce(&mut Session) -> Result<(), EditError>,
    {
        match op(&mut self.session) {
            Ok(()) => {
                log::info!("{action} done");
                self.status = format!("{action} done");
                self.previews_stale = true;
            }
            Err(err) => {
                log::error!("{action} failed: {err}");
                self.status = format!("{action} failed");
                self.error_message = Some(err.to_string());
            }
        }
    }

    fn open_images(&mut self) {
        let Some(paths) = rfd::FileDialog::new()
            .add_filter("Images", &SUPPORTED_EXTENSIONS)
            .pick_files()
        else {
            self.status = "Open cancelled".to_string();
            return;
        };
        match self.session.open(paths) {
            Ok(()) => {
                let name = self
                    .session
                    .current_path()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                log::info!("opened {} file(s)", self.session.len());
                self.status = format!("Loaded {name}");
                self.previews_stale = true;
            }
            Err(err) => {
                log::error!("open failed: {err}");
                self.status = "Open failed".to_string();
                self.error_message = Some(err.to_string());
            }
        }
    }

    fn save_with_dialog(&mut self) {
        let Some(original_path) = self.session.current_path().map(PathBuf::from) else {
            self.error_message = Some(EditError::NoImage.to_string());
            return;
        };
        let suggested = self.store.suggested_name(&original_path);
        let destination = rfd::FileDialog::new()
            .set_file_name(&suggested)
            .add_filter("JPEG", &["jpg", "jpeg"])
            .add_filter("PNG", &["png"])
            .add_filter("BMP", &["bmp"])
            .add_filter("TIFF", &["tiff"])
            .save_file();

        let Some(processed) = self.session.processed() else {
            self.error_message = Some(EditError::NoImage.to_string());
            return;
        };
        match self.store.save_interactive(processed, destination) {
            Ok(Some(path)) => {
                log::info!("saved image to {}", path.display());
                self.status = format!("Saved to {}", path.display());
            }
            Ok(None) => self.status = "Save cancelled".to_string(),
            Err(err) => {
                log::error!("save failed: {err}");
                self.status = "Save failed".to_string();
                self.error_message = Some(err.to_string());
            }
        }
    }

    fn quick_save(&mut self) {
        let Some(original_path) = self.session.current_path().map(PathBuf::from) else {
            self.error_message = Some(EditError::NoImage.to_string());
            return;
        };
        let Some(processed) = self.session.processed() else {
            self.error_message = Some(EditError::NoImage.to_string());
            return;
        };
        match self.store.save_auto(processed, &original_path) {
            Ok(path) => {
                log::info!("saved image to {}", path.display());
                self.status = format!("Saved to {}", path.display());
            }
            Err(err) => {
                log::error!("quick save failed: {err}");
                self.status = "Save failed".to_string();
                self.error_message = Some(err.to_string());
            }
        }
    }

    /// Press → drag (rubber band) → release applies the crop through the
    /// session, mapped to image space by the display scale.
    fn handle_crop_gesture(
        &mut self,
        ui: &egui::Ui,
        response: &egui::Response,
        image_rect: egui::Rect,
    ) {
        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.gesture = CropGesture::Dragging { start: pos };
            }
        }

        let CropGesture::Dragging { start } = self.gesture else {
            return;
        };
        let Some(pos) = response.interact_pointer_pos() else {
            if response.drag_stopped() {
                self.gesture = CropGesture::Idle;
            }
            return;
        };

        let band = egui::Rect::from_two_pos(start, pos);
        let painter = ui.painter_at(response.rect);
        let stroke = egui::Stroke::new(2.0, egui::Color32::RED);
        painter.line_segment([band.left_top(), band.right_top()], stroke);
        painter.line_segment([band.right_top(), band.right_bottom()], stroke);
        painter.line_segment([band.right_bottom(), band.left_bottom()], stroke);
        painter.line_segment([band.left_bottom(), band.left_top()], stroke);

        if response.drag_stopped() {
            let scale = self.original_pane.scale();
            let a = screen_to_image(start, image_rect.min, scale);
            let b = screen_to_image(pos, image_rect.min, scale);
            let rect = CropRect::from_corners(a, b);
            self.run("Crop", move |s| s.crop(rect));
            self.gesture = CropGesture::Idle;
        }
    }

    fn image_info(&self) -> String {
        match self.session.original() {
            Some(original) => format!(
                "{}x{} | image {}/{}",
                original.width,
                original.height,
                self.session.index() + 1,
                self.session.len()
            ),
            None => "No image loaded".to_string(),
        }
    }

    fn show_error_window(&mut self, ctx: &egui::Context) {
        let Some(message) = self.error_message.clone() else {
            return;
        };
        let mut close = false;
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(&message);
                if ui.button("OK").clicked() {
                    close = true;
                }
            });
        if close {
            self.error_message = None;
        }
    }
}
