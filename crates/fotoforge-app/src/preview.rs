//! Preview panes: texture upload, centered drawing, and the screen-space
//! to image-space mapping used by the crop gesture.

use eframe::egui;
use fotoforge_core::buffer::PixelBuffer;
use fotoforge_core::display::prepare_for_display;

/// Fixed bounding box of each preview pane, in points.
pub const PREVIEW_WIDTH: u32 = 600;
pub const PREVIEW_HEIGHT: u32 = 600;

/// One of the two on-screen image surfaces.
pub struct PreviewPane {
    label: &'static str,
    texture: Option<egui::TextureHandle>,
    scale: f64,
    shown_size: egui::Vec2,
}

impl PreviewPane {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            texture: None,
            scale: 1.0,
            shown_size: egui::Vec2::ZERO,
        }
    }

    /// The display scale applied to the last refreshed buffer.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Rebuild the texture from the buffer (or the placeholder when there
    /// is nothing to show).
    pub fn refresh(&mut self, ctx: &egui::Context, buf: Option<&PixelBuffer>) {
        let empty = PixelBuffer::zero_area(0, 0);
        let source = buf.unwrap_or(&empty);
        let (shown, scale) = prepare_for_display(source, PREVIEW_WIDTH, PREVIEW_HEIGHT);

        self.scale = scale;
        self.shown_size = egui::vec2(shown.width as f32, shown.height as f32);
        let color_image = egui::ColorImage::from_rgb(
            [shown.width as usize, shown.height as usize],
            &shown.pixels,
        );
        self.texture = Some(ctx.load_texture(self.label, color_image, egui::TextureOptions::LINEAR));
    }

    /// Draw the pane and return its drag-aware response plus the rect the
    /// image actually occupies (centered inside the box).
    pub fn show(&self, ui: &mut egui::Ui) -> (egui::Response, egui::Rect) {
        let box_size = egui::vec2(PREVIEW_WIDTH as f32, PREVIEW_HEIGHT as f32);
        let (rect, response) = ui.allocate_exact_size(box_size, egui::Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 2.0, egui::Color32::from_gray(24));

        let image_rect = match &self.texture {
            Some(texture) => {
                let top_left = rect.center() - self.shown_size / 2.0;
                let image_rect = egui::Rect::from_min_size(top_left, self.shown_size);
                painter.image(
                    texture.id(),
                    image_rect,
                    egui::Rect::from_min_max(egui::Pos2::ZERO, egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
                image_rect
            }
            None => rect,
        };

        (response, image_rect)
    }
}

/// Map a screen point to integer image coordinates given the top-left of
/// the drawn image and the display scale. Points outside the image come
/// back negative or past the edge; the core clamps them.
pub fn screen_to_image(pos: egui::Pos2, image_origin: egui::Pos2, scale: f64) -> (i64, i64) {
    let x = ((pos.x - image_origin.x) as f64 / scale).floor() as i64;
    let y = ((pos.y - image_origin.y) as f64 / scale).floor() as i64;
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_to_image_at_origin() {
        let origin = egui::pos2(100.0, 50.0);
        assert_eq!(screen_to_image(origin, origin, 0.5), (0, 0));
    }

    #[test]
    fn test_screen_to_image_scales_up() {
        // Display at half size: 30 screen points right of the origin is
        // 60 image pixels.
        let origin = egui::pos2(10.0, 10.0);
        let pos = egui::pos2(40.0, 25.0);
        assert_eq!(screen_to_image(pos, origin, 0.5), (60, 30));
    }

    #[test]
    fn test_screen_to_image_outside_is_negative() {
        let origin = egui::pos2(100.0, 100.0);
        let pos = egui::pos2(90.0, 80.0);
        let (x, y) = screen_to_image(pos, origin, 1.0);
        assert!(x < 0 && y < 0);
    }
}
