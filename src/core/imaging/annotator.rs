use std::path::Path;

use ab_glyph::{FontVec, PxScale};
use anyhow::{Context, Result};
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;

use crate::core::models::{Detection, PixelRect};
use crate::global_constants;

pub struct DetectionAnnotator {
    label_font: Option<FontVec>,
    box_color: Rgb<u8>,
    border_width: u32,
    font_scale: PxScale,
}

impl DetectionAnnotator {
    pub fn new(label_font: Option<FontVec>) -> Self {
        Self {
            label_font,
            box_color: Rgb(global_constants::ANNOTATION_BOX_RGB),
            border_width: global_constants::ANNOTATION_BORDER_WIDTH,
            font_scale: PxScale::from(global_constants::ANNOTATION_FONT_SIZE),
        }
    }

    pub async fn load(font_path: Option<&Path>) -> Result<Self> {
        let Some(font_path) = font_path else {
            log::warn!("[ANNOTATOR] No label font configured, boxes will be drawn without captions");
            return Ok(Self::new(None));
        };

        let font_data = tokio::fs::read(font_path)
            .await
            .with_context(|| format!("Failed to read label font {:?}", font_path))?;
        let font = FontVec::try_from_vec(font_data)
            .map_err(|error| anyhow::anyhow!("Unable to parse font {:?}: {}", font_path, error))?;

        log::info!("[ANNOTATOR] Loaded label font from {:?}", font_path);
        Ok(Self::new(Some(font)))
    }

    pub fn annotate(
        &self,
        image: &DynamicImage,
        detections: &[Detection],
        threshold: f64,
    ) -> DynamicImage {
        let mut canvas = image.to_rgb8();
        let (width, height) = canvas.dimensions();

        let mut drawn = 0;
        for detection in detections.iter().filter(|d| d.exceeds_threshold(threshold)) {
            let rect = detection.bounding_box.to_pixel_rect(width, height);
            if rect.is_empty() {
                log::debug!(
                    "[ANNOTATOR] Skipping zero-area box for '{}' at {:?}",
                    detection.label,
                    rect
                );
                continue;
            }

            self.draw_box(&mut canvas, &rect);
            self.draw_caption(&mut canvas, &rect, &caption_for(detection));
            drawn += 1;
        }

        log::debug!(
            "[ANNOTATOR] Drew {} of {} detections on {}x{} image",
            drawn,
            detections.len(),
            width,
            height
        );
        DynamicImage::ImageRgb8(canvas)
    }

    fn draw_box(&self, canvas: &mut RgbImage, rect: &PixelRect) {
        for offset in 0..self.border_width {
            let outline = Rect::at(rect.left as i32 - offset as i32, rect.top as i32 - offset as i32)
                .of_size(rect.width() + 2 * offset, rect.height() + 2 * offset);
            draw_hollow_rect_mut(canvas, outline, self.box_color);
        }
    }

    fn draw_caption(&self, canvas: &mut RgbImage, rect: &PixelRect, caption: &str) {
        let Some(font) = &self.label_font else {
            return;
        };

        let caption_top = rect.top as i32
            - global_constants::ANNOTATION_LABEL_GAP
            - self.font_scale.y.ceil() as i32;
        draw_text_mut(
            canvas,
            self.box_color,
            rect.left as i32,
            caption_top.max(0),
            self.font_scale,
            font,
            caption,
        );
    }
}

pub fn caption_for(detection: &Detection) -> String {
    format!("{}: {:.2}", detection.label, detection.confidence)
}
