//! The editor step: crop, zoom, brightness/contrast and export.
//!
//! The editor keeps up to four bitmaps:
//! - the decoded source (never modified),
//! - the cropped source, only once a crop has been applied,
//! - the snapshot: the (cropped) source scaled to the current view,
//! - the canvas: the snapshot with brightness/contrast applied.
//!
//! Slider changes recompute the canvas from the snapshot. Zoom, crop and
//! reset recapture the snapshot from the source and then re-apply the
//! current sliders.

use thiserror::Error;
use tracing::debug;

use crate::adjustments::{apply_adjustments, Adjustments};
use crate::decode::{self, fit_within, Bitmap, DecodeError};
use crate::encode::{export_bitmap, EncodeError, ExportOptions, ExportedFile};
use crate::requirement::Requirement;
use crate::transform::{apply_crop, CropRect, Zoom};

/// Largest canvas shown before the user zooms.
pub const DISPLAY_MAX_WIDTH: u32 = 600;
pub const DISPLAY_MAX_HEIGHT: u32 = 400;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Crop mode is not enabled")]
    NotInCropMode,

    #[error("Failed to render canvas: {0}")]
    Render(#[from] DecodeError),

    #[error("Failed to export image: {0}")]
    Export(#[from] EncodeError),
}

/// How the canvas size is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    /// Shrink to fit the display box.
    Fit,
    /// Sized by the zoom factor.
    Zoomed,
}

#[derive(Debug, Clone)]
pub struct Editor {
    source: Bitmap,
    /// Committed crop, relative to `source`.
    crop: Option<CropRect>,
    /// `source` cut to `crop`; `None` while uncropped.
    cropped: Option<Bitmap>,
    snapshot: Bitmap,
    canvas: Bitmap,
    view: View,
    zoom: Zoom,
    adjustments: Adjustments,
    /// Present while crop mode is on; relative to the canvas.
    crop_box: Option<CropRect>,
}

impl Editor {
    /// Load a decoded bitmap into a fresh editor.
    ///
    /// # Errors
    ///
    /// Returns an error if `source` has a zero dimension.
    pub fn new(source: Bitmap) -> Result<Self, EditorError> {
        if source.is_empty() {
            return Err(DecodeError::InvalidDimensions {
                width: source.width,
                height: source.height,
            }
            .into());
        }

        let mut editor = Self {
            cropped: None,
            snapshot: empty_bitmap(),
            canvas: empty_bitmap(),
            source,
            crop: None,
            view: View::Fit,
            zoom: Zoom::default(),
            adjustments: Adjustments::default(),
            crop_box: None,
        };
        editor.recapture()?;
        Ok(editor)
    }

    /// The adjusted canvas, as the user sees it.
    pub fn canvas(&self) -> &Bitmap {
        &self.canvas
    }

    /// The unadjusted canvas the sliders are computed from.
    pub fn snapshot(&self) -> &Bitmap {
        &self.snapshot
    }

    pub fn source(&self) -> &Bitmap {
        &self.source
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn adjustments(&self) -> Adjustments {
        self.adjustments
    }

    pub fn committed_crop(&self) -> Option<CropRect> {
        self.crop
    }

    pub fn crop_box(&self) -> Option<CropRect> {
        self.crop_box
    }

    pub fn is_crop_mode(&self) -> bool {
        self.crop_box.is_some()
    }

    pub fn set_brightness(&mut self, brightness: i32) {
        self.set_adjustments(Adjustments::new(brightness, self.adjustments.contrast));
    }

    pub fn set_contrast(&mut self, contrast: i32) {
        self.set_adjustments(Adjustments::new(self.adjustments.brightness, contrast));
    }

    pub fn set_adjustments(&mut self, adjustments: Adjustments) {
        self.adjustments = Adjustments::new(adjustments.brightness, adjustments.contrast);
        self.refresh_canvas();
    }

    pub fn zoom_in(&mut self) -> Result<(), EditorError> {
        self.set_zoom(self.zoom.zoom_in())
    }

    pub fn zoom_out(&mut self) -> Result<(), EditorError> {
        self.set_zoom(self.zoom.zoom_out())
    }

    /// Redraw the canvas at `zoom`. The snapshot is recaptured and the
    /// current sliders are re-applied to it.
    pub fn set_zoom(&mut self, zoom: Zoom) -> Result<(), EditorError> {
        self.zoom = zoom;
        self.view = View::Zoomed;
        debug!(zoom = zoom.factor(), "zoom changed");
        self.recapture()
    }

    /// Enter crop mode with the default box.
    pub fn enable_crop(&mut self) {
        self.crop_box = Some(CropRect::default());
    }

    /// Drag the crop box to a new top-left corner.
    pub fn move_crop_box(&mut self, left: f64, top: f64) -> Result<CropRect, EditorError> {
        let rect = self.crop_box.as_mut().ok_or(EditorError::NotInCropMode)?;
        rect.move_to(left, top);
        Ok(*rect)
    }

    pub fn resize_crop_box(&mut self, width: f64, height: f64) -> Result<CropRect, EditorError> {
        let rect = self.crop_box.as_mut().ok_or(EditorError::NotInCropMode)?;
        rect.resize_to(width, height);
        Ok(*rect)
    }

    /// Leave crop mode and crop the image to the box.
    ///
    /// A second crop is applied within the first.
    pub fn apply_crop(&mut self) -> Result<(), EditorError> {
        let rect = self.crop_box.take().ok_or(EditorError::NotInCropMode)?;
        let committed = match self.crop {
            Some(outer) => outer.compose(&rect),
            None => rect,
        };
        debug!(?committed, "crop applied");
        self.crop = Some(committed);
        self.cropped = None;
        self.cropped = Some(apply_crop(&self.source, &committed));
        self.recapture()
    }

    /// Leave crop mode without cropping.
    pub fn cancel_crop(&mut self) {
        self.crop_box = None;
    }

    /// Back to the freshly loaded state: no crop, zoom 1, default sliders.
    pub fn reset(&mut self) -> Result<(), EditorError> {
        self.crop = None;
        self.crop_box = None;
        self.cropped = None;
        self.zoom = Zoom::default();
        self.view = View::Fit;
        self.adjustments = Adjustments::default();
        debug!("editor reset");
        self.recapture()
    }

    /// Export the current canvas at the requirement's exact size.
    pub fn export(
        &self,
        requirement: &Requirement,
        options: &ExportOptions,
    ) -> Result<ExportedFile, EditorError> {
        Ok(export_bitmap(&self.canvas, requirement, options)?)
    }

    /// What the view is drawn from: the cropped source, or the source.
    fn view_source(&self) -> &Bitmap {
        self.cropped.as_ref().unwrap_or(&self.source)
    }

    fn canvas_size(&self) -> (u32, u32) {
        let view = self.view_source();
        let (w, h) = (view.width, view.height);
        match self.view {
            View::Fit => fit_within(w, h, DISPLAY_MAX_WIDTH, DISPLAY_MAX_HEIGHT),
            View::Zoomed => self.zoom.canvas_size(w, h),
        }
    }

    /// Redraw the snapshot from the view source and re-apply the sliders.
    ///
    /// The old snapshot and canvas are released before the new snapshot is
    /// allocated. If the resize fails both are left empty.
    fn recapture(&mut self) -> Result<(), EditorError> {
        let (width, height) = self.canvas_size();
        self.snapshot = empty_bitmap();
        self.canvas = empty_bitmap();
        self.snapshot = decode::resize(self.view_source(), width, height)?;
        self.refresh_canvas();
        Ok(())
    }

    /// Recompute the canvas from the snapshot, reusing the canvas buffer.
    fn refresh_canvas(&mut self) {
        let mut pixels = std::mem::take(&mut self.canvas.pixels);
        pixels.clear();
        pixels.extend_from_slice(&self.snapshot.pixels);
        apply_adjustments(&mut pixels, &self.adjustments);
        self.canvas = Bitmap::new(self.snapshot.width, self.snapshot.height, pixels);
    }
}

fn empty_bitmap() -> Bitmap {
    Bitmap::new(0, 0, Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirement;

    /// Left half black, right half white.
    fn split_bitmap(width: u32, height: u32) -> Bitmap {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..height {
            for x in 0..width {
                let v = if x < width / 2 { 0 } else { 255 };
                pixels.extend_from_slice(&[v, v, v, 255]);
            }
        }
        Bitmap::new(width, height, pixels)
    }

    #[test]
    fn test_new_fits_display() {
        let editor = Editor::new(Bitmap::filled(1200, 600, [50, 50, 50, 255])).unwrap();
        assert_eq!((editor.canvas().width, editor.canvas().height), (600, 300));
        assert_eq!(editor.zoom().factor(), 1.0);
    }

    #[test]
    fn test_new_small_image_not_upscaled() {
        let editor = Editor::new(Bitmap::filled(120, 80, [0, 0, 0, 255])).unwrap();
        assert_eq!((editor.canvas().width, editor.canvas().height), (120, 80));
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(Editor::new(Bitmap::new(0, 0, vec![])).is_err());
    }

    #[test]
    fn test_brightness_from_snapshot() {
        let mut editor = Editor::new(Bitmap::filled(10, 10, [100, 100, 100, 255])).unwrap();

        editor.set_brightness(50);
        editor.set_brightness(20);
        assert_eq!(editor.canvas().pixel(0, 0), Some([120, 120, 120, 255]));
        assert_eq!(editor.snapshot().pixel(0, 0), Some([100, 100, 100, 255]));

        editor.set_brightness(0);
        assert_eq!(editor.canvas(), editor.snapshot());
    }

    #[test]
    fn test_contrast_clamped() {
        let mut editor = Editor::new(Bitmap::filled(2, 2, [0, 0, 0, 255])).unwrap();
        editor.set_contrast(1000);
        assert_eq!(editor.adjustments().contrast, 200);
    }

    #[test]
    fn test_zoom_redraws_at_half_source_size() {
        let mut editor = Editor::new(Bitmap::filled(1000, 800, [9, 9, 9, 255])).unwrap();
        editor.set_zoom(Zoom::new(2.0)).unwrap();
        assert_eq!((editor.canvas().width, editor.canvas().height), (1000, 800));

        editor.set_zoom(Zoom::new(1.0)).unwrap();
        assert_eq!((editor.canvas().width, editor.canvas().height), (500, 400));
    }

    #[test]
    fn test_zoom_reapplies_adjustments() {
        let mut editor = Editor::new(Bitmap::filled(100, 100, [100, 100, 100, 255])).unwrap();
        editor.set_brightness(10);
        editor.zoom_in().unwrap();

        assert_eq!(editor.snapshot().pixel(0, 0), Some([100, 100, 100, 255]));
        assert_eq!(editor.canvas().pixel(0, 0), Some([110, 110, 110, 255]));
    }

    #[test]
    fn test_zoom_stays_clamped() {
        let mut editor = Editor::new(Bitmap::filled(20, 20, [0, 0, 0, 255])).unwrap();
        for _ in 0..30 {
            editor.zoom_out().unwrap();
        }
        assert_eq!(editor.zoom().factor(), crate::transform::MIN_ZOOM);
        assert!(editor.canvas().width >= 1);
    }

    #[test]
    fn test_crop_box_requires_crop_mode() {
        let mut editor = Editor::new(Bitmap::filled(10, 10, [0, 0, 0, 255])).unwrap();
        assert!(matches!(
            editor.move_crop_box(0.1, 0.1),
            Err(EditorError::NotInCropMode)
        ));
        assert!(matches!(editor.apply_crop(), Err(EditorError::NotInCropMode)));
    }

    #[test]
    fn test_enable_crop_uses_default_box() {
        let mut editor = Editor::new(Bitmap::filled(10, 10, [0, 0, 0, 255])).unwrap();
        editor.enable_crop();
        assert!(editor.is_crop_mode());
        assert_eq!(editor.crop_box(), Some(CropRect::default()));
    }

    #[test]
    fn test_apply_crop_mutates_pixels() {
        let mut editor = Editor::new(split_bitmap(100, 50)).unwrap();
        editor.enable_crop();
        editor.move_crop_box(0.0, 0.0).unwrap();
        editor.resize_crop_box(0.5, 1.0).unwrap();
        editor.apply_crop().unwrap();

        assert!(!editor.is_crop_mode());
        assert_eq!((editor.canvas().width, editor.canvas().height), (50, 50));
        assert!(editor.canvas().pixels.chunks_exact(4).all(|p| p[0] == 0));
    }

    #[test]
    fn test_second_crop_composes() {
        let mut editor = Editor::new(Bitmap::filled(100, 100, [0, 0, 0, 255])).unwrap();
        editor.enable_crop();
        editor.apply_crop().unwrap();
        editor.enable_crop();
        editor.apply_crop().unwrap();

        let crop = editor.committed_crop().unwrap();
        // 0.2 + 0.2 * 0.6 = 0.32; 0.6 * 0.6 = 0.36
        assert!((crop.left - 0.32).abs() < 1e-9);
        assert!((crop.width - 0.36).abs() < 1e-9);
        assert_eq!(editor.canvas().width, 36);
    }

    #[test]
    fn test_cancel_crop_keeps_pixels() {
        let mut editor = Editor::new(Bitmap::filled(40, 40, [0, 0, 0, 255])).unwrap();
        editor.enable_crop();
        editor.cancel_crop();
        assert!(!editor.is_crop_mode());
        assert_eq!(editor.committed_crop(), None);
        assert_eq!(editor.canvas().width, 40);
    }

    #[test]
    fn test_reset() {
        let mut editor = Editor::new(Bitmap::filled(1200, 600, [60, 60, 60, 255])).unwrap();
        editor.set_brightness(40);
        editor.set_contrast(150);
        editor.zoom_in().unwrap();
        editor.enable_crop();
        editor.apply_crop().unwrap();

        editor.reset().unwrap();

        assert_eq!(editor.adjustments(), Adjustments::default());
        assert_eq!(editor.zoom().factor(), 1.0);
        assert_eq!(editor.committed_crop(), None);
        assert_eq!((editor.canvas().width, editor.canvas().height), (600, 300));
        assert_eq!(editor.canvas(), editor.snapshot());
    }

    #[test]
    fn test_slider_change_reuses_canvas_buffer() {
        let mut editor = Editor::new(Bitmap::filled(64, 64, [80, 80, 80, 255])).unwrap();
        let before = editor.canvas().pixels.as_ptr();

        editor.set_brightness(15);
        editor.set_contrast(140);

        assert_eq!(editor.canvas().pixels.as_ptr(), before);
        assert_eq!(editor.snapshot().pixel(0, 0), Some([80, 80, 80, 255]));
    }

    #[test]
    fn test_uncropped_editor_keeps_no_cropped_copy() {
        let mut editor = Editor::new(Bitmap::filled(100, 100, [0, 0, 0, 255])).unwrap();
        assert!(editor.cropped.is_none());

        editor.enable_crop();
        editor.apply_crop().unwrap();
        assert_eq!(editor.cropped.as_ref().map(|b| b.width), Some(60));

        editor.zoom_in().unwrap();
        editor.reset().unwrap();
        assert!(editor.cropped.is_none());
        assert_eq!(editor.canvas().width, 100);
    }

    #[test]
    fn test_export_ignores_aspect_ratio() {
        let mut editor = Editor::new(Bitmap::filled(900, 300, [30, 60, 90, 255])).unwrap();
        editor.set_brightness(10);
        let req = requirement::find("pan-photo").unwrap();

        let file = editor.export(req, &ExportOptions::default()).unwrap();

        assert_eq!((file.width, file.height), (200, 240));
        assert_eq!(file.file_name, "resized-pan-photo.jpeg");
    }

    #[test]
    fn test_crop_changes_content_not_export_size() {
        let req = requirement::find("pan-signature").unwrap();
        let options = ExportOptions {
            format: crate::encode::OutputFormat::Png,
            ..ExportOptions::default()
        };

        let mut editor = Editor::new(split_bitmap(100, 50)).unwrap();
        let before = editor.export(req, &options).unwrap();

        editor.enable_crop();
        editor.move_crop_box(0.0, 0.0).unwrap();
        editor.resize_crop_box(0.5, 1.0).unwrap();
        editor.move_crop_box(0.5, 0.0).unwrap();
        editor.apply_crop().unwrap();
        let after = editor.export(req, &options).unwrap();

        assert_eq!((after.width, after.height), (before.width, before.height));
        assert_ne!(after.bytes, before.bytes);
        let decoded = crate::decode::decode_image(&after.bytes).unwrap();
        assert!(decoded.pixels.chunks_exact(4).all(|p| p[0] == 255));
    }
}
