//! Wizard and editor WASM bindings.
//!
//! A single [`JsWizard`] drives the whole flow from JavaScript: the page feeds
//! it the picked file, the chosen requirement and the editor controls, and
//! draws [`JsWizard::canvas`] after every change.
//!
//! # Example
//!
//! ```typescript
//! const wizard = new JsWizard();
//! wizard.select_file(file.name, file.type, new Uint8Array(await file.arrayBuffer()));
//! wizard.select_requirement('pan-photo');
//! wizard.next();
//! wizard.set_brightness(20);
//! const canvas = wizard.canvas();
//! ctx.putImageData(new ImageData(new Uint8ClampedArray(canvas.pixels()), canvas.width), 0, 0);
//! ```
//!
//! Failed actions throw an `Error`; its `key` property, when set, is the
//! translation key of the alert to show.

use formfit_core::editor::Editor;
use formfit_core::encode::{ExportOptions, OutputFormat};
use formfit_core::route::{self, Page};
use formfit_core::transform::CropRect;
use formfit_core::upload::FileInput;
use formfit_core::{Category, Step, Wizard, WizardError};
use wasm_bindgen::prelude::*;

use crate::types::{js_error, wizard_error, JsBitmap, JsExportedFile};

#[wasm_bindgen]
pub struct JsWizard {
    inner: Wizard,
}

impl Default for JsWizard {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl JsWizard {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsWizard {
        JsWizard {
            inner: Wizard::new(),
        }
    }

    /// Current step number (1 = upload, 2 = requirement, 3 = editor)
    #[wasm_bindgen(getter)]
    pub fn step(&self) -> u8 {
        self.inner.step().number()
    }

    /// Highest step number the step indicator may jump to
    #[wasm_bindgen(getter)]
    pub fn max_available_step(&self) -> u8 {
        self.inner.max_available_step().number()
    }

    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> Option<String> {
        self.inner.file().map(|f| f.name.clone())
    }

    #[wasm_bindgen(getter)]
    pub fn requirement_id(&self) -> Option<String> {
        self.inner.requirement().map(|r| r.id.to_string())
    }

    #[wasm_bindgen(getter)]
    pub fn tab(&self) -> String {
        self.inner.tab().to_string()
    }

    pub fn select_file(&mut self, name: &str, mime_type: &str, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner
            .select_file(&FileInput::new(name, mime_type, bytes))
            .map_err(wizard_error)
    }

    pub fn select_requirement(&mut self, id: &str) -> Result<(), JsValue> {
        self.inner
            .select_requirement(id)
            .map(|_| ())
            .map_err(wizard_error)
    }

    pub fn clear_requirement(&mut self) -> Result<(), JsValue> {
        self.inner.clear_requirement().map_err(wizard_error)
    }

    /// Switch to the `photo`, `signature` or `document` tab.
    pub fn select_tab(&mut self, tab: &str) -> Result<(), JsValue> {
        let category: Category = tab.parse().map_err(js_error)?;
        self.inner.select_tab(category).map_err(wizard_error)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<u8, JsValue> {
        self.inner
            .next()
            .map(Step::number)
            .map_err(wizard_error)
    }

    pub fn previous(&mut self) -> Result<u8, JsValue> {
        self.inner
            .previous()
            .map(Step::number)
            .map_err(wizard_error)
    }

    /// Jump to a step from the step indicator.
    pub fn go_to(&mut self, step: u8) -> Result<u8, JsValue> {
        let target =
            Step::from_number(step).ok_or_else(|| js_error(format!("invalid step: {step}")))?;
        self.inner
            .go_to(target)
            .map(Step::number)
            .map_err(wizard_error)
    }

    /// Handle a hash change. Returns the document title for the new page.
    pub fn navigate(&mut self, hash: &str) -> Result<String, JsValue> {
        let page = route::navigate(Page::from_hash(hash), &mut self.inner).map_err(wizard_error)?;
        Ok(page.title().to_string())
    }

    /// The adjusted canvas to draw.
    pub fn canvas(&self) -> Result<JsBitmap, JsValue> {
        Ok(JsBitmap::from_bitmap(self.editor()?.canvas()))
    }

    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> i32 {
        self.inner
            .editor()
            .map_or(0, |e| e.adjustments().brightness)
    }

    #[wasm_bindgen(getter)]
    pub fn contrast(&self) -> i32 {
        self.inner
            .editor()
            .map_or(100, |e| e.adjustments().contrast)
    }

    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 {
        self.inner.editor().map_or(1.0, |e| e.zoom().factor())
    }

    pub fn set_brightness(&mut self, value: i32) -> Result<(), JsValue> {
        self.editor_mut()?.set_brightness(value);
        Ok(())
    }

    pub fn set_contrast(&mut self, value: i32) -> Result<(), JsValue> {
        self.editor_mut()?.set_contrast(value);
        Ok(())
    }

    pub fn zoom_in(&mut self) -> Result<(), JsValue> {
        self.editor_mut()?.zoom_in().map_err(js_error)
    }

    pub fn zoom_out(&mut self) -> Result<(), JsValue> {
        self.editor_mut()?.zoom_out().map_err(js_error)
    }

    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.editor_mut()?.reset().map_err(js_error)
    }

    pub fn enable_crop(&mut self) -> Result<(), JsValue> {
        self.editor_mut()?.enable_crop();
        Ok(())
    }

    /// Current crop box as `{ left, top, width, height }` fractions, or
    /// `undefined` outside crop mode.
    pub fn crop_box(&self) -> Result<JsValue, JsValue> {
        match self.inner.editor().and_then(Editor::crop_box) {
            Some(rect) => serde_wasm_bindgen::to_value(&rect).map_err(js_error),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Drag the crop box; returns the clamped box.
    pub fn move_crop_box(&mut self, left: f64, top: f64) -> Result<JsValue, JsValue> {
        let rect = self
            .editor_mut()?
            .move_crop_box(left, top)
            .map_err(js_error)?;
        crop_to_js(rect)
    }

    pub fn resize_crop_box(&mut self, width: f64, height: f64) -> Result<JsValue, JsValue> {
        let rect = self
            .editor_mut()?
            .resize_crop_box(width, height)
            .map_err(js_error)?;
        crop_to_js(rect)
    }

    pub fn apply_crop(&mut self) -> Result<(), JsValue> {
        self.editor_mut()?.apply_crop().map_err(js_error)
    }

    pub fn cancel_crop(&mut self) -> Result<(), JsValue> {
        self.editor_mut()?.cancel_crop();
        Ok(())
    }

    /// Export for the chosen requirement.
    ///
    /// `format` is `jpeg` or `png` (default: the requirement's format);
    /// `quality` is 0.0 to 1.0 (default 0.8).
    pub fn export(
        &self,
        format: Option<String>,
        quality: Option<f32>,
        fit_size_limit: bool,
    ) -> Result<JsExportedFile, JsValue> {
        let mut options = self
            .inner
            .requirement()
            .map(ExportOptions::for_requirement)
            .unwrap_or_default();
        if let Some(format) = format {
            options.format = format.parse::<OutputFormat>().map_err(js_error)?;
        }
        if let Some(quality) = quality {
            options.quality = quality;
        }
        options.fit_size_limit = fit_size_limit;

        self.inner
            .export(&options)
            .map(JsExportedFile::from)
            .map_err(wizard_error)
    }
}

impl JsWizard {
    fn editor(&self) -> Result<&Editor, JsValue> {
        let step = self.inner.step();
        self.inner.editor().ok_or_else(|| not_in_editor(step))
    }

    fn editor_mut(&mut self) -> Result<&mut Editor, JsValue> {
        let step = self.inner.step();
        self.inner.editor_mut().ok_or_else(|| not_in_editor(step))
    }
}

fn not_in_editor(step: Step) -> JsValue {
    wizard_error(WizardError::InvalidAction {
        action: "edit the image",
        step,
    })
}

fn crop_to_js(rect: CropRect) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&rect).map_err(js_error)
}
