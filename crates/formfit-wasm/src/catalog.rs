//! Static data and validation for the page: requirement lists, page titles
//! and the contact form.

use formfit_core::contact::ContactForm;
use formfit_core::requirement::{self, Requirement, REQUIREMENTS};
use formfit_core::{Category, Page, Step};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::types::js_error;

/// A requirement as shown in the selection list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequirementInfo {
    pub id: &'static str,
    pub category: Category,
    pub width: u32,
    pub height: u32,
    pub max_size_kb: Option<u32>,
    pub format: &'static str,
}

impl From<&Requirement> for RequirementInfo {
    fn from(req: &Requirement) -> Self {
        let (width, height) = req.pixel_size();
        Self {
            id: req.id,
            category: req.category,
            width,
            height,
            max_size_kb: req.max_size_kb,
            format: match req.format {
                requirement::RequirementFormat::Jpeg => "jpeg",
                requirement::RequirementFormat::Pdf => "pdf",
            },
        }
    }
}

/// A failed contact form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

pub(crate) fn requirement_infos(tab: Option<Category>) -> Vec<RequirementInfo> {
    REQUIREMENTS
        .iter()
        .filter(|r| tab.is_none_or(|c| r.category == c))
        .map(RequirementInfo::from)
        .collect()
}

pub(crate) fn contact_errors(form: &ContactForm) -> Vec<FieldError> {
    match form.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => errors
            .iter()
            .map(|e| FieldError {
                field: e.field().as_str(),
                message: e.to_string(),
            })
            .collect(),
    }
}

/// List requirements, optionally only those of one tab.
#[wasm_bindgen]
pub fn requirements(tab: Option<String>) -> Result<JsValue, JsValue> {
    let tab = tab
        .map(|t| t.parse::<Category>())
        .transpose()
        .map_err(js_error)?;
    serde_wasm_bindgen::to_value(&requirement_infos(tab)).map_err(js_error)
}

/// Document title for a URL hash.
#[wasm_bindgen]
pub fn page_title(hash: &str) -> String {
    Page::from_hash(hash).title().to_string()
}

/// Translation key of a step indicator label (1 = upload, 2 = requirement,
/// 3 = editor). `undefined` for any other number.
#[wasm_bindgen]
pub fn step_label_key(step: u8) -> Option<String> {
    Step::from_number(step).map(|s| s.label_key().to_string())
}

/// Validate a `{ name, email, subject, message }` object.
///
/// Returns an array of `{ field, message }`; empty when the form is valid.
#[wasm_bindgen]
pub fn validate_contact(form: JsValue) -> Result<JsValue, JsValue> {
    let form: ContactForm = serde_wasm_bindgen::from_value(form).map_err(js_error)?;
    serde_wasm_bindgen::to_value(&contact_errors(&form)).map_err(js_error)
}
