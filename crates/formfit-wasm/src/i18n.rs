//! Translation bindings backed by `window.localStorage`.

use formfit_core::i18n::{PreferenceStore, StoreError, Translator};
use formfit_core::Language;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::types::js_error;

/// `window.localStorage`, when the page has one.
///
/// Private browsing modes can deny storage; reads then return nothing and
/// writes fail with [`StoreError::Unavailable`].
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

impl LocalStorage {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        Self { storage }
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("localStorage".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|e| StoreError::Write(format!("{e:?}")))
    }
}

/// Label lookup for the page, restoring the saved language on creation.
#[wasm_bindgen]
pub struct JsTranslator {
    inner: Translator<LocalStorage>,
}

impl Default for JsTranslator {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl JsTranslator {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsTranslator {
        JsTranslator {
            inner: Translator::new(LocalStorage::new()),
        }
    }

    /// Active language code (`en` or `hi`)
    #[wasm_bindgen(getter)]
    pub fn language(&self) -> String {
        self.inner.language().code().to_string()
    }

    /// Switch language and save it under the `language` key.
    pub fn set_language(&mut self, code: &str) -> Result<(), JsValue> {
        let language: Language = code.parse().map_err(js_error)?;
        self.inner.set_language(language).map_err(js_error)
    }

    pub fn t(&self, key: &str) -> String {
        self.inner.t(key).to_string()
    }

    /// Every label in the active language as a `{ key: text }` object.
    pub fn labels(&self) -> Result<JsValue, JsValue> {
        let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
        self.inner.labels().serialize(&serializer).map_err(js_error)
    }
}
