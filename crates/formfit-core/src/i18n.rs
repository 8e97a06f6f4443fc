//! English/Hindi label lookup with a persisted language choice.
//!
//! Lookups fall back to English, then to the key itself, so a missing
//! translation never renders as an empty label.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Storage key holding the selected language code.
pub const LANGUAGE_KEY: &str = "language";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Hi];

    pub const fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
        }
    }

    /// Parse a stored language code. Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        Language::ALL.into_iter().find(|l| l.code() == code)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s.trim()).ok_or_else(|| format!("unsupported language: {s}"))
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Preference storage unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to write preference: {0}")]
    Write(String),
}

/// Key-value storage for user preferences (browser `localStorage`, a file).
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

type Table = &'static [(&'static str, &'static str)];

static EN: Table = &[
    ("mainTitle", "Photo, Signature & Document Converter For Pan card Application"),
    (
        "mainSubtitle",
        "Free Online Photograph, Signature and Document Converter and resizer tool for a pan card application form.",
    ),
    ("stepUpload", "Upload"),
    ("stepRequirement", "Requirement"),
    ("stepEditor", "Editor"),
    ("dropText", "Drop your photo here!"),
    ("selectFile", "Select File"),
    ("maxSize", "maximum file size: 10 MB"),
    ("previous", "Previous"),
    ("next", "Next"),
    ("download", "Download"),
    ("pleaseSelectDocType", "Please select a document type to continue."),
    ("completePreviousSteps", "Please complete the previous steps first."),
    ("fileTooLarge", "File size exceeds 10MB limit"),
    (
        "invalidFileType",
        "Please select a valid image file (JPG, PNG) or PDF document",
    ),
    ("imageLoadFailed", "Failed to load image. Please try a different file."),
    ("imageCreateFailed", "Failed to create image"),
    ("noImageToDownload", "No image to download"),
];

static HI: Table = &[
    ("mainTitle", "पैन कार्ड आवेदन के लिए फोटो, हस्ताक्षर और डॉक्यूमेंट कनवर्टर"),
    (
        "mainSubtitle",
        "पैन कार्ड आवेदन पत्र के लिए नि:शुल्क ऑनलाइन फोटोग्राफ, हस्ताक्षर और डॉक्यूमेंट कनवर्टर और आकार बदलने वाला टूल।",
    ),
    ("stepUpload", "अपलोड"),
    ("stepRequirement", "आवश्यकता"),
    ("stepEditor", "एडीटर"),
    ("dropText", "अपनी फोटो यहाँ गिराओ!"),
    ("selectFile", "फ़ाइल् पसंद करे"),
    ("maxSize", "अधिकतम फ़ाइल की साइज: 10 MB"),
    ("previous", "पीछे"),
    ("next", "आगे बढे"),
    ("download", "डाउनलोड"),
];

fn table(language: Language) -> Table {
    match language {
        Language::En => EN,
        Language::Hi => HI,
    }
}

fn lookup(language: Language, key: &str) -> Option<&'static str> {
    table(language)
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

/// Every label key, in table order.
pub fn keys() -> impl Iterator<Item = &'static str> {
    EN.iter().map(|(k, _)| *k)
}

/// Translate `key`, falling back to English and then to the key itself.
pub fn translate(language: Language, key: &str) -> &str {
    lookup(language, key)
        .or_else(|| lookup(Language::En, key))
        .unwrap_or(key)
}

/// The active language plus the store it is persisted in.
#[derive(Debug)]
pub struct Translator<S> {
    language: Language,
    store: S,
}

impl<S: PreferenceStore> Translator<S> {
    /// Restore the language saved in `store`; English if none or unknown.
    pub fn new(store: S) -> Self {
        let language = match store.get(LANGUAGE_KEY) {
            Some(code) => Language::from_code(&code).unwrap_or_else(|| {
                warn!(%code, "ignoring unknown stored language");
                Language::En
            }),
            None => Language::En,
        };
        Self { language, store }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Switch language and persist the choice.
    ///
    /// # Errors
    ///
    /// Returns an error if the store refuses the write; the language is then
    /// left unchanged.
    pub fn set_language(&mut self, language: Language) -> Result<(), StoreError> {
        self.store.set(LANGUAGE_KEY, language.code())?;
        debug!(%language, "language switched");
        self.language = language;
        Ok(())
    }

    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        translate(self.language, key)
    }

    /// All labels in the active language, for refreshing every visible text.
    pub fn labels(&self) -> BTreeMap<&'static str, &'static str> {
        keys().map(|k| (k, translate(self.language, k))).collect()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
