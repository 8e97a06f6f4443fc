//! Document requirements: the fixed output sizes forms ask for.
//!
//! The table is static and immutable. Entries are keyed by a string id and
//! grouped into tabs (photo, signature, document); each tab's first entry is
//! what gets selected when the user switches to that tab.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::encode::OutputFormat;

const CM_PER_INCH: f64 = 2.54;

/// Tab a requirement is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Photo,
    Signature,
    Document,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Photo, Category::Signature, Category::Document];

    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Photo => "photo",
            Category::Signature => "signature",
            Category::Document => "document",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// Target size, either in pixels or as a printed size at a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "unit", rename_all = "lowercase")]
pub enum Dimensions {
    Pixels { width: u32, height: u32 },
    Centimeters { width: f64, height: f64, dpi: u32 },
}

impl Dimensions {
    /// Resolve to whole pixels. Printed sizes use `round(cm / 2.54 * dpi)`.
    pub fn to_pixels(self) -> (u32, u32) {
        match self {
            Dimensions::Pixels { width, height } => (width, height),
            Dimensions::Centimeters { width, height, dpi } => {
                let px = |cm: f64| (cm / CM_PER_INCH * f64::from(dpi)).round().max(1.0) as u32;
                (px(width), px(height))
            }
        }
    }
}

/// Format a requirement asks the file to be delivered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementFormat {
    Jpeg,
    Pdf,
}

impl RequirementFormat {
    /// The encoder format used when exporting for this requirement.
    ///
    /// There is no PDF encoder, so PDF requirements export as PNG.
    pub const fn default_output(self) -> OutputFormat {
        match self {
            RequirementFormat::Jpeg => OutputFormat::Jpeg,
            RequirementFormat::Pdf => OutputFormat::Png,
        }
    }
}

/// One entry of the requirement table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Requirement {
    pub id: &'static str,
    pub category: Category,
    pub dimensions: Dimensions,
    pub max_size_kb: Option<u32>,
    pub format: RequirementFormat,
}

impl Requirement {
    /// Target width and height in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        self.dimensions.to_pixels()
    }

    /// Maximum encoded size in bytes, if the requirement has one.
    pub fn max_size_bytes(&self) -> Option<usize> {
        self.max_size_kb.map(|kb| kb as usize * 1024)
    }
}

const fn px(
    id: &'static str,
    category: Category,
    width: u32,
    height: u32,
    format: RequirementFormat,
) -> Requirement {
    Requirement {
        id,
        category,
        dimensions: Dimensions::Pixels { width, height },
        max_size_kb: None,
        format,
    }
}

/// The full requirement table, in display order.
pub static REQUIREMENTS: &[Requirement] = &[
    Requirement {
        id: "photo",
        category: Category::Photo,
        dimensions: Dimensions::Centimeters {
            width: 2.5,
            height: 3.5,
            dpi: 300,
        },
        max_size_kb: Some(20),
        format: RequirementFormat::Jpeg,
    },
    px("pan-photo", Category::Photo, 200, 240, RequirementFormat::Jpeg),
    px("passport-photo", Category::Photo, 200, 240, RequirementFormat::Jpeg),
    px("aadhaar-photo", Category::Photo, 150, 200, RequirementFormat::Jpeg),
    Requirement {
        id: "signature",
        category: Category::Signature,
        dimensions: Dimensions::Centimeters {
            width: 4.5,
            height: 2.0,
            dpi: 600,
        },
        max_size_kb: Some(50),
        format: RequirementFormat::Jpeg,
    },
    px("pan-signature", Category::Signature, 140, 60, RequirementFormat::Jpeg),
    px("bank-signature", Category::Signature, 140, 60, RequirementFormat::Jpeg),
    px("a4-document", Category::Document, 595, 842, RequirementFormat::Pdf),
    px("letter-document", Category::Document, 612, 792, RequirementFormat::Pdf),
];

/// Look up a requirement by id.
pub fn find(id: &str) -> Option<&'static Requirement> {
    REQUIREMENTS.iter().find(|r| r.id == id)
}

/// All requirements listed under a tab.
pub fn in_category(category: Category) -> impl Iterator<Item = &'static Requirement> {
    REQUIREMENTS.iter().filter(move |r| r.category == category)
}

/// The entry selected by default when switching to a tab.
pub fn first_in_category(category: Category) -> Option<&'static Requirement> {
    in_category(category).next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = REQUIREMENTS.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), REQUIREMENTS.len());
    }

    #[test]
    fn test_pan_photo_cm_resolves_to_pixels() {
        // 2.5cm @ 300dpi = 295.27 -> 295; 3.5cm = 413.39 -> 413
        assert_eq!(find("photo").unwrap().pixel_size(), (295, 413));
    }

    #[test]
    fn test_pan_signature_cm_resolves_to_pixels() {
        // 4.5cm @ 600dpi = 1062.99 -> 1063; 2.0cm = 472.44 -> 472
        assert_eq!(find("signature").unwrap().pixel_size(), (1063, 472));
    }

    #[test]
    fn test_pixel_entries() {
        assert_eq!(find("pan-photo").unwrap().pixel_size(), (200, 240));
        assert_eq!(find("aadhaar-photo").unwrap().pixel_size(), (150, 200));
        assert_eq!(find("bank-signature").unwrap().pixel_size(), (140, 60));
        assert_eq!(find("letter-document").unwrap().pixel_size(), (612, 792));
    }

    #[test]
    fn test_find_unknown() {
        assert!(find("driving-licence").is_none());
    }

    #[test]
    fn test_first_in_category() {
        assert_eq!(first_in_category(Category::Photo).unwrap().id, "photo");
        assert_eq!(first_in_category(Category::Signature).unwrap().id, "signature");
        assert_eq!(first_in_category(Category::Document).unwrap().id, "a4-document");
    }

    #[test]
    fn test_in_category_counts() {
        assert_eq!(in_category(Category::Photo).count(), 4);
        assert_eq!(in_category(Category::Signature).count(), 3);
        assert_eq!(in_category(Category::Document).count(), 2);
    }

    #[test]
    fn test_max_size_bytes() {
        assert_eq!(find("photo").unwrap().max_size_bytes(), Some(20 * 1024));
        assert_eq!(find("pan-photo").unwrap().max_size_bytes(), None);
    }

    #[test]
    fn test_pdf_requirements_export_png() {
        let a4 = find("a4-document").unwrap();
        assert_eq!(a4.format.default_output(), OutputFormat::Png);
        assert_eq!(
            find("pan-photo").unwrap().format.default_output(),
            OutputFormat::Jpeg
        );
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("signature".parse::<Category>().unwrap(), Category::Signature);
        assert!("video".parse::<Category>().is_err());
    }
}
