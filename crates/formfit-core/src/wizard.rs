//! The three-step flow: upload a file, pick a requirement, edit and export.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::decode::{decode_image, Bitmap, DecodeError};
use crate::editor::{Editor, EditorError};
use crate::encode::{ExportOptions, ExportedFile};
use crate::requirement::{self, Category, Requirement};
use crate::upload::{validate_file, FileInput, SelectedFile, UploadError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    #[default]
    Upload,
    Requirement,
    Editor,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::Upload, Step::Requirement, Step::Editor];

    /// One-based position shown in the step indicator.
    pub const fn number(self) -> u8 {
        match self {
            Step::Upload => 1,
            Step::Requirement => 2,
            Step::Editor => 3,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Step::ALL.into_iter().find(|s| s.number() == number)
    }

    /// Translation key of the step's label.
    pub const fn label_key(self) -> &'static str {
        match self {
            Step::Upload => "stepUpload",
            Step::Requirement => "stepRequirement",
            Step::Editor => "stepEditor",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Step::Upload => "upload",
            Step::Requirement => "requirement",
            Step::Editor => "editor",
        })
    }
}

#[derive(Debug, Error)]
pub enum WizardError {
    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("Failed to load image: {0}")]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error("No file selected")]
    NoFileSelected,

    #[error("Please select a document type to continue.")]
    NoDocumentType,

    #[error("The selected file has no image to edit")]
    NoImage,

    #[error("Unknown document type: {0}")]
    UnknownRequirement(String),

    #[error("Please complete the previous steps first.")]
    StepNotAvailable(Step),

    #[error("Cannot {action} in the {step} step")]
    InvalidAction { action: &'static str, step: Step },
}

impl WizardError {
    /// Translation key for the alert shown to the user, if there is one.
    pub fn message_key(&self) -> Option<&'static str> {
        match self {
            WizardError::Upload(UploadError::TooLarge { .. }) => Some("fileTooLarge"),
            WizardError::Upload(UploadError::UnsupportedType(_)) => Some("invalidFileType"),
            WizardError::Decode(_) => Some("imageLoadFailed"),
            WizardError::NoDocumentType => Some("pleaseSelectDocType"),
            WizardError::StepNotAvailable(_) => Some("completePreviousSteps"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Wizard {
    step: Step,
    file: Option<SelectedFile>,
    /// Decoded upload; `None` for PDFs.
    image: Option<Bitmap>,
    tab: Category,
    requirement: Option<&'static Requirement>,
    editor: Option<Editor>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self {
            step: Step::Upload,
            file: None,
            image: None,
            tab: Category::Photo,
            requirement: None,
            editor: None,
        }
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn image(&self) -> Option<&Bitmap> {
        self.image.as_ref()
    }

    pub fn tab(&self) -> Category {
        self.tab
    }

    pub fn requirement(&self) -> Option<&'static Requirement> {
        self.requirement
    }

    pub fn editor(&self) -> Option<&Editor> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut Editor> {
        self.editor.as_mut()
    }

    /// Accept an uploaded file and move to the requirement step.
    ///
    /// Images are decoded right away. On any error the wizard is unchanged.
    pub fn select_file(&mut self, input: &FileInput<'_>) -> Result<(), WizardError> {
        self.ensure_step(&[Step::Upload, Step::Requirement], "select a file")?;

        let file = validate_file(input).inspect_err(|e| {
            warn!(name = input.name, error = %e, "file rejected");
        })?;
        let image = if file.is_image() {
            Some(decode_image(input.bytes)?)
        } else {
            None
        };

        info!(
            name = %file.name,
            mime_type = %file.mime_type,
            size = file.size,
            decoded = image.is_some(),
            "file accepted"
        );
        self.file = Some(file);
        self.image = image;
        self.step = Step::Requirement;
        Ok(())
    }

    pub fn select_requirement(&mut self, id: &str) -> Result<&'static Requirement, WizardError> {
        self.ensure_step(&[Step::Requirement], "select a document type")?;
        let req =
            requirement::find(id).ok_or_else(|| WizardError::UnknownRequirement(id.to_string()))?;
        debug!(requirement = req.id, "document type selected");
        self.tab = req.category;
        self.requirement = Some(req);
        Ok(req)
    }

    pub fn clear_requirement(&mut self) -> Result<(), WizardError> {
        self.ensure_step(&[Step::Requirement], "clear the document type")?;
        self.requirement = None;
        Ok(())
    }

    /// Switch tab; the tab's first requirement becomes the selection.
    pub fn select_tab(&mut self, category: Category) -> Result<(), WizardError> {
        self.ensure_step(&[Step::Requirement], "switch tabs")?;
        self.tab = category;
        self.requirement = requirement::first_in_category(category);
        debug!(%category, requirement = self.requirement.map(|r| r.id), "tab switched");
        Ok(())
    }

    /// Move forward one step, checking what the target step needs.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Step, WizardError> {
        match self.step {
            Step::Upload => {
                if self.file.is_none() {
                    return Err(WizardError::NoFileSelected);
                }
                self.step = Step::Requirement;
            }
            Step::Requirement => {
                if self.requirement.is_none() {
                    warn!("next without a document type");
                    return Err(WizardError::NoDocumentType);
                }
                let image = self.image.as_ref().ok_or(WizardError::NoImage)?;
                self.editor = Some(Editor::new(image.clone())?);
                self.step = Step::Editor;
            }
            Step::Editor => {
                return Err(WizardError::InvalidAction {
                    action: "go forward",
                    step: Step::Editor,
                })
            }
        }
        debug!(step = %self.step, "moved forward");
        Ok(self.step)
    }

    pub fn previous(&mut self) -> Result<Step, WizardError> {
        match self.step {
            Step::Upload => {
                return Err(WizardError::InvalidAction {
                    action: "go back",
                    step: Step::Upload,
                })
            }
            Step::Requirement => {
                self.file = None;
                self.image = None;
                self.requirement = None;
                self.tab = Category::Photo;
                self.step = Step::Upload;
            }
            Step::Editor => {
                self.editor = None;
                self.step = Step::Requirement;
            }
        }
        debug!(step = %self.step, "moved back");
        Ok(self.step)
    }

    /// Furthest step the indicator lets the user jump to.
    pub fn max_available_step(&self) -> Step {
        match (&self.file, &self.image, self.requirement) {
            (None, _, _) => Step::Upload,
            (Some(_), Some(_), Some(_)) => Step::Editor,
            _ => Step::Requirement,
        }
    }

    /// Jump to `target` from the step indicator.
    ///
    /// Going back applies the same resets as [`Wizard::previous`].
    pub fn go_to(&mut self, target: Step) -> Result<Step, WizardError> {
        if target > self.max_available_step() {
            warn!(%target, "step not available yet");
            return Err(WizardError::StepNotAvailable(target));
        }
        while self.step > target {
            self.previous()?;
        }
        while self.step < target {
            self.next()?;
        }
        Ok(self.step)
    }

    /// Export the editor canvas for the chosen requirement.
    pub fn export(&self, options: &ExportOptions) -> Result<ExportedFile, WizardError> {
        match (&self.editor, self.requirement) {
            (Some(editor), Some(req)) => Ok(editor.export(req, options)?),
            _ => Err(WizardError::InvalidAction {
                action: "export",
                step: self.step,
            }),
        }
    }

    fn ensure_step(&self, allowed: &[Step], action: &'static str) -> Result<(), WizardError> {
        if allowed.contains(&self.step) {
            Ok(())
        } else {
            warn!(action, step = %self.step, "action not available");
            Err(WizardError::InvalidAction {
                action,
                step: self.step,
            })
        }
    }
}
