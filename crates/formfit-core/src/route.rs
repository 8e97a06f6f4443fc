//! Hash routing between the tool and the static pages.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::wizard::{Step, Wizard, WizardError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Home,
    About,
    Contact,
    Privacy,
    Disclaimer,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Home,
        Page::About,
        Page::Contact,
        Page::Privacy,
        Page::Disclaimer,
    ];

    /// Parse `#about`, `about` or an empty hash. Anything unknown is Home.
    pub fn from_hash(hash: &str) -> Self {
        let name = hash.trim().trim_start_matches('#').to_ascii_lowercase();
        Page::ALL
            .into_iter()
            .find(|p| p.name() == name)
            .unwrap_or(Page::Home)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::About => "about",
            Page::Contact => "contact",
            Page::Privacy => "privacy",
            Page::Disclaimer => "disclaimer",
        }
    }

    /// Document title for the page.
    pub const fn title(self) -> &'static str {
        match self {
            Page::Home => "Pan Card Photo Resizer - Free Online Tool",
            Page::About => "About - Pan Card Photo Resizer",
            Page::Contact => "Contact Us - Pan Card Photo Resizer",
            Page::Privacy => "Privacy Policy - Pan Card Photo Resizer",
            Page::Disclaimer => "Disclaimer - Pan Card Photo Resizer",
        }
    }
}

/// Switch to `page`. Home always starts the tool over at the upload step.
pub fn navigate(page: Page, wizard: &mut Wizard) -> Result<Page, WizardError> {
    debug!(page = page.name(), "navigate");
    if page == Page::Home {
        wizard.go_to(Step::Upload)?;
    }
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::FileInput;

    #[test]
    fn test_from_hash() {
        assert_eq!(Page::from_hash("#contact"), Page::Contact);
        assert_eq!(Page::from_hash("privacy"), Page::Privacy);
        assert_eq!(Page::from_hash("#Disclaimer"), Page::Disclaimer);
        assert_eq!(Page::from_hash(""), Page::Home);
        assert_eq!(Page::from_hash("#pricing"), Page::Home);
    }

    #[test]
    fn test_titles() {
        assert_eq!(Page::Home.title(), "Pan Card Photo Resizer - Free Online Tool");
        assert_eq!(Page::Contact.title(), "Contact Us - Pan Card Photo Resizer");
        assert_eq!(Page::from_hash(Page::About.name()), Page::About);
    }

    #[test]
    fn test_home_restarts_wizard() {
        let mut wizard = Wizard::new();
        wizard
            .select_file(&FileInput::new("scan.pdf", "application/pdf", b"%PDF"))
            .unwrap();

        navigate(Page::About, &mut wizard).unwrap();
        assert_eq!(wizard.step(), Step::Requirement);

        navigate(Page::Home, &mut wizard).unwrap();
        assert_eq!(wizard.step(), Step::Upload);
        assert!(wizard.file().is_none());
    }
}
