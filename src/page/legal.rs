use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegalDocument {
    Privacy,
    Terms,
    Legal,
    Sitemap,
}

impl LegalDocument {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            LegalDocument::Privacy => "Privacy Policy",
            LegalDocument::Terms => "Terms of Use",
            LegalDocument::Legal => "Legal Notice",
            LegalDocument::Sitemap => "Site Map",
        }
    }
}

/// The footer's legal modal; at most one document is open.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalModalState {
    active: Option<LegalDocument>,
}

impl LegalModalState {
    #[must_use]
    pub fn active(&self) -> Option<LegalDocument> {
        self.active
    }

    pub fn open(&mut self, document: LegalDocument) {
        self.active = Some(document);
    }

    pub fn close(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_replaces_the_active_document() {
        let mut modal = LegalModalState::default();
        modal.open(LegalDocument::Privacy);
        modal.open(LegalDocument::Terms);

        assert_eq!(modal.active(), Some(LegalDocument::Terms));
        assert_eq!(LegalDocument::Terms.title(), "Terms of Use");

        modal.close();
        assert_eq!(modal.active(), None);
    }
}
