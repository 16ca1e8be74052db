pub mod legal;
pub mod lightbox;

use serde::{Deserialize, Serialize};

use crate::page::legal::{LegalDocument, LegalModalState};
use crate::page::lightbox::{LightboxKey, LightboxState};

/// Page-wide UI state outside the booking panel.
///
/// Each slice owns its own transitions; this only routes page events to
/// them. The booking panel is a separate `Reservation` aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageState {
    image_ids: Vec<String>,
    lightbox: LightboxState,
    legal: LegalModalState,
}

impl PageState {
    #[must_use]
    pub fn new(image_ids: Vec<String>) -> Self {
        let lightbox = LightboxState::new(image_ids.len());
        Self {
            image_ids,
            lightbox,
            legal: LegalModalState::default(),
        }
    }

    #[must_use]
    pub fn lightbox(&self) -> &LightboxState {
        &self.lightbox
    }

    pub fn lightbox_mut(&mut self) -> &mut LightboxState {
        &mut self.lightbox
    }

    #[must_use]
    pub fn legal(&self) -> &LegalModalState {
        &self.legal
    }

    /// Id of the image showing in the lightbox.
    #[must_use]
    pub fn current_image(&self) -> Option<&str> {
        self.lightbox
            .selected()
            .and_then(|index| self.image_ids.get(index))
            .map(String::as_str)
    }

    /// A thumbnail anywhere on the page was clicked. Unknown ids are ignored.
    pub fn open_image(&mut self, id: &str) {
        if let Some(index) = self.image_ids.iter().position(|known| known == id) {
            self.lightbox.open(index);
        }
    }

    pub fn open_legal(&mut self, document: LegalDocument) {
        self.legal.open(document);
    }

    pub fn close_legal(&mut self) {
        self.legal.close();
    }

    /// Keyboard input goes to the lightbox when it is open; otherwise Escape
    /// closes the legal modal.
    pub fn handle_key(&mut self, key: LightboxKey) {
        if self.lightbox.is_open() {
            self.lightbox.handle_key(key);
        } else if key == LightboxKey::Escape {
            self.legal.close();
        }
    }
}
