use crate::domain::model::{Capsule, FieldUpdate, Wardrobe};

/// Current selection plus the slots the last submission fills.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormStore {
    capsule: Capsule,
    wardrobe: Option<Wardrobe>,
    error: Option<String>,
}

impl FormStore {
    pub fn new(capsule: Capsule) -> Self {
        Self {
            capsule,
            ..Default::default()
        }
    }

    pub fn capsule(&self) -> &Capsule {
        &self.capsule
    }

    pub fn wardrobe(&self) -> Option<&Wardrobe> {
        self.wardrobe.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The single callback every field widget reports through.
    pub fn update_field(&mut self, update: FieldUpdate) {
        tracing::debug!("Updating field {}", update.field().key());
        match update {
            FieldUpdate::Season(season) => self.capsule.season = season,
            FieldUpdate::Style(style) => self.capsule.style = style,
            FieldUpdate::NumberOfOutfits(bucket) => self.capsule.number_of_outfits = bucket,
            FieldUpdate::Colors(colors) => self.capsule.colors = colors,
            FieldUpdate::Preferences(preferences) => self.capsule.preferences = preferences,
        }
    }

    pub fn replace_capsule(&mut self, capsule: Capsule) {
        self.capsule = capsule;
    }

    pub fn clear_wardrobe(&mut self) {
        self.wardrobe = None;
    }

    pub fn set_wardrobe(&mut self, wardrobe: Wardrobe) {
        self.wardrobe = Some(wardrobe);
        self.error = None;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }
}
