//! Field widgets.
//!
//! Each widget is a pure function of the current sub-selection and holds no
//! state of its own. A rendered [`Control`] turns user intent back into a
//! [`FieldUpdate`] carrying the field's complete new value, which the caller
//! hands to `update_field`.

use crate::domain::model::{
    Capsule, Choice, Color, Field, FieldUpdate, NumberOfOutfits, Preference, Season, Style,
};
use crate::utils::error::Result;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlOption {
    pub key: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub field: Field,
    pub multiple: bool,
    pub options: Vec<ControlOption>,
}

impl Control {
    fn build<T: Choice>(field: Field, multiple: bool, is_selected: impl Fn(T) -> bool) -> Self {
        let options = T::all()
            .iter()
            .map(|&choice| ControlOption {
                key: choice.key(),
                label: choice.label(),
                selected: is_selected(choice),
            })
            .collect();
        Self {
            field,
            multiple,
            options,
        }
    }

    pub fn selected_keys(&self) -> Vec<&'static str> {
        self.options
            .iter()
            .filter(|option| option.selected)
            .map(|option| option.key)
            .collect()
    }

    /// The user picked exactly these options.
    pub fn select<S: AsRef<str>>(&self, values: &[S]) -> Result<FieldUpdate> {
        FieldUpdate::parse(self.field, values)
    }

    /// The user clicked one option: a single-choice control moves its
    /// selection there, a multi-choice control flips it in or out.
    pub fn toggle(&self, value: &str) -> Result<FieldUpdate> {
        if !self.multiple {
            return self.select(&[value]);
        }

        let clicked = FieldUpdate::parse(self.field, &[value])?;
        let mut keys = self.selected_keys();
        let clicked_key = match &clicked {
            FieldUpdate::Colors(set) => set.iter().next().map(|c| c.key()),
            FieldUpdate::Preferences(set) => set.iter().next().map(|p| p.key()),
            _ => None,
        };
        if let Some(key) = clicked_key {
            match keys.iter().position(|k| *k == key) {
                Some(index) => {
                    keys.remove(index);
                }
                None => keys.push(key),
            }
        }
        self.select(&keys)
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.field.label())?;
        for option in &self.options {
            let mark = match (self.multiple, option.selected) {
                (true, true) => "[x]",
                (true, false) => "[ ]",
                (false, true) => "(x)",
                (false, false) => "( )",
            };
            writeln!(f, "  {} {} ({})", mark, option.label, option.key)?;
        }
        Ok(())
    }
}

pub fn season_field(selected: Season) -> Control {
    Control::build(Field::Season, false, |season: Season| season == selected)
}

pub fn style_field(selected: Style) -> Control {
    Control::build(Field::Style, false, |style: Style| style == selected)
}

pub fn number_of_outfits_field(selected: NumberOfOutfits) -> Control {
    Control::build(Field::NumberOfOutfits, false, |bucket: NumberOfOutfits| {
        bucket == selected
    })
}

pub fn colors_field(selected: &BTreeSet<Color>) -> Control {
    Control::build(Field::Colors, true, |color: Color| selected.contains(&color))
}

pub fn preferences_field(selected: &BTreeSet<Preference>) -> Control {
    Control::build(Field::Preferences, true, |preference: Preference| {
        selected.contains(&preference)
    })
}

/// All widgets in page order.
pub fn render_fields(capsule: &Capsule) -> Vec<Control> {
    vec![
        season_field(capsule.season),
        style_field(capsule.style),
        number_of_outfits_field(capsule.number_of_outfits),
        preferences_field(&capsule.preferences),
        colors_field(&capsule.colors),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::FormStore;

    #[test]
    fn test_single_choice_marks_current_value() {
        let control = season_field(Season::SpringSummer);
        assert!(!control.multiple);
        assert_eq!(control.options.len(), 2);
        assert_eq!(control.selected_keys(), vec!["SpringSummer"]);
    }

    #[test]
    fn test_outfits_field_lists_every_bucket() {
        let control = number_of_outfits_field(NumberOfOutfits::From151to160);
        assert_eq!(control.options.len(), 15);
        assert_eq!(control.options[0].label, "From 10 to 20");
        assert_eq!(control.selected_keys(), vec!["From151to160"]);
    }

    #[test]
    fn test_multi_select_emits_full_set() {
        let selected: BTreeSet<Color> = [Color::Navy].into_iter().collect();
        let control = colors_field(&selected);

        let update = control.toggle("White").unwrap();
        assert_eq!(
            update,
            FieldUpdate::Colors([Color::White, Color::Navy].into_iter().collect())
        );

        let update = control.toggle("Navy").unwrap();
        assert_eq!(update, FieldUpdate::Colors(BTreeSet::new()));
    }

    #[test]
    fn test_toggle_on_single_choice_selects() {
        let control = style_field(Style::Casual);
        assert_eq!(control.toggle("Office").unwrap(), FieldUpdate::Style(Style::Office));
        assert!(control.toggle("Formal").is_err());
    }

    #[test]
    fn test_widgets_drive_store_through_update_field() {
        let mut store = FormStore::default();
        let controls = render_fields(store.capsule());
        let preferences = controls
            .iter()
            .find(|c| c.field == Field::Preferences)
            .unwrap();

        store.update_field(preferences.select(&["High Heels", "Pants"]).unwrap());

        let rerendered = preferences_field(&store.capsule().preferences);
        assert_eq!(rerendered.selected_keys(), vec!["Pants", "HighHeels"]);
    }

    #[test]
    fn test_render_text() {
        let text = style_field(Style::Office).to_string();
        assert!(text.starts_with("Style:\n"));
        assert!(text.contains("( ) Casual (Casual)"));
        assert!(text.contains("(x) Office (Office)"));
    }
}
