use crate::app::fields::render_fields;
use crate::core::store::FormStore;
use crate::domain::model::Wardrobe;
use std::fmt::Write;

pub fn render_wardrobe(wardrobe: &Wardrobe) -> String {
    let mut out = String::from("Your capsule wardrobe:\n");
    for item in wardrobe.items() {
        let colors = item
            .colors
            .iter()
            .map(|c| c.label())
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "  {:>3} x {:<16} {}", item.quantity, item.clothing.label(), colors);
    }
    let _ = writeln!(out, "  {} pieces in total", wardrobe.total_pieces());
    out
}

/// The whole page: field controls, the error line, then the wardrobe if any.
pub fn render_form(store: &FormStore) -> String {
    let mut out = String::new();
    for control in render_fields(store.capsule()) {
        let _ = writeln!(out, "{}", control);
    }

    if let Some(error) = store.error() {
        let _ = writeln!(out, "! {}", error);
        out.push('\n');
    }

    if let Some(wardrobe) = store.wardrobe() {
        out.push_str(&render_wardrobe(wardrobe));
    }
    out
}
