use crate::utils::error::CapsuleError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A closed set of options a form control offers.
pub trait Choice: Copy + Eq + 'static {
    fn all() -> &'static [Self];
    fn key(self) -> &'static str;
    fn label(self) -> &'static str;
}

/// Declares a closed set of form choices.
///
/// Each variant carries a wire key (what goes into tokens and what the
/// wardrobe service speaks) and a display label. Parsing accepts either,
/// falling back to a case-insensitive match.
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => ($key:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn key(self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl Choice for $name {
            fn all() -> &'static [Self] {
                Self::ALL
            }

            fn key(self) -> &'static str {
                $name::key(self)
            }

            fn label(self) -> &'static str {
                $name::label(self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = CapsuleError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|c| c.key() == s || c.label() == s)
                    .or_else(|| {
                        Self::ALL.iter().copied().find(|c| {
                            c.key().eq_ignore_ascii_case(s) || c.label().eq_ignore_ascii_case(s)
                        })
                    })
                    .ok_or_else(|| CapsuleError::InvalidFieldValue {
                        field: $kind.to_string(),
                        value: s.to_string(),
                    })
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.key())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

choice_enum! {
    Season, "season" {
        AutumnWinter => ("AutumnWinter", "Autumn/Winter"),
        SpringSummer => ("SpringSummer", "Spring/Summer"),
    }
}

choice_enum! {
    Style, "style" {
        Casual => ("Casual", "Casual"),
        Office => ("Office", "Office"),
    }
}

choice_enum! {
    /// Outfit-count bucket, in steps of ten.
    NumberOfOutfits, "number of outfits" {
        From10to20 => ("From10to20", "From 10 to 20"),
        From21to30 => ("From21to30", "From 21 to 30"),
        From31to40 => ("From31to40", "From 31 to 40"),
        From41to50 => ("From41to50", "From 41 to 50"),
        From51to60 => ("From51to60", "From 51 to 60"),
        From61to70 => ("From61to70", "From 61 to 70"),
        From71to80 => ("From71to80", "From 71 to 80"),
        From81to90 => ("From81to90", "From 81 to 90"),
        From91to100 => ("From91to100", "From 91 to 100"),
        From101to110 => ("From101to110", "From 101 to 110"),
        From111to120 => ("From111to120", "From 111 to 120"),
        From121to130 => ("From121to130", "From 121 to 130"),
        From131to140 => ("From131to140", "From 131 to 140"),
        From141to150 => ("From141to150", "From 141 to 150"),
        From151to160 => ("From151to160", "From 151 to 160"),
    }
}

choice_enum! {
    Color, "color" {
        White => ("White", "White"),
        OffWhite => ("OffWhite", "Off-White"),
        Beige => ("Beige", "Beige"),
        Brown => ("Brown", "Brown"),
        Black => ("Black", "Black"),
        Navy => ("Navy", "Navy"),
        Blue => ("Blue", "Blue"),
        LightBlue => ("LightBlue", "Light Blue"),
        DarkGreen => ("DarkGreen", "Dark Green"),
        LightGreen => ("LightGreen", "Light Green"),
        DarkYellow => ("DarkYellow", "Dark Yellow"),
        LightYellow => ("LightYellow", "Light Yellow"),
        DarkPink => ("DarkPink", "Dark Pink"),
        LightPink => ("LightPink", "Light Pink"),
        DarkRed => ("DarkRed", "Dark Red"),
        LightRed => ("LightRed", "Light Red"),
        // the service knows this key with the misspelling
        DarkOrange => ("DarkOrgange", "Dark Orange"),
        LightOrange => ("LightOrange", "Light Orange"),
        DarkPurple => ("DarkPurple", "Dark Purple"),
        LightPurple => ("LightPurple", "Light Purple"),
    }
}

choice_enum! {
    Preference, "preference" {
        Skirts => ("Skirts", "Skirts"),
        Dresses => ("Dresses", "Dresses"),
        Pants => ("Pants", "Pants"),
        HighHeels => ("HighHeels", "High Heels"),
        Leggings => ("LeggingsPants", "Leggings"),
    }
}

choice_enum! {
    /// Garment types the wardrobe service can return.
    Clothing, "garment" {
        Shirt => ("Shirt", "Shirt"),
        TankTop => ("TankTop", "Tank Top"),
        Jeans => ("Jeans", "Jeans"),
        JeansShorts => ("JeansShorts", "Jeans Shorts"),
        DressTrousers => ("DressTrousers", "Dress Trousers"),
        SocialShorts => ("SocialShorts", "Social Shorts"),
        Leggings => ("Leggings", "Leggings"),
        BusinessSkirt => ("BusinessSkirt", "Business Skirt"),
        DaySkirt => ("DaySkirt", "Day Skirt"),
        BusinessDress => ("BusinessDress", "Business Dress"),
        DayDress => ("DayDress", "Day Dress"),
        Sweater => ("Sweater", "Sweater"),
        Cardigan => ("Cardigan", "Cardigan"),
        Jacket => ("Jacket", "Jacket"),
        Vest => ("Vest", "Vest"),
        Blazer => ("Blazer", "Blazer"),
        Sweatshirt => ("Sweatshirt", "Sweatshirt"),
        TrenchCoat => ("TrenchCoat", "Trench Coat"),
        WoolCoat => ("WoolCoat", "Wool Coat"),
        Sandals => ("Sandals", "Sandals"),
        Flats => ("Flats", "Flats"),
        Heels => ("Heels", "Heels"),
        AnkleBoots => ("AnkleBoots", "Ankle Boots"),
        Boots => ("Boots", "Boots"),
        Sneakers => ("Sneakers", "Sneakers"),
        Wedges => ("Wedges", "Wedges"),
        RelaxedBag => ("RelaxedBag", "Relaxed Bag"),
        StructuredBag => ("StructuredBag", "Structured Bag"),
    }
}

choice_enum! {
    /// Identifies one form field in `update_field` calls.
    Field, "field" {
        Season => ("season", "Season"),
        Style => ("style", "Style"),
        NumberOfOutfits => ("numberOfOutfits", "Number of outfits"),
        Colors => ("colors", "Colors"),
        Preferences => ("preferences", "Preferences"),
    }
}

/// The user's selection. Field order is the token's JSON field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capsule {
    pub season: Season,
    pub style: Style,
    pub number_of_outfits: NumberOfOutfits,
    pub colors: BTreeSet<Color>,
    pub preferences: BTreeSet<Preference>,
}

impl Default for Capsule {
    fn default() -> Self {
        Self {
            season: Season::AutumnWinter,
            style: Style::Casual,
            number_of_outfits: NumberOfOutfits::From10to20,
            colors: BTreeSet::new(),
            preferences: BTreeSet::new(),
        }
    }
}

/// Full replacement value for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Season(Season),
    Style(Style),
    NumberOfOutfits(NumberOfOutfits),
    Colors(BTreeSet<Color>),
    Preferences(BTreeSet<Preference>),
}

impl FieldUpdate {
    pub fn field(&self) -> Field {
        match self {
            FieldUpdate::Season(_) => Field::Season,
            FieldUpdate::Style(_) => Field::Style,
            FieldUpdate::NumberOfOutfits(_) => Field::NumberOfOutfits,
            FieldUpdate::Colors(_) => Field::Colors,
            FieldUpdate::Preferences(_) => Field::Preferences,
        }
    }

    /// Builds an update from raw option values, as a select control reports them.
    ///
    /// Single-choice fields need exactly one value; multi-choice fields take
    /// the complete new selection, possibly empty.
    pub fn parse<S: AsRef<str>>(field: Field, values: &[S]) -> crate::utils::error::Result<Self> {
        fn single<S: AsRef<str>>(field: Field, values: &[S]) -> crate::utils::error::Result<&str> {
            match values {
                [one] => Ok(one.as_ref()),
                _ => Err(CapsuleError::InvalidFieldValue {
                    field: field.label().to_string(),
                    value: values
                        .iter()
                        .map(|v| v.as_ref())
                        .collect::<Vec<_>>()
                        .join(","),
                }),
            }
        }

        Ok(match field {
            Field::Season => FieldUpdate::Season(single(field, values)?.parse::<Season>()?),
            Field::Style => FieldUpdate::Style(single(field, values)?.parse::<Style>()?),
            Field::NumberOfOutfits => {
                FieldUpdate::NumberOfOutfits(single(field, values)?.parse::<NumberOfOutfits>()?)
            }
            Field::Colors => FieldUpdate::Colors(
                values
                    .iter()
                    .map(|v| v.as_ref().parse::<Color>())
                    .collect::<Result<BTreeSet<_>, _>>()?,
            ),
            Field::Preferences => FieldUpdate::Preferences(
                values
                    .iter()
                    .map(|v| v.as_ref().parse::<Preference>())
                    .collect::<Result<BTreeSet<_>, _>>()?,
            ),
        })
    }
}

/// One line of a computed wardrobe: garment, how many, and in which colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(Clothing, u32, Vec<Color>)", into = "(Clothing, u32, Vec<Color>)")]
pub struct WardrobeItem {
    pub clothing: Clothing,
    pub quantity: u32,
    pub colors: Vec<Color>,
}

impl From<(Clothing, u32, Vec<Color>)> for WardrobeItem {
    fn from((clothing, quantity, colors): (Clothing, u32, Vec<Color>)) -> Self {
        Self {
            clothing,
            quantity,
            colors,
        }
    }
}

impl From<WardrobeItem> for (Clothing, u32, Vec<Color>) {
    fn from(item: WardrobeItem) -> Self {
        (item.clothing, item.quantity, item.colors)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wardrobe(pub Vec<WardrobeItem>);

impl Wardrobe {
    pub fn items(&self) -> &[WardrobeItem] {
        &self.0
    }

    pub fn total_pieces(&self) -> u32 {
        self.0.iter().map(|item| item.quantity).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub message: String,
}

/// What the wardrobe service answered with a 200.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WardrobeResponse {
    Wardrobe(Wardrobe),
    Rejected(ErrorEnvelope),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_key_label_and_case() {
        assert_eq!("AutumnWinter".parse::<Season>().unwrap(), Season::AutumnWinter);
        assert_eq!("Spring/Summer".parse::<Season>().unwrap(), Season::SpringSummer);
        assert_eq!("light blue".parse::<Color>().unwrap(), Color::LightBlue);
        assert_eq!("From 41 to 50".parse::<NumberOfOutfits>().unwrap(), NumberOfOutfits::From41to50);
        assert!("Winter".parse::<Season>().is_err());
    }

    #[test]
    fn test_wire_keys_kept_for_service() {
        assert_eq!(Color::DarkOrange.key(), "DarkOrgange");
        assert_eq!(Preference::Leggings.key(), "LeggingsPants");
        assert_eq!(Preference::Leggings.label(), "Leggings");
        assert_eq!(NumberOfOutfits::ALL.len(), 15);
        assert_eq!(Color::ALL.len(), 20);
        assert_eq!(Preference::ALL.len(), 5);
    }

    #[test]
    fn test_capsule_json_shape() {
        let json = serde_json::to_string(&Capsule::default()).unwrap();
        assert_eq!(
            json,
            r#"{"season":"AutumnWinter","style":"Casual","numberOfOutfits":"From10to20","colors":[],"preferences":[]}"#
        );
    }

    #[test]
    fn test_wardrobe_from_service_triples() {
        let body = r#"[["Shirt", 3, ["White", "Navy"]], ["Tank Top", 2, ["Light Blue"]]]"#;
        let wardrobe: Wardrobe = serde_json::from_str(body).unwrap();

        assert_eq!(wardrobe.items().len(), 2);
        assert_eq!(wardrobe.items()[0].clothing, Clothing::Shirt);
        assert_eq!(wardrobe.items()[1].clothing, Clothing::TankTop);
        assert_eq!(wardrobe.items()[1].colors, vec![Color::LightBlue]);
        assert_eq!(wardrobe.total_pieces(), 5);
    }

    #[test]
    fn test_wardrobe_rejects_unknown_garment() {
        let body = r#"[["Cape", 1, []]]"#;
        assert!(serde_json::from_str::<Wardrobe>(body).is_err());
    }

    #[test]
    fn test_field_update_parse() {
        let update = FieldUpdate::parse(Field::Colors, &["Navy", "White", "Navy"]).unwrap();
        assert_eq!(
            update,
            FieldUpdate::Colors([Color::White, Color::Navy].into_iter().collect())
        );

        let empty: [&str; 0] = [];
        assert_eq!(
            FieldUpdate::parse(Field::Preferences, &empty).unwrap(),
            FieldUpdate::Preferences(BTreeSet::new())
        );

        assert!(FieldUpdate::parse(Field::Season, &["AutumnWinter", "SpringSummer"]).is_err());
        assert!(FieldUpdate::parse(Field::Style, &empty).is_err());
        assert_eq!(
            FieldUpdate::parse(Field::Style, &["office"]).unwrap().field(),
            Field::Style
        );
    }
}
