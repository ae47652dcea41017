pub mod update;

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

pub use update::{field_catalog, load_options, FieldInfo};

#[derive(Debug, Error)]
pub enum OptionError {
    #[error("unknown option field '{0}'")]
    UnknownField(String),
    #[error("invalid value '{value}' for {field} (expected one of: {expected})")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },
    #[error("lighting intensity {0} is out of range (0-100)")]
    IntensityOutOfRange(i64),
    #[error("malformed assignment '{0}' (expected field=value)")]
    MalformedAssignment(String),
    #[error("failed to read options file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse options file {path}: {message}")]
    Parse { path: String, message: String },
}

/// Declares a closed option axis with one canonical wire name per variant.
macro_rules! option_enum {
    (
        $name:ident, $field:literal, default = $default:ident {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            pub fn wire_names() -> Vec<&'static str> {
                Self::ALL.iter().map(|value| value.as_str()).collect()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = OptionError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let lowered = value.trim().to_ascii_lowercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.as_str() == lowered)
                    .ok_or_else(|| OptionError::InvalidValue {
                        field: $field.to_string(),
                        value: value.to_string(),
                        expected: Self::wire_names().join(", "),
                    })
            }
        }
    };
}

option_enum! {
    PlantOption, "plants", default = None {
        None => "none",
        Little => "little",
        Lot => "lot",
    }
}

option_enum! {
    LightingOption, "lighting", default = NoChange {
        NoChange => "no_change",
        Recessed => "recessed",
        Lamps => "lamps",
    }
}

option_enum! {
    Resolution, "resolution", default = Medium {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

option_enum! {
    KitchenFinish, "kitchenFinish", default = Auto {
        Auto => "auto",
        Matte => "matte",
        Glossy => "glossy",
    }
}

option_enum! {
    WoodTexture, "woodTexture", default = Standard {
        Standard => "standard",
        Enhanced => "enhanced",
    }
}

option_enum! {
    DecorIntensity, "decorIntensity", default = Minimal {
        Minimal => "minimal",
        Balanced => "balanced",
        Maximal => "maximal",
    }
}

option_enum! {
    PerspectiveType, "perspectiveType", default = Natural {
        Natural => "natural",
        Immersive => "immersive",
    }
}

option_enum! {
    LightingAtmosphere, "lightingAtmosphere", default = Neutral {
        Neutral => "neutral",
        Morning => "morning",
        GoldenHour => "golden_hour",
        Cosy => "cosy",
        Evening => "evening",
    }
}

option_enum! {
    FurnitureAdd, "furnitureAdd", default = None {
        None => "none",
        Chairs => "chairs",
        Stools => "stools",
    }
}

/// Fixture brightness on a 0-100 scale. Only meaningful when a fixture is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LightingIntensity(u8);

impl LightingIntensity {
    pub const MAX: u8 = 100;

    pub fn new(value: i64) -> Result<Self, OptionError> {
        if (0..=i64::from(Self::MAX)).contains(&value) {
            Ok(LightingIntensity(value as u8))
        } else {
            Err(OptionError::IntensityOutOfRange(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for LightingIntensity {
    fn default() -> Self {
        LightingIntensity(50)
    }
}

impl TryFrom<u8> for LightingIntensity {
    type Error = OptionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        LightingIntensity::new(i64::from(value))
    }
}

impl From<LightingIntensity> for u8 {
    fn from(value: LightingIntensity) -> Self {
        value.0
    }
}

impl fmt::Display for LightingIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Accepts a YAML/JSON boolean, `1`/`0`, or any word `set` accepts.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Number(i64),
        Word(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => Ok(value),
        Flag::Number(1) => Ok(true),
        Flag::Number(0) => Ok(false),
        Flag::Number(other) => Err(de::Error::invalid_value(
            Unexpected::Signed(other),
            &"a boolean",
        )),
        Flag::Word(word) => update::parse_bool_word(&word).ok_or_else(|| {
            de::Error::invalid_value(
                Unexpected::Str(&word),
                &update::BOOLEAN_VALUES.join(", ").as_str(),
            )
        }),
    }
}

/// The complete configuration of one enhancement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct EnhancementOptions {
    pub plants: PlantOption,
    #[serde(deserialize_with = "deserialize_flag")]
    pub wall_decor: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub utensils: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub fruit: bool,
    pub lighting: LightingOption,
    pub lighting_intensity: LightingIntensity,
    pub resolution: Resolution,
    #[serde(deserialize_with = "deserialize_flag")]
    pub raytracing: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub add_window_view: bool,
    pub kitchen_finish: KitchenFinish,
    pub wood_texture: WoodTexture,
    #[serde(deserialize_with = "deserialize_flag")]
    pub enhance_framed_doors: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub high_fidelity_details: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub hyper_realism: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub allow_wall_modification: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub allow_floor_modification: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub add_walls: bool,
    pub decor_intensity: DecorIntensity,
    pub perspective_type: PerspectiveType,
    pub lighting_atmosphere: LightingAtmosphere,
    pub furniture_add: FurnitureAdd,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_initial_form_state() {
        let options = EnhancementOptions::default();
        assert_eq!(options.plants, PlantOption::None);
        assert_eq!(options.lighting, LightingOption::NoChange);
        assert_eq!(options.lighting_intensity.value(), 50);
        assert_eq!(options.resolution, Resolution::Medium);
        assert_eq!(options.kitchen_finish, KitchenFinish::Auto);
        assert_eq!(options.decor_intensity, DecorIntensity::Minimal);
        assert_eq!(options.lighting_atmosphere, LightingAtmosphere::Neutral);
        assert_eq!(options.furniture_add, FurnitureAdd::None);
        assert!(!options.wall_decor && !options.hyper_realism && !options.add_walls);
    }

    #[test]
    fn parses_wire_names_case_insensitively() {
        assert_eq!(
            " Golden_Hour ".parse::<LightingAtmosphere>().unwrap(),
            LightingAtmosphere::GoldenHour
        );
        assert_eq!("no_change".parse::<LightingOption>().unwrap(), LightingOption::NoChange);
        assert_eq!(Resolution::High.to_string(), "high");
    }

    #[test]
    fn rejects_values_outside_the_domain() {
        let err = "shiny".parse::<KitchenFinish>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("kitchenFinish"));
        assert!(message.contains("auto, matte, glossy"));
    }

    #[test]
    fn all_lists_every_variant_once() {
        assert_eq!(LightingAtmosphere::ALL.len(), 5);
        assert_eq!(Resolution::ALL, &[Resolution::Low, Resolution::Medium, Resolution::High]);
        assert_eq!(PlantOption::wire_names(), vec!["none", "little", "lot"]);
    }

    #[test]
    fn intensity_is_bounded() {
        assert!(LightingIntensity::new(0).is_ok());
        assert!(LightingIntensity::new(100).is_ok());
        assert!(matches!(
            LightingIntensity::new(101),
            Err(OptionError::IntensityOutOfRange(101))
        ));
        assert!(LightingIntensity::new(-1).is_err());
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let value = serde_json::to_value(EnhancementOptions::default()).unwrap();
        assert_eq!(value["lightingIntensity"], 50);
        assert_eq!(value["lightingAtmosphere"], "neutral");
        assert_eq!(value["addWindowView"], false);
    }

    #[test]
    fn deserialization_enforces_intensity_range() {
        let result = serde_json::from_str::<EnhancementOptions>(r#"{"lightingIntensity": 150}"#);
        assert!(result.is_err());
    }
}
