use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use super::{
    DecorIntensity, EnhancementOptions, FurnitureAdd, KitchenFinish, LightingAtmosphere,
    LightingIntensity, LightingOption, OptionError, PerspectiveType, PlantOption, Resolution,
    WoodTexture,
};

/// Words accepted for a boolean field, from `--set` and from options files alike.
pub(super) const BOOLEAN_VALUES: &[&str] = &["true", "false", "yes", "no", "on", "off", "1", "0"];

#[derive(Debug, Clone, Serialize)]
pub struct FieldInfo {
    pub name: &'static str,
    pub kind: &'static str,
    pub values: Vec<&'static str>,
    pub default: String,
}

pub(super) fn parse_bool_word(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn parse_bool(field: &str, value: &str) -> Result<bool, OptionError> {
    parse_bool_word(value).ok_or_else(|| OptionError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        expected: BOOLEAN_VALUES.join(", "),
    })
}

fn parse_intensity(value: &str) -> Result<LightingIntensity, OptionError> {
    let number = value
        .trim()
        .parse::<i64>()
        .map_err(|_| OptionError::InvalidValue {
            field: "lightingIntensity".to_string(),
            value: value.to_string(),
            expected: "an integer between 0 and 100".to_string(),
        })?;
    LightingIntensity::new(number)
}

impl EnhancementOptions {
    /// Updates one field by its camelCase name. The record is untouched on error.
    pub fn set(&mut self, field: &str, value: &str) -> Result<(), OptionError> {
        match field.trim() {
            "plants" => self.plants = value.parse::<PlantOption>()?,
            "wallDecor" => self.wall_decor = parse_bool("wallDecor", value)?,
            "utensils" => self.utensils = parse_bool("utensils", value)?,
            "fruit" => self.fruit = parse_bool("fruit", value)?,
            "lighting" => self.lighting = value.parse::<LightingOption>()?,
            "lightingIntensity" => self.lighting_intensity = parse_intensity(value)?,
            "resolution" => self.resolution = value.parse::<Resolution>()?,
            "raytracing" => self.raytracing = parse_bool("raytracing", value)?,
            "addWindowView" => self.add_window_view = parse_bool("addWindowView", value)?,
            "kitchenFinish" => self.kitchen_finish = value.parse::<KitchenFinish>()?,
            "woodTexture" => self.wood_texture = value.parse::<WoodTexture>()?,
            "enhanceFramedDoors" => {
                self.enhance_framed_doors = parse_bool("enhanceFramedDoors", value)?
            }
            "highFidelityDetails" => {
                self.high_fidelity_details = parse_bool("highFidelityDetails", value)?
            }
            "hyperRealism" => self.hyper_realism = parse_bool("hyperRealism", value)?,
            "allowWallModification" => {
                self.allow_wall_modification = parse_bool("allowWallModification", value)?
            }
            "allowFloorModification" => {
                self.allow_floor_modification = parse_bool("allowFloorModification", value)?
            }
            "addWalls" => self.add_walls = parse_bool("addWalls", value)?,
            "decorIntensity" => self.decor_intensity = value.parse::<DecorIntensity>()?,
            "perspectiveType" => self.perspective_type = value.parse::<PerspectiveType>()?,
            "lightingAtmosphere" => {
                self.lighting_atmosphere = value.parse::<LightingAtmosphere>()?
            }
            "furnitureAdd" => self.furniture_add = value.parse::<FurnitureAdd>()?,
            other => return Err(OptionError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    /// Applies a `field=value` assignment as given on the command line.
    pub fn apply_assignment(&mut self, assignment: &str) -> Result<(), OptionError> {
        let (field, value) = assignment
            .split_once('=')
            .ok_or_else(|| OptionError::MalformedAssignment(assignment.to_string()))?;
        if field.trim().is_empty() {
            return Err(OptionError::MalformedAssignment(assignment.to_string()));
        }
        self.set(field, value)
    }
}

/// Reads an options file. Fields missing from the file keep their default value.
pub fn load_options(path: &Path) -> Result<EnhancementOptions, OptionError> {
    let label = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| OptionError::Read {
        path: label.clone(),
        source,
    })?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let options = if is_json {
        serde_json::from_str::<EnhancementOptions>(&raw).map_err(|err| OptionError::Parse {
            path: label.clone(),
            message: err.to_string(),
        })?
    } else if raw.trim().is_empty() {
        EnhancementOptions::default()
    } else {
        serde_yaml::from_str::<EnhancementOptions>(&raw).map_err(|err| OptionError::Parse {
            path: label.clone(),
            message: err.to_string(),
        })?
    };

    debug!("Loaded enhancement options from {}", label);
    Ok(options)
}

fn enum_field(name: &'static str, values: Vec<&'static str>, default: &str) -> FieldInfo {
    FieldInfo {
        name,
        kind: "enum",
        values,
        default: default.to_string(),
    }
}

fn bool_field(name: &'static str, default: bool) -> FieldInfo {
    FieldInfo {
        name,
        kind: "bool",
        values: BOOLEAN_VALUES.to_vec(),
        default: default.to_string(),
    }
}

/// Every configurable field with its legal values and default, in form order.
pub fn field_catalog() -> Vec<FieldInfo> {
    // No `..` here: a new field must be added to the catalog to compile.
    let EnhancementOptions {
        plants,
        wall_decor,
        utensils,
        fruit,
        lighting,
        lighting_intensity,
        resolution,
        raytracing,
        add_window_view,
        kitchen_finish,
        wood_texture,
        enhance_framed_doors,
        high_fidelity_details,
        hyper_realism,
        allow_wall_modification,
        allow_floor_modification,
        add_walls,
        decor_intensity,
        perspective_type,
        lighting_atmosphere,
        furniture_add,
    } = EnhancementOptions::default();

    vec![
        enum_field("plants", PlantOption::wire_names(), plants.as_str()),
        bool_field("wallDecor", wall_decor),
        bool_field("utensils", utensils),
        bool_field("fruit", fruit),
        enum_field("lighting", LightingOption::wire_names(), lighting.as_str()),
        FieldInfo {
            name: "lightingIntensity",
            kind: "integer",
            values: vec!["0..=100"],
            default: lighting_intensity.to_string(),
        },
        enum_field("resolution", Resolution::wire_names(), resolution.as_str()),
        bool_field("raytracing", raytracing),
        bool_field("addWindowView", add_window_view),
        enum_field(
            "kitchenFinish",
            KitchenFinish::wire_names(),
            kitchen_finish.as_str(),
        ),
        enum_field("woodTexture", WoodTexture::wire_names(), wood_texture.as_str()),
        bool_field("enhanceFramedDoors", enhance_framed_doors),
        bool_field("highFidelityDetails", high_fidelity_details),
        bool_field("hyperRealism", hyper_realism),
        bool_field("allowWallModification", allow_wall_modification),
        bool_field("allowFloorModification", allow_floor_modification),
        bool_field("addWalls", add_walls),
        enum_field(
            "decorIntensity",
            DecorIntensity::wire_names(),
            decor_intensity.as_str(),
        ),
        enum_field(
            "perspectiveType",
            PerspectiveType::wire_names(),
            perspective_type.as_str(),
        ),
        enum_field(
            "lightingAtmosphere",
            LightingAtmosphere::wire_names(),
            lighting_atmosphere.as_str(),
        ),
        enum_field("furnitureAdd", FurnitureAdd::wire_names(), furniture_add.as_str()),
    ]
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn set_updates_a_single_field() {
        let mut options = EnhancementOptions::default();
        options.set("lightingAtmosphere", "golden_hour").unwrap();
        options.set("hyperRealism", "yes").unwrap();
        options.set("lightingIntensity", "70").unwrap();

        assert_eq!(options.lighting_atmosphere, LightingAtmosphere::GoldenHour);
        assert!(options.hyper_realism);
        assert_eq!(options.lighting_intensity.value(), 70);
        assert_eq!(options.plants, PlantOption::None);
    }

    #[test]
    fn failed_set_leaves_record_unchanged() {
        let mut options = EnhancementOptions::default();
        let before = options;
        assert!(options.set("lightingIntensity", "250").is_err());
        assert!(options.set("raytracing", "maybe").is_err());
        assert!(options.set("colour", "red").is_err());
        assert_eq!(options, before);
    }

    #[test]
    fn apply_assignment_requires_equals_sign() {
        let mut options = EnhancementOptions::default();
        assert!(matches!(
            options.apply_assignment("plants"),
            Err(OptionError::MalformedAssignment(_))
        ));
        assert!(matches!(
            options.apply_assignment("=lot"),
            Err(OptionError::MalformedAssignment(_))
        ));
        options.apply_assignment("plants=lot").unwrap();
        assert_eq!(options.plants, PlantOption::Lot);
    }

    #[test]
    fn catalog_fields_are_all_settable() {
        let catalog = field_catalog();
        assert_eq!(catalog.len(), 21);
        for field in &catalog {
            let mut options = EnhancementOptions::default();
            let value = if field.kind == "integer" {
                "42"
            } else {
                field.values[0]
            };
            options
                .set(field.name, value)
                .unwrap_or_else(|err| panic!("{} rejected {}: {}", field.name, value, err));
        }
    }

    #[test]
    fn catalog_reports_defaults() {
        let catalog = field_catalog();
        let decor = catalog.iter().find(|f| f.name == "decorIntensity").unwrap();
        assert_eq!(decor.default, "minimal");
        assert_eq!(decor.values, vec!["minimal", "balanced", "maximal"]);
        let fruit = catalog.iter().find(|f| f.name == "fruit").unwrap();
        assert_eq!(fruit.kind, "bool");
        assert_eq!(fruit.default, "false");
    }

    #[test]
    fn catalog_defaults_match_default_record() {
        let defaults = serde_json::to_value(EnhancementOptions::default()).unwrap();
        let defaults = defaults.as_object().unwrap();
        let catalog = field_catalog();
        assert_eq!(catalog.len(), defaults.len());
        for field in &catalog {
            let expected = match &defaults[field.name] {
                serde_json::Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            assert_eq!(field.default, expected, "default of {}", field.name);
        }
    }

    #[test]
    fn boolean_words_are_listed_and_accepted_everywhere() {
        let catalog = field_catalog();
        let walls = catalog.iter().find(|f| f.name == "addWalls").unwrap();
        assert_eq!(walls.values, BOOLEAN_VALUES);

        for word in BOOLEAN_VALUES {
            let mut options = EnhancementOptions::default();
            options.set("addWalls", word).unwrap();
        }

        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "addWalls: yes
fruit: \"on\"
raytracing: 1
wallDecor: off").unwrap();
        let options = load_options(file.path()).unwrap();
        assert!(options.add_walls);
        assert!(options.fruit);
        assert!(options.raytracing);
        assert!(!options.wall_decor);

        let mut options = EnhancementOptions::default();
        let err = options.set("addWalls", "maybe").unwrap_err();
        assert!(err.to_string().contains("yes, no, on, off"));
    }

    #[test]
    fn loads_partial_yaml_with_defaults() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "plants: little\nkitchenFinish: glossy\nlightingIntensity: 20").unwrap();

        let options = load_options(file.path()).unwrap();
        assert_eq!(options.plants, PlantOption::Little);
        assert_eq!(options.kitchen_finish, KitchenFinish::Glossy);
        assert_eq!(options.lighting_intensity.value(), 20);
        assert_eq!(options.resolution, Resolution::Medium);
    }

    #[test]
    fn loads_json_and_rejects_unknown_fields() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"resolution": "high", "sparkles": true}}"#).unwrap();

        let err = load_options(file.path()).unwrap_err();
        assert!(matches!(err, OptionError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_options(Path::new("/nonexistent/options.yaml")).unwrap_err();
        assert!(matches!(err, OptionError::Read { .. }));
    }
}
