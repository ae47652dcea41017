use anyhow::Result;
use serde_json::json;

use crate::handlers::OptionSource;
use crate::options::{field_catalog, FieldInfo};
use crate::prompt::{compile, fired_rules};
use crate::utils::timing::{complete_command_timer, start_command_timer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptArgs {
    pub source: OptionSource,
    pub json: bool,
}

/// Compiles the configured options without contacting the generation service.
pub fn prompt_handler(args: &PromptArgs) -> Result<String> {
    let mut timer = start_command_timer("prompt", None);
    let options = match args.source.resolve() {
        Ok(options) => options,
        Err(err) => {
            complete_command_timer(&mut timer, "error", Some(err.to_string()));
            return Err(err.into());
        }
    };

    let compiled = compile(&options);
    let rendered = if args.json {
        serde_json::to_string_pretty(&json!({
            "options": options,
            "instructionText": compiled.instruction_text,
            "parameters": compiled.parameters,
            "rules": fired_rules(&options),
        }))?
    } else {
        compiled.instruction_text
    };

    complete_command_timer(&mut timer, "success", None);
    Ok(rendered)
}

fn render_catalog_text(catalog: &[FieldInfo]) -> String {
    let width = catalog.iter().map(|field| field.name.len()).max().unwrap_or(0);
    catalog
        .iter()
        .map(|field| {
            format!(
                "{:width$}  {:7}  {}  (default: {})",
                field.name,
                field.kind,
                field.values.join(" | "),
                field.default,
                width = width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn options_handler(json: bool) -> Result<String> {
    let catalog = field_catalog();
    if json {
        Ok(serde_json::to_string_pretty(&catalog)?)
    } else {
        Ok(render_catalog_text(&catalog))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(assignments: &[&str], json: bool) -> (PromptArgs, tempfile::NamedTempFile) {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        let args = PromptArgs {
            source: OptionSource {
                options_path: Some(file.path().to_path_buf()),
                assignments: assignments.iter().map(|a| a.to_string()).collect(),
            },
            json,
        };
        (args, file)
    }

    #[test]
    fn prints_instruction_text() {
        let (args, _file) = args(&["lighting=recessed", "lightingIntensity=10"], false);
        let text = prompt_handler(&args).unwrap();
        assert!(text.contains("GEOMETRY IS FROZEN"));
        assert!(text.contains("soft, dimmed, warm light"));
    }

    #[test]
    fn json_output_includes_parameters() {
        let (args, _file) = args(&["resolution=high"], true);
        let rendered = prompt_handler(&args).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["parameters"]["modelId"], "gemini-3-pro-image-preview");
        assert_eq!(value["parameters"]["resolutionTier"], "2K");
        assert_eq!(value["options"]["resolution"], "high");
        assert_eq!(value["rules"][0], "invariant_header");
        assert!(value["instructionText"].as_str().unwrap().contains("ULTRA-HIGH DEFINITION"));
    }

    #[test]
    fn invalid_override_fails() {
        let (args, _file) = args(&["plants=jungle"], false);
        assert!(prompt_handler(&args).is_err());
    }

    #[test]
    fn catalog_lists_every_field() {
        let text = options_handler(false).unwrap();
        assert_eq!(text.lines().count(), 21);
        assert!(text.contains("golden_hour"));
        let json: serde_json::Value =
            serde_json::from_str(&options_handler(true).unwrap()).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 21);
    }
}
