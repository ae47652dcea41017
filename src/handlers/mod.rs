pub mod enhance;
pub mod prompt;

use std::path::PathBuf;

use tracing::info;

use crate::config::CONFIG;
use crate::options::{load_options, EnhancementOptions, OptionError};

/// Where a command takes its options from: an optional file, then `--set` overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSource {
    pub options_path: Option<PathBuf>,
    pub assignments: Vec<String>,
}

impl OptionSource {
    pub fn resolve(&self) -> Result<EnhancementOptions, OptionError> {
        let path = self
            .options_path
            .clone()
            .or_else(|| CONFIG.options_file.clone());
        let mut options = match path {
            Some(path) => load_options(&path)?,
            None => EnhancementOptions::default(),
        };
        for assignment in &self.assignments {
            options.apply_assignment(assignment)?;
        }
        if !self.assignments.is_empty() {
            info!("Applied {} option override(s)", self.assignments.len());
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::options::{LightingOption, PlantOption};

    #[test]
    fn overrides_apply_after_file_in_order() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(file, "plants: lot\nlighting: lamps").unwrap();

        let source = OptionSource {
            options_path: Some(file.path().to_path_buf()),
            assignments: vec!["plants=little".to_string(), "plants=none".to_string()],
        };
        let options = source.resolve().unwrap();
        assert_eq!(options.plants, PlantOption::None);
        assert_eq!(options.lighting, LightingOption::Lamps);
    }

    #[test]
    fn bad_override_is_reported() {
        let source = OptionSource {
            options_path: Some(PathBuf::from("/nonexistent/options.yaml")),
            assignments: Vec::new(),
        };
        assert!(matches!(source.resolve(), Err(OptionError::Read { .. })));

        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        let source = OptionSource {
            options_path: Some(file.path().to_path_buf()),
            assignments: vec!["resolution=ultra".to_string()],
        };
        assert!(matches!(source.resolve(), Err(OptionError::InvalidValue { .. })));
    }
}
