use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::config::CONFIG;
use crate::handlers::OptionSource;
use crate::llm::{generate_enhanced_image, PhotoPayload};
use crate::prompt::EnhancementRequest;
use crate::utils::timing::{complete_command_timer, start_command_timer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhanceArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub source: OptionSource,
}

pub fn default_output_path(
    output_dir: &Path,
    input: &Path,
    now: DateTime<Utc>,
    extension: &str,
) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.trim().is_empty())
        .unwrap_or("kitchen");
    output_dir.join(format!(
        "{}-enhanced-{}.{}",
        stem,
        now.format("%Y%m%dT%H%M%SZ"),
        extension
    ))
}

/// Runs one generation attempt for the photo and writes the returned image.
pub async fn enhance_handler(args: &EnhanceArgs) -> Result<PathBuf> {
    let mut timer = start_command_timer("enhance", Some(args.input.display().to_string()));
    let result = run_enhance(args).await;
    match &result {
        Ok(path) => {
            complete_command_timer(&mut timer, "success", Some(path.display().to_string()))
        }
        Err(err) => {
            error!("enhance failed: {err:#}");
            complete_command_timer(&mut timer, "error", Some(err.to_string()));
        }
    }
    result
}

async fn run_enhance(args: &EnhanceArgs) -> Result<PathBuf> {
    let options = args.source.resolve()?;
    let photo = PhotoPayload::load(&args.input, CONFIG.max_photo_bytes).await?;
    let request = EnhancementRequest::new(photo, &options);
    info!(
        "Requesting enhancement of {} with model {} ({} instruction chars)",
        args.input.display(),
        request.prompt.parameters.model_id,
        request.prompt.instruction_text.len()
    );

    let image = generate_enhanced_image(&request).await?;
    let path = match &args.output {
        Some(path) => path.clone(),
        None => default_output_path(
            &CONFIG.output_dir,
            &args.input,
            Utc::now(),
            image.extension(),
        ),
    };
    image
        .write_to(&path)
        .await
        .with_context(|| format!("could not save the enhanced image to {}", path.display()))?;

    info!(
        "Saved enhanced image to {} ({} bytes)",
        path.display(),
        image.bytes.len()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn default_output_uses_stem_timestamp_and_extension() {
        let now = Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap();
        let path = default_output_path(
            Path::new("output"),
            Path::new("photos/my kitchen.jpeg"),
            now,
            "png",
        );
        assert_eq!(
            path,
            PathBuf::from("output/my kitchen-enhanced-20260304T050607Z.png")
        );
    }

    #[test]
    fn default_output_falls_back_when_stem_is_missing() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let path = default_output_path(Path::new("out"), Path::new("/"), now, "jpg");
        assert_eq!(path, PathBuf::from("out/kitchen-enhanced-20260101T000000Z.jpg"));
    }

    #[tokio::test]
    async fn invalid_options_fail_before_reading_the_photo() {
        let args = EnhanceArgs {
            input: PathBuf::from("/nonexistent/kitchen.jpg"),
            output: None,
            source: OptionSource {
                options_path: Some(PathBuf::from("/nonexistent/options.yaml")),
                assignments: Vec::new(),
            },
        };
        let err = enhance_handler(&args).await.unwrap_err();
        assert!(err.to_string().contains("options file"));
    }
}
