//! Configuration validation with range checks.

use crate::error::ConfigError;
use crate::types::ImageFormat;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.service.face_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "service.face_url must not be empty".into(),
            ));
        }
        if self.service.coloring_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "service.coloring_url must not be empty".into(),
            ));
        }
        if self.limits.analyze_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "limits.analyze_timeout_ms must be > 0".into(),
            ));
        }
        if self.limits.render_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "limits.render_timeout_ms must be > 0".into(),
            ));
        }
        if self.limits.coloring_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "limits.coloring_timeout_ms must be > 0".into(),
            ));
        }
        if self.limits.max_upload_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_upload_mb must be > 0".into(),
            ));
        }
        if ImageFormat::parse(&self.defaults.image_format).is_none() {
            return Err(ConfigError::ValidationError(format!(
                "defaults.image_format must be png, webp, or gif (got '{}')",
                self.defaults.image_format
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_face_url() {
        let mut config = Config::default();
        config.service.face_url = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("face_url"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.limits.analyze_timeout_ms = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("analyze_timeout_ms"));
    }

    #[test]
    fn test_validate_rejects_zero_upload_cap() {
        let mut config = Config::default();
        config.limits.max_upload_mb = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_upload_mb"));
    }

    #[test]
    fn test_validate_rejects_unknown_format() {
        let mut config = Config::default();
        config.defaults.image_format = "tiff".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("image_format"));
    }
}
