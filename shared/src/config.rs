use serde::Deserialize;

use crate::FolioError;

pub const DEFAULT_BASE_PATH: &str = "./pdf/";
pub const DEFAULT_PROBE_TIMEOUT_MS: u32 = 5000;
pub const DEFAULT_NOTICE_MS: u32 = 3000;
pub const DEFAULT_ERROR_TOAST_MS: u32 = 5000;
/// Largest delay a browser timer accepts.
pub const MAX_DELAY_MS: u32 = i32::MAX as u32;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewerConfig {
    pub base_path: String,
    pub probe_timeout_ms: u32,
    pub notice_ms: u32,
    pub error_toast_ms: u32,
    pub access_check: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            notice_ms: DEFAULT_NOTICE_MS,
            error_toast_ms: DEFAULT_ERROR_TOAST_MS,
            access_check: true,
        }
    }
}

impl ViewerConfig {
    /// Parses overrides from the host page. Blank input yields the defaults.
    pub fn from_json(text: &str) -> Result<Self, FolioError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(trimmed)?;
        Ok(config.normalized())
    }

    /// Base path always ends with a single slash so candidates can be appended.
    fn normalized(mut self) -> Self {
        let trimmed = self.base_path.trim().trim_end_matches('/');
        self.base_path = if trimmed.is_empty() {
            DEFAULT_BASE_PATH.to_string()
        } else {
            format!("{trimmed}/")
        };
        if self.probe_timeout_ms == 0 {
            self.probe_timeout_ms = DEFAULT_PROBE_TIMEOUT_MS;
        }
        self.probe_timeout_ms = self.probe_timeout_ms.min(MAX_DELAY_MS);
        self.notice_ms = self.notice_ms.min(MAX_DELAY_MS);
        self.error_toast_ms = self.error_toast_ms.min(MAX_DELAY_MS);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_config_uses_defaults() {
        assert_eq!(ViewerConfig::from_json("  ").unwrap(), ViewerConfig::default());
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let config =
            ViewerConfig::from_json(r#"{"basePath": "assets/scans", "accessCheck": false}"#)
                .unwrap();
        assert_eq!(config.base_path, "assets/scans/");
        assert!(!config.access_check);
        assert_eq!(config.probe_timeout_ms, DEFAULT_PROBE_TIMEOUT_MS);
        assert_eq!(config.notice_ms, DEFAULT_NOTICE_MS);
    }

    #[test]
    fn zero_timeout_falls_back_to_default() {
        let config = ViewerConfig::from_json(r#"{"probeTimeoutMs": 0}"#).unwrap();
        assert_eq!(config.probe_timeout_ms, DEFAULT_PROBE_TIMEOUT_MS);
    }

    #[test]
    fn oversized_delays_are_clamped_to_timer_range() {
        let config = ViewerConfig::from_json(
            r#"{"probeTimeoutMs": 3000000000, "noticeMs": 4294967295, "errorToastMs": 2147483648}"#,
        )
        .unwrap();
        assert_eq!(config.probe_timeout_ms, MAX_DELAY_MS);
        assert_eq!(config.notice_ms, MAX_DELAY_MS);
        assert_eq!(config.error_toast_ms, MAX_DELAY_MS);
        assert!(i32::try_from(config.probe_timeout_ms).is_ok());
    }

    #[test]
    fn malformed_config_is_an_error() {
        let err = ViewerConfig::from_json("{basePath:").unwrap_err();
        assert!(matches!(err, FolioError::Config(_)));
    }
}
