use crate::domain::model::{ActorInput, Credentials};
use crate::utils::error::{ActorError, Result};
use crate::utils::validation::{require_input, Validate};
use regex::Regex;
use std::path::Path;

impl ActorInput {
    /// 從檔案載入輸入，副檔名 .toml 用 TOML，其餘視為 JSON
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ActorError::validation("No input provided")
            } else {
                ActorError::IoError(e)
            }
        })?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    /// 從 JSON 字串解析，`null` 或空白視為沒有輸入
    pub fn from_json_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Err(ActorError::validation("No input provided"));
        }

        let processed = substitute_env_vars(content)?;
        serde_json::from_str::<Option<ActorInput>>(&processed)?
            .ok_or_else(|| ActorError::validation("No input provided"))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Err(ActorError::validation("No input provided"));
        }

        let processed = substitute_env_vars(content)?;
        toml::from_str(&processed).map_err(|e| ActorError::ConfigValidationError {
            field: "input".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn credentials(&self) -> Result<Credentials> {
        let key = require_input(self.tomba_api_key.as_deref(), "Tomba API key is required")?;
        let secret = require_input(
            self.tomba_api_secret.as_deref(),
            "Tomba API secret is required",
        )?;

        Ok(Credentials {
            key: key.to_string(),
            secret: secret.to_string(),
        })
    }
}

impl Validate for ActorInput {
    fn validate(&self) -> Result<()> {
        self.credentials()?;

        if self.domains.is_empty() {
            return Err(ActorError::validation("At least one domain is required"));
        }

        Ok(())
    }
}

/// 替換環境變數 (例如 ${TOMBA_API_KEY})，找不到的保持原樣
fn substitute_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(|e| ActorError::ConfigError {
        message: format!("Invalid substitution pattern: {}", e),
    })?;

    let result = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    });

    Ok(result.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Department, OutputFormat, PageLimit};
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_parse_json_input() {
        let input = ActorInput::from_json_str(
            r#"{
                "tombaApiKey": "ta_xxx",
                "tombaApiSecret": "ts_xxx",
                "domains": ["tomba.io", "stripe.com"],
                "outputFormat": "simple",
                "limit": "10"
            }"#,
        )
        .unwrap();

        assert_eq!(input.domains.len(), 2);
        assert_eq!(input.output_format, Some(OutputFormat::Simple));
        assert_eq!(input.limit, Some(PageLimit::Ten));
        assert_ok!(input.validate());
    }

    #[test]
    fn test_null_and_blank_input_are_missing() {
        let err = ActorInput::from_json_str("null").unwrap_err();
        assert_eq!(err.to_string(), "No input provided");

        let err = ActorInput::from_json_str("  \n").unwrap_err();
        assert_eq!(err.to_string(), "No input provided");
    }

    #[test]
    fn test_validation_messages() {
        let mut input = ActorInput {
            tomba_api_key: None,
            tomba_api_secret: Some("ts_xxx".to_string()),
            domains: vec!["tomba.io".to_string()],
            ..Default::default()
        };
        assert_eq!(
            input.validate().unwrap_err().to_string(),
            "Tomba API key is required"
        );

        input.tomba_api_key = Some("ta_xxx".to_string());
        input.tomba_api_secret = Some(String::new());
        assert_eq!(
            input.validate().unwrap_err().to_string(),
            "Tomba API secret is required"
        );

        input.tomba_api_secret = Some("ts_xxx".to_string());
        input.domains.clear();
        assert_eq!(
            input.validate().unwrap_err().to_string(),
            "At least one domain is required"
        );
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TOMBA_ETL_TEST_KEY", "ta_from_env");

        let input = ActorInput::from_json_str(
            r#"{"tombaApiKey": "${TOMBA_ETL_TEST_KEY}", "tombaApiSecret": "${TOMBA_ETL_UNSET_SECRET}", "domains": ["tomba.io"]}"#,
        )
        .unwrap();

        assert_eq!(input.tomba_api_key.as_deref(), Some("ta_from_env"));
        assert_eq!(
            input.tomba_api_secret.as_deref(),
            Some("${TOMBA_ETL_UNSET_SECRET}")
        );

        std::env::remove_var("TOMBA_ETL_TEST_KEY");
    }

    #[test]
    fn test_toml_input_from_file() {
        let mut temp_file = NamedTempFile::with_suffix(".toml").unwrap();
        let toml_content = r#"
tombaApiKey = "ta_xxx"
tombaApiSecret = "ts_xxx"
domains = ["tomba.io"]
department = "marketing"
page = 2
"#;
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let input = ActorInput::from_file(temp_file.path()).unwrap();
        assert_eq!(input.department, Some(Department::Marketing));
        assert_eq!(input.page, Some(2));
        assert_ok!(input.validate());
    }

    #[test]
    fn test_missing_input_file() {
        let err = assert_err!(ActorInput::from_file("/nonexistent/INPUT.json"));
        assert_eq!(err.to_string(), "No input provided");
    }

    #[test]
    fn test_invalid_json_is_a_serialization_error() {
        let err = ActorInput::from_json_str("{\"domains\": [").unwrap_err();
        assert!(matches!(err, ActorError::SerializationError(_)));
    }
}
