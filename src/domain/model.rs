use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Page size accepted by the domain search endpoint.
///
/// Values outside the documented set are kept as `Other` and sent as given;
/// the API decides whether they are acceptable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLimit {
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "20")]
    Twenty,
    #[serde(rename = "50")]
    Fifty,
    #[serde(untagged)]
    Other(String),
}

impl PageLimit {
    pub fn as_str(&self) -> &str {
        match self {
            PageLimit::Ten => "10",
            PageLimit::Twenty => "20",
            PageLimit::Fifty => "50",
            PageLimit::Other(value) => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Department {
    Engineering,
    Sales,
    Finance,
    Hr,
    It,
    Marketing,
    Operations,
    Management,
    Executive,
    Legal,
    Support,
    Communication,
    Software,
    Security,
    Pr,
    Warehouse,
    Diversity,
    Administrative,
    Facilities,
    Accounting,
    #[serde(untagged)]
    Other(String),
}

impl Department {
    pub fn as_str(&self) -> &str {
        match self {
            Department::Engineering => "engineering",
            Department::Sales => "sales",
            Department::Finance => "finance",
            Department::Hr => "hr",
            Department::It => "it",
            Department::Marketing => "marketing",
            Department::Operations => "operations",
            Department::Management => "management",
            Department::Executive => "executive",
            Department::Legal => "legal",
            Department::Support => "support",
            Department::Communication => "communication",
            Department::Software => "software",
            Department::Security => "security",
            Department::Pr => "pr",
            Department::Warehouse => "warehouse",
            Department::Diversity => "diversity",
            Department::Administrative => "administrative",
            Department::Facilities => "facilities",
            Department::Accounting => "accounting",
            Department::Other(value) => value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Detailed,
    Simple,
}

/// Actor input document. Loaded once at start and never mutated.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorInput {
    #[serde(default)]
    pub tomba_api_key: Option<String>,
    #[serde(default)]
    pub tomba_api_secret: Option<String>,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_emails_per_domain: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_company_info: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<PageLimit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

// 不把金鑰寫進日誌
impl fmt::Debug for ActorInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(value: &Option<String>) -> &'static str {
            match value {
                Some(v) if !v.is_empty() => "<redacted>",
                _ => "<missing>",
            }
        }

        f.debug_struct("ActorInput")
            .field("tomba_api_key", &redact(&self.tomba_api_key))
            .field("tomba_api_secret", &redact(&self.tomba_api_secret))
            .field("domains", &self.domains)
            .field("max_emails_per_domain", &self.max_emails_per_domain)
            .field("include_company_info", &self.include_company_info)
            .field("output_format", &self.output_format)
            .field("page", &self.page)
            .field("limit", &self.limit)
            .field("department", &self.department)
            .field("country", &self.country)
            .finish()
    }
}

impl ActorInput {
    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            page: self.page,
            limit: self.limit.clone(),
            department: self.department.clone(),
            country: self.country.clone(),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub key: String,
    pub secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &"<redacted>")
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Optional refinements shared by every domain of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<PageLimit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl SearchParams {
    pub fn is_empty(&self) -> bool {
        self.page.is_none()
            && self.limit.is_none()
            && self.department.is_none()
            && self.country.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    pub domain: String,
    #[serde(flatten)]
    pub params: SearchParams,
}

impl SearchQuery {
    pub fn new(domain: impl Into<String>, params: SearchParams) -> Self {
        Self {
            domain: domain.into(),
            params,
        }
    }

    /// 查詢字串參數，未設定的欄位不送出
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("domain", self.domain.clone())];
        if let Some(page) = self.params.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = &self.params.limit {
            pairs.push(("limit", limit.as_str().to_string()));
        }
        if let Some(department) = &self.params.department {
            pairs.push(("department", department.as_str().to_string()));
        }
        if let Some(country) = &self.params.country {
            pairs.push(("country", country.clone()));
        }
        pairs
    }
}

/// Domain search response. Only `data` is kept; it is an opaque payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Result entry for a domain whose processing failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub domain: String,
    pub error: String,
}

impl ErrorRecord {
    pub fn new(domain: impl Into<String>, error: &impl fmt::Display) -> Self {
        Self {
            domain: domain.into(),
            error: format!("Error: {}", error),
        }
    }
}

pub const DEFAULT_MAX_EMAILS_PER_DOMAIN: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarySettings {
    pub max_emails_per_domain: u32,
    pub include_company_info: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<PageLimit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_domains: usize,
    pub total_results: usize,
    #[serde(serialize_with = "serialize_millis")]
    pub processed_at: DateTime<Utc>,
    pub settings: SummarySettings,
}

// 時間戳記固定到毫秒，例如 2026-10-17T08:30:00.123Z
fn serialize_millis<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}

impl Summary {
    pub fn new(input: &ActorInput, total_results: usize) -> Self {
        Self {
            total_domains: input.domains.len(),
            total_results,
            processed_at: Utc::now(),
            settings: SummarySettings {
                max_emails_per_domain: input
                    .max_emails_per_domain
                    .filter(|max| *max > 0)
                    .unwrap_or(DEFAULT_MAX_EMAILS_PER_DOMAIN),
                include_company_info: input.include_company_info.unwrap_or(false),
                page: input.page,
                limit: input.limit.clone(),
                department: input.department.clone(),
                country: input.country.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_actor_input_deserializes_camel_case() {
        let input: ActorInput = serde_json::from_value(json!({
            "tombaApiKey": "ta_key",
            "tombaApiSecret": "ts_secret",
            "domains": ["stripe.com", "tomba.io"],
            "limit": "20",
            "department": "engineering",
            "country": "US",
            "page": 2
        }))
        .unwrap();

        assert_eq!(input.tomba_api_key.as_deref(), Some("ta_key"));
        assert_eq!(input.domains, vec!["stripe.com", "tomba.io"]);
        assert_eq!(input.limit, Some(PageLimit::Twenty));
        assert_eq!(input.department, Some(Department::Engineering));
        assert_eq!(input.page, Some(2));
    }

    #[test]
    fn test_unlisted_refinements_pass_through() {
        let input: ActorInput = serde_json::from_value(json!({
            "domains": ["tomba.io"],
            "department": "astrology",
            "limit": "100"
        }))
        .unwrap();

        assert_eq!(input.department, Some(Department::Other("astrology".to_string())));
        assert_eq!(input.limit, Some(PageLimit::Other("100".to_string())));

        let query = SearchQuery::new("tomba.io", input.search_params());
        assert_eq!(
            query.query_pairs(),
            vec![
                ("domain", "tomba.io".to_string()),
                ("limit", "100".to_string()),
                ("department", "astrology".to_string()),
            ]
        );

        let summary = serde_json::to_value(Summary::new(&input, 0)).unwrap();
        assert_eq!(summary["settings"]["department"], "astrology");
        assert_eq!(summary["settings"]["limit"], "100");
    }

    #[test]
    fn test_debug_output_hides_secrets() {
        let input = ActorInput {
            tomba_api_key: Some("ta_very_secret".to_string()),
            tomba_api_secret: None,
            domains: vec!["tomba.io".to_string()],
            ..Default::default()
        };
        let rendered = format!("{:?}", input);
        assert!(!rendered.contains("ta_very_secret"));
        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains("<missing>"));
    }

    #[test]
    fn test_query_pairs_omit_unset_params() {
        let query = SearchQuery::new("tomba.io", SearchParams::default());
        assert_eq!(query.query_pairs(), vec![("domain", "tomba.io".to_string())]);

        let query = SearchQuery::new(
            "tomba.io",
            SearchParams {
                page: Some(3),
                limit: Some(PageLimit::Fifty),
                department: Some(Department::Hr),
                country: Some("FR".to_string()),
            },
        );
        assert_eq!(
            query.query_pairs(),
            vec![
                ("domain", "tomba.io".to_string()),
                ("page", "3".to_string()),
                ("limit", "50".to_string()),
                ("department", "hr".to_string()),
                ("country", "FR".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_response_null_data_is_none() {
        let response: SearchResponse = serde_json::from_value(json!({"data": null})).unwrap();
        assert!(response.data.is_none());

        let response: SearchResponse = serde_json::from_value(json!({"meta": {}})).unwrap();
        assert!(response.data.is_none());

        let response: SearchResponse =
            serde_json::from_value(json!({"data": {"organization": {}}})).unwrap();
        assert_eq!(response.data, Some(json!({"organization": {}})));
    }

    #[test]
    fn test_summary_substitutes_defaults_and_omits_unset() {
        let input = ActorInput {
            domains: vec!["a.com".to_string(), "b.com".to_string()],
            country: Some("US".to_string()),
            ..Default::default()
        };

        let summary = Summary::new(&input, 1);
        let value = serde_json::to_value(&summary).unwrap();

        assert_eq!(value["totalDomains"], 2);
        assert_eq!(value["totalResults"], 1);
        assert_eq!(value["settings"]["maxEmailsPerDomain"], 10);
        assert_eq!(value["settings"]["includeCompanyInfo"], false);
        assert_eq!(value["settings"]["country"], "US");
        assert!(value["settings"].get("page").is_none());
        assert!(value["settings"].get("department").is_none());
        assert!(value["processedAt"].is_string());
    }

    #[test]
    fn test_processed_at_has_millisecond_precision() {
        let mut summary = Summary::new(&ActorInput::default(), 0);
        summary.processed_at = DateTime::parse_from_rfc3339("2026-10-17T08:30:00.123456789Z")
            .unwrap()
            .with_timezone(&Utc);

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["processedAt"], "2026-10-17T08:30:00.123Z");

        let now = serde_json::to_value(Summary::new(&ActorInput::default(), 0)).unwrap();
        let rendered = now["processedAt"].as_str().unwrap();
        assert_eq!(rendered.len(), "2026-10-17T08:30:00.123Z".len());
        assert!(rendered.ends_with('Z'));
    }

    #[test]
    fn test_error_record_prefixes_message() {
        let record = ErrorRecord::new("b.com", &"connection reset");
        assert_eq!(record.error, "Error: connection reset");
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"domain": "b.com", "error": "Error: connection reset"})
        );
    }
}
