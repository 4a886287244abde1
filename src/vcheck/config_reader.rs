use crate::vcheck::*;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "listName")]
    pub list_name: Option<String>,
    /// A file path, or 'stdout'.
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
}

/// The configuration as it is repeated at the top of a report.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(rename = "listName")]
    pub list_name: Option<String>,
    #[serde(rename = "referenceDate")]
    pub reference_date: Option<String>,
    #[serde(rename = "minimumAge")]
    pub minimum_age: u32,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    /// csv, xlsx or json
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
    #[serde(rename = "strictColumns")]
    pub strict_columns: Option<bool>,
}

impl FileSource {
    pub fn is_strict(&self) -> bool {
        self.strict_columns.unwrap_or(false)
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct VcheckRules {
    #[serde(rename = "minimumAge")]
    pub minimum_age: Option<u32>,
    /// In YYYY-MM-DD format. Today if not provided.
    #[serde(rename = "referenceDate")]
    pub reference_date: Option<String>,
}

impl VcheckRules {
    pub fn validation_rules(&self) -> VcheckResult<ValidationRules> {
        let minimum_age = self
            .minimum_age
            .unwrap_or(ValidationRules::DEFAULT_RULES.minimum_age);
        if minimum_age > 150 {
            whatever!("minimumAge {} is not a plausible age", minimum_age)
        }
        let reference_date = match &self.reference_date {
            Some(s) => Some(
                NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                    .context(InvalidReferenceDateSnafu { value: s.clone() })?,
            ),
            None => None,
        };
        Ok(ValidationRules {
            minimum_age,
            reference_date,
        })
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct VcheckConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "voterFileSources", default)]
    pub voter_file_sources: Vec<FileSource>,
    #[serde(default)]
    pub rules: VcheckRules,
}

pub fn read_config(path: &str) -> VcheckResult<VcheckConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: VcheckConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

pub fn read_reference(path: &str) -> VcheckResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}
