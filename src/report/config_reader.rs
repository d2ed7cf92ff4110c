use crate::report::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "reportName")]
    pub report_name: String,
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct TierEntry {
    pub label: String,
    pub criteria: f64,
    pub color: Option<String>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct TierSettings {
    #[serde(rename = "populationSize")]
    pub population_size: u64,
    pub tiers: Vec<TierEntry>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "firstRowIndex")]
    pub _first_row_index: Option<JSValue>,
    #[serde(rename = "identityColumnIndex")]
    pub _identity_column_index: Option<JSValue>,
    #[serde(rename = "countColumnIndex")]
    pub _count_column_index: Option<JSValue>,
    #[serde(rename = "powerColumnIndex")]
    pub _power_column_index: Option<JSValue>,
    #[serde(rename = "countsDelimiter")]
    pub counts_delimiter: Option<String>,
}

impl FileSource {
    pub fn new(provider: &str, file_path: &str) -> FileSource {
        FileSource {
            provider: provider.to_string(),
            file_path: file_path.to_string(),
            _first_row_index: None,
            _identity_column_index: None,
            _count_column_index: None,
            _power_column_index: None,
            counts_delimiter: None,
        }
    }

    // The indexes in the configuration start at 1, as in spreadsheets.
    // They are returned starting at 0.

    pub fn first_row_index(&self) -> ReportResult<usize> {
        let x = read_js_index(&self._first_row_index, 2)?;
        Ok(x - 1)
    }

    pub fn identity_column_index(&self) -> ReportResult<usize> {
        let x = read_js_index(&self._identity_column_index, 1)?;
        Ok(x - 1)
    }

    pub fn count_column_index(&self) -> ReportResult<usize> {
        let x = read_js_index(&self._count_column_index, 2)?;
        Ok(x - 1)
    }

    pub fn power_column_index(&self) -> ReportResult<usize> {
        let x = read_js_index(&self._power_column_index, 3)?;
        Ok(x - 1)
    }

    pub fn counts_delimiter(&self) -> String {
        match self.counts_delimiter.clone() {
            Some(d) if !d.is_empty() => d,
            _ => "/".to_string(),
        }
    }
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    #[serde(rename = "tierSettings")]
    pub tier_settings: Option<TierSettings>,
    #[serde(rename = "trendSources", default)]
    pub trend_sources: Vec<FileSource>,
    #[serde(rename = "historySources", default)]
    pub history_sources: Vec<FileSource>,
}

pub fn read_config(path: &str) -> ReportResult<ReportConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    serde_json::from_str(&contents).context(ParsingJsonSnafu { path })
}

pub fn read_summary(path: &str) -> ReportResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read content: {:?}", contents);
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(js)
}

// A missing value takes the default. A present value must be a positive integer,
// written either as a number or as a string.
fn read_js_index(x: &Option<JSValue>, default: usize) -> ReportResult<usize> {
    let res = match x {
        None => Some(default),
        Some(JSValue::Number(n)) => n.as_u64().map(|x| x as usize),
        Some(JSValue::String(s)) => s.trim().parse::<usize>().ok(),
        _ => None,
    };
    match res {
        Some(idx) if idx >= 1 => Ok(idx),
        _ => ParsingJsonNumberSnafu {
            value: format!("{:?}", x),
        }
        .fail(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn indexes_default_and_parse() {
        let mut cfs = FileSource::new("csv", "a.csv");
        assert_eq!(cfs.first_row_index().unwrap(), 1);
        assert_eq!(cfs.identity_column_index().unwrap(), 0);
        assert_eq!(cfs.count_column_index().unwrap(), 1);
        assert_eq!(cfs.power_column_index().unwrap(), 2);
        assert_eq!(cfs.counts_delimiter(), "/");

        cfs._first_row_index = Some(json!(1));
        cfs._count_column_index = Some(json!("3"));
        cfs._power_column_index = Some(json!(4));
        assert_eq!(cfs.first_row_index().unwrap(), 0);
        assert_eq!(cfs.count_column_index().unwrap(), 2);
        assert_eq!(cfs.power_column_index().unwrap(), 3);
    }

    #[test]
    fn zero_index_is_rejected() {
        let mut cfs = FileSource::new("csv", "a.csv");
        cfs._identity_column_index = Some(json!(0));
        assert!(cfs.identity_column_index().is_err());
        cfs._identity_column_index = Some(json!("first"));
        assert!(cfs.identity_column_index().is_err());
    }

    #[test]
    fn config_without_tiers() {
        let js = r#"{
            "outputSettings": { "reportName": "test" },
            "historySources": [{ "provider": "json", "filePath": "h.json" }]
        }"#;
        let config: ReportConfig = serde_json::from_str(js).unwrap();
        assert_eq!(config.tier_settings, None);
        assert!(config.trend_sources.is_empty());
        assert_eq!(config.history_sources.len(), 1);
        assert_eq!(config.output_settings.output_path, None);
    }
}
