use log::{debug, info, warn};

use tier_tally::builder::Builder;
use tier_tally::*;

use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::report::config_reader::*;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_json;

#[derive(Debug, Snafu)]
pub enum ReportError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the JSON content of {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing the report"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Error writing the report to {path}"))]
    WritingReport {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Expected a positive integer, found {value}"))]
    ParsingJsonNumber { value: String },
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("Invalid tier table"))]
    InvalidTierTable { source: TierErrors },
    #[snafu(display("Provider not implemented: {provider:?}"))]
    UnknownProvider { provider: String },
    #[snafu(display("Row {name:?}: unknown region {code:?}"))]
    UnknownRegion { name: String, code: String },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error parsing CSV line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("CSV line {lineno} is too short"))]
    CsvLineTooShort { lineno: usize },
    #[snafu(display("CSV line {lineno}: could not read the {field} from {value:?}"))]
    CsvField {
        lineno: usize,
        field: String,
        value: String,
    },
    #[snafu(display("Difference detected between the computed report and the reference report"))]
    ReferenceMismatch {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type ReportResult<T> = Result<T, ReportError>;

/// A ranked item, as parsed by the readers.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ParsedItem {
    pub identity: String,
    pub count: u64,
    #[serde(rename = "averagePower", default)]
    pub average_power: Option<f64>,
}

/// A voting summary, as parsed by the readers.
/// The region is not checked yet.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ParsedSummary {
    pub name: String,
    pub percentage: f64,
    #[serde(rename = "countsNA")]
    pub counts_na: Vec<u32>,
    #[serde(rename = "countsEU")]
    pub counts_eu: Vec<u32>,
    #[serde(rename = "regionForVoting")]
    pub region_for_voting: String,
    #[serde(rename = "wasSuggested", default)]
    pub was_suggested: bool,
    #[serde(rename = "wasVouched", default)]
    pub was_vouched: bool,
}

fn validate_tiers(settings: &Option<TierSettings>) -> ReportResult<TierTable> {
    let table = match settings {
        Some(ts) => {
            let boundaries: Vec<TierBoundary> = ts
                .tiers
                .iter()
                .map(|t| TierBoundary {
                    label: t.label.clone(),
                    criteria: t.criteria,
                    color: match t.color.clone() {
                        Some(x) if x.is_empty() => None,
                        x => x,
                    },
                })
                .collect();
            TierTable::new(&boundaries, ts.population_size)
        }
        None => TierTable::reference(),
    }
    .context(InvalidTierTableSnafu {})?;
    info!(
        "Tier table: {} tiers, population {}",
        table.boundaries().len(),
        table.population_size()
    );
    Ok(table)
}

fn source_path(root_path: &Path, cfs: &FileSource) -> String {
    root_path.join(&cfs.file_path).display().to_string()
}

fn read_trend_data(root_path: &Path, cfs: &FileSource) -> ReportResult<Vec<RankedItem>> {
    let p = source_path(root_path, cfs);
    info!(
        "Attempting to read trend file {:?} ({})",
        io_common::simplify_file_name(&p),
        cfs.provider
    );
    let parsed = match cfs.provider.as_str() {
        "json" => io_json::read_json_items(&p),
        "csv" => io_csv::read_csv_items(&p, cfs),
        x => UnknownProviderSnafu { provider: x }.fail(),
    }?;
    Ok(validate_items(&parsed))
}

fn validate_items(parsed: &[ParsedItem]) -> Vec<RankedItem> {
    parsed
        .iter()
        .map(|pi| RankedItem {
            identity: pi.identity.clone(),
            count: pi.count,
            average_power: pi.average_power,
        })
        .collect()
}

fn read_history_data(root_path: &Path, cfs: &FileSource) -> ReportResult<Vec<RegionCountRow>> {
    let p = source_path(root_path, cfs);
    info!(
        "Attempting to read history file {:?} ({})",
        io_common::simplify_file_name(&p),
        cfs.provider
    );
    let parsed = match cfs.provider.as_str() {
        "json" => io_json::read_json_summaries(&p),
        "csv" => io_csv::read_csv_summaries(&p, cfs),
        x => UnknownProviderSnafu { provider: x }.fail(),
    }?;
    validate_summaries(&parsed)
}

fn validate_summaries(parsed: &[ParsedSummary]) -> ReportResult<Vec<RegionCountRow>> {
    let mut res: Vec<RegionCountRow> = Vec::new();
    for ps in parsed.iter() {
        let region_for_voting =
            Region::from_code(&ps.region_for_voting).context(UnknownRegionSnafu {
                name: ps.name.clone(),
                code: ps.region_for_voting.clone(),
            })?;
        if !(0.0..=100.0).contains(&ps.percentage) {
            warn!(
                "validate_summaries: {}: percentage {} is outside of 0-100",
                ps.name, ps.percentage
            );
        }
        res.push(RegionCountRow {
            name: ps.name.clone(),
            counts_na: ps.counts_na.clone(),
            counts_eu: ps.counts_eu.clone(),
            region_for_voting,
            percentage: ps.percentage,
            was_suggested: ps.was_suggested,
            was_vouched: ps.was_vouched,
        });
    }
    Ok(res)
}

fn item_to_json(item: &RankedItem) -> JSValue {
    json!({
        "identity": item.identity,
        "count": item.count,
        "averagePower": item.average_power,
    })
}

fn classification_to_json(c: &Classification) -> (Vec<JSValue>, Vec<JSValue>) {
    let tiers: Vec<JSValue> = c
        .buckets
        .iter()
        .map(|b| {
            json!({
                "label": b.boundary.label,
                "color": b.boundary.color,
                "criteria": b.boundary.criteria,
                "cutoff": b.cutoff,
                "members": b.members.iter().map(item_to_json).collect::<Vec<JSValue>>(),
            })
        })
        .collect();
    let unranked: Vec<JSValue> = c.unranked.iter().map(item_to_json).collect();
    (tiers, unranked)
}

fn region_counts_to_json(rc: &RegionCounts) -> JSValue {
    json!({
        "display": rc.to_slash_string(),
        "active": rc.is_region_active,
        "halves": rc.halves().iter().map(|h| h.to_string()).collect::<Vec<String>>(),
    })
}

fn history_to_json(history: &FormattedHistory) -> (Vec<JSValue>, Vec<JSValue>) {
    let rows: Vec<JSValue> = history
        .rows
        .iter()
        .map(|v| {
            json!({
                "name": v.name,
                "percentage": v.percentage,
                "passed": v.passed,
                "countsNA": region_counts_to_json(&v.counts_na),
                "countsEU": region_counts_to_json(&v.counts_eu),
                "region": v.region_for_voting.to_string(),
                "suggested": v.was_suggested,
                "vouched": v.was_vouched,
            })
        })
        .collect();
    let skipped: Vec<JSValue> = history
        .rejected
        .iter()
        .map(|r| json!({ "name": r.name, "error": r.error.to_string() }))
        .collect();
    (rows, skipped)
}

fn build_report_js(config: &ReportConfig, root_path: &Path) -> ReportResult<JSValue> {
    // Configuration errors stop the run before any data is read.
    let table = validate_tiers(&config.tier_settings)?;

    let mut report: JSMap<String, JSValue> = JSMap::new();
    report.insert(
        "config".to_string(),
        json!({
            "report": config.output_settings.report_name,
            "populationSize": table.population_size(),
        }),
    );

    if !config.trend_sources.is_empty() {
        let mut builder = Builder::with_table(&table);
        for cfs in config.trend_sources.iter() {
            for item in read_trend_data(root_path, cfs)?.iter() {
                builder.add_item(item).context(InvalidTierTableSnafu {})?;
            }
        }
        let classification = builder.classify();
        let (tiers, unranked) = classification_to_json(&classification);
        report.insert("tiers".to_string(), JSValue::Array(tiers));
        report.insert("unranked".to_string(), JSValue::Array(unranked));
    }

    if !config.history_sources.is_empty() {
        let mut rows: Vec<RegionCountRow> = Vec::new();
        for cfs in config.history_sources.iter() {
            let mut file_rows = read_history_data(root_path, cfs)?;
            rows.append(&mut file_rows);
        }
        let history = format_summaries(&rows);
        if !history.rejected.is_empty() {
            warn!(
                "{} voting summaries were skipped, see skippedRows in the report",
                history.rejected.len()
            );
        }
        let (rows_js, skipped_js) = history_to_json(&history);
        report.insert("history".to_string(), JSValue::Array(rows_js));
        report.insert("skippedRows".to_string(), JSValue::Array(skipped_js));
    }

    Ok(JSValue::Object(report))
}

fn write_report(pretty_js: &str, out_path: Option<String>) -> ReportResult<()> {
    match out_path {
        Some(p) if p != "stdout" && !p.is_empty() => {
            info!("Writing report to {:?}", p);
            fs::write(&p, pretty_js).context(WritingReportSnafu { path: p.clone() })
        }
        _ => {
            println!("{}", pretty_js);
            Ok(())
        }
    }
}

fn run_config(
    config: &ReportConfig,
    root_path: &Path,
    out_path: Option<String>,
    check_summary_path: Option<String>,
) -> ReportResult<()> {
    let result_js = build_report_js(config, root_path)?;
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(SerializingJsonSnafu {})?;

    let out = out_path.or_else(|| config.output_settings.output_path.clone());
    write_report(&pretty_js_stats, out)?;

    // The reference report, if provided for comparison
    if let Some(summary_p) = check_summary_path {
        let summary_ref = read_summary(&summary_p)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(SerializingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference report {:?}", summary_p);
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
        }
        ensure!(
            pretty_js_summary_ref == pretty_js_stats,
            ReferenceMismatchSnafu {}
        );
    }
    Ok(())
}

/// Runs the report described by a configuration file.
pub fn run_report(
    config_path: String,
    out_path: Option<String>,
    check_summary_path: Option<String>,
) -> ReportResult<()> {
    let config = read_config(&config_path)?;
    info!("config: {:?}", config);
    let root_p = Path::new(config_path.as_str())
        .parent()
        .context(MissingParentDirSnafu {})?;
    run_config(&config, root_p, out_path, check_summary_path)
}

/// Runs a report on a single input file, with the reference tier table.
pub fn run_input(
    input_path: Option<String>,
    input_type: Option<String>,
    data_kind: Option<String>,
    out_path: Option<String>,
    check_summary_path: Option<String>,
) -> ReportResult<()> {
    let input_path = match input_path {
        Some(p) => p,
        None => whatever!("No input: pass a configuration file with --config or a data file with --input"),
    };
    let source = FileSource::new(
        input_type.as_deref().unwrap_or("json"),
        input_path.as_str(),
    );
    let mut config = ReportConfig {
        output_settings: OutputSettings {
            report_name: io_common::simplify_file_name(&input_path),
            output_path: None,
        },
        tier_settings: None,
        trend_sources: vec![],
        history_sources: vec![],
    };
    match data_kind.as_deref().unwrap_or("trends") {
        "trends" => config.trend_sources.push(source),
        "history" => config.history_sources.push(source),
        x => whatever!("Unknown data kind {:?}: expected 'trends' or 'history'", x),
    }
    run_config(&config, Path::new(""), out_path, check_summary_path)
}

#[cfg(test)]
fn run_report_test(test_name: &str, config_lpath: &str, summary_lpath: &str) -> ReportResult<()> {
    let test_dir = option_env!("TIERTALLY_TEST_DIR")
        .unwrap_or(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data"));
    info!("Running test {}", test_name);
    run_report(
        format!("{}/{}/{}", test_dir, test_name, config_lpath),
        Some("stdout".to_string()),
        Some(format!("{}/{}/{}", test_dir, test_name, summary_lpath)),
    )
}

#[cfg(test)]
pub fn test_wrapper(test_name: &str) {
    let res = run_report_test(
        test_name,
        format!("{}_config.json", test_name).as_str(),
        format!("{}_expected_summary.json", test_name).as_str(),
    );
    if let Err(e) = &res {
        eprintln!("An error occured {}", e);
    }
    assert!(res.is_ok(), "test {} failed: {:?}", test_name, res);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn trends_reference_tiers() {
        init();
        test_wrapper("trends_reference_tiers");
    }

    #[test]
    fn trends_custom_tiers_csv() {
        init();
        test_wrapper("trends_custom_tiers_csv");
    }

    #[test]
    fn history_regions() {
        init();
        test_wrapper("history_regions");
    }

    #[test]
    fn invalid_tier_order_is_fatal() {
        init();
        let res = run_report_test(
            "invalid_tier_order",
            "invalid_tier_order_config.json",
            "missing.json",
        );
        match res {
            Err(ReportError::InvalidTierTable { source }) => {
                assert_eq!(source, TierErrors::InvalidBoundaryOrder { position: 2 })
            }
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn unknown_region_is_rejected() {
        let parsed = vec![ParsedSummary {
            name: "Sendou".to_string(),
            percentage: 50.0,
            counts_na: vec![1, 2, 3],
            counts_eu: vec![1, 2, 3],
            region_for_voting: "JP".to_string(),
            was_suggested: false,
            was_vouched: false,
        }];
        assert!(matches!(
            validate_summaries(&parsed),
            Err(ReportError::UnknownRegion { .. })
        ));
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let cfs = FileSource::new("xlsx", "weapons.xlsx");
        assert!(matches!(
            read_trend_data(Path::new(""), &cfs),
            Err(ReportError::UnknownProvider { .. })
        ));
    }

    #[test]
    fn run_input_needs_a_file() {
        assert!(run_input(None, None, None, None, None).is_err());
        assert!(run_input(
            Some("weapons.json".to_string()),
            None,
            Some("calendar".to_string()),
            None,
            None
        )
        .is_err());
    }
}
