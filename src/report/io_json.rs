// Primitives for reading JSON inputs.

use crate::report::*;

pub fn read_json_items(path: &str) -> ReportResult<Vec<ParsedItem>> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let items: Vec<ParsedItem> =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    debug!("read_json_items: {} items in {}", items.len(), path);
    Ok(items)
}

pub fn read_json_summaries(path: &str) -> ReportResult<Vec<ParsedSummary>> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let rows: Vec<ParsedSummary> =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    debug!("read_json_summaries: {} rows in {}", rows.len(), path);
    Ok(rows)
}
