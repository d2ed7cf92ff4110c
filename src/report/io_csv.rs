// Primitives for reading CSV files.

use std::fs::File;

use crate::report::{
    io_common::{parse_counts, parse_flag},
    *,
};

pub fn read_csv_items(path: &str, cfs: &FileSource) -> ReportResult<Vec<ParsedItem>> {
    let identity_idx = cfs.identity_column_index()?;
    let count_idx = cfs.count_column_index()?;
    let power_idx = cfs.power_column_index()?;

    let mut res: Vec<ParsedItem> = Vec::new();
    let (records, row_offset) = get_records(path, cfs)?;

    for (idx, line_r) in records.enumerate() {
        let lineno = idx + row_offset + 1;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        debug!("read_csv_items: lineno: {:?} row: {:?}", lineno, line);

        let identity = line
            .get(identity_idx)
            .context(CsvLineTooShortSnafu { lineno })?
            .trim()
            .to_string();
        let count_s = line
            .get(count_idx)
            .context(CsvLineTooShortSnafu { lineno })?;
        let count = count_s
            .trim()
            .parse::<u64>()
            .ok()
            .context(CsvFieldSnafu {
                lineno,
                field: "count",
                value: count_s,
            })?;

        let average_power: Option<f64> = match line.get(power_idx) {
            Some(s) if !s.trim().is_empty() => {
                Some(s.trim().parse::<f64>().ok().context(CsvFieldSnafu {
                    lineno,
                    field: "average power",
                    value: s,
                })?)
            }
            _ => None,
        };

        res.push(ParsedItem {
            identity,
            count,
            average_power,
        });
    }
    Ok(res)
}

pub fn read_csv_summaries(path: &str, cfs: &FileSource) -> ReportResult<Vec<ParsedSummary>> {
    let delimiter = cfs.counts_delimiter();

    let mut res: Vec<ParsedSummary> = Vec::new();
    let (records, row_offset) = get_records(path, cfs)?;

    for (idx, line_r) in records.enumerate() {
        let lineno = idx + row_offset + 1;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        debug!("read_csv_summaries: lineno: {:?} row: {:?}", lineno, line);

        let name = get_cell(&line, 0, lineno)?.trim().to_string();
        let percentage_s = get_cell(&line, 1, lineno)?;
        let percentage = percentage_s
            .trim()
            .parse::<f64>()
            .ok()
            .context(CsvFieldSnafu {
                lineno,
                field: "percentage",
                value: percentage_s,
            })?;
        let region_for_voting = get_cell(&line, 2, lineno)?.trim().to_string();
        let counts_na_s = get_cell(&line, 3, lineno)?;
        let counts_na = parse_counts(counts_na_s, &delimiter).context(CsvFieldSnafu {
            lineno,
            field: "counts NA",
            value: counts_na_s,
        })?;
        let counts_eu_s = get_cell(&line, 4, lineno)?;
        let counts_eu = parse_counts(counts_eu_s, &delimiter).context(CsvFieldSnafu {
            lineno,
            field: "counts EU",
            value: counts_eu_s,
        })?;
        let flag = |i: usize, field: &str| -> ReportResult<bool> {
            let s = line.get(i).unwrap_or("");
            parse_flag(s).context(CsvFieldSnafu {
                lineno,
                field,
                value: s,
            })
        };
        let was_suggested = flag(5, "suggested")?;
        let was_vouched = flag(6, "vouched")?;

        res.push(ParsedSummary {
            name,
            percentage,
            counts_na,
            counts_eu,
            region_for_voting,
            was_suggested,
            was_vouched,
        });
    }
    Ok(res)
}

fn get_cell(line: &csv::StringRecord, idx: usize, lineno: usize) -> ReportResult<&str> {
    line.get(idx).context(CsvLineTooShortSnafu { lineno })
}

fn get_records(
    path: &str,
    cfs: &FileSource,
) -> ReportResult<(csv::StringRecordsIntoIter<File>, usize)> {
    let first_row = cfs.first_row_index()?;
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let mut records = rdr.into_records();
    for _ in 0..first_row {
        _ = records.next();
    }
    Ok((records, first_row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_tmp(name: &str, contents: &str) -> String {
        let p = std::env::temp_dir().join(format!("tiertally-{}-{}", std::process::id(), name));
        let mut f = File::create(&p).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        p.display().to_string()
    }

    #[test]
    fn items_with_header() {
        let path = write_tmp(
            "items.csv",
            "weapon,count,power\nSplattershot,42,2741.5\nRange Blaster,1,\n",
        );
        let cfs = FileSource::new("csv", &path);
        let items = read_csv_items(&path, &cfs).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].identity, "Splattershot");
        assert_eq!(items[0].count, 42);
        assert_eq!(items[0].average_power, Some(2741.5));
        assert_eq!(items[1].average_power, None);
    }

    #[test]
    fn bad_count_reports_line() {
        let path = write_tmp("bad_items.csv", "weapon,count\nSplattershot,many\n");
        let cfs = FileSource::new("csv", &path);
        match read_csv_items(&path, &cfs) {
            Err(ReportError::CsvField { lineno, .. }) => assert_eq!(lineno, 2),
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn summaries_with_optional_flags() {
        let path = write_tmp(
            "history.csv",
            "name,percentage,region,na,eu,suggested,vouched\nSendou,75,NA,10/3/7/9,2/1/4/0,false,true\nKiver,40,EU,1/2/3,4/5/6\n",
        );
        let cfs = FileSource::new("csv", &path);
        let rows = read_csv_summaries(&path, &cfs).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].counts_na, vec![10, 3, 7, 9]);
        assert!(rows[0].was_vouched);
        assert!(!rows[1].was_suggested);
        assert_eq!(rows[1].region_for_voting, "EU");
        assert_eq!(rows[1].percentage, 40.0);
    }
}
