use log::{debug, info, warn};

use crate::config::*;

/// Selects the counts of `target_region` that should be shown for this row.
///
/// The region that cast the authoritative vote shows all its counts. The other region
/// only shows the counts at positions 1 and 2: its first count is not relevant.
pub fn format_region_counts(
    row: &RegionCountRow,
    target_region: Region,
) -> Result<RegionCounts, TallyErrors> {
    for region in Region::ALL {
        let length = row.counts(region).len();
        if length < MIN_COUNT_LENGTH {
            return Err(TallyErrors::InvalidCountLength { region, length });
        }
    }

    let counts = row.counts(target_region);
    let is_region_active = target_region == row.region_for_voting;
    let display_counts = if is_region_active {
        counts.to_vec()
    } else {
        counts[1..3].to_vec()
    };
    Ok(RegionCounts {
        region: target_region,
        display_counts,
        is_region_active,
    })
}

/// The half of a sequence of length `len` that position `index` falls in.
///
/// The middle element of an odd-length sequence belongs to the lower half.
pub fn half_of(index: usize, len: usize) -> Half {
    if (index + 1) as f64 <= len as f64 / 2.0 {
        Half::Upper
    } else {
        Half::Lower
    }
}

impl RegionCounts {
    pub fn halves(&self) -> Vec<Half> {
        let len = self.display_counts.len();
        (0..len).map(|idx| half_of(idx, len)).collect()
    }

    /// The counts separated by slashes, like `3/7`.
    pub fn to_slash_string(&self) -> String {
        self.display_counts
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<String>>()
            .join("/")
    }
}

/// Formats both region columns of a voting summary.
pub fn format_summary(row: &RegionCountRow) -> Result<VotingSummaryView, TallyErrors> {
    let counts_na = format_region_counts(row, Region::Na)?;
    let counts_eu = format_region_counts(row, Region::Eu)?;
    Ok(VotingSummaryView {
        name: row.name.clone(),
        percentage: row.percentage,
        passed: row.is_passing(),
        counts_na,
        counts_eu,
        region_for_voting: row.region_for_voting,
        was_suggested: row.was_suggested,
        was_vouched: row.was_vouched,
    })
}

/// Formats a batch of summaries.
///
/// A malformed row does not stop the batch: it is logged and reported in `rejected`.
pub fn format_summaries(rows: &[RegionCountRow]) -> FormattedHistory {
    info!("Formatting {} voting summaries", rows.len());
    let mut res = FormattedHistory {
        rows: Vec::new(),
        rejected: Vec::new(),
    };
    for (index, row) in rows.iter().enumerate() {
        match format_summary(row) {
            Ok(view) => {
                debug!(
                    "format_summaries: {}: NA {:?} EU {:?}",
                    view.name, view.counts_na, view.counts_eu
                );
                res.rows.push(view);
            }
            Err(error) => {
                warn!(
                    "format_summaries: dropping row {} ({}): {}",
                    index, row.name, error
                );
                res.rejected.push(RejectedRow {
                    index,
                    name: row.name.clone(),
                    error,
                });
            }
        }
    }
    res
}
