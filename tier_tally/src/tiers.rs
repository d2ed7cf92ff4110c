use log::{debug, info, warn};

use crate::config::*;

/// A tier table that has been checked once and can then be used for any number of
/// classifications.
///
/// Invariants: at least one tier, criteria strictly descending and finite, positive
/// population size. The cutoffs are computed at construction.
#[derive(PartialEq, Debug, Clone)]
pub struct TierTable {
    boundaries: Vec<TierBoundary>,
    population_size: u64,
    cutoffs: Vec<f64>,
}

impl TierTable {
    pub fn new(boundaries: &[TierBoundary], population_size: u64) -> Result<TierTable, TierErrors> {
        if population_size == 0 {
            return Err(TierErrors::InvalidPopulationSize);
        }
        if boundaries.is_empty() {
            return Err(TierErrors::EmptyTierTable);
        }
        if let Some(position) = boundaries.iter().position(|b| !b.criteria.is_finite()) {
            return Err(TierErrors::InvalidCriteria { position });
        }
        for (idx, pair) in boundaries.windows(2).enumerate() {
            if pair[1].criteria >= pair[0].criteria {
                return Err(TierErrors::InvalidBoundaryOrder { position: idx + 1 });
            }
        }

        let cutoffs: Vec<f64> = boundaries
            .iter()
            .map(|b| target_count(population_size, b.criteria))
            .collect();
        debug!(
            "TierTable::new: population {} cutoffs {:?}",
            population_size, cutoffs
        );
        Ok(TierTable {
            boundaries: boundaries.to_vec(),
            population_size,
            cutoffs,
        })
    }

    /// The reference tiers over the reference population.
    pub fn reference() -> Result<TierTable, TierErrors> {
        TierTable::new(&TierBoundary::reference_table(), REFERENCE_POPULATION_SIZE)
    }

    pub fn boundaries(&self) -> &[TierBoundary] {
        &self.boundaries
    }

    pub fn population_size(&self) -> u64 {
        self.population_size
    }

    /// The minimum count of the tier at this position.
    pub fn cutoff(&self, idx: usize) -> Option<f64> {
        self.cutoffs.get(idx).cloned()
    }

    // The top tier has no upper bound.
    fn upper_bound(&self, idx: usize) -> f64 {
        if idx == 0 {
            f64::INFINITY
        } else {
            self.cutoffs[idx - 1]
        }
    }

    fn contains(&self, idx: usize, count: u64) -> bool {
        let c = count as f64;
        c >= self.cutoffs[idx] && c < self.upper_bound(idx)
    }

    /// The position of the tier a count falls in, or None if it is below every cutoff.
    pub fn tier_of(&self, count: u64) -> Option<usize> {
        (0..self.cutoffs.len()).find(|idx| self.contains(*idx, count))
    }

    /// Splits the items into the tiers of this table.
    ///
    /// Each tier scans the whole list: an item is in tier `i` when its count is at
    /// least the cutoff of `i` and strictly below the cutoff of `i - 1`. A count equal
    /// to a cutoff hence lands in the better tier. The order of the items is kept
    /// inside each bucket.
    pub fn classify(&self, items: &[RankedItem]) -> Classification {
        info!(
            "Classifying {} items into {} tiers (population {})",
            items.len(),
            self.boundaries.len(),
            self.population_size
        );
        let buckets: Vec<TierBucket> = self
            .boundaries
            .iter()
            .enumerate()
            .map(|(idx, boundary)| TierBucket {
                boundary: boundary.clone(),
                cutoff: self.cutoffs[idx],
                members: items
                    .iter()
                    .filter(|item| self.contains(idx, item.count))
                    .cloned()
                    .collect(),
            })
            .collect();

        let lowest = self.cutoffs[self.cutoffs.len() - 1];
        let unranked: Vec<RankedItem> = items
            .iter()
            .filter(|item| (item.count as f64) < lowest)
            .cloned()
            .collect();

        for item in items.iter() {
            if item.count > self.population_size {
                warn!(
                    "classify: item {:?} has a count {} above the population size {}",
                    item.identity, item.count, self.population_size
                );
            }
        }
        for b in buckets.iter() {
            debug!(
                "classify: tier {} (cutoff {}): {} items",
                b.boundary.label,
                b.cutoff,
                b.members.len()
            );
        }
        debug!("classify: {} unranked items", unranked.len());

        Classification { buckets, unranked }
    }
}

fn target_count(population_size: u64, criteria: f64) -> f64 {
    population_size as f64 * (criteria / 100.0)
}

/// Validates the tier table and classifies the items in one call.
///
/// Prefer building a [`TierTable`] once when the same table is used repeatedly.
pub fn classify(
    items: &[RankedItem],
    boundaries: &[TierBoundary],
    population_size: u64,
) -> Result<Classification, TierErrors> {
    let table = TierTable::new(boundaries, population_size)?;
    Ok(table.classify(items))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn three_tiers() -> Vec<TierBoundary> {
        vec![
            TierBoundary::new("X", 6.0),
            TierBoundary::new("S", 4.0),
            TierBoundary::new("A", 1.0),
        ]
    }

    fn labels_of(c: &Classification, identity: &str) -> Vec<String> {
        c.buckets
            .iter()
            .filter(|b| b.members.iter().any(|m| m.identity == identity))
            .map(|b| b.boundary.label.clone())
            .collect()
    }

    #[test]
    fn count_at_top_cutoff_lands_in_top_tier() {
        init();
        let c = classify(&[RankedItem::new("a", 30)], &three_tiers(), 500).unwrap();
        assert_eq!(c.buckets[0].cutoff, 30.0);
        assert_eq!(labels_of(&c, "a"), vec!["X".to_string()]);
    }

    #[test]
    fn count_between_cutoffs() {
        init();
        let c = classify(&[RankedItem::new("a", 20)], &three_tiers(), 500).unwrap();
        assert_eq!(c.buckets[1].cutoff, 20.0);
        assert_eq!(labels_of(&c, "a"), vec!["S".to_string()]);
    }

    #[test]
    fn zero_count_is_unranked() {
        init();
        let c = classify(&[RankedItem::new("a", 0)], &three_tiers(), 500).unwrap();
        assert_eq!(c.classified_count(), 0);
        assert_eq!(c.unranked, vec![RankedItem::new("a", 0)]);
        assert_eq!(c.buckets.len(), 3);
        assert!(c.buckets.iter().all(|b| b.members.is_empty()));
    }

    #[test]
    fn ties_go_to_the_better_tier() {
        init();
        let table = TierTable::new(&three_tiers(), 500).unwrap();
        for idx in 1..3 {
            let cutoff = table.cutoff(idx).unwrap() as u64;
            assert_eq!(table.tier_of(cutoff), Some(idx));
            assert_eq!(table.tier_of(cutoff - 1), if idx == 2 { None } else { Some(idx + 1) });
        }
    }

    #[test]
    fn top_tier_has_no_upper_bound() {
        init();
        let table = TierTable::new(&three_tiers(), 500).unwrap();
        assert_eq!(table.tier_of(500), Some(0));
        assert_eq!(table.tier_of(u64::MAX), Some(0));
    }

    #[test]
    fn buckets_do_not_overlap_and_partition_items() {
        init();
        let table = TierTable::reference().unwrap();
        let items: Vec<RankedItem> = (0..=60)
            .map(|count| RankedItem::new(&format!("w{}", count), count))
            .collect();
        let c = table.classify(&items);
        assert_eq!(c.buckets.len(), 9);
        for item in items.iter() {
            let n = labels_of(&c, &item.identity).len();
            assert!(n <= 1, "{} is in {} buckets", item.identity, n);
        }
        assert_eq!(c.classified_count() + c.unranked.len(), items.len());
        // Only the zero count is below the lowest cutoff (0.01).
        assert_eq!(c.unranked.len(), 1);
        assert!(c.classified_count() < items.len());
    }

    #[test]
    fn all_items_classified_when_none_below_lowest() {
        init();
        let items = vec![RankedItem::new("a", 5), RankedItem::new("b", 100)];
        let c = classify(&items, &three_tiers(), 500).unwrap();
        assert_eq!(c.classified_count(), items.len());
        assert!(c.unranked.is_empty());
    }

    #[test]
    fn reference_table_buckets() {
        init();
        let items = vec![
            RankedItem::new("Splattershot", 42),
            RankedItem::new("N-ZAP '85", 30),
            RankedItem::new("Tri-Slosher", 25),
            RankedItem::new("Hydra Splatling", 24),
            RankedItem::new("Luna Blaster", 8),
            RankedItem::new("Octobrush", 7),
            RankedItem::new("Bamboozler", 2),
            RankedItem::new("Range Blaster", 1),
            RankedItem::new("Explosher", 0),
        ];
        let c = TierTable::reference().unwrap().classify(&items);
        let members = |label: &str| -> Vec<String> {
            c.bucket(label)
                .unwrap()
                .members
                .iter()
                .map(|m| m.identity.clone())
                .collect()
        };
        assert_eq!(members("X"), vec!["Splattershot", "N-ZAP '85"]);
        assert_eq!(members("S+"), vec!["Tri-Slosher"]);
        assert_eq!(members("S"), vec!["Hydra Splatling"]);
        assert!(members("A+").is_empty());
        assert!(members("A").is_empty());
        assert_eq!(members("B+"), vec!["Luna Blaster"]);
        assert_eq!(members("B"), vec!["Octobrush"]);
        assert_eq!(members("C+"), vec!["Bamboozler"]);
        assert_eq!(members("C"), vec!["Range Blaster"]);
        assert_eq!(c.unranked.len(), 1);
        assert_eq!(c.unranked[0].identity, "Explosher");
    }

    #[test]
    fn classify_is_idempotent() {
        init();
        let items = vec![
            RankedItem::new("a", 31),
            RankedItem::new("b", 3),
            RankedItem::new("c", 0),
        ];
        let first = classify(&items, &three_tiers(), 500).unwrap();
        let second = classify(&items, &three_tiers(), 500).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_bad_tables() {
        init();
        assert_eq!(
            TierTable::new(&three_tiers(), 0),
            Err(TierErrors::InvalidPopulationSize)
        );
        assert_eq!(TierTable::new(&[], 500), Err(TierErrors::EmptyTierTable));

        let ascending = vec![TierBoundary::new("A", 1.0), TierBoundary::new("X", 6.0)];
        assert_eq!(
            TierTable::new(&ascending, 500),
            Err(TierErrors::InvalidBoundaryOrder { position: 1 })
        );

        let duplicated = vec![
            TierBoundary::new("X", 6.0),
            TierBoundary::new("S", 4.0),
            TierBoundary::new("S-", 4.0),
        ];
        assert_eq!(
            classify(&[], &duplicated, 500),
            Err(TierErrors::InvalidBoundaryOrder { position: 2 })
        );

        let nan = vec![TierBoundary::new("X", f64::NAN)];
        assert_eq!(
            TierTable::new(&nan, 500),
            Err(TierErrors::InvalidCriteria { position: 0 })
        );
    }

    #[test]
    fn empty_items_give_empty_buckets() {
        init();
        let c = classify(&[], &three_tiers(), 500).unwrap();
        assert_eq!(c.buckets.len(), 3);
        assert_eq!(c.classified_count(), 0);
        assert!(c.unranked.is_empty());
    }
}
