pub use crate::config::*;
use crate::tiers::TierTable;

/// A builder for a classification run.
///
/// The tier table is checked when the builder is created, so that a bad table is
/// reported before any item is read.
///
/// ```
/// pub use tier_tally::builder::Builder;
/// pub use tier_tally::TierBoundary;
/// # use tier_tally::TierErrors;
///
/// let mut builder = Builder::new(&TierBoundary::reference_table(), 500)?;
///
/// builder.add_item_simple("Splattershot", 42)?;
/// builder.add_item_simple("Range Blaster", 0)?;
///
/// let classification = builder.classify();
/// assert_eq!(classification.buckets[0].members.len(), 1);
/// assert_eq!(classification.unranked.len(), 1);
///
/// # Ok::<(), TierErrors>(())
/// ```
pub struct Builder {
    pub(crate) _table: TierTable,
    pub(crate) _items: Vec<RankedItem>,
}

impl Builder {
    pub fn new(boundaries: &[TierBoundary], population_size: u64) -> Result<Builder, TierErrors> {
        Ok(Builder {
            _table: TierTable::new(boundaries, population_size)?,
            _items: Vec::new(),
        })
    }

    /// Starts from an already validated table.
    pub fn with_table(table: &TierTable) -> Builder {
        Builder {
            _table: table.clone(),
            _items: Vec::new(),
        }
    }

    /// Adds an item with only a name and a count.
    pub fn add_item_simple(&mut self, identity: &str, count: u64) -> Result<(), TierErrors> {
        self.add_item(&RankedItem::new(identity, count))
    }

    pub fn add_item(&mut self, item: &RankedItem) -> Result<(), TierErrors> {
        self._items.push(item.clone());
        Ok(())
    }

    pub fn table(&self) -> &TierTable {
        &self._table
    }

    pub fn classify(&self) -> Classification {
        self._table.classify(&self._items)
    }
}
