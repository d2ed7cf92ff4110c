/*!
Tier classification and vote tally formatting.

This crate holds the two computations behind the ranking and voting pages of a
community site:

* [`TierTable`] splits a ranked population (for instance the weapons used in a Top 500
  ranking) into tiers, using cutoffs that are a percentage of the population size.
* [`format_region_counts`] and [`format_summaries`] prepare the voting counts of each
  member, split across two regions, for display.

Both are pure functions over in-memory data. Fetching the data and rendering the
results is left to the caller. See the [`manual`] for the formats used by the
`tiertally` command line tool.

```
use tier_tally::*;

let table = TierTable::reference()?;
let classification = table.classify(&[RankedItem::new("Splattershot", 30)]);
assert_eq!(classification.buckets[0].boundary.label, "X");

# Ok::<(), TierErrors>(())
```
*/

mod config;
mod tally;
mod tiers;

pub mod builder;
pub mod manual;

pub use crate::config::*;
pub use crate::tally::*;
pub use crate::tiers::*;
