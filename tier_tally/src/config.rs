// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// One scored participant of a fixed-size ranked population.
///
/// The count is the only value used by the tier computation: it is the number of
/// entries of the population that this entity accounts for (for instance the number
/// of Top 500 placements of a weapon).
#[derive(PartialEq, Debug, Clone)]
pub struct RankedItem {
    pub identity: String,
    pub count: u64,
    /// Opaque statistic carried along for display (average power of the placements).
    pub average_power: Option<f64>,
}

impl RankedItem {
    pub fn new(identity: &str, count: u64) -> RankedItem {
        RankedItem {
            identity: identity.to_string(),
            count,
            average_power: None,
        }
    }
}

/// The definition of one tier.
///
/// `criteria` is a percentage of the population: 100 is the whole population,
/// 6 means the top 6%.
#[derive(PartialEq, Debug, Clone)]
pub struct TierBoundary {
    pub label: String,
    pub criteria: f64,
    pub color: Option<String>,
}

impl TierBoundary {
    pub fn new(label: &str, criteria: f64) -> TierBoundary {
        TierBoundary {
            label: label.to_string(),
            criteria,
            color: None,
        }
    }

    /// The tier table of the reference deployment, from "X" down to "C".
    pub fn reference_table() -> Vec<TierBoundary> {
        [
            ("X", 6.0, "purple.700"),
            ("S+", 5.0, "red.700"),
            ("S", 4.0, "red.700"),
            ("A+", 3.0, "orange.700"),
            ("A", 2.0, "orange.700"),
            ("B+", 1.5, "yellow.700"),
            ("B", 1.0, "yellow.700"),
            ("C+", 0.4, "green.700"),
            // 1 in 500
            ("C", 0.002, "green.700"),
        ]
        .iter()
        .map(|(label, criteria, color)| TierBoundary {
            label: label.to_string(),
            criteria: *criteria,
            color: Some(color.to_string()),
        })
        .collect()
    }
}

/// The two voting regions.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Region {
    Na,
    Eu,
}

impl Region {
    pub const ALL: [Region; 2] = [Region::Na, Region::Eu];

    /// Parses the short code of a region ("NA" or "EU", case insensitive).
    pub fn from_code(code: &str) -> Option<Region> {
        match code.trim().to_ascii_uppercase().as_str() {
            "NA" => Some(Region::Na),
            "EU" => Some(Region::Eu),
            _ => None,
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Region::Na => write!(f, "NA"),
            Region::Eu => write!(f, "EU"),
        }
    }
}

/// The raw voting counts of one member, split by region.
#[derive(PartialEq, Debug, Clone)]
pub struct RegionCountRow {
    pub name: String,
    pub counts_na: Vec<u32>,
    pub counts_eu: Vec<u32>,
    /// The region whose counts are authoritative for this member.
    pub region_for_voting: Region,
    /// Between 0 and 100.
    pub percentage: f64,
    pub was_suggested: bool,
    pub was_vouched: bool,
}

impl RegionCountRow {
    pub fn counts(&self, region: Region) -> &[u32] {
        match region {
            Region::Na => &self.counts_na,
            Region::Eu => &self.counts_eu,
        }
    }

    /// The pass criterion. It does not depend on the region being displayed.
    pub fn is_passing(&self) -> bool {
        self.percentage >= PASS_PERCENTAGE
    }
}

// ******** Output data structures *********

#[derive(PartialEq, Debug, Clone)]
pub struct TierBucket {
    pub boundary: TierBoundary,
    /// The minimum count to enter this tier.
    pub cutoff: f64,
    pub members: Vec<RankedItem>,
}

/// The result of one classification run.
///
/// Every input item is either in exactly one bucket or in `unranked`.
#[derive(PartialEq, Debug, Clone)]
pub struct Classification {
    /// One bucket per tier, in the order of the tier table.
    pub buckets: Vec<TierBucket>,
    /// The items below the cutoff of the lowest tier.
    pub unranked: Vec<RankedItem>,
}

impl Classification {
    pub fn classified_count(&self) -> usize {
        self.buckets.iter().map(|b| b.members.len()).sum()
    }

    pub fn bucket(&self, label: &str) -> Option<&TierBucket> {
        self.buckets.iter().find(|b| b.boundary.label == label)
    }
}

/// Which half of a count sequence an index falls in.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Half {
    Upper,
    Lower,
}

impl Display for Half {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Half::Upper => write!(f, "upper"),
            Half::Lower => write!(f, "lower"),
        }
    }
}

/// The counts of one region, as they should be displayed for a given member.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RegionCounts {
    pub region: Region,
    pub display_counts: Vec<u32>,
    pub is_region_active: bool,
}

#[derive(PartialEq, Debug, Clone)]
pub struct VotingSummaryView {
    pub name: String,
    pub percentage: f64,
    pub passed: bool,
    pub counts_na: RegionCounts,
    pub counts_eu: RegionCounts,
    pub region_for_voting: Region,
    pub was_suggested: bool,
    pub was_vouched: bool,
}

/// A summary row that could not be formatted.
#[derive(PartialEq, Debug, Clone)]
pub struct RejectedRow {
    /// Position of the row in the input.
    pub index: usize,
    pub name: String,
    pub error: TallyErrors,
}

#[derive(PartialEq, Debug, Clone)]
pub struct FormattedHistory {
    pub rows: Vec<VotingSummaryView>,
    pub rejected: Vec<RejectedRow>,
}

/// Errors in the definition of a tier table.
///
/// These are configuration errors: they should be reported when the table is loaded.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum TierErrors {
    EmptyTierTable,
    /// The boundary at this position does not have a strictly smaller criteria than
    /// the previous one.
    InvalidBoundaryOrder {
        position: usize,
    },
    InvalidCriteria {
        position: usize,
    },
    InvalidPopulationSize,
}

impl Error for TierErrors {}

impl Display for TierErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TierErrors::EmptyTierTable => write!(f, "the tier table has no tiers"),
            TierErrors::InvalidBoundaryOrder { position } => write!(
                f,
                "tier criteria must be strictly descending (tier at position {})",
                position
            ),
            TierErrors::InvalidCriteria { position } => {
                write!(f, "tier criteria is not a number (tier at position {})", position)
            }
            TierErrors::InvalidPopulationSize => write!(f, "population size must be positive"),
        }
    }
}

/// Errors in a single row of vote counts.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum TallyErrors {
    InvalidCountLength { region: Region, length: usize },
}

impl Error for TallyErrors {}

impl Display for TallyErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TallyErrors::InvalidCountLength { region, length } => write!(
                f,
                "expected at least {} counts for region {}, found {}",
                MIN_COUNT_LENGTH, region, length
            ),
        }
    }
}

// ********* Configuration **********

/// The size of the ranked population in the reference deployment (Top 500).
pub const REFERENCE_POPULATION_SIZE: u64 = 500;

/// A member passes the vote at this percentage or above.
pub const PASS_PERCENTAGE: f64 = 50.0;

/// Count sequences must have at least this many elements.
pub const MIN_COUNT_LENGTH: usize = 3;
