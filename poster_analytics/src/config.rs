// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The seven thematic axes a submission may belong to.
///
/// The labels follow the convention of the source dataset (`E1` .. `E7`).
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum TopicAxis {
    E1,
    E2,
    E3,
    E4,
    E5,
    E6,
    E7,
}

impl TopicAxis {
    pub const ALL: [TopicAxis; 7] = [
        TopicAxis::E1,
        TopicAxis::E2,
        TopicAxis::E3,
        TopicAxis::E4,
        TopicAxis::E5,
        TopicAxis::E6,
        TopicAxis::E7,
    ];

    /// Parses an axis label, tolerating surrounding whitespace and casing.
    pub fn parse(label: &str) -> Option<TopicAxis> {
        match label.trim().to_ascii_uppercase().as_str() {
            "E1" => Some(TopicAxis::E1),
            "E2" => Some(TopicAxis::E2),
            "E3" => Some(TopicAxis::E3),
            "E4" => Some(TopicAxis::E4),
            "E5" => Some(TopicAxis::E5),
            "E6" => Some(TopicAxis::E6),
            "E7" => Some(TopicAxis::E7),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TopicAxis::E1 => "E1",
            TopicAxis::E2 => "E2",
            TopicAxis::E3 => "E3",
            TopicAxis::E4 => "E4",
            TopicAxis::E5 => "E5",
            TopicAxis::E6 => "E6",
            TopicAxis::E7 => "E7",
        }
    }
}

/// One poster submission, as assembled from the source table.
///
/// Optional fields correspond to columns that may be absent from the source
/// file. The computed columns live in [DerivedRecord].
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Record {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub institution: String,
    pub institution_abbr: Option<String>,
    /// Origin city or region of the submitter.
    pub origin: Option<String>,
    /// Venue or room where the poster was presented.
    pub site: Option<String>,
    pub country: String,
    pub axis: TopicAxis,
    /// Whether the submission was selected for an oral presentation.
    pub oral: Option<bool>,
    /// Whether the submitter actually presented.
    pub presented: Option<bool>,
    /// Opt-in to scoring. Absent means eligible.
    pub evaluate: Option<bool>,
    /// Integer rating in [0, 100] given by the committee.
    pub raw_score: Option<u32>,
    pub notes: Option<String>,
}

impl Record {
    /// A record with only the required fields filled in.
    pub fn simple(
        id: u64,
        first_name: &str,
        last_name: &str,
        title: &str,
        institution: &str,
        country: &str,
        axis: TopicAxis,
    ) -> Record {
        Record {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            title: title.to_string(),
            institution: institution.to_string(),
            institution_abbr: None,
            origin: None,
            site: None,
            country: country.to_string(),
            axis,
            oral: None,
            presented: None,
            evaluate: None,
            raw_score: None,
            notes: None,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A record augmented with the computed columns.
#[derive(PartialEq, Debug, Clone)]
pub struct DerivedRecord {
    pub record: Record,
    /// Raw score normalized to [0, 1]. Absent when the record is not scored.
    pub score: Option<f64>,
    /// Dense rank over descending score: the best score gets 1, ties share a
    /// rank, the next distinct score continues sequentially.
    pub rank: Option<u32>,
}

// ********* Output data structures **********

/// All the records sharing one normalized full name.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DuplicateGroup {
    pub normalized_name: String,
    /// Full name as spelled by the first matching record.
    pub display_name: String,
    pub ids: Vec<u64>,
    pub axes: Vec<TopicAxis>,
    pub countries: Vec<String>,
    pub institutions: Vec<String>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DuplicateReport {
    pub groups: Vec<DuplicateGroup>,
    /// Number of records that belong to some duplicated name.
    pub duplicated_records: usize,
    /// Count of duplicated records per axis, in axis order.
    pub by_axis: Vec<(TopicAxis, usize)>,
}

/// Aggregates over the scored subset of the dataset.
#[derive(PartialEq, Debug, Clone)]
pub struct ScoreStats {
    pub scored: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct DatasetStats {
    pub total_records: usize,
    pub countries: usize,
    pub institutions: usize,
    pub by_axis: Vec<(TopicAxis, usize)>,
    pub top_countries: Vec<(String, usize)>,
    pub top_institutions: Vec<(String, usize)>,
    pub presented: usize,
    pub oral: usize,
    pub score_stats: Option<ScoreStats>,
}

/// Detailed statistics for a single axis.
#[derive(PartialEq, Debug, Clone)]
pub struct AxisStats {
    pub axis: TopicAxis,
    pub total: usize,
    /// Share of the whole dataset, in percent.
    pub share: f64,
    pub countries: usize,
    pub institutions: usize,
    pub top_countries: Vec<(String, usize)>,
}

/// Errors that prevent a derivation or a build from completing.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum AnalyticsErrors {
    ScoreOutOfRange { id: u64, raw_score: u32 },
    DuplicateId { id: u64 },
}

impl Error for AnalyticsErrors {}

impl Display for AnalyticsErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalyticsErrors::ScoreOutOfRange { id, raw_score } => {
                write!(f, "record {}: raw score {} is out of range", id, raw_score)
            }
            AnalyticsErrors::DuplicateId { id } => {
                write!(f, "record identifier {} is not unique", id)
            }
        }
    }
}

// ********* Configuration **********

/// How to treat out-of-range raw scores.
///
/// The source data historically contains a few of them, so the permissive
/// mode is the default.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ScorePolicy {
    /// Drop the value and keep the record unscored.
    Lenient,
    /// Fail the derivation.
    Strict,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DeriveOptions {
    pub score_policy: ScorePolicy,
}

impl DeriveOptions {
    pub const DEFAULT_OPTIONS: DeriveOptions = DeriveOptions {
        score_policy: ScorePolicy::Lenient,
    };
}

/// A conjunction of optional constraints over the derived record set.
///
/// A field left at `None` imposes no restriction.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Filter {
    pub axes: Option<Vec<TopicAxis>>,
    pub countries: Option<Vec<String>>,
    pub institutions: Option<Vec<String>>,
    pub sites: Option<Vec<String>>,
    pub presented: Option<bool>,
    pub oral: Option<bool>,
    /// Inclusive bounds over the derived score.
    pub score_range: Option<(f64, f64)>,
    /// Inclusive bounds over the derived rank.
    pub rank_range: Option<(u32, u32)>,
    /// Case-insensitive substring over names, title and institution.
    pub text: Option<String>,
}
