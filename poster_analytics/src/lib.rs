mod config;
pub mod builder;
pub mod manual;
pub mod quick_start;

use log::{debug, info, warn};

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

pub use crate::config::*;

/// The highest raw score accepted from the source data.
pub const MAX_RAW_SCORE: u32 = 100;

/// How many entries the "top countries/institutions" statistics keep.
const TOP_VALUES: usize = 5;

/// Computes the derived columns (normalized score and dense rank) for the
/// given records.
///
/// Arguments:
/// * `records` the records to augment, in source order
/// * `options` the policy for out-of-range raw scores
///
/// The output keeps the input order and length. Records without a usable raw
/// score (or opted out of evaluation) are retained but receive no derived
/// fields. The input is left untouched and running the derivation twice on
/// the same records yields the same output.
pub fn run_derivation(
    records: &[Record],
    options: &DeriveOptions,
) -> Result<Vec<DerivedRecord>, AnalyticsErrors> {
    info!("run_derivation: processing {:?} records", records.len());

    let mut res: Vec<DerivedRecord> = Vec::new();
    for r in records.iter() {
        let score = derived_score(r, options)?;
        res.push(DerivedRecord {
            record: r.clone(),
            score,
            rank: None,
        });
    }

    // Walk the scored records in descending score order, assigning ranks.
    let mut scored: Vec<(usize, f64)> = res
        .iter()
        .enumerate()
        .filter_map(|(idx, dr)| dr.score.map(|s| (idx, s)))
        .collect();
    scored.sort_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(Ordering::Equal));

    let mut cur_rank: u32 = 0;
    let mut prev_score: Option<f64> = None;
    for (idx, s) in scored.iter() {
        if prev_score != Some(*s) {
            cur_rank += 1;
            prev_score = Some(*s);
        }
        res[*idx].rank = Some(cur_rank);
    }
    debug!(
        "run_derivation: {:?} scored records over {:?} distinct ranks",
        scored.len(),
        cur_rank
    );
    Ok(res)
}

fn derived_score(r: &Record, options: &DeriveOptions) -> Result<Option<f64>, AnalyticsErrors> {
    // Records opted out of evaluation are never scored.
    if !r.evaluate.unwrap_or(true) {
        return Ok(None);
    }
    match r.raw_score {
        None => Ok(None),
        Some(raw) if raw > MAX_RAW_SCORE => match options.score_policy {
            ScorePolicy::Lenient => {
                warn!(
                    "record {}: raw score {} out of range, treating as absent",
                    r.id, raw
                );
                Ok(None)
            }
            ScorePolicy::Strict => Err(AnalyticsErrors::ScoreOutOfRange {
                id: r.id,
                raw_score: raw,
            }),
        },
        Some(raw) => Ok(Some(raw as f64 / MAX_RAW_SCORE as f64)),
    }
}

/// The normalized form of a full name, used to group duplicates:
/// lowercased, with runs of whitespace collapsed.
pub fn normalize_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name, last_name)
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
        .to_lowercase()
}

/// Finds the names appearing on more than one record.
///
/// Detection is read-only: nothing is merged or removed.
pub fn find_duplicates(records: &[DerivedRecord]) -> DuplicateReport {
    let mut groups: HashMap<String, Vec<&DerivedRecord>> = HashMap::new();
    for dr in records.iter() {
        let key = normalize_name(&dr.record.first_name, &dr.record.last_name);
        groups.entry(key).or_default().push(dr);
    }

    let mut res: Vec<DuplicateGroup> = groups
        .iter()
        .filter(|(_, members)| members.len() >= 2)
        .map(|(key, members)| DuplicateGroup {
            normalized_name: key.clone(),
            display_name: members[0].record.full_name(),
            ids: members.iter().map(|dr| dr.record.id).collect(),
            axes: members.iter().map(|dr| dr.record.axis).collect(),
            countries: members.iter().map(|dr| dr.record.country.clone()).collect(),
            institutions: members
                .iter()
                .map(|dr| dr.record.institution.clone())
                .collect(),
        })
        .collect();
    res.sort_by(|a, b| a.normalized_name.cmp(&b.normalized_name));

    let duplicated_records: usize = res.iter().map(|g| g.ids.len()).sum();
    let by_axis: Vec<(TopicAxis, usize)> = TopicAxis::ALL
        .iter()
        .map(|axis| {
            let count = res
                .iter()
                .flat_map(|g| g.axes.iter())
                .filter(|a| *a == axis)
                .count();
            (*axis, count)
        })
        .collect();

    info!(
        "find_duplicates: {:?} duplicated names over {:?} records",
        res.len(),
        duplicated_records
    );
    DuplicateReport {
        groups: res,
        duplicated_records,
        by_axis,
    }
}

/// Returns the subset of records satisfying all the constraints of the
/// filter, in input order.
pub fn apply_filter(records: &[DerivedRecord], filter: &Filter) -> Vec<DerivedRecord> {
    let res: Vec<DerivedRecord> = records
        .iter()
        .filter(|dr| matches_filter(dr, filter))
        .cloned()
        .collect();
    debug!(
        "apply_filter: {:?} of {:?} records retained",
        res.len(),
        records.len()
    );
    res
}

/// Evaluates the conjunction of the filter constraints on one record.
pub fn matches_filter(dr: &DerivedRecord, filter: &Filter) -> bool {
    let r = &dr.record;
    if let Some(axes) = &filter.axes {
        if !axes.contains(&r.axis) {
            return false;
        }
    }
    if let Some(countries) = &filter.countries {
        if !countries.iter().any(|c| *c == r.country) {
            return false;
        }
    }
    if let Some(institutions) = &filter.institutions {
        if !institutions.iter().any(|i| *i == r.institution) {
            return false;
        }
    }
    if let Some(sites) = &filter.sites {
        match &r.site {
            Some(site) if sites.iter().any(|s| s == site) => {}
            _ => {
                return false;
            }
        }
    }
    if let Some(presented) = filter.presented {
        if r.presented != Some(presented) {
            return false;
        }
    }
    if let Some(oral) = filter.oral {
        if r.oral != Some(oral) {
            return false;
        }
    }
    if let Some((lo, hi)) = filter.score_range {
        match dr.score {
            Some(s) if lo <= s && s <= hi => {}
            _ => {
                return false;
            }
        }
    }
    if let Some((lo, hi)) = filter.rank_range {
        match dr.rank {
            Some(rank) if lo <= rank && rank <= hi => {}
            _ => {
                return false;
            }
        }
    }
    if let Some(text) = &filter.text {
        let needle = text.trim().to_lowercase();
        if !needle.is_empty() {
            let found = [
                r.first_name.as_str(),
                r.last_name.as_str(),
                r.title.as_str(),
                r.institution.as_str(),
            ]
            .iter()
            .any(|hay| hay.to_lowercase().contains(&needle));
            if !found {
                return false;
            }
        }
    }
    true
}

/// Aggregate statistics over the whole dataset.
pub fn dataset_stats(records: &[DerivedRecord]) -> DatasetStats {
    let by_axis: Vec<(TopicAxis, usize)> = TopicAxis::ALL
        .iter()
        .map(|axis| {
            let count = records.iter().filter(|dr| dr.record.axis == *axis).count();
            (*axis, count)
        })
        .collect();

    let country_counts = value_counts(records, |dr| Some(dr.record.country.as_str()));
    let institution_counts = value_counts(records, |dr| Some(dr.record.institution.as_str()));

    let scores: Vec<f64> = records.iter().filter_map(|dr| dr.score).collect();
    let score_stats = if scores.is_empty() {
        None
    } else {
        let mut min = scores[0];
        let mut max = scores[0];
        for s in scores.iter() {
            if *s < min {
                min = *s;
            }
            if *s > max {
                max = *s;
            }
        }
        Some(ScoreStats {
            scored: scores.len(),
            mean: scores.iter().sum::<f64>() / scores.len() as f64,
            min,
            max,
        })
    };

    DatasetStats {
        total_records: records.len(),
        countries: country_counts.len(),
        institutions: institution_counts.len(),
        by_axis,
        top_countries: top_values(country_counts),
        top_institutions: top_values(institution_counts),
        presented: records
            .iter()
            .filter(|dr| dr.record.presented == Some(true))
            .count(),
        oral: records
            .iter()
            .filter(|dr| dr.record.oral == Some(true))
            .count(),
        score_stats,
    }
}

/// Per-axis breakdown, in axis order. Axes without records are included
/// with zero counts.
pub fn axis_analysis(records: &[DerivedRecord]) -> Vec<AxisStats> {
    let total = records.len();
    TopicAxis::ALL
        .iter()
        .map(|axis| {
            let subset: Vec<&DerivedRecord> = records
                .iter()
                .filter(|dr| dr.record.axis == *axis)
                .collect();
            let country_counts = value_counts(&subset, |dr| Some(dr.record.country.as_str()));
            let institutions = value_counts(&subset, |dr| Some(dr.record.institution.as_str()));
            let share = if total == 0 {
                0.0
            } else {
                100.0 * subset.len() as f64 / total as f64
            };
            AxisStats {
                axis: *axis,
                total: subset.len(),
                share,
                countries: country_counts.len(),
                institutions: institutions.len(),
                top_countries: top_values(country_counts),
            }
        })
        .collect()
}

fn value_counts<T: std::borrow::Borrow<DerivedRecord>, F>(
    records: &[T],
    get: F,
) -> HashMap<String, usize>
where
    F: Fn(&DerivedRecord) -> Option<&str>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for dr in records.iter() {
        if let Some(value) = get(dr.borrow()) {
            *counts.entry(value.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

// Highest counts first, names as tiebreak, truncated to TOP_VALUES.
fn top_values(counts: HashMap<String, usize>) -> Vec<(String, usize)> {
    let mut res: Vec<(String, usize)> = counts.into_iter().collect();
    res.sort_by(|(name_a, count_a), (name_b, count_b)| {
        count_b.cmp(count_a).then_with(|| name_a.cmp(name_b))
    });
    res.truncate(TOP_VALUES);
    res
}

/// Sorted distinct countries, for filter widgets.
pub fn distinct_countries(records: &[DerivedRecord]) -> Vec<String> {
    distinct(records, |r| Some(r.country.as_str()))
}

/// Sorted distinct institutions, for filter widgets.
pub fn distinct_institutions(records: &[DerivedRecord]) -> Vec<String> {
    distinct(records, |r| Some(r.institution.as_str()))
}

/// Sorted distinct presentation sites, for filter widgets.
pub fn distinct_sites(records: &[DerivedRecord]) -> Vec<String> {
    distinct(records, |r| r.site.as_deref())
}

fn distinct<F>(records: &[DerivedRecord], get: F) -> Vec<String>
where
    F: Fn(&Record) -> Option<&str>,
{
    let set: BTreeSet<String> = records
        .iter()
        .filter_map(|dr| get(&dr.record).map(|s| s.to_string()))
        .collect();
    set.into_iter().collect()
}

/// The `n` best ranked records, ordered by rank then identifier.
pub fn top_ranked(records: &[DerivedRecord], n: usize) -> Vec<DerivedRecord> {
    let mut ranked: Vec<DerivedRecord> = records
        .iter()
        .filter(|dr| dr.rank.is_some())
        .cloned()
        .collect();
    ranked.sort_by_key(|dr| (dr.rank, dr.record.id));
    ranked.truncate(n);
    ranked
}
