// Assembles the summary JSON consumed by the presentation layer, and the
// reference check used to catch regressions in the derived output.

use serde_json::{json, Map as JSMap, Value as JSValue};
use text_diff::print_diff;

use crate::dashboard::countries::country_code;
use crate::dashboard::*;

fn counts_to_json(counts: &[(String, usize)]) -> Vec<JSValue> {
    counts
        .iter()
        .map(|(name, count)| json!({ "name": name, "count": count }))
        .collect()
}

fn stats_to_json(stats: &DatasetStats) -> JSValue {
    let mut by_axis: JSMap<String, JSValue> = JSMap::new();
    for (axis, count) in stats.by_axis.iter() {
        by_axis.insert(axis.as_str().to_string(), json!(count));
    }
    let scores: JSValue = match &stats.score_stats {
        None => JSValue::Null,
        Some(s) => json!({
            "scored": s.scored,
            "mean": format!("{:.2}", s.mean),
            "min": format!("{:.2}", s.min),
            "max": format!("{:.2}", s.max),
        }),
    };
    json!({
        "totalRecords": stats.total_records,
        "countries": stats.countries,
        "institutions": stats.institutions,
        "presented": stats.presented,
        "oral": stats.oral,
        "byAxis": by_axis,
        "topCountries": counts_to_json(&stats.top_countries),
        "topInstitutions": counts_to_json(&stats.top_institutions),
        "scores": scores,
    })
}

fn axis_stats_to_json(per_axis: &[AxisStats]) -> Vec<JSValue> {
    per_axis
        .iter()
        .map(|a| {
            json!({
                "axis": a.axis.as_str(),
                "total": a.total,
                "share": format!("{:.2}", a.share),
                "countries": a.countries,
                "institutions": a.institutions,
                "topCountries": counts_to_json(&a.top_countries),
            })
        })
        .collect()
}

fn duplicates_to_json(report: &DuplicateReport) -> JSValue {
    let mut by_axis: JSMap<String, JSValue> = JSMap::new();
    for (axis, count) in report.by_axis.iter() {
        by_axis.insert(axis.as_str().to_string(), json!(count));
    }
    let groups: Vec<JSValue> = report
        .groups
        .iter()
        .map(|g| {
            json!({
                "name": g.display_name,
                "count": g.ids.len(),
                "ids": g.ids,
                "axes": g.axes.iter().map(|a| a.as_str()).collect::<Vec<&str>>(),
                "countries": g.countries,
                "institutions": g.institutions,
            })
        })
        .collect();
    json!({
        "duplicatedNames": report.groups.len(),
        "duplicatedRecords": report.duplicated_records,
        "byAxis": by_axis,
        "groups": groups,
    })
}

fn ranking_to_json(top: &[DerivedRecord]) -> Vec<JSValue> {
    let mut res: Vec<JSValue> = Vec::new();
    for dr in top.iter() {
        let r = &dr.record;
        let score = match dr.score {
            Some(s) => format!("{:.2}", s),
            None => "".to_string(),
        };
        res.push(json!({
            "rank": dr.rank,
            "id": r.id,
            "firstName": r.first_name,
            "lastName": r.last_name,
            "axis": r.axis.as_str(),
            "country": r.country,
            "countryCode": country_code(&r.country).unwrap_or(""),
            "institution": r.institution,
            "score": score,
        }));
    }
    res
}

pub fn build_summary_js(
    config: &DashboardConfig,
    stats: &DatasetStats,
    per_axis: &[AxisStats],
    duplicates: &DuplicateReport,
    derived: &[DerivedRecord],
    top_n: usize,
) -> JSValue {
    let top = top_ranked(derived, top_n);
    let colors: JSMap<String, JSValue> = axis_colors(config)
        .into_iter()
        .map(|(axis, color)| (axis, json!(color)))
        .collect();
    json!({
        "config": {
            "dataset": config.output_settings.dataset_name,
            "validation": config.validation.clone().unwrap_or_else(|| "lenient".to_string()),
            "topN": top_n,
        },
        "totals": stats_to_json(stats),
        "byAxis": axis_stats_to_json(per_axis),
        "ranking": ranking_to_json(&top),
        "duplicates": duplicates_to_json(duplicates),
        "axisColors": colors,
    })
}

pub fn read_summary(path: &str) -> DashResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu {})?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

/// Compares the produced summary against a stored reference, printing a
/// diff on mismatch.
pub fn check_reference(path: &str, pretty_js_summary: &str) -> DashResult<()> {
    let summary_ref = read_summary(path)?;
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_summary {
        warn!("Found differences with the reference summary");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_summary, "\n");
        return ReferenceMismatchSnafu {}.fail();
    }
    Ok(())
}

pub fn write_summary(out: &Option<String>, pretty_js_summary: &str) -> DashResult<()> {
    match out.as_deref() {
        None => {
            println!("summary:{}", pretty_js_summary);
        }
        Some("stdout") | Some("-") => {
            println!("{}", pretty_js_summary);
        }
        Some(path) => {
            fs::write(path, pretty_js_summary).context(WritingSummarySnafu { path })?;
            info!("Summary written to {:?}", path);
        }
    }
    Ok(())
}
