use log::{debug, info, warn};

use poster_analytics::*;
use snafu::{prelude::*, Snafu};

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub mod cache;
pub mod config_reader;
pub mod countries;
pub mod export;
pub mod io_common;
pub mod io_csv;
pub mod io_xlsx;
pub mod summary;

use crate::args::Args;
use crate::dashboard::cache::DatasetCache;
use crate::dashboard::config_reader::*;

#[derive(Debug, Snafu)]
pub enum DashError {
    #[snafu(display("Error opening CSV file {path}"))]
    OpeningCsv { source: csv::Error, path: String },
    #[snafu(display("Error reading CSV line {lineno}"))]
    CsvLine { source: csv::Error, lineno: usize },
    #[snafu(display("Error opening workbook {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Workbook {path} has no usable worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("File {path} is missing required columns {columns:?}"))]
    MissingColumns { path: String, columns: Vec<String> },
    #[snafu(display(""))]
    OpeningJson { source: std::io::Error },
    #[snafu(display(""))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Line {lineno}: {message}"))]
    InvalidRow { lineno: usize, message: String },
    #[snafu(display("Record identifier {id} appears more than once"))]
    DuplicateRecordId { id: u64 },
    #[snafu(display("Derivation failed: {source}"))]
    Derivation { source: AnalyticsErrors },
    #[snafu(display("Error reading metadata of {path}"))]
    ReadingMetadata {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing export file {path}"))]
    WritingExport { source: csv::Error, path: String },
    #[snafu(display("Error finishing export file {path}"))]
    FlushingExport {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing summary file {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("The produced summary differs from the reference summary"))]
    ReferenceMismatch {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type DashResult<T> = Result<T, DashError>;

/// One data row, as read by the readers.
/// Cell values are raw strings, before cleaning and typing.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ParsedRow {
    pub lineno: usize,
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub institution: Option<String>,
    pub institution_abbr: Option<String>,
    pub origin: Option<String>,
    pub site: Option<String>,
    pub country: Option<String>,
    pub axis: Option<String>,
    pub oral: Option<String>,
    pub presented: Option<String>,
    pub evaluate: Option<String>,
    pub raw_score: Option<String>,
    pub notes: Option<String>,
}

fn clean_cell(value: &Option<String>) -> Option<String> {
    match value {
        Some(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

// Flags come in several spellings depending on the export tool.
fn parse_flag(value: &Option<String>, lineno: usize, column: &str) -> Option<bool> {
    match value.as_deref().map(|s| s.to_lowercase()) {
        None => None,
        Some(v) => match v.as_str() {
            "si" | "sí" | "yes" | "true" | "1" => Some(true),
            "no" | "false" | "0" => Some(false),
            other => {
                warn!(
                    "line {}: unknown {} flag {:?}, treating as absent",
                    lineno, column, other
                );
                None
            }
        },
    }
}

fn skip_row(lenient: bool, lineno: usize, message: &str) -> DashResult<Option<Record>> {
    if lenient {
        warn!("line {}: {}, skipping row", lineno, message);
        Ok(None)
    } else {
        InvalidRowSnafu {
            lineno,
            message: message.to_string(),
        }
        .fail()
    }
}

fn validate_row(row: &ParsedRow, options: &DeriveOptions) -> DashResult<Option<Record>> {
    let lineno = row.lineno;
    let lenient = options.score_policy == ScorePolicy::Lenient;

    let id: u64 = match clean_cell(&row.id).map(|s| s.parse::<u64>()) {
        Some(Ok(x)) => x,
        _ => return skip_row(lenient, lineno, "missing or invalid identifier"),
    };
    let first_name = match clean_cell(&row.first_name) {
        Some(x) => x,
        None => return skip_row(lenient, lineno, "missing first name"),
    };
    let last_name = match clean_cell(&row.last_name) {
        Some(x) => x,
        None => return skip_row(lenient, lineno, "missing last name"),
    };
    let title = match clean_cell(&row.title) {
        Some(x) => x,
        None => return skip_row(lenient, lineno, "missing title"),
    };
    let institution = match clean_cell(&row.institution) {
        Some(x) => x,
        None => return skip_row(lenient, lineno, "missing institution"),
    };
    let country = match clean_cell(&row.country) {
        Some(x) => x,
        None => return skip_row(lenient, lineno, "missing country"),
    };
    let axis = match clean_cell(&row.axis).as_deref().and_then(TopicAxis::parse) {
        Some(x) => x,
        None => return skip_row(lenient, lineno, "missing or unknown axis label"),
    };

    let raw_score = match clean_cell(&row.raw_score) {
        None => None,
        Some(s) => match s.parse::<u32>() {
            Ok(x) => Some(x),
            Err(_) => {
                if lenient {
                    warn!(
                        "line {}: raw score {:?} is not numeric, treating as absent",
                        lineno, s
                    );
                    None
                } else {
                    return InvalidRowSnafu {
                        lineno,
                        message: format!("raw score {:?} is not numeric", s),
                    }
                    .fail();
                }
            }
        },
    };

    Ok(Some(Record {
        id,
        first_name,
        last_name,
        title,
        institution,
        institution_abbr: clean_cell(&row.institution_abbr),
        origin: clean_cell(&row.origin),
        site: clean_cell(&row.site),
        country,
        axis,
        oral: parse_flag(&clean_cell(&row.oral), lineno, "oral"),
        presented: parse_flag(&clean_cell(&row.presented), lineno, "presented"),
        evaluate: parse_flag(&clean_cell(&row.evaluate), lineno, "evaluate"),
        raw_score,
        notes: clean_cell(&row.notes),
    }))
}

pub fn validate_rows(rows: &[ParsedRow], options: &DeriveOptions) -> DashResult<Vec<Record>> {
    let mut res: Vec<Record> = Vec::new();
    for row in rows.iter() {
        if let Some(record) = validate_row(row, options)? {
            res.push(record);
        }
    }
    info!(
        "validate_rows: {:?} records retained from {:?} rows",
        res.len(),
        rows.len()
    );
    Ok(res)
}

fn load_source(path: &str, source: &FileSource, options: &DeriveOptions) -> DashResult<Vec<Record>> {
    info!("Attempting to read submissions file {:?}", path);
    let rows = match source.provider.as_str() {
        "csv" => io_csv::read_csv_rows(path)?,
        "xlsx" => io_xlsx::read_excel_rows(path, source)?,
        x => {
            whatever!("Provider not implemented {:?}", x)
        }
    };
    validate_rows(&rows, options)
}

fn merge_records(
    all: &mut Vec<Record>,
    seen_ids: &mut HashSet<u64>,
    loaded: Vec<Record>,
    options: &DeriveOptions,
) -> DashResult<()> {
    for record in loaded {
        if !seen_ids.insert(record.id) {
            if options.score_policy == ScorePolicy::Lenient {
                warn!(
                    "record identifier {} appears more than once, skipping",
                    record.id
                );
                continue;
            }
            return DuplicateRecordIdSnafu { id: record.id }.fail();
        }
        all.push(record);
    }
    Ok(())
}

/// Builds the filter constraints from the command line flags.
pub fn build_filter(args: &Args) -> DashResult<Filter> {
    let axes = if args.axis.is_empty() {
        None
    } else {
        let mut res: Vec<TopicAxis> = Vec::new();
        for label in args.axis.iter() {
            match TopicAxis::parse(label) {
                Some(axis) => res.push(axis),
                None => {
                    whatever!("Unknown axis label {:?}", label)
                }
            }
        }
        Some(res)
    };
    let score_range = match (args.min_score, args.max_score) {
        (None, None) => None,
        (lo, hi) => Some((lo.unwrap_or(0.0), hi.unwrap_or(1.0))),
    };
    let rank_range = match (args.min_rank, args.max_rank) {
        (None, None) => None,
        (lo, hi) => Some((lo.unwrap_or(1), hi.unwrap_or(u32::MAX))),
    };
    Ok(Filter {
        axes,
        countries: opt_values(&args.country),
        institutions: opt_values(&args.institution),
        sites: opt_values(&args.site),
        presented: args.presented,
        oral: args.oral,
        score_range,
        rank_range,
        text: args.search.clone(),
    })
}

fn opt_values(values: &[String]) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values.to_vec())
    }
}

fn resolve_path(root: &Path, file_path: &str) -> String {
    let p: PathBuf = [root.display().to_string(), file_path.to_string()]
        .iter()
        .collect();
    p.as_path().display().to_string()
}

/// Loads the configured sources, runs the derivation and produces the
/// summary, the optional export and the optional reference check.
pub fn run_report(args: &Args) -> DashResult<()> {
    // The command line input, when provided, takes over the config sources.
    let (config, root_path) = if let Some(input) = &args.input {
        (
            direct_config(
                input,
                args.input_type.as_deref(),
                args.excel_worksheet_name.clone(),
            ),
            PathBuf::new(),
        )
    } else if let Some(config_path) = &args.config {
        let config = read_config(config_path)?;
        let root = Path::new(config_path.as_str())
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_default();
        (config, root)
    } else {
        whatever!("No input provided: use either --input or --config")
    };
    info!("config: {:?}", config);

    let options = validate_options(&config)?;

    let mut cache = DatasetCache::new();
    let mut records: Vec<Record> = Vec::new();
    let mut seen_ids: HashSet<u64> = HashSet::new();
    for source in config.source_files.iter() {
        let path = resolve_path(&root_path, &source.file_path);
        let loaded = cache.load(&path, |p| load_source(p, source, &options))?;
        merge_records(&mut records, &mut seen_ids, loaded, &options)?;
    }
    info!("Loaded {:?} records", records.len());

    let derived = run_derivation(&records, &options).context(DerivationSnafu {})?;
    let stats = dataset_stats(&derived);
    let per_axis = axis_analysis(&derived);
    let duplicates = find_duplicates(&derived);

    let filter = build_filter(args)?;
    let filtered = apply_filter(&derived, &filter);

    let top_n = config.output_settings.top_n.unwrap_or(DEFAULT_TOP_N) as usize;
    let summary_js = summary::build_summary_js(
        &config,
        &stats,
        &per_axis,
        &duplicates,
        &derived,
        top_n,
    );
    let pretty_js_summary = serde_json::to_string_pretty(&summary_js).context(ParsingJsonSnafu {})?;

    let out = args
        .out
        .clone()
        .or_else(|| config.output_settings.output_path.clone());
    summary::write_summary(&out, &pretty_js_summary)?;

    // The reference summary, if provided for comparison
    if let Some(reference_path) = &args.reference {
        summary::check_reference(reference_path, &pretty_js_summary)?;
    }

    if let Some(export_path) = &args.export {
        export::write_csv_export(export_path, &filtered)?;
        info!(
            "Exported {:?} filtered records to {:?}",
            filtered.len(),
            export_path
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row(lineno: usize) -> ParsedRow {
        ParsedRow {
            lineno,
            id: Some(format!("{}", lineno)),
            first_name: Some("Ana".to_string()),
            last_name: Some("Quispe".to_string()),
            title: Some("Soil carbon dynamics".to_string()),
            institution: Some("UNALM".to_string()),
            country: Some("Peru".to_string()),
            axis: Some("E1".to_string()),
            ..ParsedRow::default()
        }
    }

    #[test]
    fn validates_a_complete_row() {
        let mut row = sample_row(2);
        row.raw_score = Some(" 97 ".to_string());
        row.presented = Some("SI".to_string());
        row.oral = Some("no".to_string());
        let records = validate_rows(&[row], &DeriveOptions::DEFAULT_OPTIONS).unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.id, 2);
        assert_eq!(r.raw_score, Some(97));
        assert_eq!(r.presented, Some(true));
        assert_eq!(r.oral, Some(false));
    }

    #[test]
    fn lenient_mode_skips_rows_with_bad_values() {
        let mut bad_axis = sample_row(2);
        bad_axis.axis = Some("E9".to_string());
        let mut bad_id = sample_row(3);
        bad_id.id = Some("abc".to_string());
        let ok = sample_row(4);
        let records =
            validate_rows(&[bad_axis, bad_id, ok], &DeriveOptions::DEFAULT_OPTIONS).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 4);
    }

    #[test]
    fn strict_mode_fails_on_bad_values() {
        let options = DeriveOptions {
            score_policy: ScorePolicy::Strict,
        };
        let mut bad_score = sample_row(2);
        bad_score.raw_score = Some("high".to_string());
        let res = validate_rows(&[bad_score], &options);
        assert!(matches!(res, Err(DashError::InvalidRow { lineno: 2, .. })));
    }

    #[test]
    fn non_numeric_score_is_dropped_leniently() {
        let mut row = sample_row(2);
        row.raw_score = Some("n/a".to_string());
        let records = validate_rows(&[row], &DeriveOptions::DEFAULT_OPTIONS).unwrap();
        assert_eq!(records[0].raw_score, None);
    }

    #[test]
    fn merge_skips_repeated_identifiers_when_lenient() {
        let mut all: Vec<Record> = Vec::new();
        let mut seen: HashSet<u64> = HashSet::new();
        let a = Record::simple(1, "A", "A", "T", "I", "Peru", TopicAxis::E1);
        let b = Record::simple(1, "B", "B", "T", "I", "Peru", TopicAxis::E2);
        merge_records(
            &mut all,
            &mut seen,
            vec![a, b],
            &DeriveOptions::DEFAULT_OPTIONS,
        )
        .unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].first_name, "A");

        let strict = DeriveOptions {
            score_policy: ScorePolicy::Strict,
        };
        let c = Record::simple(1, "C", "C", "T", "I", "Peru", TopicAxis::E3);
        let res = merge_records(&mut all, &mut seen, vec![c], &strict);
        assert!(matches!(res, Err(DashError::DuplicateRecordId { id: 1 })));
    }

    #[test]
    fn filter_from_partial_score_bounds() {
        let mut args = Args {
            config: None,
            input: None,
            input_type: None,
            excel_worksheet_name: None,
            out: None,
            reference: None,
            export: None,
            axis: vec!["e2".to_string()],
            country: Vec::new(),
            institution: Vec::new(),
            site: Vec::new(),
            presented: None,
            oral: None,
            min_score: Some(0.5),
            max_score: None,
            min_rank: None,
            max_rank: None,
            search: None,
            verbose: false,
        };
        let filter = build_filter(&args).unwrap();
        assert_eq!(filter.axes, Some(vec![TopicAxis::E2]));
        assert_eq!(filter.score_range, Some((0.5, 1.0)));
        assert_eq!(filter.rank_range, None);

        args.axis = vec!["E9".to_string()];
        assert!(build_filter(&args).is_err());
    }
}
