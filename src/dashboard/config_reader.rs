use crate::dashboard::*;

use serde::{Deserialize, Serialize};

/// Ranking table length when the config does not specify one.
pub const DEFAULT_TOP_N: u32 = 10;

/// Default axis palette, as used by the historical dashboard styling.
/// Entries can be overridden with the `axisColors` config block.
pub const DEFAULT_AXIS_COLORS: [(&str, &str); 7] = [
    ("E1", "#1f77b4"),
    ("E2", "#2ca02c"),
    ("E3", "#ff7f0e"),
    ("E4", "#9467bd"),
    ("E5", "#d62728"),
    ("E6", "#17becf"),
    ("E7", "#e377c2"),
];

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "datasetName")]
    pub dataset_name: String,
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
    #[serde(rename = "topN")]
    pub top_n: Option<u32>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct AxisColor {
    pub axis: String,
    pub color: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    #[serde(rename = "sourceFiles")]
    pub source_files: Vec<FileSource>,
    pub validation: Option<String>,
    #[serde(rename = "axisColors")]
    pub axis_colors: Option<Vec<AxisColor>>,
}

pub fn read_config(path: &str) -> DashResult<DashboardConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu {})?;
    let config: DashboardConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

/// The configuration used when a single input file is given on the command
/// line instead of a config file.
pub fn direct_config(
    input: &str,
    input_type: Option<&str>,
    excel_worksheet_name: Option<String>,
) -> DashboardConfig {
    DashboardConfig {
        output_settings: OutputSettings {
            dataset_name: io_common::simplify_file_name(input),
            output_path: None,
            top_n: None,
        },
        source_files: vec![FileSource {
            provider: input_type.unwrap_or("csv").to_string(),
            file_path: input.to_string(),
            excel_worksheet_name,
        }],
        validation: None,
        axis_colors: None,
    }
}

/// Validates the policy settings of the config.
pub fn validate_options(config: &DashboardConfig) -> DashResult<DeriveOptions> {
    let score_policy = match config.validation.as_deref() {
        None | Some("lenient") => ScorePolicy::Lenient,
        Some("strict") => ScorePolicy::Strict,
        Some(x) => {
            whatever!("Cannot use validation mode {:?} (expected lenient or strict)", x)
        }
    };
    Ok(DeriveOptions { score_policy })
}

/// The per-axis color mapping: the default palette, overlaid with the
/// config overrides. Unknown axis labels in the overrides are ignored with
/// a warning.
pub fn axis_colors(config: &DashboardConfig) -> Vec<(String, String)> {
    let mut res: Vec<(String, String)> = DEFAULT_AXIS_COLORS
        .iter()
        .map(|(axis, color)| (axis.to_string(), color.to_string()))
        .collect();
    if let Some(overrides) = &config.axis_colors {
        for o in overrides.iter() {
            match TopicAxis::parse(&o.axis) {
                Some(axis) => {
                    if let Some(entry) = res.iter_mut().find(|(a, _)| a == axis.as_str()) {
                        entry.1 = o.color.clone();
                    }
                }
                None => {
                    warn!("axisColors: unknown axis label {:?}, ignoring", o.axis);
                }
            }
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
    {
        "outputSettings": { "datasetName": "Soils Congress 2025", "topN": 5 },
        "sourceFiles": [ { "provider": "csv", "filePath": "bd_congreso.csv" } ],
        "validation": "strict",
        "axisColors": [ { "axis": "E2", "color": "#000000" } ]
    }"#;

    #[test]
    fn parses_a_config_document() {
        let config: DashboardConfig = serde_json::from_str(CONFIG).unwrap();
        assert_eq!(config.output_settings.dataset_name, "Soils Congress 2025");
        assert_eq!(config.output_settings.top_n, Some(5));
        assert_eq!(config.source_files.len(), 1);
        assert_eq!(config.source_files[0].provider, "csv");
        assert_eq!(
            validate_options(&config).unwrap().score_policy,
            ScorePolicy::Strict
        );
    }

    #[test]
    fn overlays_axis_colors() {
        let config: DashboardConfig = serde_json::from_str(CONFIG).unwrap();
        let colors = axis_colors(&config);
        assert_eq!(colors.len(), 7);
        assert_eq!(colors[0], ("E1".to_string(), "#1f77b4".to_string()));
        assert_eq!(colors[1], ("E2".to_string(), "#000000".to_string()));
    }

    #[test]
    fn rejects_unknown_validation_modes() {
        let mut config: DashboardConfig = serde_json::from_str(CONFIG).unwrap();
        config.validation = Some("permissive".to_string());
        assert!(validate_options(&config).is_err());
    }

    #[test]
    fn direct_config_defaults_to_csv() {
        let config = direct_config("data/submissions.csv", None, None);
        assert_eq!(config.source_files[0].provider, "csv");
        assert_eq!(config.output_settings.dataset_name, "submissions.csv");
        assert_eq!(
            validate_options(&config).unwrap().score_policy,
            ScorePolicy::Lenient
        );
    }
}
