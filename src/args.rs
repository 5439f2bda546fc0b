use clap::Parser;

/// This is the data backend of the poster submissions dashboard.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The JSON dashboard configuration. For more information about
    /// the file format, read the documentation of the poster_analytics crate.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The submissions file to load directly when no configuration file is
    /// used. Setting this option overrides the sources that may be specified with the
    /// --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default csv) The type of the input: csv or xlsx.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use. The first
    /// worksheet is used when not specified.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the dataset will be
    /// written in JSON format to the given location. Setting this option overrides the
    /// path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing a dataset summary in JSON format. If
    /// provided, posterdash will check that the produced summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path) If specified, the filtered records are re-serialized as CSV to the
    /// given location, with the derived columns included.
    #[clap(short, long, value_parser)]
    pub export: Option<String>,

    /// (repeatable) Keep only the given axes (E1 .. E7).
    #[clap(long, value_parser)]
    pub axis: Vec<String>,

    /// (repeatable) Keep only the given countries.
    #[clap(long, value_parser)]
    pub country: Vec<String>,

    /// (repeatable) Keep only the given institutions.
    #[clap(long, value_parser)]
    pub institution: Vec<String>,

    /// (repeatable) Keep only the given presentation sites.
    #[clap(long, value_parser)]
    pub site: Vec<String>,

    /// Keep only records with the given attendance flag.
    #[clap(long, value_parser)]
    pub presented: Option<bool>,

    /// Keep only records with the given oral-presentation flag.
    #[clap(long, value_parser)]
    pub oral: Option<bool>,

    /// Lower bound (inclusive) on the derived score.
    #[clap(long, value_parser)]
    pub min_score: Option<f64>,

    /// Upper bound (inclusive) on the derived score.
    #[clap(long, value_parser)]
    pub max_score: Option<f64>,

    /// Lower bound (inclusive) on the derived rank.
    #[clap(long, value_parser)]
    pub min_rank: Option<u32>,

    /// Upper bound (inclusive) on the derived rank.
    #[clap(long, value_parser)]
    pub max_rank: Option<u32>,

    /// Case-insensitive text search over names, title and institution.
    #[clap(long, value_parser)]
    pub search: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
