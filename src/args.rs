use clap::Parser;

/// This program builds tier lists and voting history reports.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The file containing the report configuration (JSON).
    /// For more information about the file format, read the manual of the tier_tally crate.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,
    /// (file path) A reference file containing an expected report in JSON format. If provided, tiertally will
    /// check that the computed report matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the report will be written in JSON format to the given
    /// location. Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) A single input file to process with the default tier table. Ignored when
    /// --config is provided.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default json) The type of the input: json or csv.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default trends) What the input contains: 'trends' (ranked items) or 'history' (voting counts).
    #[clap(long, value_parser)]
    pub data_kind: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
