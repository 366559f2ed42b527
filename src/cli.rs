use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "relink")]
#[command(about = "Rewrite a VLESS link once per candidate IP address", long_about = None)]
pub struct Cli {
    /// VLESS link to rewrite (vless://<id>@<host>:<port>[path][?query][#remark])
    pub link: String,

    /// CSV file with candidate addresses (defaults to $RELINK_CSV_FILE, then result.csv)
    #[arg(short = 'f', long = "csv-file", value_name = "PATH")]
    pub csv_file: Option<PathBuf>,

    /// Column holding the address. Repeatable; tried in order for every row
    #[arg(short = 'c', long = "column", value_name = "NAME")]
    pub columns: Vec<String>,

    /// Output as JSON array (compact) for scripts
    #[arg(long = "json")]
    pub json: bool,

    /// Print the decomposed link and exit without reading the CSV file
    #[arg(long = "inspect", conflicts_with_all = ["csv_file", "columns", "json"])]
    pub inspect: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
