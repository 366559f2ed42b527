use std::path::PathBuf;

pub const DEFAULT_CSV_FILE: &str = "result.csv";

pub struct Paths {
    pub csv_file: PathBuf,
}

impl Paths {
    pub fn new() -> Self {
        let csv_file = std::env::var("RELINK_CSV_FILE")
            .ok()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_CSV_FILE.to_string());

        Self {
            csv_file: PathBuf::from(csv_file),
        }
    }

    /// CLI flag takes precedence over the environment and the default.
    pub fn with_csv_override(mut self, csv_file: Option<PathBuf>) -> Self {
        if let Some(p) = csv_file {
            self.csv_file = p;
        }
        self
    }
}
