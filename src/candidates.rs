use anyhow::{Context, Result, anyhow};
use colored::*;
use std::io;
use std::path::Path;

/// Columns checked for an address, in priority order. The first is the header
/// written by the Chinese-locale speed test tools that produce `result.csv`.
pub const DEFAULT_COLUMNS: [&str; 2] = ["IP 地址", "IP"];

pub fn default_columns() -> Vec<String> {
    DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect()
}

/// Read candidate hosts from a CSV file with a header row.
///
/// For every row the columns are tried in order and the first non-blank cell
/// wins. Rows where every column is blank or missing are skipped.
pub fn load(path: &Path, columns: &[String]) -> Result<Vec<String>> {
    let mut reader = match csv::ReaderBuilder::new().flexible(true).from_path(path) {
        Ok(r) => r,
        Err(e) => {
            if let csv::ErrorKind::Io(io_err) = e.kind()
                && io_err.kind() == io::ErrorKind::NotFound
            {
                return Err(anyhow!("CSV file not found: {}", path.display()));
            }
            return Err(anyhow::Error::new(e)
                .context(format!("Failed to open CSV file: {}", path.display())));
        }
    };

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read CSV header: {}", path.display()))?
        .clone();

    // Later duplicate headers shadow earlier ones, as with a dict-based reader.
    let indices: Vec<usize> = columns
        .iter()
        .filter_map(|name| {
            headers
                .iter()
                .enumerate()
                .filter(|(_, h)| h.trim_start_matches('\u{feff}') == name)
                .map(|(i, _)| i)
                .last()
        })
        .collect();

    if indices.is_empty() {
        eprintln!(
            "{} None of the columns [{}] found in {}",
            "[WARN]".yellow(),
            columns.join(", "),
            path.display()
        );
        return Ok(Vec::new());
    }

    let mut candidates = Vec::new();
    for record in reader.records() {
        let record =
            record.with_context(|| format!("Failed to read CSV row: {}", path.display()))?;

        if let Some(value) = indices
            .iter()
            .filter_map(|&i| record.get(i))
            .map(str::trim)
            .find(|v| !v.is_empty())
        {
            candidates.push(value.to_string());
        }
    }

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use uuid::Uuid;

    fn write_temp_csv(content: &str) -> (PathBuf, PathBuf) {
        let dir = std::env::temp_dir().join(format!("relink_test_{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let file = dir.join("result.csv");
        fs::write(&file, content).unwrap();
        (dir, file)
    }

    fn cleanup(dir: &Path) {
        if let Err(e) = fs::remove_dir_all(dir) {
            eprintln!("[WARN] Failed to remove test directory {:?}: {}", dir, e);
        }
    }

    #[test]
    fn test_ip_column_in_row_order() {
        let (dir, file) = write_temp_csv("IP\n8.8.8.8\n1.1.1.1\n");
        let ips = load(&file, &default_columns()).unwrap();
        assert_eq!(ips, vec!["8.8.8.8", "1.1.1.1"]);
        cleanup(&dir);
    }

    #[test]
    fn test_localized_column_preferred_per_row() {
        let content = "IP,IP 地址,延迟\n\
                       9.9.9.9,1.0.0.1,10\n\
                       8.8.4.4,,12\n\
                       ,,15\n\
                       ,2606:4700::1111,20\n";
        let (dir, file) = write_temp_csv(content);
        let ips = load(&file, &default_columns()).unwrap();
        assert_eq!(ips, vec!["1.0.0.1", "8.8.4.4", "2606:4700::1111"]);
        cleanup(&dir);
    }

    #[test]
    fn test_speedtest_result_layout() {
        let content = "IP 地址,已发送,已接收,丢包率,平均延迟,下载速度 (MB/s)\n\
                       104.16.1.1,4,4,0.00,120.55,12.30\n\
                       172.67.2.2,4,4,0.00,130.10,10.05\n";
        let (dir, file) = write_temp_csv(content);
        let ips = load(&file, &default_columns()).unwrap();
        assert_eq!(ips, vec!["104.16.1.1", "172.67.2.2"]);
        cleanup(&dir);
    }

    #[test]
    fn test_values_are_trimmed_and_blank_cells_fall_through() {
        let (dir, file) = write_temp_csv("IP 地址,IP\n   ,5.5.5.5\n  6.6.6.6  ,7.7.7.7\n");
        let ips = load(&file, &default_columns()).unwrap();
        assert_eq!(ips, vec!["5.5.5.5", "6.6.6.6"]);
        cleanup(&dir);
    }

    #[test]
    fn test_short_rows_and_quoted_fields() {
        let (dir, file) = write_temp_csv("name,IP\nalpha\n\"beta, inc\",\"3.3.3.3\"\n");
        let ips = load(&file, &default_columns()).unwrap();
        assert_eq!(ips, vec!["3.3.3.3"]);
        cleanup(&dir);
    }

    #[test]
    fn test_bom_before_header_is_ignored() {
        let (dir, file) = write_temp_csv("\u{feff}IP\n4.4.4.4\n");
        let ips = load(&file, &default_columns()).unwrap();
        assert_eq!(ips, vec!["4.4.4.4"]);
        cleanup(&dir);
    }

    #[test]
    fn test_custom_columns() {
        let (dir, file) = write_temp_csv("IP,address\n1.1.1.1,2.2.2.2\n");
        let ips = load(&file, &["address".to_string()]).unwrap();
        assert_eq!(ips, vec!["2.2.2.2"]);
        cleanup(&dir);
    }

    #[test]
    fn test_no_recognized_column_yields_nothing() {
        let (dir, file) = write_temp_csv("host,latency\n1.1.1.1,5\n");
        let ips = load(&file, &default_columns()).unwrap();
        assert!(ips.is_empty());
        cleanup(&dir);
    }

    #[test]
    fn test_header_only_yields_nothing() {
        let (dir, file) = write_temp_csv("IP\n");
        let ips = load(&file, &default_columns()).unwrap();
        assert!(ips.is_empty());
        cleanup(&dir);
    }

    #[test]
    fn test_missing_file_mentions_path() {
        let missing = std::env::temp_dir()
            .join(format!("relink_test_{}", Uuid::new_v4()))
            .join("nope.csv");
        let err = load(&missing, &default_columns()).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("not found"));
        assert!(msg.contains("nope.csv"));
    }

    #[test]
    fn test_unreadable_path_is_not_reported_missing() {
        // A directory exists but cannot be read as CSV.
        let dir = std::env::temp_dir().join(format!("relink_test_{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let err = load(&dir, &default_columns()).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(!msg.contains("not found"), "{msg}");
        assert!(msg.contains(&dir.display().to_string()), "{msg}");
        cleanup(&dir);
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let dir = std::env::temp_dir().join(format!("relink_test_{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let file = dir.join("result.csv");
        fs::write(&file, b"IP\n\xff\xfe\n").unwrap();
        assert!(load(&file, &default_columns()).is_err());
        cleanup(&dir);
    }
}
