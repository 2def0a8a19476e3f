#[cfg(test)]
mod tests {
    use crate::io::loaders::{RecordLoader, RecordSourceType};
    use std::io::Write;
    use tempfile::Builder;

    const CSV_EXPORT: &str = "\
video_id,title,published_at,duration,view_count,like_count,comment_count,fetched_at
abc,\"First, with comma\",2020-02-01T10:00:00Z,PT5M,1000,50,5,2024-01-01T00:00:00.000000
def,Second,2021-03-01T10:00:00Z,PT7M,2500,,,2024-01-01T00:00:00.000000
";

    const JSON_EXPORT: &str = r#"[
        {
            "video_id": "abc",
            "title": "First",
            "published_at": "2020-02-01T10:00:00Z",
            "description": "",
            "duration": "PT5M",
            "view_count": 1000,
            "like_count": 50,
            "comment_count": 5,
            "fetched_at": "2024-01-01T00:00:00.000000"
        }
    ]"#;

    /// Helper to create a temp file with the given suffix
    fn create_temp_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_from_csv_reader() {
        let result = RecordLoader::load_from_csv_reader(CSV_EXPORT.as_bytes()).unwrap();

        assert_eq!(result.source_type, RecordSourceType::Csv);
        assert_eq!(result.num_records, 2);
        assert_eq!(result.records[0].id.as_str(), "abc");
        assert_eq!(result.records[0].title, "First, with comma");
        assert_eq!(result.records[0].view_count, 1000);
        assert_eq!(result.records[0].like_count, 50);
        assert_eq!(result.records[0].year(), 2020);
    }

    #[test]
    fn test_csv_empty_statistics_default_to_zero() {
        let result = RecordLoader::load_from_csv_reader(CSV_EXPORT.as_bytes()).unwrap();
        assert_eq!(result.records[1].like_count, 0);
        assert_eq!(result.records[1].comment_count, 0);
        assert_eq!(result.records[1].view_count, 2500);
    }

    #[test]
    fn test_csv_bad_timestamp_fails() {
        let csv = "video_id,published_at,view_count\nabc,yesterday,10\n";
        let err = RecordLoader::load_from_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Invalid CSV record 1"));
    }

    #[test]
    fn test_load_from_json_str() {
        let result = RecordLoader::load_from_json_str(JSON_EXPORT).unwrap();
        assert_eq!(result.source_type, RecordSourceType::Json);
        assert_eq!(result.num_records, 1);
        assert_eq!(result.records[0].comment_count, 5);
    }

    #[test]
    fn test_load_from_json_str_invalid() {
        assert!(RecordLoader::load_from_json_str("{not json").is_err());
        assert!(RecordLoader::load_from_json_str(r#"{"video_id": "a"}"#).is_err());
    }

    #[test]
    fn test_load_from_file_detects_format() {
        let csv_file = create_temp_file(".csv", CSV_EXPORT);
        let result = RecordLoader::load_from_file(csv_file.path()).unwrap();
        assert_eq!(result.source_type, RecordSourceType::Csv);
        assert_eq!(result.num_records, 2);

        let json_file = create_temp_file(".JSON", JSON_EXPORT);
        let result = RecordLoader::load_from_file(json_file.path()).unwrap();
        assert_eq!(result.source_type, RecordSourceType::Json);
    }

    #[test]
    fn test_load_from_file_unsupported_extension() {
        let file = create_temp_file(".txt", "whatever");
        let err = RecordLoader::load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported file format"));
    }

    #[test]
    fn test_load_from_missing_file() {
        let result = RecordLoader::load_from_file(std::path::Path::new("/nonexistent/videos.csv"));
        assert!(result.is_err());
    }
}
