use std::path::PathBuf;
use std::time::Duration;

use readme_studio::config::{ConfigFlags, ThemeMode, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".readmestudiorc");
    let content = r"
# comment
--no-health-check

--theme light

--log-file=studio.log
--endpoint http://10.0.0.2:5000/generate
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.no_health_check);
    assert_eq!(flags.theme, Some(ThemeMode::Light));
    assert_eq!(flags.log_file, Some(PathBuf::from("studio.log")));
    assert_eq!(flags.endpoint.as_deref(), Some("http://10.0.0.2:5000/generate"));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".readmestudiorc");
    let content = "--timeout 120\n--theme light\n--out-dir exports\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "readme-studio".to_string(),
        "--theme".to_string(),
        "dark".to_string(),
        "--no-health-check".to_string(),
        "octocat".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.no_health_check, "cli flags should be applied");
    assert_eq!(effective.theme, Some(ThemeMode::Dark), "cli should override theme");
    assert_eq!(
        effective.out_dir,
        Some(PathBuf::from("exports")),
        "file config should be preserved when CLI does not override"
    );
    assert_eq!(effective.timeout(), Some(Duration::from_secs(120)));
}

#[test]
fn test_parse_flag_tokens_handles_equals_syntax() {
    let args = vec![
        "readme-studio".to_string(),
        "--endpoint=http://localhost:8000/generate?key=a".to_string(),
        "--timeout=0".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(
        flags.endpoint.as_deref(),
        Some("http://localhost:8000/generate?key=a")
    );
    assert_eq!(flags.timeout(), None);
}

#[test]
fn test_config_union_merges_booleans() {
    let file = ConfigFlags {
        no_health_check: true,
        ..ConfigFlags::default()
    };
    let cli = ConfigFlags {
        log_file: Some(PathBuf::from("cli.log")),
        ..ConfigFlags::default()
    };
    let merged = file.union(&cli);
    assert!(merged.no_health_check);
    assert_eq!(merged.log_file, Some(PathBuf::from("cli.log")));
}
