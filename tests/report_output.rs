use std::process::Command;

const EXPECTED_FILES: [&str; 4] = [
    "sme_matmul_performance.png",
    "sme_matmul_performance.pdf",
    "sme_matmul_performance.svg",
    "sme_matmul_performance_hires.png",
];

#[test]
fn test_binary_writes_reports_with_progress_output() {
    let dir = tempfile::tempdir().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_sme-matmul-report"))
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    for name in EXPECTED_FILES {
        let meta = std::fs::metadata(dir.path().join(name)).unwrap();
        assert!(meta.len() > 0, "{} is empty", name);
    }

    let stdout = String::from_utf8(output.stdout).unwrap();

    let created_lines = stdout
        .lines()
        .filter(|l| l.trim_end().ends_with("chart created"))
        .count();
    assert_eq!(created_lines, 3);

    for name in EXPECTED_FILES {
        assert!(stdout.contains(name), "no save line for {}", name);
    }

    // Completion banner comes after the last progress line
    let last_created = stdout.rfind("chart created").unwrap();
    assert!(stdout[last_created..].contains("Visualization complete!"));
}
