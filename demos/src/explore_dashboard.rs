//! General exploration dashboard flow: upload a CSV, show the overview,
//! then drill into selected columns the way the interactive shell would.

use std::io::Write;

use glance_explore::prelude::*;

const UPLOAD: &str = "\
age,income,city
23,48000,Osaka
31,61000,Tokyo
35,72000,Tokyo
29,52000,Nagoya
41,90000,Tokyo
38,67000,Osaka
";

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    LogConfig::default().init();

    // Stand-in for the upload widget: a CSV file arriving on disk.
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("upload.csv");
    std::fs::File::create(&path)?.write_all(UPLOAD.as_bytes())?;

    let mut session = ExploreSession::new();
    session.load_path(&path).await?;

    let formatter = HumanFormatter::new();
    println!("{}", formatter.format_overview(&session.overview().await?)?);

    let analyzer = ColumnAnalyzer::new();

    // Numeric selection with a scatter comparison.
    let report = analyzer.analyze(&session, "age", Some("income")).await?;
    println!("{}", formatter.format_report(&report)?);

    // Categorical selection with a grouped comparison.
    let report = analyzer.analyze(&session, "city", Some("income")).await?;
    println!("{}", formatter.format_report(&report)?);

    // Correlation heatmap across all numeric columns.
    let matrix = analyzer.correlation_matrix(&session).await?;
    for spec in ChartSpec::for_result(&matrix) {
        println!("heatmap ready: {}", spec.download_filename());
    }

    Ok(())
}
