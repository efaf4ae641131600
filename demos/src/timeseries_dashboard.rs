//! Time-series dashboard flow: upload a dated CSV and chart every numeric
//! column along the time axis.

use std::io::Write;

use glance_explore::prelude::*;

const UPLOAD: &str = "\
date,sales,visitors
2024-03-01,1200,340
2024-03-02,1430,365
2024-03-03,990,298
2024-03-04,1610,401
2024-03-05,1550,388
";

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    LogConfig::default().init();

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("daily.csv");
    std::fs::File::create(&path)?.write_all(UPLOAD.as_bytes())?;

    let mut session = ExploreSession::new();
    session.load_path(&path).await?;

    let analyzer = ColumnAnalyzer::new();
    let report = analyzer.analyze(&session, "date", None).await?;

    let formatter = HumanFormatter::new();
    println!("{}", formatter.format_report(&report)?);

    for result in &report.results {
        for spec in ChartSpec::for_result(result) {
            println!("download: {}", spec.download_filename());
        }
    }

    Ok(())
}
