use jlayout_core::{LayoutConfig, Placement, PlacementOutcome};
use std::path::Path;
use tabled::{Table, Tabled};
use tracing::info;

#[derive(Tabled)]
struct PlacementRow {
    #[tabled(rename = "Artifact")]
    coordinate: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Placed")]
    placed: String,
}

impl From<&Placement> for PlacementRow {
    fn from(placement: &Placement) -> Self {
        let placed = match &placement.outcome {
            PlacementOutcome::Copied { destination } => destination.display().to_string(),
            PlacementOutcome::AlreadyInPlace { destination } => {
                format!("{} (already in place)", destination.display())
            }
            PlacementOutcome::NoTarget => "- (no directory)".to_string(),
            PlacementOutcome::NotRegularFile => "- (not a file)".to_string(),
        };
        Self {
            coordinate: placement.coordinate.to_string(),
            category: placement.category.to_string(),
            placed,
        }
    }
}

pub fn run(plan: &Path, config: &LayoutConfig) -> Result<(), Box<dyn std::error::Error>> {
    let artifacts = jlayout_runtime::load_artifacts(plan, config)?;
    let collector = jlayout_runtime::build_default_collector(config);

    for (category, dir) in collector.layout().configured() {
        info!("{:<17} -> {}", category.to_string(), dir.display());
    }

    let report = collector.run(&artifacts)?;

    if report.placements.is_empty() {
        println!("Plan contains no artifacts.");
        return Ok(());
    }

    let rows: Vec<PlacementRow> = report.placements.iter().map(PlacementRow::from).collect();
    println!("{}", Table::new(rows));
    println!(
        "{} artifacts, {} copied, {} without directory, {} not regular files ({:?})",
        report.total(),
        report.copied,
        report.skipped_no_target,
        report.skipped_not_regular,
        report.duration
    );
    Ok(())
}
