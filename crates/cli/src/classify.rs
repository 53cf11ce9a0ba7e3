use jlayout_core::LayoutConfig;
use std::path::Path;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Artifact")]
    coordinate: String,
    #[tabled(rename = "Module")]
    module: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Path")]
    path: String,
}

pub fn run(plan: &Path, config: &LayoutConfig) -> Result<(), Box<dyn std::error::Error>> {
    let artifacts = jlayout_runtime::load_artifacts(plan, config)?;
    let categories = jlayout_runtime::build_default_collector(config).classify_all(&artifacts)?;

    let rows: Vec<CategoryRow> = artifacts
        .iter()
        .zip(categories)
        .map(|(resolved, category)| CategoryRow {
            coordinate: resolved.artifact.coordinate.to_string(),
            module: resolved
                .descriptor
                .as_ref()
                .map(|d| d.name.clone())
                .unwrap_or_else(|| "-".to_string()),
            category: category.to_string(),
            path: resolved.artifact.path.display().to_string(),
        })
        .collect();

    if rows.is_empty() {
        println!("Plan contains no artifacts.");
    } else {
        println!("{}", Table::new(rows));
    }
    Ok(())
}
