//! Command implementations for the registry CLI
//!
//! Execution logic and report rendering for the `summary` and `cascade`
//! subcommands. Reports are built as serializable structures first, then
//! rendered either as colored human output or as JSON.

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use tracing::debug;

use crate::app::models::SourceFormat;
use crate::app::services::cascade::{CascadeGraph, StorageAggregate};
use crate::app::services::registry::{PlantRegistry, parse_registry_file};
use crate::cli::args::{Args, CascadeArgs, Commands, OutputFormat, SummaryArgs};
use crate::error::Result;

/// Run whichever subcommand was given.
pub fn run(args: Args) -> anyhow::Result<()> {
    let Some(command) = args.command else {
        // main() shows usage when no subcommand is given
        return Ok(());
    };

    setup_logging(&command);
    debug!("Command line arguments: {:?}", command);

    match command {
        Commands::Summary(args) => run_summary(&args),
        Commands::Cascade(args) => run_cascade(&args),
    }
}

/// Set up structured logging based on the subcommand's verbosity.
fn setup_logging(command: &Commands) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hidro_registry={}", command.log_level())));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

// =============================================================================
// Summary Command
// =============================================================================

#[derive(Debug, Serialize)]
struct SummaryReport {
    source_format: SourceFormat,
    plants: usize,
    placeholder_records: usize,
    unit_sets: usize,
    travel_times: usize,
    volume_elevation_curves: usize,
    volume_area_curves: usize,
    tailrace_curves: usize,
    evaporation_entries: usize,
    total_installed_capacity_mw: f64,
    largest_plants: Vec<PlantLine>,
}

#[derive(Debug, Serialize)]
struct PlantLine {
    plant_num: i32,
    name: String,
    installed_capacity_mw: f64,
    max_volume_hm3: f64,
}

fn run_summary(args: &SummaryArgs) -> anyhow::Result<()> {
    let registry = parse_registry_file(&args.registry_file)
        .with_context(|| format!("decoding {}", args.registry_file.display()))?;
    let report = build_summary(&registry);

    match args.output_format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Human => print_summary_human(&report),
    }
    Ok(())
}

fn build_summary(registry: &PlantRegistry) -> SummaryReport {
    let placeholder_records = registry
        .plants()
        .iter()
        .filter(|plant| plant.is_placeholder())
        .count();

    let total_installed_capacity_mw = registry
        .plants()
        .iter()
        .map(|plant| plant.installed_capacity)
        .sum();

    let mut largest: Vec<&crate::app::models::Plant> = registry
        .plants()
        .iter()
        .filter(|plant| !plant.is_placeholder())
        .collect();
    largest.sort_by(|a, b| {
        b.installed_capacity
            .partial_cmp(&a.installed_capacity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    SummaryReport {
        source_format: registry.source_format(),
        plants: registry.plant_count(),
        placeholder_records,
        unit_sets: registry.unit_sets().len(),
        travel_times: registry.travel_times().len(),
        volume_elevation_curves: registry.volume_elevation_curves().len(),
        volume_area_curves: registry.volume_area_curves().len(),
        tailrace_curves: registry.tailrace_curves().len(),
        evaporation_entries: registry.evaporation().len(),
        total_installed_capacity_mw,
        largest_plants: largest
            .into_iter()
            .take(10)
            .map(|plant| PlantLine {
                plant_num: plant.plant_num,
                name: plant.name.clone(),
                installed_capacity_mw: plant.installed_capacity,
                max_volume_hm3: plant.max_volume,
            })
            .collect(),
    }
}

fn print_summary_human(report: &SummaryReport) {
    println!("{}", "Plant Registry Summary".bold());
    println!("{}", "======================".bold());
    println!("Source format:       {}", report.source_format);
    println!("Plants:              {}", report.plants);
    if report.placeholder_records > 0 {
        println!("Placeholder records: {}", report.placeholder_records);
    }
    println!(
        "Installed capacity:  {:.1} MW",
        report.total_installed_capacity_mw
    );

    if report.unit_sets > 0
        || report.travel_times > 0
        || report.volume_elevation_curves > 0
        || report.volume_area_curves > 0
        || report.tailrace_curves > 0
        || report.evaporation_entries > 0
    {
        println!();
        println!("{}", "Auxiliary data".bold());
        println!("Unit sets:                 {}", report.unit_sets);
        println!("Travel times:              {}", report.travel_times);
        println!(
            "Volume-elevation curves:   {}",
            report.volume_elevation_curves
        );
        println!("Volume-area curves:        {}", report.volume_area_curves);
        println!("Tailrace curves:           {}", report.tailrace_curves);
        println!("Evaporation entries:       {}", report.evaporation_entries);
    }

    if !report.largest_plants.is_empty() {
        println!();
        println!("{}", "Largest plants by installed capacity".bold());
        for plant in &report.largest_plants {
            println!(
                "  {:>5}  {:<12}  {:>10.1} MW  {:>12.1} hm3",
                plant.plant_num.to_string().cyan(),
                plant.name,
                plant.installed_capacity_mw,
                plant.max_volume_hm3,
            );
        }
    }
}

// =============================================================================
// Cascade Command
// =============================================================================

#[derive(Debug, Serialize)]
struct CascadeReport {
    source_format: SourceFormat,
    plants: usize,
    roots: Vec<i32>,
    outlets: Vec<i32>,
}

#[derive(Debug, Serialize)]
struct ChainReport {
    plant_num: i32,
    chain: Vec<ChainLink>,
    storage: StorageAggregate,
}

#[derive(Debug, Serialize)]
struct ChainLink {
    plant_num: i32,
    name: String,
}

fn run_cascade(args: &CascadeArgs) -> anyhow::Result<()> {
    let registry = parse_registry_file(&args.registry_file)
        .with_context(|| format!("decoding {}", args.registry_file.display()))?;
    let graph = CascadeGraph::from_registry(&registry);

    match args.plant {
        Some(plant_num) => {
            let report = build_chain(&registry, &graph, plant_num)?;
            match args.output_format {
                OutputFormat::Json => print_json(&report)?,
                OutputFormat::Human => print_chain_human(&report),
            }
        }
        None => {
            let report = CascadeReport {
                source_format: registry.source_format(),
                plants: registry.plant_count(),
                roots: graph.roots(),
                outlets: graph.outlets(),
            };
            match args.output_format {
                OutputFormat::Json => print_json(&report)?,
                OutputFormat::Human => print_cascade_human(&report),
            }
        }
    }
    Ok(())
}

fn build_chain(
    registry: &PlantRegistry,
    graph: &CascadeGraph,
    plant_num: i32,
) -> Result<ChainReport> {
    let chain = graph.downstream_chain(plant_num)?;
    let storage = graph.aggregate_storage(registry, plant_num)?;

    let mut links = Vec::with_capacity(chain.len());
    for num in chain {
        links.push(ChainLink {
            plant_num: num,
            name: registry.require_plant(num)?.name.clone(),
        });
    }

    Ok(ChainReport {
        plant_num,
        chain: links,
        storage,
    })
}

fn print_cascade_human(report: &CascadeReport) {
    println!("{}", "Cascade Topology".bold());
    println!("{}", "================".bold());
    println!("Source format: {}", report.source_format);
    println!("Plants:        {}", report.plants);
    println!(
        "Roots:         {}",
        format_plant_list(&report.roots).green()
    );
    println!(
        "Outlets:       {}",
        format_plant_list(&report.outlets).cyan()
    );
}

fn print_chain_human(report: &ChainReport) {
    println!("{}", format!("Downstream chain of plant {}", report.plant_num).bold());
    for (position, link) in report.chain.iter().enumerate() {
        let arrow = if position == 0 { " " } else { "->" };
        println!("  {arrow} {:>5}  {}", link.plant_num.to_string().cyan(), link.name);
    }
    println!();
    println!(
        "Aggregated storage over {} plants: {:.1} - {:.1} hm3",
        report.storage.plants, report.storage.min_volume, report.storage.max_volume
    );
}

fn format_plant_list(nums: &[i32]) -> String {
    if nums.is_empty() {
        return "(none)".to_string();
    }
    nums.iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_json(report: &impl Serialize) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report).context("JSON encoding failed")?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::Plant;
    use crate::error::RegistryError;

    fn plant(plant_num: i32, name: &str, downstream: Option<i32>, capacity: f64) -> Plant {
        Plant {
            plant_num,
            name: name.to_string(),
            subsystem: Some(1),
            gauge_station: None,
            company: None,
            downstream_plant: downstream,
            diversion_plant: None,
            min_volume: 10.0,
            max_volume: 100.0,
            spillway_volume: None,
            diversion_volume: None,
            min_elevation: None,
            max_elevation: None,
            installed_capacity: capacity,
            productivity: 0.009,
            min_discharge: None,
            regulation: None,
        }
    }

    fn test_registry() -> PlantRegistry {
        PlantRegistry::from_plants(
            vec![
                plant(1, "OUTLET", None, 1000.0),
                plant(2, "MIDDLE", Some(1), 300.0),
                plant(3, "HEADWATER", Some(2), 50.0),
                plant(0, "", None, 0.0),
            ],
            SourceFormat::Binary,
        )
        .unwrap()
    }

    #[test]
    fn test_summary_report_counts() {
        let report = build_summary(&test_registry());
        assert_eq!(report.plants, 3);
        assert_eq!(report.placeholder_records, 1);
        assert!((report.total_installed_capacity_mw - 1350.0).abs() < 1e-9);
        assert_eq!(report.largest_plants[0].name, "OUTLET");
        assert_eq!(report.largest_plants.len(), 3);
    }

    #[test]
    fn test_chain_report_walks_to_outlet() {
        let registry = test_registry();
        let graph = CascadeGraph::from_registry(&registry);

        let report = build_chain(&registry, &graph, 3).unwrap();
        let nums: Vec<i32> = report.chain.iter().map(|link| link.plant_num).collect();
        assert_eq!(nums, vec![3, 2, 1]);
        assert_eq!(report.chain[2].name, "OUTLET");
        assert_eq!(report.storage.plants, 3);
    }

    #[test]
    fn test_chain_report_unknown_plant() {
        let registry = test_registry();
        let graph = CascadeGraph::from_registry(&registry);
        assert!(matches!(
            build_chain(&registry, &graph, 42),
            Err(RegistryError::PlantNotFound { plant_num: 42 })
        ));
    }

    #[test]
    fn test_reports_serialize_to_json() {
        let registry = test_registry();
        let graph = CascadeGraph::from_registry(&registry);

        let summary = serde_json::to_value(build_summary(&registry)).unwrap();
        assert_eq!(summary["plants"], 3);

        let chain = serde_json::to_value(build_chain(&registry, &graph, 3).unwrap()).unwrap();
        assert_eq!(chain["chain"][0]["plant_num"], 3);
    }
}
