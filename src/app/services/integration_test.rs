//! End-to-end decoding tests
//!
//! Exercises the whole pipeline on synthetic registry files: detection,
//! decoding, registry construction, and cascade queries, for both on-disk
//! layouts.

use std::io::Write;

use tempfile::NamedTempFile;

use crate::app::models::SourceFormat;
use crate::app::services::binary_decoder::layout::test_support::RecordBuilder;
use crate::app::services::cascade::CascadeGraph;
use crate::app::services::registry::parse_registry_file;
use crate::constants::RECORD_SIZE;

/// Synthetic three-plant cascade: 3 -> 2 -> 1, plant 1 is the outlet.
fn binary_fixture() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    let records = [
        RecordBuilder {
            plant_num: 1,
            name: "OUTLET",
            gauge_station: 101,
            subsystem: 1,
            company: 4,
            min_volume: 100.0,
            max_volume: 1000.0,
            installed_capacity: 1000.0,
            productivity: 0.0091,
            ..Default::default()
        },
        RecordBuilder {
            plant_num: 2,
            name: "MIDDLE",
            downstream_plant: 1,
            min_volume: 20.0,
            max_volume: 200.0,
            installed_capacity: 300.0,
            ..Default::default()
        },
        RecordBuilder {
            plant_num: 3,
            name: "HEADWATER",
            downstream_plant: 2,
            min_volume: 3.0,
            max_volume: 30.0,
            installed_capacity: 50.0,
            ..Default::default()
        },
    ];
    for record in &records {
        file.write_all(&record.encode()).unwrap();
    }
    // Trailing placeholder record, as production files carry
    file.write_all(&[0u8; RECORD_SIZE]).unwrap();
    file.flush().unwrap();
    file
}

/// The same cascade in the text layout, with auxiliary blocks.
fn text_fixture() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();

    let plant_line = |num: i32, name: &str, downstream: &str, min_v: &str, max_v: &str, cap: &str| {
        format!(
            "{num:>5} {name:<12} {sub:>4} {downstream:>5} {div:>5} {min_v:>10} {max_v:>10} \
             {cap:>10} {prod:>10}",
            sub = 1,
            div = "",
            prod = "0.0091",
        )
    };

    writeln!(file, "PLANT REGISTRY").unwrap();
    writeln!(file, "CADUSIH").unwrap();
    writeln!(
        file,
        "{}",
        plant_line(1, "OUTLET", "0", "100.00", "1000.00", "1000.00")
    )
    .unwrap();
    writeln!(
        file,
        "{}",
        plant_line(2, "MIDDLE", "1", "20.00", "200.00", "300.00")
    )
    .unwrap();
    writeln!(
        file,
        "{}",
        plant_line(3, "HEADWATER", "2", "3.00", "30.00", "50.00")
    )
    .unwrap();
    writeln!(file, "FIM").unwrap();
    writeln!(file, "TVIAG").unwrap();
    writeln!(file, "    3     2      12.00").unwrap();
    writeln!(file, "    2     1      24.00").unwrap();
    writeln!(file, "FIM").unwrap();
    writeln!(file, "POLCOTVOL").unwrap();
    writeln!(file, "{:>5} {:>15}{:>16}", 1, "885.8", "0.0029").unwrap();
    writeln!(file, "FIM").unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_binary_file_end_to_end() {
    let file = binary_fixture();
    let registry = parse_registry_file(file.path()).unwrap();

    assert_eq!(registry.source_format(), SourceFormat::Binary);
    assert_eq!(registry.plants().len(), 4);
    assert_eq!(registry.plant_count(), 3);
    assert!(!registry.has_auxiliary_data());

    let outlet = registry.plant(1).unwrap();
    assert_eq!(outlet.name, "OUTLET");
    assert_eq!(outlet.gauge_station, Some(101));
    assert_eq!(outlet.company, Some(4));
    assert_eq!(outlet.downstream_plant, None);

    let graph = CascadeGraph::from_registry(&registry);
    assert_eq!(graph.roots(), vec![3]);
    assert_eq!(graph.outlets(), vec![1]);
    assert_eq!(graph.downstream_chain(3).unwrap(), vec![3, 2, 1]);
}

#[test]
fn test_text_file_end_to_end() {
    let file = text_fixture();
    let registry = parse_registry_file(file.path()).unwrap();

    assert_eq!(registry.source_format(), SourceFormat::Text);
    assert_eq!(registry.plant_count(), 3);
    assert!(registry.has_auxiliary_data());
    assert_eq!(registry.travel_times().len(), 2);
    assert_eq!(registry.volume_elevation_curves().len(), 1);

    let outlet = registry.plant(1).unwrap();
    assert_eq!(outlet.name, "OUTLET");
    // Binary-only attributes stay absent in the text layout
    assert_eq!(outlet.gauge_station, None);
    assert_eq!(outlet.downstream_plant, None);

    let graph = CascadeGraph::from_registry(&registry);
    assert_eq!(graph.roots(), vec![3]);
    assert_eq!(graph.downstream_chain(3).unwrap(), vec![3, 2, 1]);
}

#[test]
fn test_both_layouts_decode_to_the_same_cascade() {
    let binary = parse_registry_file(binary_fixture().path()).unwrap();
    let text = parse_registry_file(text_fixture().path()).unwrap();

    let binary_graph = CascadeGraph::from_registry(&binary);
    let text_graph = CascadeGraph::from_registry(&text);

    assert_eq!(binary_graph.roots(), text_graph.roots());
    assert_eq!(binary_graph.outlets(), text_graph.outlets());
    for &num in binary_graph.plant_nums() {
        assert_eq!(
            binary_graph.downstream_of(num),
            text_graph.downstream_of(num),
            "downstream mismatch at plant {num}"
        );
    }

    let binary_agg = binary_graph.aggregate_storage(&binary, 3).unwrap();
    let text_agg = text_graph.aggregate_storage(&text, 3).unwrap();
    assert!((binary_agg.min_volume - text_agg.min_volume).abs() < 1e-6);
    assert!((binary_agg.max_volume - text_agg.max_volume).abs() < 1e-6);
}
