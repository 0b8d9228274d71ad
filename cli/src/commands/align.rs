use std::fs;

use anyhow::{Context, Result};
use dongmap::{write_geojson, Aligner, BoundaryCollection, DemographicTable, JoinedRecord, Metric, Source};

use crate::cli::{AlignArgs, Cli};
use crate::config::DashboardConfig;

pub fn run(cli: &Cli, args: &AlignArgs) -> Result<()> {
    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    if let Some(csv) = &args.csv { config.demographics = csv.clone(); }
    if let Some(geo) = &args.geo { config.boundaries = geo.clone(); }
    if let Some(region) = &args.region { config.align.region = region.clone(); }

    log::info!("[align] loading demographics from {}", config.demographics.display());
    let table = DemographicTable::load(&Source::path(&config.demographics))
        .context("[align] Failed to load demographic table")?;

    log::info!("[align] loading boundaries from {}", config.boundaries.display());
    let boundaries = BoundaryCollection::load(&Source::path(&config.boundaries))
        .context("[align] Failed to load boundaries")?;

    let aligner = Aligner::new(config.align);
    let alignment = aligner.align(&boundaries, &table)
        .with_context(|| format!("[align] Failed to align {} with {}", boundaries.label(), table.label()))?;

    let summary = &alignment.summary;
    println!("matched districts: {} / {}", summary.matched, summary.total);
    if summary.total > 0 && summary.matched == 0 {
        println!("warning: no district matched; check the region filter and name columns");
    }

    for record in &alignment.records {
        println!("{}", format_record(record));
    }

    match args.metric.range(&alignment.records) {
        Some((lo, hi)) => println!("{} range: {lo:.1} – {hi:.1} {}", args.metric, args.metric.unit()),
        None => println!("{} range: N/A", args.metric),
    }

    if let Some(out_path) = &args.output {
        log::info!("[align] writing GeoJSON to {}", out_path.display());
        let bytes = write_geojson(&alignment.records)?;
        fs::write(out_path, bytes)
            .with_context(|| format!("[align] Failed to write {}", out_path.display()))?;
    }

    Ok(())
}

fn format_record(record: &JoinedRecord) -> String {
    let population = Metric::TotalPopulation.value(record)
        .map(|p| format!("{p:.0}"))
        .unwrap_or_else(|| "N/A".to_string());
    format!(
        "{}\t{}\t{:.3} km²\t{:.1} /km²",
        record.label(), population, record.area_km2(), record.population_density,
    )
}
