use anyhow::Result;
use countries_to_sqlite::{
    cli::{Cli, Commands, Phase, Source},
    fetch::{ArtifactStore, WikiClient},
    labels::build_label_points,
    pipeline,
    store::CountryStore,
};
use std::time::Instant;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Build {
            data_dir,
            db,
            geojson,
        } => {
            let start = Instant::now();

            let client = WikiClient::new()?;
            let artifacts = ArtifactStore::new(data_dir)?;
            let store = CountryStore::create(&db)?;

            let unmatched = pipeline::run_build(&client, &artifacts, &store, &geojson)?;

            let elapsed = start.elapsed();
            println!(
                "\nCreated {:?} ({} rows) in {:.1}s",
                db,
                store.row_count()?,
                elapsed.as_secs_f64()
            );
            if !unmatched.is_empty() {
                println!(
                    "{} enrichment name(s) matched no stored row: {}",
                    unmatched.len(),
                    unmatched.join(", ")
                );
            }
        }

        Commands::Fetch { source, data_dir } => {
            let client = WikiClient::new()?;
            let artifacts = ArtifactStore::new(data_dir)?;

            match source {
                Some(Source::Codes) => {
                    pipeline::fetch_codes(&client, &artifacts)?;
                }
                Some(Source::Population) => {
                    pipeline::fetch_population(&client, &artifacts)?;
                }
                Some(Source::Area) => {
                    pipeline::fetch_area(&client, &artifacts)?;
                }
                None => {
                    pipeline::fetch_codes(&client, &artifacts)?;
                    pipeline::fetch_population(&client, &artifacts)?;
                    pipeline::fetch_area(&client, &artifacts)?;
                }
            }
        }

        Commands::Load {
            phase,
            data_dir,
            db,
            geojson,
        } => {
            let artifacts = ArtifactStore::new(data_dir)?;
            let store = CountryStore::open(&db)?;

            match phase {
                Some(Phase::Schema) => store.create_schema()?,
                Some(Phase::Codes) => {
                    store.create_schema()?;
                    pipeline::load_codes(&store, &artifacts)?;
                }
                Some(Phase::Population) => {
                    pipeline::load_population(&store, &artifacts)?;
                }
                Some(Phase::Area) => {
                    pipeline::load_area(&store, &artifacts)?;
                }
                Some(Phase::Sovereignty) => {
                    pipeline::load_sovereignty(&store, &geojson)?;
                }
                None => {
                    store.create_schema()?;
                    let mut unmatched = Vec::new();
                    pipeline::load_codes(&store, &artifacts)?;
                    unmatched.extend(pipeline::load_population(&store, &artifacts)?.unmatched);
                    unmatched.extend(pipeline::load_area(&store, &artifacts)?.unmatched);
                    unmatched.extend(pipeline::load_sovereignty(&store, &geojson)?.unmatched);

                    if !unmatched.is_empty() {
                        println!(
                            "\n{} enrichment name(s) matched no stored row: {}",
                            unmatched.len(),
                            unmatched.join(", ")
                        );
                    }
                }
            }
        }

        Commands::Labels { input, output } => {
            let start = Instant::now();
            let summary = build_label_points(&input, &output)?;

            println!(
                "\nWrote {:?}: {} label points for {} countries in {:.1}s",
                output,
                summary.points,
                summary.labeled,
                start.elapsed().as_secs_f64()
            );
            if !summary.unlabeled.is_empty() {
                println!(
                    "{} feature(s) could not be labeled: {}",
                    summary.unlabeled.len(),
                    summary.unlabeled.join(", ")
                );
            }
        }
    }

    Ok(())
}
