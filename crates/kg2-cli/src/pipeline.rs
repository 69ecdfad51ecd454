//! Dataset pipeline: gate → open → query sequence → report.
//!
//! 1. Fetch and extract the dataset archive unless the dataset directory exists
//! 2. Open the dataset read-only
//! 3. Run the fixed query sequence from configuration
//! 4. Render the Markdown report and write it atomically
//!
//! [`pack`] produces the archive step 1 downloads.

use std::path::{Path, PathBuf};

use anyhow::Context;
use kg2_config::Kg2Config;
use kg2_fetch::{ArchiveFetcher, DatasetStatus, HttpFetcher};
use kg2_graph::{DriverOutput, GraphDatabase, GraphWriter, ImportStats, QueryDriver};
use kg2_report::ReportInput;
use serde::Serialize;

use crate::progress::Progress;

/// Result of a full pipeline run.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub dataset: DatasetStatus,
    pub results: DriverOutput,
    pub report: PathBuf,
}

/// HTTP fetcher reporting download progress to `progress`.
pub fn http_fetcher(progress: &Progress) -> anyhow::Result<HttpFetcher> {
    let fetcher = HttpFetcher::new().context("failed to build HTTP client")?;
    Ok(match progress.as_callback() {
        Some(callback) => fetcher.with_progress(callback),
        None => fetcher,
    })
}

/// Run the existence gate with the default HTTP fetcher and a progress bar.
pub async fn prepare_dataset(config: &Kg2Config) -> anyhow::Result<DatasetStatus> {
    let progress = Progress::download("Downloading dataset");
    let fetcher = http_fetcher(&progress)?;
    let result = prepare_dataset_with(&fetcher, config).await;
    progress.finish(result.is_ok());
    result
}

/// Gate, query and report with the default HTTP fetcher.
pub async fn run(config: &Kg2Config, report_path: &Path) -> anyhow::Result<PipelineOutcome> {
    let progress = Progress::download("Downloading dataset");
    let fetcher = http_fetcher(&progress)?;
    let result = run_with(&fetcher, config, report_path).await;
    progress.finish(result.is_ok());
    result
}

/// Run the existence gate with any fetcher.
pub async fn prepare_dataset_with<F: ArchiveFetcher + Sync>(
    fetcher: &F,
    config: &Kg2Config,
) -> anyhow::Result<DatasetStatus> {
    let dataset = &config.dataset;
    kg2_fetch::ensure_dataset(
        fetcher,
        &dataset.source_url,
        &dataset.target_dir,
        &dataset.dataset_name,
    )
    .await
    .with_context(|| format!("failed to prepare dataset from {}", dataset.source_url))
}

pub fn open_dataset(dataset_dir: &Path) -> anyhow::Result<GraphDatabase> {
    GraphDatabase::open(dataset_dir)
        .with_context(|| format!("failed to open dataset {}", dataset_dir.display()))
}

/// Run the fixed query sequence.
pub fn run_sequence(db: &GraphDatabase, config: &Kg2Config) -> anyhow::Result<DriverOutput> {
    let spinner = Progress::spinner("Running queries");
    let result = QueryDriver::new(db, &config.queries, &config.lookups).run_all();
    spinner.finish_clear();
    result.context("query sequence failed")
}

/// Render and write the report for a completed sequence.
pub fn write_report(results: &DriverOutput, path: &Path) -> anyhow::Result<()> {
    let document = kg2_report::render_report(&ReportInput {
        example_node: &results.example_node,
        example_rel: &results.example_rel,
        tables: &results.tables,
    })
    .context("failed to render report")?;
    kg2_report::write_report(path, &document)?;
    Ok(())
}

/// Gate, query and report in one pass.
pub async fn run_with<F: ArchiveFetcher + Sync>(
    fetcher: &F,
    config: &Kg2Config,
    report_path: &Path,
) -> anyhow::Result<PipelineOutcome> {
    let dataset = prepare_dataset_with(fetcher, config).await?;
    let db = open_dataset(dataset.dataset_dir())?;
    let results = run_sequence(&db, config)?;
    write_report(&results, report_path)?;
    Ok(PipelineOutcome {
        dataset,
        results,
        report: report_path.to_path_buf(),
    })
}

/// Dataset directory and archive built by [`pack`].
#[derive(Debug, Serialize)]
pub struct PackOutcome {
    pub dataset_dir: PathBuf,
    pub archive: PathBuf,
    pub stats: ImportStats,
}

/// Build `<out_dir>/<dataset_name>` from JSON Lines exports and pack it as
/// `<out_dir>/<dataset_name>.tar.gz`, the archive name the fetcher expects.
pub fn pack(
    nodes: &Path,
    edges: &Path,
    out_dir: &Path,
    dataset_name: &str,
) -> anyhow::Result<PackOutcome> {
    let dataset_dir = out_dir.join(dataset_name);
    if dataset_dir.exists() {
        anyhow::bail!(
            "{} already exists; remove it to rebuild",
            dataset_dir.display()
        );
    }

    let spinner = Progress::spinner("Importing graph");
    let stats = build_dataset(nodes, edges, &dataset_dir);
    spinner.finish(stats.is_ok());
    let stats = stats?;

    let archive = out_dir.join(format!("{dataset_name}.tar.gz"));
    kg2_fetch::create_tar_gz(&dataset_dir, &archive).context("failed to pack dataset")?;
    tracing::info!(archive = %archive.display(), "dataset packed");

    Ok(PackOutcome {
        dataset_dir,
        archive,
        stats,
    })
}

fn build_dataset(nodes: &Path, edges: &Path, dataset_dir: &Path) -> anyhow::Result<ImportStats> {
    let writer = GraphWriter::create(dataset_dir)
        .with_context(|| format!("failed to create dataset {}", dataset_dir.display()))?;
    let stats = kg2_graph::import_jsonl(&writer, nodes, edges).context("import failed")?;
    writer.finish()?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use kg2_config::Kg2Config;
    use kg2_core::Value;
    use kg2_fetch::{DatasetStatus, HttpFetcher, create_tar_gz};
    use kg2_graph::{EdgeRow, GraphWriter, NodeRow};
    use pretty_assertions::assert_eq;

    use super::{pack, run_with};

    const DATASET: &str = "kg2c_test.dataset";

    fn node(label: &str, id: &str, name: &str) -> NodeRow {
        let category = format!("biolink:{label}");
        NodeRow {
            label: label.into(),
            id: id.into(),
            name: Some(name.into()),
            category: Some(category.clone()),
            all_categories: vec![category, "biolink:NamedThing".into()],
            ..NodeRow::default()
        }
    }

    /// Pack a small dataset and return the archive bytes.
    fn packed_dataset(work: &Path) -> Vec<u8> {
        let dataset_dir = work.join("staging").join(DATASET);
        let writer = GraphWriter::create(&dataset_dir).unwrap();
        writer.add_node_table("Disease").unwrap();
        writer.add_node_table("Gene").unwrap();
        writer.add_node_table("Drug").unwrap();
        writer
            .add_rel_group("treats", &[("Drug", "Disease")])
            .unwrap();
        writer
            .add_rel_group("associated_with", &[("Gene", "Disease")])
            .unwrap();

        writer.insert_node(&node("Drug", "UMLS:C2459634", "somatostatin analog")).unwrap();
        writer.insert_node(&node("Disease", "MONDO:0008608", "Down syndrome")).unwrap();
        writer.insert_node(&node("Gene", "NCBIGene:7157", "TP53")).unwrap();
        writer.insert_node(&node("Gene", "NCBIGene:54", "ACP5")).unwrap();
        writer
            .insert_edge(&EdgeRow {
                label: "treats".into(),
                src: "UMLS:C2459634".into(),
                dst: "MONDO:0008608".into(),
                id: 19_799_062,
                predicate: Some("biolink:treats".into()),
                primary_knowledge_source: Some("infores:semmeddb".into()),
                domain_range_exclusion: Some(true),
                ..EdgeRow::default()
            })
            .unwrap();
        for (id, gene) in [(2, "NCBIGene:7157"), (3, "NCBIGene:54")] {
            writer
                .insert_edge(&EdgeRow {
                    label: "associated_with".into(),
                    src: gene.into(),
                    dst: "MONDO:0008608".into(),
                    id,
                    predicate: Some("biolink:gene_associated_with_condition".into()),
                    ..EdgeRow::default()
                })
                .unwrap();
        }
        writer.finish().unwrap();

        let archive = work.join(format!("{DATASET}.tar.gz"));
        create_tar_gz(&dataset_dir, &archive).unwrap();
        std::fs::read(archive).unwrap()
    }

    /// Bind a local server; returns its base URL.
    fn bind() -> (String, tiny_http::Server) {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        (format!("http://127.0.0.1:{port}"), server)
    }

    #[tokio::test]
    async fn archive_over_http_to_report() {
        let work = tempfile::tempdir().unwrap();
        let body = packed_dataset(work.path());
        let (base, server) = bind();
        let responder = std::thread::spawn(move || {
            if let Ok(request) = server.recv() {
                let _ = request.respond(tiny_http::Response::from_data(body));
            }
        });

        let mut config = Kg2Config::default();
        config.dataset.source_url = format!("{base}/download/{DATASET}.tar.gz");
        config.dataset.target_dir = work.path().join("data");
        config.dataset.dataset_name = DATASET.into();
        let report_path = work.path().join("details.md");

        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        let fetcher = HttpFetcher::with_client(client);
        let outcome = run_with(&fetcher, &config, &report_path).await.unwrap();
        responder.join().unwrap();

        assert!(matches!(outcome.dataset, DatasetStatus::Downloaded { .. }));
        assert!(work.path().join("data").join(DATASET).join("graph.duckdb").is_file());

        let results = &outcome.results;
        assert_eq!(results.disease.len(), 1);
        assert_eq!(results.disease.cell(0, "d.name"), Some(&Value::from("Down syndrome")));
        assert_eq!(results.disease.cell(0, "d.id"), Some(&Value::from("MONDO:0008608")));
        assert_eq!(
            results.disease.cell(0, "d.all_categories"),
            Some(&Value::from(vec!["biolink:Disease", "biolink:NamedThing"]))
        );
        assert_eq!(results.disease_gene.len(), 1);
        assert_eq!(results.disease_gene.cell(0, "g.name"), Some(&Value::from("ACP5")));

        let report = std::fs::read_to_string(&report_path).unwrap();
        assert!(report.contains("### NODE Tables"));
        assert!(report.contains("### REL_GROUP Tables"));
        assert!(report.contains("| Disease "));
        assert!(report.contains("| Gene "));
        assert!(report.contains("| associated_with | REL_GROUP |"));
        assert!(report.contains("\"id\": 19799062"));
        assert!(!report.contains("\"_src\""));

        // Second run finds the dataset and never contacts the server.
        let again = run_with(&fetcher, &config, &report_path).await.unwrap();
        assert!(matches!(again.dataset, DatasetStatus::Present { .. }));
    }

    const MINIMAL_NODES: &str = r#"{"id":"MONDO:0008608","name":"Down syndrome","category":"biolink:Disease","all_categories":["biolink:Disease","biolink:NamedThing"]}
{"id":"NCBIGene:54","name":"ACP5","category":"biolink:Gene","all_categories":["biolink:Gene","biolink:NamedThing"]}
"#;

    const MINIMAL_EDGES: &str = r#"{"id":19799062,"subject":"NCBIGene:54","object":"MONDO:0008608","predicate":"biolink:treats","primary_knowledge_source":"infores:semmeddb"}
"#;

    fn first_json_block(report: &str) -> serde_json::Value {
        let start = report.find("```json\n").unwrap() + "```json\n".len();
        let end = start + report[start..].find("\n```").unwrap();
        serde_json::from_str(&report[start..end]).unwrap()
    }

    #[tokio::test]
    async fn packed_minimal_graph_to_report() {
        let work = tempfile::tempdir().unwrap();
        let nodes = work.path().join("nodes.jsonl");
        let edges = work.path().join("edges.jsonl");
        std::fs::write(&nodes, MINIMAL_NODES).unwrap();
        std::fs::write(&edges, MINIMAL_EDGES).unwrap();

        let packed = pack(&nodes, &edges, &work.path().join("dist"), DATASET).unwrap();
        assert_eq!(packed.stats.nodes, 2);
        assert_eq!(packed.stats.edges, 1);
        assert!(packed.archive.ends_with(format!("{DATASET}.tar.gz")));
        assert!(pack(&nodes, &edges, &work.path().join("dist"), DATASET).is_err());

        let body = std::fs::read(&packed.archive).unwrap();
        let (base, server) = bind();
        let responder = std::thread::spawn(move || {
            if let Ok(request) = server.recv() {
                let _ = request.respond(tiny_http::Response::from_data(body));
            }
        });

        let mut config = Kg2Config::default();
        config.dataset.source_url = format!("{base}/download/{DATASET}.tar.gz");
        config.dataset.target_dir = work.path().join("data");
        config.dataset.dataset_name = DATASET.into();
        config.lookups.node_id = "MONDO:0008608".into();
        let report_path = work.path().join("details.md");

        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        let fetcher = HttpFetcher::with_client(client);
        let outcome = run_with(&fetcher, &config, &report_path).await.unwrap();
        responder.join().unwrap();

        let report = std::fs::read_to_string(&report_path).unwrap();
        let example = first_json_block(&report);
        assert_eq!(example["id"], "MONDO:0008608");
        assert_eq!(example["name"], "Down syndrome");
        assert_eq!(example["category"], "biolink:Disease");
        assert_eq!(
            example["all_categories"],
            serde_json::json!(["biolink:Disease", "biolink:NamedThing"])
        );
        assert!(example.as_object().unwrap().keys().all(|k| !k.starts_with('_')));

        assert!(report.contains("| Disease | NODE |"));
        assert!(report.contains("| Gene    | NODE |"));
        assert!(report.contains("| treats | REL_GROUP |"));

        let hop = &outcome.results.disease_gene;
        assert_eq!(hop.len(), 1);
        assert_eq!(hop.cell(0, "d.id"), Some(&Value::from("MONDO:0008608")));
        assert_eq!(hop.cell(0, "d.name"), Some(&Value::from("Down syndrome")));
        assert_eq!(hop.cell(0, "g.id"), Some(&Value::from("NCBIGene:54")));
        assert_eq!(hop.cell(0, "g.name"), Some(&Value::from("ACP5")));
        assert_eq!(hop.cell(0, "r.predicate"), Some(&Value::from("biolink:treats")));
    }
}
