use clap::{Parser, Subcommand};
use sb_app::{
    AppResult, DashboardView, dashboard, eval_service, project_service, qa_service, query,
    stream_service,
};
use sb_core::{Stopwatch, round_ms};
use sb_results::ReportStore;
use sb_retrieval::{EvalSummary, ExtractiveGenerator};
use sb_stream::{SensorFrameStore, StreamSimulator};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sb-cli")]
#[command(about = "Smart-building assistant - sensor analytics and manual QA", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and settings
    Validate {
        /// Path to the project YAML file
        project_path: PathBuf,
    },
    /// Replay the sensor folder live and refresh the dashboard
    Stream {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// How long to stream, in seconds
        #[arg(long, default_value_t = 10.0)]
        duration: f64,
        /// Dashboard refresh period, in seconds
        #[arg(long, default_value_t = 2.0)]
        refresh: f64,
        /// Override the project's replay interval, in seconds
        #[arg(long)]
        interval: Option<f64>,
    },
    /// Run anomaly detection over the whole sensor dataset
    Analyze {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Number of most recent anomalies to list
        #[arg(long)]
        tail: Option<usize>,
    },
    /// List indexed documents
    Docs {
        /// Path to the project YAML file
        project_path: PathBuf,
    },
    /// Answer a question from the indexed documents
    Ask {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// The question
        question: String,
        /// Number of passages to retrieve
        #[arg(short, long)]
        k: Option<usize>,
    },
    /// Time retrieval for a query list
    Eval {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Queries to run instead of the project's list
        queries: Vec<String>,
        /// Number of passages per query
        #[arg(short, long)]
        k: Option<usize>,
        /// Persist the result as a report
        #[arg(long)]
        save: bool,
    },
    /// List saved evaluation reports
    Reports {
        /// Path to the project YAML file
        project_path: PathBuf,
    },
    /// Show a saved evaluation report
    ShowReport {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Report id or unique prefix
        report_id: String,
    },
    /// Export one metric from the sensor dataset as CSV
    ExportSeries {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Metric column name (e.g., supply_temp, kw)
        metric: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Stream {
            project_path,
            duration,
            refresh,
            interval,
        } => cmd_stream(&project_path, duration, refresh, interval),
        Commands::Analyze { project_path, tail } => cmd_analyze(&project_path, tail),
        Commands::Docs { project_path } => cmd_docs(&project_path),
        Commands::Ask {
            project_path,
            question,
            k,
        } => cmd_ask(&project_path, &question, k),
        Commands::Eval {
            project_path,
            queries,
            k,
            save,
        } => cmd_eval(&project_path, queries, k, save),
        Commands::Reports { project_path } => cmd_reports(&project_path),
        Commands::ShowReport {
            project_path,
            report_id,
        } => cmd_show_report(&project_path, &report_id),
        Commands::ExportSeries {
            project_path,
            metric,
            output,
        } => cmd_export_series(&project_path, &metric, output.as_deref()),
    }
}

fn seconds(value: f64, what: &str) -> AppResult<Duration> {
    Duration::try_from_secs_f64(value)
        .map_err(|e| sb_app::AppError::InvalidInput(format!("{} = {}: {}", what, value, e)))
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = project_service::load_project(project_path)?;
    project_service::validate_project(&project)?;
    println!("✓ Project is valid");
    Ok(())
}

fn cmd_stream(
    project_path: &Path,
    duration_s: f64,
    refresh_s: f64,
    interval_s: Option<f64>,
) -> AppResult<()> {
    let mut project = project_service::load_project(project_path)?;
    if let Some(interval_s) = interval_s {
        project.stream.interval_s = interval_s;
        project_service::validate_project(&project)?;
    }
    let options = project_service::detector_options(&project)?;
    let duration = seconds(duration_s, "duration")?;
    let refresh = seconds(refresh_s, "refresh")?.max(Duration::from_millis(50));

    let mut simulator = StreamSimulator::new(SensorFrameStore::new());
    let run_id = stream_service::start_stream(&mut simulator, project_path, &project)?;
    println!("Streaming {} (run {})", project.name, run_id);

    let timer = Stopwatch::start();
    loop {
        let remaining = duration.saturating_sub(timer.elapsed());
        thread::sleep(refresh.min(remaining));

        let view = dashboard::refresh(
            &simulator.store().snapshot(),
            &options,
            project.analytics.anomaly_tail,
        );
        print_dashboard(&view);

        if !simulator.is_running() || timer.elapsed() >= duration {
            break;
        }
    }

    if let Some(outcome) = simulator.stop() {
        println!(
            "✓ Stream stopped after {} rows ({:?})",
            outcome.rows_emitted, outcome.end
        );
    }
    Ok(())
}

fn cmd_analyze(project_path: &Path, tail: Option<usize>) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let options = project_service::detector_options(&project)?;
    let rows = stream_service::load_dataset(project_path, &project)?;
    info!(rows = rows.len(), "dataset loaded");

    let view = dashboard::analyze_rows(
        &rows,
        &options,
        tail.unwrap_or(project.analytics.anomaly_tail),
    );
    print_dashboard(&view);
    Ok(())
}

fn print_dashboard(view: &DashboardView) {
    let Some(summary) = &view.summary else {
        println!("\nWaiting for sensor data...");
        return;
    };

    println!("\nDashboard");
    if let Some(last) = view.last_update {
        println!("  Last update: {}", last);
    }
    println!(
        "  Rows: {}  Sensors: {}  Metrics: {}",
        summary.row_count,
        summary.sensor_ids.join(", "),
        summary.metrics.join(", ")
    );

    println!(
        "\nAnomalies ({} total, showing {}):",
        view.anomaly_total,
        view.anomalies.len()
    );
    for a in &view.anomalies {
        println!(
            "  {}  {:<12} {:<16} z={:+.2}",
            a.timestamp, a.sensor_id, a.metric, a.z
        );
    }

    println!("\nMaintenance Recommendations:");
    for r in &view.recommendations {
        println!("  - {}", r);
    }

    println!("\nEfficiency Tips:");
    for t in &view.tips {
        println!("  - {}", t);
    }
}

fn cmd_docs(project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let index = qa_service::build_index(project_path, &project)?;

    println!("Indexed documents:");
    for doc in qa_service::list_documents(&index) {
        println!("  {} ({} chunks)", doc.source, doc.chunks);
    }
    Ok(())
}

fn cmd_ask(project_path: &Path, question: &str, k: Option<usize>) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let index = qa_service::build_index(project_path, &project)?;
    let k = k.unwrap_or(project.retrieval.top_k);

    let answer = qa_service::ask(&index, &ExtractiveGenerator::default(), question, k)?;

    println!("Answer:\n  {}", answer.text);
    println!("\nSources:");
    for doc in &answer.sources {
        match doc.score {
            Some(score) => println!("  {} | score={:.3}", doc.source, score),
            None => println!("  {} | score=-", doc.source),
        }
    }
    Ok(())
}

fn cmd_eval(project_path: &Path, queries: Vec<String>, k: Option<usize>, save: bool) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let index = qa_service::build_index(project_path, &project)?;
    let k = k.unwrap_or(project.retrieval.top_k);
    let queries = if queries.is_empty() {
        project.evaluation.queries.clone()
    } else {
        queries
    };

    let summary = if save {
        let store = ReportStore::for_project(project_path)?;
        let (manifest, summary) =
            eval_service::run_and_save(&store, &project.name, &index, &queries, k)?;
        println!("✓ Saved report {}", manifest.report_id);
        summary
    } else {
        eval_service::run_eval(&index, &queries, k)?
    };

    print_eval(&summary);
    Ok(())
}

fn print_eval(summary: &EvalSummary) {
    println!("\nRetrieval evaluation:");
    for q in &summary.queries {
        println!("  {:<32} {:>8.3} s", q.query, round_ms(q.latency_s));
        for source in &q.top_sources {
            println!("      {}", source);
        }
    }
    println!("  Average latency: {:.3} s", round_ms(summary.avg_latency_s));
}

fn cmd_reports(project_path: &Path) -> AppResult<()> {
    let store = ReportStore::for_project(project_path)?;
    let reports = eval_service::list_reports(&store)?;

    if reports.is_empty() {
        println!("No saved reports");
    } else {
        println!("Saved reports:");
        for manifest in reports {
            println!(
                "  {} ({}, {} queries, k={})",
                manifest.report_id, manifest.created_at, manifest.query_count, manifest.k
            );
        }
    }
    Ok(())
}

fn cmd_show_report(project_path: &Path, report_id: &str) -> AppResult<()> {
    let store = ReportStore::for_project(project_path)?;
    let report = eval_service::load_report(&store, report_id)?;

    println!("Report: {}", report.manifest.report_id);
    println!("  Project: {}", report.manifest.project_name);
    println!("  Created: {}", report.manifest.created_at);
    println!("  k: {}", report.manifest.k);
    print_eval(&report.summary());
    Ok(())
}

fn cmd_export_series(project_path: &Path, metric: &str, output: Option<&Path>) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let rows = stream_service::load_dataset(project_path, &project)?;
    let series = query::extract_metric_series(&rows, metric)?;
    let csv = query::series_to_csv(metric, &series);

    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!(
            "✓ Exported {} data points to {}",
            series.len(),
            path.display()
        );
    } else {
        print!("{}", csv);
    }

    Ok(())
}
