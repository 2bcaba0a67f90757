use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use figview_core::app::{RenderReport, Session, ViewerBuilder};
use figview_core::config::{DEFAULT_BASE_URL, ViewerConfig};
use figview_core::domain::{Category, Location, Selection, SelectionLists};
use figview_core::impls::{RoutingSource, WorkbookSelections};
use figview_core::ports::{ByteSource, SystemClock};

mod render;

/// Visualize the results for a specific model and scenario.
#[derive(Debug, Parser)]
#[command(name = "figview", version, about)]
struct Cli {
    /// TOML file describing stores, templates and captions.
    #[arg(long, env = "FIGVIEW_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Repository root used when no config file is given.
    #[arg(long, env = "FIGVIEW_BASE_URL", global = true, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Workbook with the `model` and `scenario` sheets (URL or path).
    #[arg(long, env = "FIGVIEW_WORKBOOK", global = true)]
    workbook: Option<String>,

    /// HTTP timeout in seconds.
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the models and scenarios offered by the workbook.
    List,

    /// Fetch and save every figure for one model and scenario.
    Show(ShowArgs),
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Defaults to the first model in the workbook.
    #[arg(long)]
    model: Option<String>,

    /// Defaults to the first scenario in the workbook.
    #[arg(long)]
    scenario: Option<String>,

    /// Directory the figures are written to.
    #[arg(long, default_value = "figures")]
    out: PathBuf,

    /// Print the render report as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    // (A) 取得元とリゾルバを用意（設定の不足はここで落とす）
    let source: Arc<dyn ByteSource> = Arc::new(RoutingSource::new(config.timeout()));
    let resolver = ViewerBuilder::new()
        .catalog(config.stores.clone())
        .captions(config.captions.clone())
        .source(source.clone())
        .build()
        .context("invalid viewer configuration")?;

    // (B) セッション開始：一覧が読めなければ終了
    let provider = WorkbookSelections::new(config.workbook.clone(), source);
    let session = Session::start(&provider, resolver, Arc::new(SystemClock))
        .await
        .with_context(|| {
            format!("cannot load the model and scenario lists from {}", config.workbook)
        })?;

    match cli.command {
        Command::List => print!("{}", render::selection_lists(session.selections())),
        Command::Show(args) => show(&session, &args).await?,
    }
    Ok(())
}

async fn show(session: &Session, args: &ShowArgs) -> Result<()> {
    let selection = pick(
        session.selections(),
        args.model.as_deref(),
        args.scenario.as_deref(),
    )?;

    // (C) 全カテゴリを順に解決（失敗したカテゴリは警告として表示）
    let report = session.render(&selection).await;
    let written = write_figures(&report, &args.out).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::report(&report, &written));
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<ViewerConfig> {
    let mut config = match &cli.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::canonical(&cli.base_url),
    };
    if let Some(workbook) = &cli.workbook {
        config.workbook = Location::parse(workbook);
    }
    if let Some(timeout) = cli.timeout_secs {
        config.timeout_secs = Some(timeout);
    }
    Ok(config)
}

/// Unset values fall back to the first entry of each list.
fn pick(lists: &SelectionLists, model: Option<&str>, scenario: Option<&str>) -> Result<Selection> {
    let default = lists
        .default_selection()
        .context("the workbook offers no model or scenario")?;
    let model = model.unwrap_or(default.model());
    let scenario = scenario.unwrap_or(default.scenario());
    Ok(lists.select(model, scenario)?)
}

/// Save every found figure under its artifact name, separators replaced.
///
/// A figure that cannot be written is logged and left out; the others are
/// still written.
async fn write_figures(report: &RenderReport, out: &Path) -> BTreeMap<Category, PathBuf> {
    let mut written = BTreeMap::new();
    if report.counts.found == 0 {
        return written;
    }
    if let Err(e) = tokio::fs::create_dir_all(out).await {
        warn!(out = %out.display(), error = %e, "cannot create output directory");
        return written;
    }

    for outcome in &report.outcomes {
        let Some(figure) = &outcome.figure else {
            continue;
        };
        let path = out.join(file_name(outcome.artifact.as_str()));
        match tokio::fs::write(&path, &figure.bytes).await {
            Ok(()) => {
                written.insert(outcome.category, path);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot write figure");
            }
        }
    }
    written
}

/// モデル名・シナリオ名の区切り文字を潰し、`out` 直下の 1 ファイル名にする
fn file_name(artifact: &str) -> String {
    artifact.replace(['/', '\\'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use figview_core::domain::{ArtifactId, Figure, ResolutionOutcome, SessionId};
    use figview_core::ports::Clock;

    fn lists() -> SelectionLists {
        SelectionLists::new(
            vec!["IMAGE".into(), "REMIND".into()],
            vec!["SSP1".into(), "SSP2".into()],
        )
    }

    #[test]
    fn pick_defaults_to_first_entries() {
        let s = pick(&lists(), None, None).unwrap();
        assert_eq!(s, Selection::new("IMAGE", "SSP1"));

        let s = pick(&lists(), Some("REMIND"), None).unwrap();
        assert_eq!(s, Selection::new("REMIND", "SSP1"));
    }

    #[test]
    fn pick_rejects_values_not_offered() {
        let err = pick(&lists(), Some("GCAM"), Some("SSP2")).unwrap_err();
        assert!(err.to_string().contains("IMAGE, REMIND"));
    }

    #[test]
    fn config_flags_override_the_canonical_config() {
        let cli = Cli::try_parse_from([
            "figview",
            "--base-url",
            "https://h/main",
            "--workbook",
            "local/Scope.xlsx",
            "--timeout-secs",
            "7",
            "list",
        ])
        .unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.workbook, Location::Local(PathBuf::from("local/Scope.xlsx")));
        assert_eq!(config.timeout_secs, Some(7));
        assert!(config.stores.missing(&Category::ALL).is_empty());
    }

    #[test]
    fn show_args_parse() {
        let cli = Cli::try_parse_from([
            "figview", "show", "--model", "IMAGE", "--scenario", "SSP2", "--json",
        ])
        .unwrap();
        match cli.command {
            Command::Show(args) => {
                assert_eq!(args.model.as_deref(), Some("IMAGE"));
                assert_eq!(args.scenario.as_deref(), Some("SSP2"));
                assert_eq!(args.out, PathBuf::from("figures"));
                assert!(args.json);
            }
            Command::List => panic!("expected show"),
        }
    }

    #[tokio::test]
    async fn found_figures_are_written_under_their_artifact_name() {
        let figure = Figure {
            entry: "https://h/main/Resource_images/Fig_Resource_IMAGE - SSP2.png".into(),
            format: "png".into(),
            width: 1,
            height: 1,
            bytes: vec![1, 2, 3],
            label: "IMAGE - SSP2".into(),
            caption: None,
        };
        let report = RenderReport::new(
            SessionId::generate(&SystemClock),
            Selection::new("IMAGE", "SSP2"),
            SystemClock.now(),
            vec![ResolutionOutcome::found(
                Category::Resource,
                ArtifactId::new("Fig_Resource_IMAGE - SSP2.png"),
                figure,
            )],
        );

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("figures");
        let written = write_figures(&report, &out).await;

        let path = written.get(&Category::Resource).unwrap();
        assert_eq!(path, &out.join("Fig_Resource_IMAGE - SSP2.png"));
        assert_eq!(std::fs::read(path).unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn separators_in_names_stay_inside_the_output_directory() {
        let figure = |bytes: Vec<u8>| Figure {
            entry: String::new(),
            format: "png".into(),
            width: 1,
            height: 1,
            bytes,
            label: String::new(),
            caption: None,
        };
        let report = RenderReport::new(
            SessionId::generate(&SystemClock),
            Selection::new("AIM/CGE", "SSP2"),
            SystemClock.now(),
            vec![
                ResolutionOutcome::found(
                    Category::Resource,
                    ArtifactId::new("Fig_Resource_AIM/CGE - SSP2.png"),
                    figure(vec![1]),
                ),
                ResolutionOutcome::found(
                    Category::Mining,
                    ArtifactId::new("Fig_Mining_..\\..\\x - SSP2.png"),
                    figure(vec![2]),
                ),
            ],
        );

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("figures");
        let written = write_figures(&report, &out).await;

        assert_eq!(
            written.get(&Category::Resource).unwrap(),
            &out.join("Fig_Resource_AIM_CGE - SSP2.png")
        );
        let mining = written.get(&Category::Mining).unwrap();
        assert_eq!(mining, &out.join("Fig_Mining_.._.._x - SSP2.png"));
        assert_eq!(mining.parent(), Some(out.as_path()));
        assert_eq!(std::fs::read(mining).unwrap(), vec![2]);
    }
}
