use clap::Parser;
use filestat::cli::{Cli, Command};
use filestat::config::{self, Config, FileConfig};
use filestat::record;
use filestat::report::{self, FileReport};
use filestat::store::sqlite::SqliteStore;
use filestat::store::{HistoryKey, SnapshotStore};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "filestat=debug" } else { "filestat=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn open_store(config: &Config) -> SqliteStore {
    let path = match config.database() {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error locating snapshot database: {e}");
            std::process::exit(1);
        }
    };

    match SqliteStore::open(&path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error opening snapshot database {}: {e}", path.display());
            std::process::exit(1);
        }
    }
}

fn load_history(store: &SqliteStore, project: &str, file: &str) -> Vec<filestat::snapshot::Snapshot> {
    let key = match HistoryKey::new(project, file) {
        Ok(key) => key,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    match store.lookup_history(&key) {
        Ok(history) => history,
        Err(e) => {
            eprintln!("Error loading history for {key}: {e}");
            std::process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let file_config = match config::config_file_path() {
        Some(path) => FileConfig::load(&path).unwrap_or_else(|e| {
            eprintln!("Error reading config file {}: {e}", path.display());
            std::process::exit(1);
        }),
        None => FileConfig::default(),
    };
    let mut config = Config::from_cli(&cli, file_config);

    match &cli.command {
        Command::Record(args) => {
            config.json_output = args.json;
            if let Some(extensions) = &args.extensions {
                config.extensions = extensions.clone();
            }

            let mut store = open_store(&config);
            let result = match record::run(&mut store, &args.project, &args.root, &args.paths, &config) {
                Ok(result) => result,
                Err(e) => {
                    eprintln!("Error recording snapshots: {e}");
                    std::process::exit(1);
                }
            };

            let reports: Vec<FileReport> = result
                .recorded
                .iter()
                .map(|r| FileReport::new(&args.project, &r.file, &r.snapshot))
                .collect();

            report::print(&reports, &result.diagnostics, &config);
        }
        Command::History(args) => {
            let store = open_store(&config);
            let history = load_history(&store, &args.project, &args.file);

            if args.json {
                println!("{}", report::json::render_history(&args.project, &args.file, &history));
            } else {
                print!("{}", report::table::render_history(&args.file, &history));
            }
        }
        Command::Summary(args) => {
            let store = open_store(&config);
            let history = load_history(&store, &args.project, &args.file);

            let Some(latest) = history.last() else {
                eprintln!(
                    "No snapshots found for {} in project {}. Run 'filestat record' first.",
                    args.file, args.project
                );
                std::process::exit(1);
            };

            config.json_output = args.json;
            let reports = [FileReport::new(&args.project, &args.file, latest)];
            report::print(&reports, &[], &config);

            if !args.json {
                println!(
                    "\nrecorded: {} ({} snapshots)",
                    report::table::format_timestamp(latest.recorded_at),
                    history.len()
                );
            }
        }
        Command::Projects => {
            let store = open_store(&config);
            let projects = match store.projects() {
                Ok(projects) => projects,
                Err(e) => {
                    eprintln!("Error listing projects: {e}");
                    std::process::exit(1);
                }
            };

            if projects.is_empty() {
                println!("No projects tracked. Run 'filestat record' to start.");
                return;
            }

            for project in projects {
                println!("{project}");
                match store.files(&project) {
                    Ok(files) => {
                        for file in files {
                            println!("  {file}");
                        }
                    }
                    Err(e) => eprintln!("  error listing files: {e}"),
                }
            }
        }
    }
}
