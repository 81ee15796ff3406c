//! DataBox CLI - Run saved catalog queries
//!
//! Usage:
//!   databox show <box.toml> --catalog <data.json>
//!   databox params <box.toml> [--catalog <data.json>]
//!   databox export <box.toml> --catalog <data.json> --format csv -o out.csv
//!   databox validate <box.toml>
//!   databox init <dir>
//!
//! Examples:
//!   databox show demos/published.toml --catalog demos/catalog.json
//!   databox export demos/published.toml --catalog demos/catalog.json \
//!       --format xlsx -o published.xlsx

use clap::{Parser, Subcommand, ValueEnum};
use databox::catalog::{self, Catalog};
use databox::export;
use databox::model::{self, DataBox};
use databox::settings::Settings;
use databox::view::{grid, DataBoxView};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "databox")]
#[command(about = "DataBox - Saved catalog queries with table rendering and export")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the listing of a databox
    Show {
        /// Path to the databox definition (.toml)
        file: PathBuf,

        /// Path to the catalog fixture (.json)
        #[arg(short, long)]
        catalog: PathBuf,
    },

    /// Show the inflated parameter values of a databox
    Params {
        /// Path to the databox definition (.toml)
        file: PathBuf,

        /// Optional catalog fixture (.json); parameters inflate against
        /// an empty catalog when omitted
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },

    /// Export the listing of a databox
    Export {
        /// Path to the databox definition (.toml)
        file: PathBuf,

        /// Path to the catalog fixture (.json)
        #[arg(short, long)]
        catalog: PathBuf,

        /// Export format
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// Output file; defaults to "<title>.<format>"
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a databox definition without running it
    Validate {
        /// Path to the databox definition (.toml)
        file: PathBuf,
    },

    /// List the available display converters
    Converters,

    /// Create the databoxes folder under a root directory
    Init {
        /// Root directory; falls back to `store_root` from databox.toml,
        /// then to the working directory
        dir: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show { file, catalog } => cmd_show(file, catalog),
        Commands::Params { file, catalog } => cmd_params(file, catalog),
        Commands::Export {
            file,
            catalog,
            format,
            output,
        } => cmd_export(file, catalog, format, output),
        Commands::Validate { file } => cmd_validate(file),
        Commands::Converters => cmd_converters(),
        Commands::Init { dir } => cmd_init(dir),
    }
}

fn load_settings() -> Settings {
    match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Warning: ignoring broken settings: {e}");
            Settings::default()
        }
    }
}

fn load_databox(file: &Path) -> Result<DataBox, ExitCode> {
    let mut databox = model::load(file).map_err(|e| {
        eprintln!("Error loading databox '{}': {}", file.display(), e);
        ExitCode::FAILURE
    })?;
    // boxes without a limit pick up the configured default
    let settings = load_settings();
    if databox.limit == 0 {
        databox.limit = settings.listing.default_limit;
    }
    Ok(databox)
}

fn load_catalog(file: &Path) -> Result<Catalog, ExitCode> {
    catalog::load_catalog(file).map_err(|e| {
        eprintln!("Error loading catalog '{}': {}", file.display(), e);
        ExitCode::FAILURE
    })
}

fn make_view<'a>(databox: &'a DataBox, catalog: &'a Catalog) -> Result<DataBoxView<'a>, ExitCode> {
    DataBoxView::new(databox, catalog).map_err(|e| {
        eprintln!("Error opening view: {e}");
        ExitCode::FAILURE
    })
}

fn cmd_show(file: PathBuf, catalog: PathBuf) -> ExitCode {
    let databox = match load_databox(&file) {
        Ok(d) => d,
        Err(code) => return code,
    };
    let catalog = match load_catalog(&catalog) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let view = match make_view(&databox, &catalog) {
        Ok(v) => v,
        Err(code) => return code,
    };

    if !databox.title.is_empty() {
        println!("{}", databox.title);
        println!();
    }
    let rows: Vec<Vec<String>> = view
        .rows(false)
        .into_iter()
        .map(|row| row.into_iter().map(|cell| cell.display).collect())
        .collect();
    print!("{}", grid::render_table(&view.header(), &rows));
    println!();
    println!("{} row(s)", rows.len());
    ExitCode::SUCCESS
}

fn cmd_params(file: PathBuf, catalog: Option<PathBuf>) -> ExitCode {
    let databox = match load_databox(&file) {
        Ok(d) => d,
        Err(code) => return code,
    };
    let catalog = match catalog {
        Some(path) => match load_catalog(&path) {
            Ok(c) => c,
            Err(code) => return code,
        },
        None => Catalog::default(),
    };
    let view = match make_view(&databox, &catalog) {
        Ok(v) => v,
        Err(code) => return code,
    };

    print!("{}", grid::render_params_grid(&view.params_grid()));
    println!();
    for (name, value) in view.params().iter() {
        println!("{} = {}", name, value.to_display());
    }
    ExitCode::SUCCESS
}

fn cmd_export(
    file: PathBuf,
    catalog: PathBuf,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let databox = match load_databox(&file) {
        Ok(d) => d,
        Err(code) => return code,
    };
    let catalog = match load_catalog(&catalog) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let view = match make_view(&databox, &catalog) {
        Ok(v) => v,
        Err(code) => return code,
    };

    let output = output.unwrap_or_else(|| {
        PathBuf::from(export::filename(&databox.title, format.extension()))
    });

    let settings = load_settings();
    let delimiter = settings
        .export
        .csv_delimiter
        .bytes()
        .next()
        .unwrap_or(b',');

    let result = match format {
        ExportFormat::Csv => export::to_csv_with_delimiter(&view, delimiter)
            .and_then(|data| std::fs::write(&output, data).map_err(Into::into)),
        ExportFormat::Xlsx => export::write_excel(&view, &output),
    };

    match result {
        Ok(()) => {
            println!("Exported to {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Export error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn cmd_validate(file: PathBuf) -> ExitCode {
    match load_databox(&file) {
        Ok(databox) => {
            println!("OK: '{}' is a valid databox definition", databox.id);
            ExitCode::SUCCESS
        }
        Err(code) => code,
    }
}

fn cmd_converters() -> ExitCode {
    let registry = databox::convert::ConverterRegistry::with_defaults();
    for (name, description) in registry.list() {
        if name.is_empty() {
            continue;
        }
        println!("{name:<10} {description}");
    }
    ExitCode::SUCCESS
}

fn cmd_init(dir: Option<PathBuf>) -> ExitCode {
    let dir = match dir {
        Some(dir) => dir,
        None => {
            let settings = load_settings();
            match settings.resolved_store_root() {
                Ok(Some(root)) => root,
                Ok(None) => PathBuf::from("."),
                Err(e) => {
                    eprintln!("Settings error: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }
    };
    match databox::setup::install(&dir) {
        Ok(store) => {
            println!("DataBox folder ready at {}", store.root().display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Install error: {e}");
            ExitCode::FAILURE
        }
    }
}
