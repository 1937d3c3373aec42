use binlens_common::Config;
use binlens_core::{
    apply_labelling, ascending, bin_series, export_csv, export_json, format_to_base_10,
    load_values, make_bin_edges, render_table, to_json, write_csv, CountTable, FormatOptions,
    NumberFormatter,
};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "binlens", version, about = "Bin numeric samples into labelled half-open intervals")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct EdgeArgs {
    /// Range description, e.g. "0 10 ... 100"
    #[arg(long = "edges", value_name = "DESC")]
    desc: String,
    /// Drop the open-ended bin below the first edge
    #[arg(long)]
    closed_left: bool,
    /// Drop the open-ended bin above the last edge
    #[arg(long)]
    closed_right: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the bin edges generated from a range description
    Edges {
        desc: String,
        #[arg(long)] closed_left: bool,
        #[arg(long)] closed_right: bool,
    },
    /// Count values per bin; INPUT is "-" (stdin), a text file, or Parquet file/dir/glob
    Bin {
        input: String,
        #[command(flatten)]
        edges: EdgeArgs,
        #[arg(long)] column: Option<String>,
        /// Plain numbers in labels, no magnitude formatting
        #[arg(long)] raw: bool,
        #[arg(long)] precision: Option<usize>,
        #[arg(long)] prefix: Option<String>,
        #[arg(long)] postfix: Option<String>,
        #[arg(long)] trim_zero_decimals: bool,
        /// table, json or csv
        #[arg(long)] format: Option<String>,
        #[arg(long)] output: Option<String>,
    },
    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Print shell completions
    Completions { shell: Shell },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default config to the config path
    Init {
        #[arg(long)] force: bool,
    },
    /// Print the active config
    Show,
}

struct LabelSettings {
    raw: bool,
    options: FormatOptions,
}

impl LabelSettings {
    /// Command-line flags win over `[labels]` config values.
    fn resolve(
        raw: bool,
        precision: Option<usize>,
        prefix: Option<String>,
        postfix: Option<String>,
        trim_zero_decimals: bool,
        config: &Config,
    ) -> Self {
        Self {
            raw: raw || config.labels.raw,
            options: FormatOptions {
                trim_0_decimals: trim_zero_decimals || config.labels.trim_0_decimals,
                precision: precision.unwrap_or(config.labels.precision),
                prefix: prefix.unwrap_or_else(|| config.labels.prefix.clone()),
                postfix: postfix.unwrap_or_else(|| config.labels.postfix.clone()),
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("warning: ignoring config {}: {e}", Config::config_path().display());
            Config::default()
        }
    };
    match cli.command {
        Commands::Edges { desc, closed_left, closed_right } => {
            run_edges(&desc, !closed_left && config.binning.left_open, !closed_right && config.binning.right_open)?
        }
        Commands::Bin { input, edges, column, raw, precision, prefix, postfix, trim_zero_decimals, format, output } => {
            let labels = LabelSettings::resolve(raw, precision, prefix, postfix, trim_zero_decimals, &config);
            let format = format.unwrap_or_else(|| config.export.format.clone());
            run_bin(&input, &edges, column.as_deref(), &labels, &format, output, &config)?
        }
        Commands::Config { action } => run_config(action, &config)?,
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "binlens", &mut std::io::stdout());
        }
    }
    Ok(())
}

fn run_edges(desc: &str, left_open: bool, right_open: bool) -> anyhow::Result<()> {
    let edges = make_bin_edges(desc, left_open, right_open)?;
    let rendered: Vec<String> = edges.iter().map(|e| e.to_string()).collect();
    println!("{}", rendered.join(" "));
    Ok(())
}

fn run_bin(
    input: &str,
    edge_args: &EdgeArgs,
    column: Option<&str>,
    labels: &LabelSettings,
    format: &str,
    output: Option<String>,
    config: &Config,
) -> anyhow::Result<()> {
    let labelled = bin_and_label(input, edge_args, column, labels, config)?;
    match output {
        Some(o) => write_output(&labelled, format, output_path(&o, config))?,
        None => print_output(&labelled, format)?,
    }
    Ok(())
}

fn bin_and_label(
    input: &str,
    edge_args: &EdgeArgs,
    column: Option<&str>,
    labels: &LabelSettings,
    config: &Config,
) -> anyhow::Result<CountTable<String>> {
    let left_open = !edge_args.closed_left && config.binning.left_open;
    let right_open = !edge_args.closed_right && config.binning.right_open;
    let edges = ascending(make_bin_edges(&edge_args.desc, left_open, right_open)?);
    let values = load_values(input, column)?;
    if values.is_empty() { eprintln!("warning: no values found in {input}"); }
    let counted = bin_series(&values, &edges)?.value_counts();
    if counted.unassigned() > 0 {
        eprintln!(
            "warning: {} of {} values fell outside all bins",
            counted.unassigned(),
            counted.total()
        );
    }
    let formatter: Option<&dyn NumberFormatter> = if labels.raw { None } else { Some(&format_to_base_10 as &dyn NumberFormatter) };
    Ok(apply_labelling(&counted, formatter, &labels.options)?)
}

/// Relative `--output` paths land under `[export] output_dir`.
fn output_path(output: &str, config: &Config) -> PathBuf {
    let path = PathBuf::from(output);
    if path.is_absolute() {
        path
    } else {
        std::path::Path::new(&config.export.output_dir).join(path)
    }
}

fn print_output(table: &CountTable<String>, format: &str) -> anyhow::Result<()> {
    match format {
        "table" => print!("{}", render_table(table)?),
        "json" => println!("{}", to_json(table)?),
        "csv" => write_csv(std::io::stdout().lock(), table)?,
        _ => anyhow::bail!("Unknown format: {format} (use table, json or csv)"),
    }
    Ok(())
}

fn write_output(table: &CountTable<String>, format: &str, out_path: PathBuf) -> anyhow::Result<()> {
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() { std::fs::create_dir_all(parent)?; }
    }
    match format {
        "json" => export_json(&out_path, table)?,
        "csv" => export_csv(&out_path, table)?,
        "table" => std::fs::write(&out_path, render_table(table)?)?,
        _ => anyhow::bail!("Unknown format: {format} (use table, json or csv)"),
    }
    println!("Exported to {}", out_path.display());
    Ok(())
}

fn run_config(action: ConfigAction, config: &Config) -> anyhow::Result<()> {
    match action {
        ConfigAction::Init { force } => {
            let path = Config::config_path();
            if path.exists() && !force {
                anyhow::bail!("config already exists: {} (use --force to overwrite)", path.display());
            }
            let path = Config::default().save()?;
            println!("Config written to {}", path.display());
        }
        ConfigAction::Show => {
            println!("# {}", Config::config_path().display());
            print!("{}", config.to_toml()?);
        }
    }
    Ok(())
}
