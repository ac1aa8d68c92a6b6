use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use simon_estimator::{
    render_table, render_tex, run_grover_report, run_offline_report,
    CalibrationStore, CostProjection, EstimatorConfig, Subfolder,
};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Table,
    Tex,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "simon_report")]
#[command(about = "Compare offline Simon and Grover attack costs for a cipher catalog")]
struct Args {
    #[arg(long, help = "JSON config file; flags below override it")]
    config: Option<PathBuf>,

    #[arg(long, help = "Root directory of the calibration tables")]
    data_dir: Option<PathBuf>,

    #[arg(long, help = "Calibration subfolder: LowT, LowDepth or LowWidth")]
    subfolder: Option<Subfolder>,

    #[arg(long, help = "Depth limit, log2")]
    depth_limit: Option<f64>,

    #[arg(long, allow_hyphen_values = true, help = "Failure probability, log2 (negative)")]
    success_prob: Option<f64>,

    #[arg(long, help = "Cost projection: gate-count or depth-width")]
    projection: Option<CostProjection>,

    #[arg(long, value_enum, default_value = "table")]
    format: Format,

    #[arg(long, help = "Scan u values on a single thread")]
    sequential: bool,

    #[arg(long, help = "Leave out the Grover comparison")]
    skip_grover: bool,

    #[arg(long, default_value = "info")]
    log: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log))
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => EstimatorConfig::from_json_file(path)?,
        None => EstimatorConfig::default(),
    };
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(subfolder) = args.subfolder {
        config.subfolder = subfolder;
    }
    if let Some(depth_limit) = args.depth_limit {
        config.depth_limit = depth_limit;
    }
    if let Some(success_prob) = args.success_prob {
        config.success_prob_exp = success_prob;
    }
    if let Some(projection) = args.projection {
        config.projection = projection;
    }
    if args.sequential {
        config.parallel_search = false;
    }

    let store = CalibrationStore::load_dir(&config.data_dir, config.subfolder)?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        subfolder = config.subfolder.dir_name(),
        tables = store.table_count(),
        "loaded calibration data"
    );

    let simon = run_offline_report(&store, &config);
    let grover = if args.skip_grover {
        Vec::new()
    } else {
        run_grover_report(&store, &config)
    };

    match args.format {
        Format::Table => {
            println!("Offline Simon");
            print!("{}", render_table(&simon));
            if !args.skip_grover {
                println!("\nGrover");
                print!("{}", render_table(&grover));
            }
        }
        Format::Tex => {
            print!("{}", render_tex(&simon));
            if !args.skip_grover {
                println!("% Grover");
                print!("{}", render_tex(&grover));
            }
        }
        Format::Json => {
            let json = serde_json::json!({ "simon": simon, "grover": grover });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }
    Ok(())
}
