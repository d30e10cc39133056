//! kcentroid Command Line Interface
//!
//! Train a one-class kernel centroid model on "normal" samples, then score
//! new samples by their feature-space distance to the learned centroid.

use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use kcentroid::api::{score_dataset, summarize, summarize_by_label, Trainer};
use kcentroid::core::{OneClassError, Result};
use kcentroid::kernel::{KernelType, PolynomialKernel, RBFKernel};
use kcentroid::{Dataset, LibSVMDataset, ModelFile, SparseVector};
use log::{error, info};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "kcentroid")]
#[command(about = "Online kernel centroid estimation for novelty detection")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a model on normal samples
    Train(TrainArgs),
    /// Score samples against a trained model
    Score(ScoreArgs),
    /// Display model information
    Info(InfoArgs),
}

#[derive(Args)]
struct TrainArgs {
    /// Training data file (LibSVM format, labels optional)
    #[arg(long)]
    data: PathBuf,

    /// Output model file
    #[arg(short, long)]
    output: PathBuf,

    /// Kernel function
    #[arg(short, long, default_value = "linear")]
    kernel: CliKernel,

    /// Kernel gamma (rbf, polynomial); defaults to 1 / n_features
    #[arg(short, long)]
    gamma: Option<f64>,

    /// Polynomial degree
    #[arg(long, default_value = "3")]
    degree: u32,

    /// Polynomial independent term
    #[arg(long, default_value = "1.0")]
    coef0: f64,

    /// ALD tolerance; smaller values keep more dictionary samples
    #[arg(short, long, default_value = "0.001")]
    tolerance: f64,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CliKernel {
    /// K(x, y) = x·y
    #[value(name = "linear")]
    Linear,
    /// K(x, y) = exp(-gamma ||x - y||²)
    #[value(name = "rbf")]
    Rbf,
    /// K(x, y) = (gamma x·y + coef0)^degree
    #[value(name = "polynomial")]
    Polynomial,
}

#[derive(Args)]
struct ScoreArgs {
    /// Trained model file
    #[arg(short, long)]
    model: PathBuf,

    /// Input data file
    #[arg(long)]
    data: PathBuf,

    /// Output scores file (optional, prints to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct InfoArgs {
    /// Model file
    model: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Train(args) => train_command(args),
        Commands::Score(args) => score_command(args),
        Commands::Info(args) => info_command(args),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn build_kernel(args: &TrainArgs, n_features: usize) -> Result<KernelType> {
    let gamma = match args.gamma {
        Some(g) if g > 0.0 => g,
        Some(g) => {
            return Err(OneClassError::InvalidParameter(format!(
                "Gamma must be positive, got: {g}"
            )))
        }
        None => 1.0 / n_features.max(1) as f64,
    };

    Ok(match args.kernel {
        CliKernel::Linear => KernelType::Linear,
        CliKernel::Rbf => RBFKernel::new(gamma).into(),
        CliKernel::Polynomial => {
            if args.degree == 0 {
                return Err(OneClassError::InvalidParameter(
                    "Polynomial degree must be positive".to_string(),
                ));
            }
            PolynomialKernel::new(args.degree, gamma, args.coef0).into()
        }
    })
}

fn train_command(args: TrainArgs) -> Result<()> {
    info!("Training one-class model...");
    info!("Data file: {:?}", args.data);

    let dataset = LibSVMDataset::from_file(&args.data)?;
    info!(
        "Loaded {} samples with {} dimensions",
        dataset.len(),
        dataset.dim()
    );

    let kernel = build_kernel(&args, dataset.dim())?;
    info!("Kernel: {kernel}, tolerance: {}", args.tolerance);

    let model = Trainer::with_kernel(kernel)
        .with_tolerance(args.tolerance)
        .train(&dataset)?;

    info!("Dictionary size: {}", model.dictionary_size());
    info!("Bias: {:.6}", model.bias());

    if let Some(summary) = summarize(&score_dataset(&model, &dataset)) {
        info!(
            "Training scores: min={:.6}, mean={:.6}, max={:.6}",
            summary.min, summary.mean, summary.max
        );
    }

    ModelFile::new(model).save_to_file(&args.output)?;
    info!("Model saved to: {:?}", args.output);

    Ok(())
}

fn score_command(args: ScoreArgs) -> Result<()> {
    info!("Loading model from: {:?}", args.model);
    let model_file: ModelFile<KernelType, SparseVector> = ModelFile::load_from_file(&args.model)?;
    let model = model_file.into_model();

    info!("Loading data from: {:?}", args.data);
    let dataset = LibSVMDataset::from_file(&args.data)?;
    let scores = score_dataset(&model, &dataset);

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(OneClassError::IoError)?;
            write_scores(BufWriter::new(file), &scores)?;
            info!("Scores written to: {path:?}");
        }
        None => write_scores(io::stdout().lock(), &scores)?,
    }

    if let Some(summary) = summarize(&scores) {
        info!(
            "Scored {} samples: min={:.6}, mean={:.6}, max={:.6}",
            summary.count, summary.min, summary.mean, summary.max
        );
    }

    if let Some(labels) = dataset.labels() {
        for (label, summary) in summarize_by_label(&scores, labels) {
            info!(
                "Label {label}: {} samples, min={:.6}, mean={:.6}, max={:.6}",
                summary.count, summary.min, summary.mean, summary.max
            );
        }
    }

    Ok(())
}

fn write_scores<W: Write>(mut out: W, scores: &[f64]) -> Result<()> {
    for score in scores {
        writeln!(out, "{score:.6}")?;
    }
    out.flush()?;
    Ok(())
}

fn info_command(args: InfoArgs) -> Result<()> {
    let model_file: ModelFile<KernelType, SparseVector> = ModelFile::load_from_file(&args.model)?;
    model_file.print_summary();

    let alpha = model_file.model.alpha();
    println!("\nAlpha values:");
    let n_show = alpha.len().min(10);
    for (i, value) in alpha.iter().enumerate().take(n_show) {
        println!("  α{i}: {value:.6}");
    }
    if alpha.len() > n_show {
        println!("  ... ({} more)", alpha.len() - n_show);
    }

    Ok(())
}
