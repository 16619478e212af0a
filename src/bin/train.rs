use csv::ReaderBuilder;
use log::info;
use nalgebra::{DMatrix, DVector};
use rusty_ltr::data::dataset::Dataset;
use rusty_ltr::metrics::errors::RegressionMetrics;
use rusty_ltr::trees::params::RegressionTreeParams;
use rusty_ltr::trees::regression::RegressionTree;
use std::env;
use std::error::Error;

const DEFAULT_PATH: &str = "datasets/california_housing.csv";
const DEFAULT_DIMENSION: usize = 8;
const DEFAULT_LEAVES: usize = 16;

fn read_file_regression(
    file_path: &str,
    dimension: usize,
    header: bool,
) -> Result<Dataset<f64, f64>, Box<dyn Error>> {
    if dimension == 0 {
        return Err("at least one feature column is required".into());
    }
    let mut reader = ReaderBuilder::new()
        .has_headers(header)
        .from_path(file_path)?;
    let mut features = Vec::new();
    let mut labels = Vec::new();

    for result in reader.records() {
        let record = result?;
        for feature in record.iter().take(dimension) {
            features.push(feature.parse::<f64>()?);
        }
        let label = record.get(dimension).ok_or("Missing label")?;
        labels.push(label.parse::<f64>()?);
    }
    if labels.is_empty() {
        return Err(format!("{} contains no rows", file_path).into());
    }
    if features.len() != labels.len() * dimension {
        return Err(format!("{} has rows with fewer than {} features", file_path, dimension).into());
    }

    let feature_matrix = DMatrix::from_row_slice(labels.len(), dimension, &features);
    Ok(Dataset::new(feature_matrix, DVector::from_vec(labels)))
}

fn parse_arg<T: std::str::FromStr>(position: usize, default: T) -> Result<T, Box<dyn Error>> {
    match env::args().nth(position) {
        Some(value) => value
            .parse()
            .map_err(|_| format!("invalid argument {}: {}", position, value).into()),
        None => Ok(default),
    }
}

fn run() -> Result<String, Box<dyn Error>> {
    let path = env::args().nth(1).unwrap_or_else(|| DEFAULT_PATH.to_string());
    let dimension = parse_arg(2, DEFAULT_DIMENSION)?;
    let num_leaves = parse_arg(3, DEFAULT_LEAVES)?;

    let dataset = read_file_regression(&path, dimension, true)?;
    info!("Loaded {} rows from {}", dataset.nrows(), path);
    let (train_dataset, test_dataset) = dataset.train_test_split(0.75, None)?;

    // Seed the root on the mean of the first feature.
    let first_feature = train_dataset.x.column(0);
    let init_threshold = first_feature.sum() / first_feature.len() as f64;

    let mut params = RegressionTreeParams::new();
    params.set_num_leaves(num_leaves)?;
    params.set_init_threshold(init_threshold)?;

    let tree = RegressionTree::with_params(&params, &train_dataset.documents())?;
    let predictions = tree.predict_batch(&test_dataset.x)?;
    let mse = tree.mse(&test_dataset.y, &predictions)?;

    Ok(format!("Predictions MSE: {}", mse))
}

fn main() {
    env_logger::init();

    match run() {
        Ok(report) => println!("{}", report),
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }
}
