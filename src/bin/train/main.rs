mod args;

use std::error::Error;
use std::fs::{self, File};
use std::io::BufWriter;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use args::Args;
use clap::Parser;
use digit_net::data::{self, mnist::NUM_CLASSES};
use digit_net::{sgd, InitScheme, Network, Split, TrainConfig, TrainingParameters};
use log::LevelFilter;
use rand::rngs::StdRng;
use rand::SeedableRng;
use simplelog::{Config, SimpleLogger};

fn main() -> Result<(), Box<dyn Error>> {
    let args = init()?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut examples = data::load(Split::Train, &args.data_dir)?;
    log::info!("Dataset loaded ({} items)", examples.len());

    let split = args.train_size.min(examples.len());
    let held_out = examples.split_off(split);
    let mut training = examples;
    let evaluation = if args.no_test { None } else { Some(held_out.as_slice()) };

    let input_size = training
        .first()
        .map(|ex| ex.input.len())
        .ok_or("training split is empty")?;
    let mut sizes = vec![input_size];
    sizes.extend(&args.hidden);
    sizes.push(NUM_CLASSES);

    let init = if args.unscaled_init { InitScheme::Standard } else { InitScheme::Scaled };
    let mut network = Network::new(&sizes, init, &mut rng)?;
    log::info!("Created network {:?}", network.sizes());

    let params = TrainingParameters {
        epochs: args.epochs,
        batch_size: args.batch_size,
        learning_rate: args.learning_rate,
        lambda: args.lambda,
        cost: args.cost,
        improvement_patience: args.patience,
    };
    let mut config = TrainConfig::new(params);

    let stop_flag = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&stop_flag);
    ctrlc::set_handler(move || {
        log::warn!("Interrupt received, stopping after the current epoch");
        handler_flag.store(true, Ordering::Relaxed);
    })?;
    config.stop_flag = Some(stop_flag);

    log::info!("Training network");
    let report = sgd(&mut network, &mut training, evaluation, &config, &mut rng)?;
    log::info!(
        "Training finished after {} epochs ({:?})",
        report.epochs_run, report.stop_reason
    );

    if let Some(path) = &args.profile {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &report.history)?;
        log::info!("Epoch timings written to {}", path.display());
    }

    if let Some(dir) = args.model.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    network.save_json(&args.model)?;
    log::info!("Model saved to {}", args.model.display());

    Ok(())
}

fn init() -> Result<Args, Box<dyn Error>> {
    let args = Args::parse();
    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    SimpleLogger::init(level, Config::default())?;

    Ok(args)
}
