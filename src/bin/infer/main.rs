mod args;

use std::error::Error;

use args::Args;
use clap::Parser;
use digit_net::{data, evaluate, Network};
use log::LevelFilter;
use simplelog::{Config, SimpleLogger};

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    SimpleLogger::init(LevelFilter::Info, Config::default())?;

    let examples = data::load(args.split, &args.data_dir)?;
    log::info!("Dataset loaded ({} items)", examples.len());

    let network = Network::load_json(&args.model)?;
    log::info!("Loaded network {:?} from {}", network.sizes(), args.model.display());

    let correct = evaluate(&network, &examples)?;
    println!("Results: {}/{}", correct, examples.len());

    Ok(())
}
