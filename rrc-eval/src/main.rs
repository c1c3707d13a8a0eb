mod args;
mod config;

use anyhow::Result;
use args::Args;
use chrono::Local;
use clap::Parser;
use config::EvalConfig;
use log::{info, Level};
use rrc_core::{
    record::LogRecorder,
    Evaluator,
};
use rrc_policy_no_backend::PolicyArtifact;
use rrc_py_env::CubeTrajectoryEnvFactory;

fn show_config(config: &EvalConfig) -> Result<()> {
    println!("{}", serde_yaml::to_string(config)?);
    Ok(())
}

fn evaluate(config: &EvalConfig) -> Result<()> {
    info!("{}", Local::now().format("%a %b %e %H:%M:%S %Y"));
    info!("Using the model: {}", config.model_path);

    let factory = CubeTrajectoryEnvFactory::new(config.env.clone(), config.seed);
    let evaluator = Evaluator::new(config.evaluator.clone());
    let normalizer = evaluator.normalizer();
    let mut recorder = LogRecorder::new(Level::Info);

    evaluator.evaluate(
        &factory,
        |params| PolicyArtifact::load(&config.model_path)?.into_adapter(params, normalizer),
        &mut recorder,
    )?;

    Ok(())
}

fn main() -> Result<()> {
    // Progress goes to stdout.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();

    let args = Args::parse();
    let config = EvalConfig::from_args(&args)?;

    if args.show_config {
        show_config(&config)
    } else {
        evaluate(&config)
    }
}
