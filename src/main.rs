use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_dirac::{DiracModel, Progress, Result, SimulationConfig};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a simulation described by a YAML config
    Run {
        #[arg(short, long, default_value = "config.yml")]
        config: PathBuf,
    },
    /// Summarise a saved result archive
    Inspect {
        archive: PathBuf,
        /// Cell spacing used to weight the total probability
        #[arg(long, default_value_t = 1.0)]
        dx: f64,
        #[arg(long, default_value_t = 1.0)]
        dy: f64,
    },
}

fn main() -> Result<()> {
    env_logger::builder().format_timestamp_secs().init();

    match Args::parse().command {
        Command::Run { config } => run(config),
        Command::Inspect { archive, dx, dy } => inspect(archive, dx, dy),
    }
}

fn run(config: PathBuf) -> Result<()> {
    let config = SimulationConfig::from_file(config)?;
    let (dx, dy) = (config.dx, config.dy);
    let report_every = (config.time_steps / 10).max(1);

    let mut report = |p: Progress| -> Result<()> {
        if p.step % report_every == 0 || p.step == p.total {
            log::info!("step {}/{} ({:.0}%)", p.step, p.total, 100.0 * p.fraction());
        }
        Ok(())
    };

    let model = DiracModel::new(config);
    let result = model.run(Some(&mut report))?;

    let density = result.density();
    println!("Dirac Simulation Results");
    println!("----------------------------------------");
    println!("Lattice: {} x {}", result.shape().rows, result.shape().cols);
    println!("Total probability: {:.6}", result.total_probability(dx, dy));
    println!("Peak density: {:.6}", density.max());
    Ok(())
}

fn inspect(archive: PathBuf, dx: f64, dy: f64) -> Result<()> {
    let spinor = DiracModel::load(&archive)?;
    let shape = spinor.shape();
    let density = spinor.density();

    println!("Archive: {}", archive.display());
    println!("Lattice: {} x {} (periodic: {})", shape.rows, shape.cols, spinor.is_periodic());
    println!("Interpolation: {:?}", spinor.interpolation());
    println!("Total probability: {:.6}", spinor.total_probability(dx, dy));
    println!("Peak density: {:.6}", density.max());
    Ok(())
}
