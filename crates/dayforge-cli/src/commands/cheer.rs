use clap::Args;
use dayforge_core::{encouragement, Intensity, TaskType};
use rand::SeedableRng;
use rand_pcg::Pcg64;

#[derive(Args)]
pub struct CheerArgs {
    /// Type of the block just finished
    #[arg(long = "type", default_value = "work")]
    block_type: TaskType,
    /// Blocks completed so far today
    #[arg(long, default_value_t = 1)]
    completed: usize,
    /// Blocks planned today
    #[arg(long, default_value_t = 0)]
    total: usize,
    /// low, medium or high
    #[arg(long, default_value = "medium")]
    intensity: Intensity,
    /// Seed for a repeatable message
    #[arg(long)]
    seed: Option<u64>,
}

pub fn run(args: CheerArgs) -> Result<(), Box<dyn std::error::Error>> {
    let message = match args.seed {
        Some(seed) => {
            let mut rng = Pcg64::seed_from_u64(seed);
            encouragement(&mut rng, args.block_type, args.completed, args.total, args.intensity)
        }
        None => encouragement(
            &mut rand::thread_rng(),
            args.block_type,
            args.completed,
            args.total,
            args.intensity,
        ),
    };
    println!("{message}");
    Ok(())
}
