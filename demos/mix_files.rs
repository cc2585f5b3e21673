use std::env;
use std::path::PathBuf;
use std::time::Instant;

use soundprep_rs::{PrepConfig, SignalLoader};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        eprintln!(
            "Usage: {} <first> <second> <output.wav> [config.json]",
            args[0]
        );
        std::process::exit(1);
    }

    let first = PathBuf::from(&args[1]);
    let second = PathBuf::from(&args[2]);
    let output = PathBuf::from(&args[3]);

    let config = match args.get(4) {
        Some(path) => PrepConfig::from_path(path)?,
        None => PrepConfig::default(),
    };
    println!("Using config: {:?}", config);

    let loader = SignalLoader::with_options(config.load.clone());

    let start = Instant::now();
    let combined = loader.combine_files(&first, &second, &config.combine)?;
    println!(
        "Combined {:?} + {:?} in {:.2?}",
        first,
        second,
        start.elapsed()
    );
    println!(
        "Result: {} samples, {:.2}s at {} Hz",
        combined.len(),
        combined.duration_secs(),
        combined.sample_rate()
    );

    let overlaid = loader.add_sound_file(&first, &second, &config.overlay)?;
    println!(
        "Overlay of {:?} on {:?}: {:.2}s",
        second,
        first,
        overlaid.duration_secs()
    );

    loader.save(&output, &combined, config.save_subtype)?;
    println!("Saved {:?}", output);

    Ok(())
}
