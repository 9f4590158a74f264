use std::path::PathBuf;
use tabfit::io::{RunArtifacts, read_spreadsheets};
use tabfit::{CleaningStrategy, DEFAULT_MISSING_THRESHOLD, concat, discover_inputs, run_branch};

// Usage: cargo run --example fit_spreadsheets -- <dir> [out]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let dir = PathBuf::from(args.next().unwrap_or_else(|| "data/raw".to_string()));
    let out = PathBuf::from(args.next().unwrap_or_else(|| "out".to_string()));

    let inputs = discover_inputs(&dir, "xlsx", true)?;
    println!("Found {} spreadsheet(s) in {}", inputs.len(), dir.display());

    let stacked = concat(&read_spreadsheets(&inputs)?)?;
    println!("Stacked shape: {:?}\n", stacked.shape());

    let artifacts = RunArtifacts::new(out);
    for strategy in CleaningStrategy::ALL {
        let branch = run_branch(&stacked, strategy, DEFAULT_MISSING_THRESHOLD)?;
        let path = artifacts.model_path(strategy);
        tabfit::io::write_model(&path, &branch.model)?;
        println!(
            "{}: adjusted R2 {:.3}, model written to {}",
            strategy,
            branch.quality.adjusted_r2,
            path.display()
        );
    }

    Ok(())
}
