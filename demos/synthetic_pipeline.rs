use ndarray::Array2;
use ndarray_rand::RandomExt;
use ndarray_rand::rand::rngs::StdRng;
use ndarray_rand::rand::{Rng, SeedableRng};
use ndarray_rand::rand_distr::Normal;
use tabfit::{CleaningStrategy, Column, Table, concat, run_branches};

// Three monthly extracts of y = 1.5*x0 - 2*x1 + 4 + noise, with gaps punched
// into x1 and a sparse x2 that `drop` should discard.
fn monthly_extract(rng: &mut StdRng, rows: usize) -> Result<Table, Box<dyn std::error::Error>> {
    let x = Array2::random_using((rows, 3), Normal::new(0.0, 1.0)?, rng);
    let noise = Normal::new(0.0, 0.1)?;

    let mut y = Vec::with_capacity(rows);
    let mut x0 = Vec::with_capacity(rows);
    let mut x1 = Vec::with_capacity(rows);
    let mut x2 = Vec::with_capacity(rows);
    for i in 0..rows {
        let eps: f64 = rng.sample(noise);
        y.push(Some(1.5 * x[(i, 0)] - 2.0 * x[(i, 1)] + 4.0 + eps));
        x0.push(Some(x[(i, 0)]));
        x1.push((!rng.gen_bool(0.05)).then_some(x[(i, 1)]));
        x2.push(rng.gen_bool(0.4).then_some(x[(i, 2)]));
    }

    Ok(Table::new(vec![
        Column::numeric("y", y),
        Column::numeric("x0", x0),
        Column::numeric("x1", x1),
        Column::numeric("x2", x2),
    ])?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Synthetic Pipeline Example ===\n");

    let mut rng = StdRng::seed_from_u64(42);
    let tables = (0..3)
        .map(|_| monthly_extract(&mut rng, 40))
        .collect::<Result<Vec<_>, _>>()?;

    let stacked = concat(&tables)?;
    println!("{}\n", stacked.summary().preview);
    for column in stacked.columns() {
        println!(
            "{}: {:.1}% missing",
            column.name,
            100.0 * column.missing_fraction()
        );
    }

    println!();
    for result in run_branches(&stacked, &CleaningStrategy::ALL, 0.2) {
        match result {
            Ok(branch) => {
                println!("[{}] columns: {:?}", branch.strategy, branch.cleaned.column_names());
                println!("  coefficients: {:?}", branch.model.coefficients.to_vec());
                println!("  intercept: {:.4}", branch.model.intercept);
                println!("  adjusted R2: {:.3}", branch.quality.adjusted_r2);
            }
            Err(e) => println!("branch failed: {}", e),
        }
    }

    Ok(())
}
