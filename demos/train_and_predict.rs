//! Train a small three-class linear SVM and classify a few held-out points.
//!
//! Run with `RUST_LOG=info cargo run --example train_and_predict` to see the
//! per-epoch loss progress.

use anyhow::Result;

use multiclass_svm::config::SvmConfig;
use multiclass_svm::math::Array2;
use multiclass_svm::models::LinearSvm;

fn main() -> Result<()> {
    env_logger::init();

    // Three loose clusters in 2D.
    let x = Array2::from_shape_vec(
        (9, 2),
        vec![
            2.0, 0.1, //
            1.8, -0.2, //
            2.2, 0.0, //
            -1.9, 1.8, //
            -2.1, 2.2, //
            -1.8, 2.0, //
            0.1, -2.0, //
            -0.2, -1.9, //
            0.0, -2.2, //
        ],
    )?;
    let y = [
        "east", "east", "east", "northwest", "northwest", "northwest", "south", "south", "south",
    ];

    let config = SvmConfig::new(0.05, 0.001, 1e-8, 500);
    let class_names = vec![
        "east".to_string(),
        "northwest".to_string(),
        "south".to_string(),
    ];
    let mut clf = LinearSvm::new(class_names, 2, config)?;

    let report = clf.train(&x, &y)?;
    println!(
        "trained for {} epochs (converged: {}, final loss: {:.6})",
        report.epochs_run, report.converged, report.final_loss
    );

    let probes = Array2::from_shape_vec((3, 2), vec![2.5, 0.0, -2.0, 2.0, 0.2, -2.4])?;
    for (row, label) in clf.predict_batch(&probes)?.iter().enumerate() {
        println!("{:?} -> {}", probes.row_slice(row), label);
    }

    Ok(())
}
