//! Hysteresis demo: segmenting a synthetic radiograph
//!
//! Builds a 24x48 image with:
//! - Dark background (value 10)
//! - A bright blob with a hot core (core 220, halo 120)
//! - A halo-only blob with no hot core (value 120)
//! - Isolated hot pixels (value 230)
//!
//! Then compares a single threshold with the hysteresis threshold and prints
//! both label images as ASCII. The halo-only blob is dropped by hysteresis
//! because it never reaches the upper level.
//!
//! Run:
//!   cargo run -p tomoseg-algorithms --example hysteresis_demo

use tomoseg_algorithms::segmentation::{
    hysteresis, threshold, Comparison, HysteresisParams, Polarity, ThresholdParams,
};
use tomoseg_core::{Connectivity, Result, Volume};

const ROWS: usize = 24;
const COLS: usize = 48;

fn synthetic_image() -> Result<Volume<f32>> {
    let mut image = Volume::filled(&[ROWS, COLS], 10.0f32)?;
    for r in 0..ROWS {
        for c in 0..COLS {
            let d1 = (r as f32 - 8.0).powi(2) + ((c as f32 - 12.0) / 1.5).powi(2);
            let d2 = (r as f32 - 15.0).powi(2) + ((c as f32 - 34.0) / 1.5).powi(2);
            if d1 < 4.0 {
                image.set(&[r, c], 220.0)?;
            } else if d1 < 30.0 || d2 < 25.0 {
                image.set(&[r, c], 120.0)?;
            }
        }
    }
    for &(r, c) in &[(2, 40), (20, 5), (21, 44)] {
        image.set(&[r, c], 230.0)?;
    }
    Ok(image)
}

fn print_labels(title: &str, labels: &Volume<bool>) {
    println!("{} ({} voxels)", title, labels.count_true());
    for row in labels.as_slice().chunks(COLS) {
        let line: String = row.iter().map(|&v| if v { '#' } else { '.' }).collect();
        println!("  {}", line);
    }
    println!();
}

fn main() -> Result<()> {
    let image = synthetic_image()?;

    let single = threshold(
        &image,
        &ThresholdParams {
            level: 100.0,
            comparison: Comparison::Greater,
        },
        None,
    )?;
    print_labels("Single threshold > 100", &single);

    let params = HysteresisParams {
        lo: 100.0,
        hi: 200.0,
        polarity: Polarity::Greater,
        connectivity: Some(Connectivity::Conn8),
    };
    let double = hysteresis(&image, &params, None)?;
    print_labels("Hysteresis lo=100 hi=200", &double);

    Ok(())
}
