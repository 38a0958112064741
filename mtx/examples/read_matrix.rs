//! Read a .mtx file and compare sequential and parallel parsing

use mtx::{read_triplet_file, Options, TripletMatrix};
use std::time::Instant;

fn main() -> mtx::Result<()> {
    env_logger::init();

    let filename = std::env::args().nth(1).unwrap_or_else(|| "example_matrix.mtx".to_string());
    if !std::path::Path::new(&filename).exists() {
        println!("File '{filename}' not found!");
        println!("   Run 'cargo run --example write_matrix' first");
        return Ok(());
    }

    println!("Reading sparse matrix from '{filename}'...");

    let start = Instant::now();
    let (header, sequential): (_, TripletMatrix<u64, f64>) = read_triplet_file(&filename, &Options::sequential())?;
    println!("Sequential read: {:?}", start.elapsed());

    let options = Options::default();
    let start = Instant::now();
    let (_, parallel): (_, TripletMatrix<u64, f64>) = read_triplet_file(&filename, &options)?;
    println!("Parallel read ({} workers): {:?}", options.worker_count, start.elapsed());

    println!("\nMatrix Information:");
    println!("   Banner: {} {} {} {}", header.object, header.format, header.field, header.symmetry);
    println!("   Dimensions: {} x {}", header.nrows, header.ncols);
    println!("   Stored entries: {}", parallel.len());
    println!("   Identical results: {}", sequential == parallel);

    for (row, col, val) in parallel.iter().take(5) {
        println!("   matrix[{row}, {col}] = {val}");
    }
    Ok(())
}
