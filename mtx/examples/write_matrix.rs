//! Write a generated sparse matrix to a .mtx file with sequential and parallel drivers

use mtx::{write_triplet_file, MatrixMarketHeader, Options, TripletMatrix};
use std::time::Instant;

fn main() -> mtx::Result<()> {
    env_logger::init();

    let nrows = 1_000_000u64;
    let ncols = 200_000u64;
    let sparse_rows = [10u32, 50, 100, 500, 900, 5000, 50000, 90000];
    let elements_per_row = 250_000u32;

    println!("Matrix dimensions: {nrows} x {ncols}");
    println!("Total non-zeros: {}", sparse_rows.len() as u32 * elements_per_row);

    let start = Instant::now();
    let matrix = build_demo_matrix(nrows, ncols, &sparse_rows, elements_per_row);
    println!("Built matrix in {:?}", start.elapsed());

    let mut header = MatrixMarketHeader::default();
    header.comment = "generated by the write_matrix example".into();

    let start = Instant::now();
    write_triplet_file("example_matrix.mtx", &header, &matrix, &Options::sequential())?;
    println!("Sequential write: {:?}", start.elapsed());

    let options = Options::default();
    let start = Instant::now();
    write_triplet_file("example_matrix.mtx", &header, &matrix, &options)?;
    println!("Parallel write ({} workers): {:?}", options.worker_count, start.elapsed());

    println!("\nRun 'cargo run --example read_matrix' to read it back!");
    Ok(())
}

fn build_demo_matrix(nrows: u64, ncols: u64, sparse_rows: &[u32], elements_per_row: u32) -> TripletMatrix<u32, f64> {
    let capacity = sparse_rows.len() * elements_per_row as usize;
    let mut matrix = TripletMatrix::with_capacity(nrows, ncols, capacity);

    for &row in sparse_rows {
        for col in 0..elements_per_row.min(ncols as u32) {
            matrix.push(row, col, f64::from(row) + f64::from(col) * 0.1);
        }
    }
    matrix
}
