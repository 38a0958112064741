//! End-to-end read and write tests
//!
//! Covers round-trips for every value kind, byte-identical output across
//! worker counts, symmetry expansion, the pattern and complex adapters,
//! dense array bodies and the error paths of a whole read call.

use mtx::{
    read_array, read_triplet, write_array, write_csc, write_triplet, CscParts, DenseMatrix, Error, FieldType,
    FormatType, MatrixElement, MatrixMarketHeader, Options, SymmetryType, TripletMatrix,
};
use num_complex::Complex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn options(workers: usize, chunk_size_bytes: usize) -> Options {
    Options::default()
        .with_parallel(true)
        .with_worker_count(workers)
        .with_chunk_size_bytes(chunk_size_bytes)
}

fn random_matrix<V: MatrixElement>(seed: u64, nnz: usize, value: impl Fn(&mut StdRng) -> V) -> TripletMatrix<u32, V> {
    let mut rng = StdRng::seed_from_u64(seed);
    let (nrows, ncols) = (rng.gen_range(1..500u64), rng.gen_range(1..500u64));
    let mut matrix = TripletMatrix::with_capacity(nrows, ncols, nnz);
    for _ in 0..nnz {
        let row = rng.gen_range(0..nrows) as u32;
        let col = rng.gen_range(0..ncols) as u32;
        let val = value(&mut rng);
        matrix.push(row, col, val);
    }
    matrix
}

fn write_to_vec<V: MatrixElement>(matrix: &TripletMatrix<u32, V>, options: &Options) -> Vec<u8> {
    let mut bytes = Vec::new();
    write_triplet(&mut bytes, &MatrixMarketHeader::default(), matrix, options).unwrap();
    bytes
}

fn read_from_slice<V: MatrixElement>(bytes: &[u8], options: &Options) -> mtx::Result<TripletMatrix<u32, V>> {
    read_triplet::<u32, V, _>(bytes, options).map(|(_, matrix)| matrix)
}

#[test]
fn test_three_by_three_scenario() {
    let mut matrix = TripletMatrix::<u32, f64>::new(3, 3);
    matrix.push(0, 0, 1.5);
    matrix.push(1, 2, -2.0);
    matrix.push(2, 1, 3.0);

    let parallel = write_to_vec(&matrix, &options(4, 1));
    let sequential = write_to_vec(&matrix, &options(1, 1));
    assert_eq!(parallel, sequential);

    let text = String::from_utf8(parallel).unwrap();
    let body: Vec<&str> = text.lines().skip(2).collect();
    assert_eq!(body, vec!["1 1 1.5", "2 3 -2", "3 2 3"]);
    assert!(text.starts_with("%%MatrixMarket matrix coordinate real general\n3 3 3\n"));
}

#[test]
fn test_roundtrip_every_value_kind() {
    let opts = options(4, 256);

    let ints = random_matrix(1, 2_000, |rng| rng.gen::<i64>());
    assert_eq!(read_from_slice::<i64>(&write_to_vec(&ints, &opts), &opts).unwrap(), ints);

    let small_ints = random_matrix(2, 2_000, |rng| rng.gen::<i32>());
    assert_eq!(read_from_slice::<i32>(&write_to_vec(&small_ints, &opts), &opts).unwrap(), small_ints);

    let reals = random_matrix(3, 2_000, |rng| {
        let mantissa: f64 = rng.gen_range(-1.0..1.0);
        mantissa * 10f64.powi(rng.gen_range(-300..300))
    });
    assert_eq!(read_from_slice::<f64>(&write_to_vec(&reals, &opts), &opts).unwrap(), reals);

    let singles = random_matrix(4, 2_000, |rng| rng.gen::<f32>() - 0.5);
    assert_eq!(read_from_slice::<f32>(&write_to_vec(&singles, &opts), &opts).unwrap(), singles);

    let complex = random_matrix(5, 2_000, |rng| Complex::new(rng.gen::<f64>(), -rng.gen::<f64>()));
    assert_eq!(
        read_from_slice::<Complex<f64>>(&write_to_vec(&complex, &opts), &opts).unwrap(),
        complex
    );
}

#[test]
fn test_empty_matrix_roundtrip() {
    let matrix = TripletMatrix::<u32, f64>::new(7, 2);
    let bytes = write_to_vec(&matrix, &options(4, 64));
    assert_eq!(bytes, b"%%MatrixMarket matrix coordinate real general\n7 2 0\n");
    assert_eq!(read_from_slice::<f64>(&bytes, &options(4, 64)).unwrap(), matrix);
}

#[test]
fn test_sequential_and_parallel_write_are_identical() {
    let matrix = random_matrix(6, 5_000, |rng| rng.gen::<f64>());
    for chunk_size in [1, 100, 4096, 1 << 20] {
        let expected = write_to_vec(&matrix, &Options::sequential().with_chunk_size_bytes(chunk_size));
        for workers in 1..=8 {
            assert_eq!(
                write_to_vec(&matrix, &options(workers, chunk_size)),
                expected,
                "workers {workers}, chunk size {chunk_size}"
            );
        }
    }
}

#[test]
fn test_sequential_and_parallel_read_are_identical() {
    let matrix = random_matrix(7, 5_000, |rng| rng.gen_range(-1000..1000i64));
    let bytes = write_to_vec(&matrix, &Options::sequential());
    for chunk_size in [1, 33, 4096] {
        let expected = read_from_slice::<i64>(&bytes, &Options::sequential().with_chunk_size_bytes(chunk_size)).unwrap();
        assert_eq!(expected, matrix);
        for workers in [2, 3, 8] {
            assert_eq!(read_from_slice::<i64>(&bytes, &options(workers, chunk_size)).unwrap(), expected);
        }
    }
}

#[test]
fn test_malformed_line_reports_offset() {
    let text = "%%MatrixMarket matrix coordinate real general\n3 3 3\n1 1 1.0\n1 2 notanumber\n3 3 2.0\n";
    let bad_offset = text.find("1 2 notanumber").unwrap() as u64;

    for opts in [Options::sequential(), options(4, 1), options(4, 8)] {
        match read_triplet::<u32, f64, _>(text.as_bytes(), &opts) {
            Err(Error::Parse {
                offset, line, content, ..
            }) => {
                assert_eq!(offset, bad_offset);
                assert_eq!(line, 4);
                assert_eq!(content, "1 2 notanumber");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}

#[test]
fn test_first_error_in_input_order_wins_sequentially() {
    let text = "%%MatrixMarket matrix coordinate integer general\n3 3 3\n1 1 x\n9 9 1\n1 1 1\n";
    let err = read_triplet::<u32, i64, _>(text.as_bytes(), &Options::sequential()).unwrap_err();
    assert_eq!(err.offset(), Some(text.find("1 1 x").unwrap() as u64));
}

#[test]
fn test_entry_count_mismatch() {
    let truncated = "%%MatrixMarket matrix coordinate real general\n3 3 3\n1 1 1\n2 2 2\n";
    for opts in [Options::sequential(), options(4, 1)] {
        let err = read_triplet::<u32, f64, _>(truncated.as_bytes(), &opts).unwrap_err();
        assert!(matches!(err, Error::Truncated { expected: 3, found: 2 }));
    }

    let extra = "%%MatrixMarket matrix coordinate real general\n3 3 1\n1 1 1\n2 2 2\n";
    for opts in [Options::sequential(), options(4, 1)] {
        let err = read_triplet::<u32, f64, _>(extra.as_bytes(), &opts).unwrap_err();
        assert!(matches!(err, Error::TooManyEntries { expected: 1 }));
    }
}

#[test]
fn test_symmetric_file_is_generalized() {
    let text = "%%MatrixMarket matrix coordinate real symmetric\n3 3 3\n1 1 1\n2 1 2\n3 2 3\n";
    let (header, matrix) = read_triplet::<u32, f64, _>(text.as_bytes(), &options(4, 1)).unwrap();
    assert_eq!(header.symmetry, SymmetryType::General);
    assert_eq!(matrix.rows(), &[0, 1, 0, 2, 1]);
    assert_eq!(matrix.cols(), &[0, 0, 1, 1, 2]);
    assert_eq!(matrix.vals(), &[1.0, 2.0, 2.0, 3.0, 3.0]);

    let opts = Options::sequential().with_generalize_symmetry(false);
    let (header, matrix) = read_triplet::<u32, f64, _>(text.as_bytes(), &opts).unwrap();
    assert_eq!(header.symmetry, SymmetryType::Symmetric);
    assert_eq!(matrix.len(), 3);
}

#[test]
fn test_skew_symmetric_and_hermitian() {
    let skew = "%%MatrixMarket matrix coordinate integer skew-symmetric\n2 2 1\n2 1 5\n";
    let (_, matrix) = read_triplet::<u32, i32, _>(skew.as_bytes(), &Options::default()).unwrap();
    assert_eq!(matrix.vals(), &[5, -5]);

    let herm = "%%MatrixMarket matrix coordinate complex hermitian\n2 2 2\n1 1 2 0\n2 1 1 3\n";
    let (_, matrix) = read_triplet::<u32, Complex<f32>, _>(herm.as_bytes(), &Options::default()).unwrap();
    assert_eq!(
        matrix.vals(),
        &[Complex::new(2.0, 0.0), Complex::new(1.0, 3.0), Complex::new(1.0, -3.0)]
    );
}

#[test]
fn test_pattern_and_complex_adapters() {
    let pattern = "%%MatrixMarket matrix coordinate pattern general\n2 2 2\n1 2\n2 1\n";
    let (header, matrix) = read_triplet::<u32, f64, _>(pattern.as_bytes(), &Options::default()).unwrap();
    assert_eq!(header.field, FieldType::Pattern);
    assert_eq!(matrix.vals(), &[1.0, 1.0]);

    let real = "%%MatrixMarket matrix coordinate real general\n2 2 1\n1 2 -0.25\n";
    let (_, matrix) = read_triplet::<u32, Complex<f64>, _>(real.as_bytes(), &Options::default()).unwrap();
    assert_eq!(matrix.vals(), &[Complex::new(-0.25, 0.0)]);

    let complex = "%%MatrixMarket matrix coordinate complex general\n2 2 1\n1 2 1 1\n";
    let err = read_triplet::<u32, f64, _>(complex.as_bytes(), &Options::default()).unwrap_err();
    assert!(matches!(err, Error::ComplexIncompatible));
}

#[test]
fn test_vector_and_array_headers() {
    let vector = "%%MatrixMarket vector coordinate real general\n5 2\n2 0.5\n5 1.5\n";
    let (header, matrix) = read_triplet::<u32, f64, _>(vector.as_bytes(), &Options::default()).unwrap();
    assert_eq!((header.nrows, header.ncols, header.vector_length), (5, 1, 5));
    assert_eq!(matrix.rows(), &[1, 4]);
    assert_eq!(matrix.cols(), &[0, 0]);

    let array = "%%MatrixMarket matrix array real general\n2 2\n1\n2\n3\n4\n";
    let (header, matrix) = read_triplet::<u32, f64, _>(array.as_bytes(), &Options::default()).unwrap();
    assert_eq!(header.format, FormatType::Array);
    assert_eq!(matrix.rows(), &[0, 1, 0, 1]);
    assert_eq!(matrix.cols(), &[0, 0, 1, 1]);
    assert_eq!(matrix.vals(), &[1.0, 2.0, 3.0, 4.0]);

    let pattern = "%%MatrixMarket matrix array pattern general\n1 1\n\n";
    let err = read_triplet::<u32, f64, _>(pattern.as_bytes(), &Options::default()).unwrap_err();
    assert!(matches!(err, Error::NotImplemented(_)));
}

#[test]
fn test_csc_writer_matches_triplet_writer() {
    // column-major entries of a 4x3 matrix
    let col_ptr = [0u32, 2, 2, 5];
    let row_ind = [0u32, 3, 0, 1, 2];
    let vals = [1.0f64, 2.0, 3.0, 4.0, 5.0];

    let mut triplet = TripletMatrix::<u32, f64>::new(4, 3);
    for (col, bounds) in col_ptr.windows(2).enumerate() {
        for k in bounds[0] as usize..bounds[1] as usize {
            triplet.push(row_ind[k], col as u32, vals[k]);
        }
    }

    let opts = options(3, 1);
    let parts = CscParts::new(4, 3, &col_ptr, &row_ind, &vals).unwrap();
    let mut csc_text = Vec::new();
    write_csc(&mut csc_text, &MatrixMarketHeader::default(), parts, false, &opts).unwrap();
    assert_eq!(csc_text, write_to_vec(&triplet, &opts));

    let mut transposed = Vec::new();
    write_csc(&mut transposed, &MatrixMarketHeader::default(), parts, true, &opts).unwrap();
    let (header, back) = read_triplet::<u32, f64, _>(transposed.as_slice(), &opts).unwrap();
    assert_eq!((header.nrows, header.ncols), (3, 4));
    assert_eq!(back.rows(), triplet.cols());
    assert_eq!(back.cols(), triplet.rows());
}

#[test]
fn test_huge_knobs_are_clamped() {
    let matrix = random_matrix(8, 500, |rng| rng.gen::<f64>());
    let expected = write_to_vec(&matrix, &Options::sequential());

    for chunk_size in [usize::MAX, usize::MAX / 2, 1 << 40] {
        for opts in [
            Options::sequential().with_chunk_size_bytes(chunk_size),
            options(4, chunk_size),
        ] {
            assert_eq!(write_to_vec(&matrix, &opts), expected);
            assert_eq!(read_from_slice::<f64>(&expected, &opts).unwrap(), matrix);
        }
    }

    let many_workers = options(usize::MAX, 64);
    assert_eq!(write_to_vec(&matrix, &many_workers), expected);
    assert_eq!(read_from_slice::<f64>(&expected, &many_workers).unwrap(), matrix);
}

fn random_dense(seed: u64, nrows: u64, ncols: u64) -> DenseMatrix<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let values = (0..nrows * ncols).map(|_| rng.gen::<f64>() - 0.5).collect();
    DenseMatrix::from_column_major(nrows, ncols, values).unwrap()
}

fn write_dense<V: MatrixElement>(matrix: &DenseMatrix<V>, options: &Options) -> Vec<u8> {
    let mut bytes = Vec::new();
    write_array(&mut bytes, &MatrixMarketHeader::default(), matrix, options).unwrap();
    bytes
}

#[test]
fn test_array_scenario() {
    let dense = DenseMatrix::from_column_major(2, 2, vec![1i64, 2, 3, 4]).unwrap();
    let bytes = write_dense(&dense, &options(4, 1));
    assert_eq!(bytes, b"%%MatrixMarket matrix array integer general\n2 2\n1\n2\n3\n4\n");

    let (header, back) = read_array::<i64, _>(bytes.as_slice(), &options(4, 1)).unwrap();
    assert_eq!((header.nrows, header.ncols, header.nnz), (2, 2, 4));
    assert_eq!(back, dense);

    let coordinate = "%%MatrixMarket matrix coordinate integer general\n2 2 2\n1 2 5\n2 1 -1\n";
    let (_, dense) = read_array::<i64, _>(coordinate.as_bytes(), &Options::default()).unwrap();
    assert_eq!(dense.values(), &[0, -1, 5, 0]);
}

#[test]
fn test_array_sequential_and_parallel_are_identical() {
    let dense = random_dense(9, 37, 23);
    let expected = write_dense(&dense, &Options::sequential());

    for chunk_size in [1, 50, 4096] {
        for workers in [1, 2, 5] {
            let opts = options(workers, chunk_size);
            assert_eq!(write_dense(&dense, &opts), expected, "workers {workers}, chunk size {chunk_size}");

            let (header, back) = read_array::<f64, _>(expected.as_slice(), &opts).unwrap();
            assert_eq!(header.format, FormatType::Array);
            assert_eq!(back, dense);
        }
    }
}

#[test]
fn test_symmetric_arrays_are_generalized() {
    let symmetric = "%%MatrixMarket matrix array real symmetric\n3 3\n1\n2\n3\n4\n5\n6\n";
    for opts in [Options::sequential(), options(4, 1)] {
        let (header, dense) = read_array::<f64, _>(symmetric.as_bytes(), &opts).unwrap();
        assert_eq!(header.nnz, 6);
        assert_eq!(header.symmetry, SymmetryType::General);
        assert_eq!(dense.values(), &[1.0, 2.0, 3.0, 2.0, 4.0, 5.0, 3.0, 5.0, 6.0]);
    }

    let skew = "%%MatrixMarket matrix array integer skew-symmetric\n3 3\n1\n2\n3\n";
    let (_, dense) = read_array::<i32, _>(skew.as_bytes(), &options(3, 1)).unwrap();
    assert_eq!(dense.values(), &[0, 1, 2, -1, 0, 3, -2, -3, 0]);
}

#[test]
fn test_array_value_count_mismatch() {
    let truncated = "%%MatrixMarket matrix array real general\n2 2\n1\n2\n3\n";
    for opts in [Options::sequential(), options(4, 1)] {
        let err = read_array::<f64, _>(truncated.as_bytes(), &opts).unwrap_err();
        assert!(matches!(err, Error::Truncated { expected: 4, found: 3 }));
    }

    let extra = "%%MatrixMarket matrix array real general\n2 1\n1\n2\n3\n";
    for opts in [Options::sequential(), options(4, 1)] {
        match read_array::<f64, _>(extra.as_bytes(), &opts) {
            Err(Error::Parse { line, reason, .. }) => {
                assert_eq!(line, 5);
                assert_eq!(reason, "Too many values in array");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}

#[cfg(feature = "mmap")]
#[test]
fn test_array_file_roundtrip() {
    let path = std::env::temp_dir().join(format!("mtx-array-{}.mtx", std::process::id()));
    let dense = random_dense(10, 5, 4);

    mtx::write_array_file(&path, &MatrixMarketHeader::default(), &dense, &options(2, 16)).unwrap();
    let (_, back) = mtx::read_array_file::<f64, _>(&path, &options(2, 16)).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(back, dense);
}
