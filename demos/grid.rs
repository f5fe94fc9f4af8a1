#![allow(non_snake_case)]

use symfact::algebra::*;
use symfact::symbolic::*;

// 5 point Laplacian on a k x k grid
fn grid_laplacian(k: usize) -> CsrMatrix<f64> {
    let n = k * k;
    let mut rowptr = vec![0];
    let mut colval = vec![];
    for r in 0..k {
        for c in 0..k {
            let i = r * k + c;
            if r > 0 {
                colval.push(i - k);
            }
            if c > 0 {
                colval.push(i - 1);
            }
            colval.push(i);
            if c + 1 < k {
                colval.push(i + 1);
            }
            if r + 1 < k {
                colval.push(i + k);
            }
            rowptr.push(colval.len());
        }
    }
    CsrMatrix::from_pattern(n, n, rowptr, colval)
}

fn main() {
    let A = grid_laplacian(30);

    let settings = SymbolicSettingsBuilder::default()
        .fill_ratio(2.0)
        .verbose(true)
        .build()
        .unwrap();
    let mut factorizer = SymbolicFactorizer::new(settings).unwrap();

    // natural order first, then a fill reducing one
    let I = Permutation::identity(A.m);
    let natural = factorizer.factor(&A.pattern(), &I, &I).unwrap();

    let P = factorizer.amd_ordering(&A.pattern()).unwrap();
    let amd = factorizer.factor(&A.pattern(), &P, &P).unwrap();

    println!();
    println!("nnz(natural) = {}", natural.nnz());
    println!("nnz(amd)     = {}", amd.nnz());
}
