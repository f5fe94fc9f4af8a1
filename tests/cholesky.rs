#![allow(non_snake_case)]

use symfact::{algebra::*, symbolic::*};

fn cholesky(A: &CsrMatrix<f64>, P: &Permutation, fill_ratio: f64) -> FactorPattern {
    factor_symbolic(&A.pattern(), P, P, fill_ratio, FactorVariant::Cholesky).unwrap()
}

fn band(n: usize, w: usize) -> CsrMatrix<f64> {
    let mut rowptr = vec![0];
    let mut colval = vec![];
    for i in 0..n {
        colval.extend(i.saturating_sub(w)..(i + w + 1).min(n));
        rowptr.push(colval.len());
    }
    CsrMatrix::from_pattern(n, n, rowptr, colval)
}

#[test]
fn test_band_has_no_fill() {
    let A = band(10, 2);
    let I = Permutation::identity(10);
    let F = cholesky(&A, &I, 1.0);

    assert_eq!(F.nnz(), A.pattern().upper_nnz());
    assert_eq!(F.info.reallocs, 0);
    for i in 0..10 {
        let expected: Vec<usize> = (i..(i + 3).min(10)).collect();
        assert_eq!(F.row(i), expected);
    }
}

#[test]
fn test_diagonal_stored_last() {
    let A = band(8, 1);
    let P = Permutation::new(vec![0, 7, 1, 6, 2, 5, 3, 4]).unwrap();
    let F = cholesky(&A, &P, 2.0);

    let FactorStorage::Cholesky {
        rowptr,
        colval,
        diag,
    } = &F.storage
    else {
        panic!("expected Cholesky storage");
    };
    for i in 0..8 {
        assert_eq!(diag[i], rowptr[i + 1] - 1);
        assert_eq!(colval[diag[i]], i);
        let upper = &colval[rowptr[i]..diag[i]];
        assert!(upper.windows(2).all(|w| w[0] < w[1]));
        assert!(upper.iter().all(|&j| j > i));
        assert_eq!(F.upper(i), upper);
    }
}

#[test]
fn test_only_upper_triangle_is_read() {
    // the lower triangle disagrees with the upper one and is ignored
    let U = CsrMatrix::<f64>::from(&[
        [1., 1., 0., 1.], //
        [0., 1., 1., 0.], //
        [0., 0., 1., 0.], //
        [0., 0., 0., 1.], //
    ]);
    let A = CsrMatrix::<f64>::from(&[
        [1., 1., 0., 1.], //
        [1., 1., 1., 0.], //
        [1., 0., 1., 0.], //
        [0., 1., 1., 1.], //
    ]);
    let I = Permutation::identity(4);

    let FU = cholesky(&U, &I, 5.0);
    let FA = cholesky(&A, &I, 5.0);
    assert_eq!(FU.storage, FA.storage);
    assert_eq!(FA.info.nnz_original, 7);

    // row 1 picks up column 3 from row 0 and passes it on to row 2
    assert_eq!(FU.row(1), vec![1, 2, 3]);
    assert_eq!(FU.row(2), vec![2, 3]);
}

#[test]
fn test_matches_lu_upper_part() {
    let A = band(12, 2);
    let P = Permutation::new((0..12).map(|i| (i * 5) % 12).collect()).unwrap();

    let chol = cholesky(&A, &P, 1.0);
    let lu = factor_symbolic(&A.pattern(), &P, &P, 1.0, FactorVariant::Lu).unwrap();
    for i in 0..12 {
        assert_eq!(chol.upper(i), lu.upper(i));
        assert!(chol.lower(i).is_empty());
    }
}

#[test]
fn test_requires_matching_orders() {
    let A = band(4, 1);
    let P = Permutation::new(vec![1, 0, 2, 3]).unwrap();
    let I = Permutation::identity(4);

    let err = factor_symbolic(&A.pattern(), &P, &I, 5.0, FactorVariant::Cholesky).unwrap_err();
    assert_eq!(
        err,
        SymbolicError::Structural(StructuralError::AsymmetricPermutation)
    );
}
