#![allow(non_snake_case)]

use symfact::{algebra::*, symbolic::*};

fn arrow(n: usize) -> CsrMatrix<f64> {
    // dense first row and column plus the diagonal
    let mut rowptr = vec![0, n];
    let mut colval: Vec<usize> = (0..n).collect();
    for i in 1..n {
        colval.extend([0, i]);
        rowptr.push(colval.len());
    }
    CsrMatrix::from_pattern(n, n, rowptr, colval)
}

#[test]
fn test_diagonal_identity_order() {
    let A = CsrMatrix::<f64>::identity(3);
    let I = Permutation::identity(3);

    for variant in [FactorVariant::Plain, FactorVariant::Lu, FactorVariant::Cholesky] {
        let F = factor_symbolic(&A.pattern(), &I, &I, 5.0, variant).unwrap();
        assert_eq!(F.nnz(), 3);
        assert_eq!(F.variant, variant);
        for i in 0..3 {
            assert!(F.lower(i).is_empty());
            assert!(F.upper(i).is_empty());
            assert_eq!(F.row_nnz(i), 1);
        }
    }
}

#[test]
fn test_existing_entries_only() {
    // rows {0:[0,2], 1:[1], 2:[0,2]}
    let A = CsrMatrix::<f64>::from(&[
        [1., 0., 1.], //
        [0., 1., 0.], //
        [1., 0., 1.], //
    ]);
    let I = Permutation::identity(3);

    let lu = factor_symbolic(&A.pattern(), &I, &I, 5.0, FactorVariant::Lu).unwrap();
    assert_eq!(lu.nnz(), A.nnz());
    assert_eq!(lu.info.fill_ratio_needed, 1.0);
    assert_eq!(lu.row(0), vec![0, 2]);
    assert_eq!(lu.row(1), vec![1]);
    assert_eq!(lu.row(2), vec![0, 2]);

    let chol = factor_symbolic(&A.pattern(), &I, &I, 5.0, FactorVariant::Cholesky).unwrap();
    assert_eq!(chol.nnz(), 4);
    assert_eq!(chol.row(0), vec![0, 2]);
    assert_eq!(chol.row(2), vec![2]);
    for i in 0..3 {
        let FactorStorage::Cholesky { colval, .. } = &chol.storage else {
            panic!("expected Cholesky storage");
        };
        assert_eq!(colval[chol.diag_offset(i)], i);
    }
}

#[test]
fn test_empty_row_is_structural() {
    let A = CsrMatrix::<f64>::from_pattern(3, 3, vec![0, 2, 2, 3], vec![0, 2, 2]);
    let I = Permutation::identity(3);

    for variant in [FactorVariant::Plain, FactorVariant::Lu, FactorVariant::Cholesky] {
        let result = factor_symbolic(&A.pattern(), &I, &I, 5.0, variant);
        assert!(matches!(
            result,
            Err(SymbolicError::Structural(StructuralError::EmptyRow { row: 1, .. }))
        ));
    }
}

#[test]
fn test_tight_fill_ratio_reallocates() {
    let A = arrow(8);
    let I = Permutation::identity(8);

    let F = factor_symbolic(&A.pattern(), &I, &I, 1.0, FactorVariant::Lu).unwrap();
    assert!(F.info.reallocs > 0);
    assert_eq!(F.nnz(), 64);
    assert_eq!(F.info.fill_ratio_needed, 64. / 22.);

    // rerunning with the reported ratio needs no growth
    let G = factor_symbolic(
        &A.pattern(),
        &I,
        &I,
        F.info.fill_ratio_needed,
        FactorVariant::Lu,
    )
    .unwrap();
    assert_eq!(G.info.reallocs, 0);
    assert_eq!(G.storage, F.storage);
}

#[test]
fn test_permutation_semantics() {
    // upper bidiagonal.  Reversing rows only gives an anti-bidiagonal
    // that a matching column reversal undoes
    let A = CsrMatrix::<f64>::from(&[
        [1., 1., 0.], //
        [0., 1., 1.], //
        [0., 0., 1.], //
    ]);
    let R = Permutation::new(vec![2, 1, 0]).unwrap();
    let I = Permutation::identity(3);

    // new row 0 is original row 2, whose column 2 moves to column 0
    let F = factor_symbolic(&A.pattern(), &R, &R, 5.0, FactorVariant::Plain).unwrap();
    assert_eq!(F.row(0), vec![0]);
    assert_eq!(F.row(1), vec![0, 1]);
    assert_eq!(F.row(2), vec![1, 2]);
    assert_eq!(F.nnz(), 5);

    // rows reversed, columns kept: the diagonal slots are forced in
    let F = factor_symbolic(&A.pattern(), &R, &I, 5.0, FactorVariant::Plain).unwrap();
    assert_eq!(F.row(0), vec![0, 2]);
    assert_eq!(F.row(1), vec![1, 2]);
    assert_eq!(F.row(2), vec![0, 1, 2]);
    assert!(F.info.fill_ratio_needed > 1.0);
}

#[test]
fn test_amd_reduces_fill() {
    let A = arrow(10);
    let I = Permutation::identity(10);

    let natural = factor_symbolic(&A.pattern(), &I, &I, 2.0, FactorVariant::Lu).unwrap();

    let settings = SymbolicSettings::default();
    let factorizer = SymbolicFactorizer::new(settings).unwrap();
    let P = factorizer.amd_ordering(&A.pattern()).unwrap();
    let ordered = factor_symbolic(&A.pattern(), &P, &P, 2.0, FactorVariant::Lu).unwrap();

    assert_eq!(natural.nnz(), 100);
    assert!(ordered.nnz() < natural.nnz());
}
