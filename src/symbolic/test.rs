#![allow(non_snake_case)]
use super::elimination::{eliminate, Elimination, RowRecord};
use super::freespace::FreeSpace;
use super::*;
use crate::algebra::*;

// ---------------------------------------------------------
// helpers
// ---------------------------------------------------------

// dense boolean right-looking elimination of the permuted structure
// with the diagonal forced in.  Returns each row's ids ascending
fn reference_rows(
    pattern: &SparsityPattern<'_>,
    row_perm: &Permutation,
    col_perm: &Permutation,
) -> Vec<Vec<usize>> {
    let n = pattern.nrows();
    let mut S = vec![vec![false; n]; n];
    for (i, Si) in S.iter_mut().enumerate() {
        for &c in pattern.row(row_perm.apply(i)) {
            Si[col_perm.invert(c)] = true;
        }
        Si[i] = true;
    }
    for k in 0..n {
        for i in (k + 1)..n {
            if S[i][k] {
                for j in (k + 1)..n {
                    if S[k][j] {
                        S[i][j] = true;
                    }
                }
            }
        }
    }
    S.iter()
        .map(|Si| (0..n).filter(|&j| Si[j]).collect())
        .collect()
}

// pseudo random square structure with a mix of present and
// missing diagonals, every row non-empty
fn random_pattern(n: usize, per_row: usize, seed: u64, always_diag: bool) -> CsrMatrix<f64> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    let mut rowptr = vec![0];
    let mut colval = vec![];
    for i in 0..n {
        let mut cols: Vec<usize> = (0..per_row).map(|_| (next() as usize) % n).collect();
        if always_diag || next() % 3 != 0 {
            cols.push(i);
        }
        cols.sort_unstable();
        cols.dedup();
        colval.extend(cols);
        rowptr.push(colval.len());
    }
    CsrMatrix::from_pattern(n, n, rowptr, colval)
}

fn factor_with(
    A: &CsrMatrix<f64>,
    p: &Permutation,
    q: &Permutation,
    fill_ratio: f64,
    variant: FactorVariant,
    lu_packing: LuPacking,
) -> Result<FactorPattern, SymbolicError> {
    let settings = SymbolicSettingsBuilder::default()
        .fill_ratio(fill_ratio)
        .variant(variant)
        .lu_packing(lu_packing)
        .build()
        .unwrap();
    let mut factorizer = SymbolicFactorizer::new(settings).unwrap();
    factorizer.print_to_sink();
    factorizer.factor(&A.pattern(), p, q)
}

fn all_rows(F: &FactorPattern) -> Vec<Vec<usize>> {
    (0..F.nrows()).map(|i| F.row(i)).collect()
}

fn arrow(n: usize) -> CsrMatrix<f64> {
    // dense first row and column plus the diagonal
    let mut rowptr = vec![0];
    let mut colval: Vec<usize> = (0..n).collect();
    rowptr.push(n);
    for i in 1..n {
        colval.extend([0, i]);
        rowptr.push(colval.len());
    }
    CsrMatrix::from_pattern(n, n, rowptr, colval)
}

const LU_LAYOUTS: [(FactorVariant, LuPacking); 3] = [
    (FactorVariant::Plain, LuPacking::Separate),
    (FactorVariant::Lu, LuPacking::Separate),
    (FactorVariant::Lu, LuPacking::Packed),
];

// ---------------------------------------------------------
// tests
// ---------------------------------------------------------

#[test]
fn test_diagonal_matrix() {
    let A = CsrMatrix::<f64>::identity(3);
    let I = Permutation::identity(3);

    for variant in [FactorVariant::Plain, FactorVariant::Lu, FactorVariant::Cholesky] {
        let F = factor_symbolic(&A.pattern(), &I, &I, 5.0, variant).unwrap();
        assert_eq!(F.nnz(), 3);
        assert_eq!(F.info.reallocs, 0);
        assert_eq!(F.info.fill_ratio_needed, 1.0);
        for i in 0..3 {
            assert_eq!(F.row(i), vec![i]);
        }
    }
}

#[test]
fn test_no_fill_pattern() {
    // rows {0:[0,2], 1:[1], 2:[0,2]}
    let A = CsrMatrix::<f64>::from_pattern(3, 3, vec![0, 2, 3, 5], vec![0, 2, 1, 0, 2]);
    let I = Permutation::identity(3);

    let F = factor_symbolic(&A.pattern(), &I, &I, 1.0, FactorVariant::Plain).unwrap();
    assert_eq!(F.nnz(), 5);
    assert_eq!(F.diag(), &[0, 2, 4]);

    let F = factor_symbolic(&A.pattern(), &I, &I, 1.0, FactorVariant::Lu).unwrap();
    assert_eq!(F.nnz(), 5);
    assert_eq!(F.lower(2), &[0]);
    assert_eq!(F.upper(0), &[2]);
    assert_eq!(F.diag(), &[0, 2, 3, 4]);

    let F = factor_symbolic(&A.pattern(), &I, &I, 1.0, FactorVariant::Cholesky).unwrap();
    assert_eq!(F.nnz(), 4);
    assert_eq!(F.info.nnz_original, 4);
    assert_eq!(F.diag(), &[1, 2, 3]);
    match &F.storage {
        FactorStorage::Cholesky { rowptr, colval, .. } => {
            assert_eq!(rowptr, &vec![0, 2, 3, 4]);
            assert_eq!(colval, &vec![2, 0, 1, 2]);
        }
        _ => panic!("unexpected storage"),
    }
}

#[test]
fn test_arrow_fill() {
    let A = arrow(5);
    let I = Permutation::identity(5);

    // dense first row and column fill in completely
    let F = factor_symbolic(&A.pattern(), &I, &I, 5.0, FactorVariant::Lu).unwrap();
    assert_eq!(F.nnz(), 25);
    assert_eq!(F.info.nnz_original, 13);

    // reversing the order moves the dense row last and there is no fill
    let R = Permutation::new(vec![4, 3, 2, 1, 0]).unwrap();
    let F = factor_symbolic(&A.pattern(), &R, &R, 5.0, FactorVariant::Lu).unwrap();
    assert_eq!(F.nnz(), 13);
    assert_eq!(F.lower(4), &[0, 1, 2, 3]);
    assert_eq!(F.upper(0), &[4]);
}

#[test]
fn test_empty_row() {
    let A = CsrMatrix::<f64>::from_pattern(3, 3, vec![0, 1, 1, 2], vec![0, 2]);
    let I = Permutation::identity(3);

    let err = factor_symbolic(&A.pattern(), &I, &I, 5.0, FactorVariant::Lu).unwrap_err();
    assert_eq!(
        err,
        SymbolicError::Structural(StructuralError::EmptyRow {
            row: 1,
            original_row: 1
        })
    );

    // reported in permuted numbering
    let P = Permutation::new(vec![1, 0, 2]).unwrap();
    let err = factor_symbolic(&A.pattern(), &P, &I, 5.0, FactorVariant::Lu).unwrap_err();
    assert_eq!(
        err,
        SymbolicError::Structural(StructuralError::EmptyRow {
            row: 0,
            original_row: 1
        })
    );
}

#[test]
fn test_empty_last_row() {
    let A = CsrMatrix::<f64>::from_pattern(3, 3, vec![0, 1, 2, 2], vec![0, 1]);
    let I = Permutation::identity(3);

    // the rows before it fill the first chunk exactly
    let elim = eliminate(&A.pattern(), &I, &I, 1.0, FactorVariant::Plain, 2);
    assert!(matches!(
        elim,
        Err(SymbolicError::Structural(StructuralError::EmptyRow { row: 2, .. }))
    ));
}

#[test]
fn test_reallocs_with_tight_fill() {
    let A = arrow(6);
    let I = Permutation::identity(6);

    let tight = factor_symbolic(&A.pattern(), &I, &I, 1.0, FactorVariant::Lu).unwrap();
    assert!(tight.info.reallocs > 0);
    assert_eq!(tight.info.chunks, tight.info.reallocs + 1);
    assert!(tight.info.fill_ratio_needed > 1.0);

    let loose = factor_symbolic(&A.pattern(), &I, &I, 10.0, FactorVariant::Lu).unwrap();
    assert_eq!(loose.info.reallocs, 0);
    assert_eq!(loose.storage, tight.storage);
}

#[test]
fn test_matches_reference() {
    for seed in 0..20 {
        let n = 5 + (seed as usize % 11);
        let A = random_pattern(n, 2, seed, false);
        let pattern = A.pattern();

        let p = Permutation::new((0..n).rev().collect()).unwrap();
        let q = Permutation::new((0..n).map(|i| (i * 3 + 1) % n).collect());
        let q = q.unwrap_or_else(|_| Permutation::identity(n));

        for (rp, cp) in [(&p, &q), (&q, &p), (&p, &p)] {
            let expected = reference_rows(&pattern, rp, cp);
            for (variant, packing) in LU_LAYOUTS {
                let F = factor_with(&A, rp, cp, 1.0, variant, packing).unwrap();
                assert_eq!(all_rows(&F), expected, "seed {} {:?}", seed, F.storage);
                let total: usize = expected.iter().map(|r| r.len()).sum();
                assert_eq!(F.nnz(), total);
            }
        }
    }
}

#[test]
fn test_cholesky_matches_reference() {
    for seed in 0..20 {
        let n = 4 + (seed as usize % 9);
        let A = random_pattern(n, 3, seed + 100, true);
        let S = A.pattern().symmetrize_upper();
        let P = Permutation::new((0..n).map(|i| (i + seed as usize) % n).collect()).unwrap();

        let expected: Vec<Vec<usize>> = reference_rows(&S.as_pattern(), &P, &P)
            .into_iter()
            .enumerate()
            .map(|(i, row)| row.into_iter().filter(|&j| j >= i).collect())
            .collect();

        let F = factor_with(&A, &P, &P, 2.0, FactorVariant::Cholesky, LuPacking::Separate);
        let F = F.unwrap();
        assert_eq!(all_rows(&F), expected);
        assert_eq!(F.info.nnz_original, A.pattern().upper_nnz());
        for i in 0..n {
            // diagonal last
            match &F.storage {
                FactorStorage::Cholesky {
                    rowptr,
                    colval,
                    diag,
                } => {
                    assert_eq!(diag[i], rowptr[i + 1] - 1);
                    assert_eq!(colval[diag[i]], i);
                }
                _ => unreachable!(),
            }
        }
    }
}

#[test]
fn test_fill_ratio_independence() {
    let A = random_pattern(30, 3, 7, false);
    let P = Permutation::amd(&A.pattern(), 1.5).unwrap();

    for (variant, packing) in LU_LAYOUTS {
        let base = factor_with(&A, &P, &P, 20.0, variant, packing).unwrap();
        for fill_ratio in [0.01, 0.5, 1.0, 1.7, 4.0] {
            let F = factor_with(&A, &P, &P, fill_ratio, variant, packing).unwrap();
            assert_eq!(F.storage, base.storage);
            assert_eq!(F.nnz(), base.nnz());
        }
    }
}

#[test]
fn test_packed_layout() {
    let A = arrow(4);
    let R = Permutation::new(vec![3, 2, 1, 0]).unwrap();

    let F = factor_with(&A, &R, &R, 1.0, FactorVariant::Lu, LuPacking::Packed).unwrap();
    // L = rows {3:[0,1,2]}, U = {0:[0,3], 1:[1,3], 2:[2,3], 3:[3]}
    match &F.storage {
        FactorStorage::LuPacked {
            rowptr,
            colval,
            diag,
        } => {
            assert_eq!(rowptr, &vec![1, 1, 1, 1, 4]);
            assert_eq!(diag, &vec![10, 8, 6, 4, 3]);
            assert_eq!(colval.len(), F.nnz() + 1);
            assert_eq!(&colval[1..4], &[0, 1, 2]);
            assert_eq!(&colval[4..], &[3, 3, 2, 3, 1, 3, 0]);
        }
        _ => panic!("unexpected storage"),
    }
    let S = factor_with(&A, &R, &R, 1.0, FactorVariant::Lu, LuPacking::Separate).unwrap();
    assert_eq!(all_rows(&F), all_rows(&S));
}

#[test]
fn test_value_index() {
    let A = random_pattern(12, 2, 3, false);
    let P = Permutation::identity(12);

    for (variant, packing) in LU_LAYOUTS {
        let F = factor_with(&A, &P, &P, 1.0, variant, packing).unwrap();
        let mut seen = vec![false; F.nnz()];
        for i in 0..12 {
            for j in F.row(i) {
                let k = F.value_index(i, j).unwrap();
                assert!(!seen[k]);
                seen[k] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
        assert!(F.value_index(12, 0).is_none());
    }

    let F = factor_with(&A, &P, &P, 1.0, FactorVariant::Cholesky, LuPacking::Separate).unwrap();
    for i in 0..12 {
        assert_eq!(F.value_index(i, i), Some(F.diag_offset(i)));
    }
}

#[test]
fn test_empty_matrix() {
    let A = CsrMatrix::<f64>::spalloc(0, 0, 0);
    let I = Permutation::identity(0);

    for (variant, packing) in LU_LAYOUTS {
        let F = factor_with(&A, &I, &I, 5.0, variant, packing).unwrap();
        assert_eq!(F.nnz(), 0);
        assert_eq!(F.info.fill_ratio_needed, 0.0);
        assert_eq!(F.info.chunks, 0);
    }
}

#[test]
fn test_bad_inputs() {
    let A = CsrMatrix::<f64>::from_pattern(2, 3, vec![0, 1, 2], vec![0, 2]);
    let I = Permutation::identity(2);
    assert_eq!(
        factor_symbolic(&A.pattern(), &I, &I, 5.0, FactorVariant::Lu),
        Err(SymbolicError::Structural(StructuralError::NotSquare {
            nrows: 2,
            ncols: 3
        }))
    );

    let A = CsrMatrix::<f64>::identity(3);
    assert_eq!(
        factor_symbolic(&A.pattern(), &I, &I, 5.0, FactorVariant::Lu),
        Err(SymbolicError::Structural(
            StructuralError::PermutationLength {
                expected: 3,
                found: 2
            }
        ))
    );

    let P = Permutation::new(vec![2, 0, 1]).unwrap();
    let Q = Permutation::identity(3);
    assert_eq!(
        factor_symbolic(&A.pattern(), &P, &Q, 5.0, FactorVariant::Cholesky),
        Err(SymbolicError::Structural(
            StructuralError::AsymmetricPermutation
        ))
    );
    // fine for LU
    assert!(factor_symbolic(&A.pattern(), &P, &Q, 5.0, FactorVariant::Lu).is_ok());

    let rowptr = [0, 1, 3, 2];
    let colval = [0, 1];
    let pattern = SparsityPattern::new_unchecked(3, 3, &rowptr, &colval);
    assert_eq!(
        factor_symbolic(&pattern, &Q, &Q, 5.0, FactorVariant::Lu),
        Err(SymbolicError::Structural(StructuralError::Format(
            SparseFormatError::BadRowptr
        )))
    );
}

#[test]
fn test_duplicate_and_unsorted_columns() {
    let A = CsrMatrix::<f64>::from_pattern(3, 3, vec![0, 3, 4, 6], vec![2, 0, 2, 1, 2, 0]);
    let I = Permutation::identity(3);
    let F = factor_symbolic(&A.pattern(), &I, &I, 1.0, FactorVariant::Plain).unwrap();
    assert_eq!(all_rows(&F), vec![vec![0, 2], vec![1], vec![0, 2]]);
    assert_eq!(F.info.nnz_original, 5);
    assert_eq!(F.info.fill_ratio_needed, 1.0);
}

#[test]
fn test_repeated_ids_fill_ratio() {
    // row 0 repeats its diagonal three times
    let A = CsrMatrix::<f64>::from_pattern(2, 2, vec![0, 3, 4], vec![0, 0, 0, 1]);
    let I = Permutation::identity(2);

    for variant in [FactorVariant::Plain, FactorVariant::Lu, FactorVariant::Cholesky] {
        let F = factor_symbolic(&A.pattern(), &I, &I, 1.0, variant).unwrap();
        assert_eq!(F.nnz(), 2);
        assert_eq!(F.info.nnz_original, 2);
        assert!(F.info.fill_ratio_needed >= 1.0);
    }
}

#[test]
fn test_compaction_consistency() {
    let A = arrow(4);
    let I = Permutation::identity(4);
    let make = || eliminate(&A.pattern(), &I, &I, 1.0, FactorVariant::Lu, 10).unwrap();
    let inconsistent = |e| Err(SymbolicError::InternalConsistency(e));

    // a diagonal record pointing at the wrong id
    let mut elim = make();
    elim.rows[1].diag += 1;
    assert_eq!(
        compact::contiguous(elim),
        inconsistent(ConsistencyError::MissingDiagonal { row: 1 })
    );

    // a row claiming more than its chunk holds
    let mut elim = make();
    let last = elim.rows.len() - 1;
    elim.rows[last].len += 1;
    assert_eq!(
        compact::contiguous_lu_split(elim),
        inconsistent(ConsistencyError::RowOverrun { row: 3 })
    );

    // a total that disagrees with the rows
    let mut elim = make();
    elim.nnz -= 1;
    assert_eq!(
        compact::contiguous(elim),
        inconsistent(ConsistencyError::NnzMismatch {
            expected: 15,
            found: 16
        })
    );

    // full rows handed to the upper triangular layout
    assert_eq!(
        compact::contiguous_cholesky(make()),
        inconsistent(ConsistencyError::MissingDiagonal { row: 1 })
    );

    // lower counts that disagree with the diagonal position
    let mut elim = make();
    elim.rows[0].nlower = 1;
    assert_eq!(
        compact::contiguous_lu_packed(elim),
        inconsistent(ConsistencyError::LowerCount {
            row: 0,
            nlower: 1,
            diag: 0
        })
    );
    let mut elim = make();
    elim.rows[3].nlower = 4;
    assert_eq!(
        compact::contiguous_lu_split(elim),
        inconsistent(ConsistencyError::LowerCount {
            row: 3,
            nlower: 4,
            diag: 3
        })
    );

    // upper only rows must start at the diagonal
    let mut elim = make();
    elim.upper_only = true;
    assert_eq!(
        compact::contiguous(elim),
        inconsistent(ConsistencyError::LowerCount {
            row: 1,
            nlower: 1,
            diag: 1
        })
    );
}

#[test]
fn test_packed_boundary() {
    // the last row carries an id right of its diagonal.  Every row is
    // well formed on its own, but the packed U part then ends one slot
    // above the end of L
    let mut space = FreeSpace::new();
    space.acquire(3).unwrap();
    let mut rows = vec![];
    for ids in [&[0][..], &[1, 1]] {
        let (slot, dest) = space.reserve(ids.len());
        dest.copy_from_slice(ids);
        rows.push(RowRecord {
            slot,
            len: ids.len(),
            nlower: 0,
            diag: 0,
        });
    }
    let elim = Elimination {
        n: 2,
        nnz: space.total_used(),
        chunks: space.chunk_count(),
        space,
        rows,
        upper_only: false,
        reallocs: 0,
    };

    assert_eq!(
        compact::contiguous_lu_packed(elim),
        Err(SymbolicError::InternalConsistency(
            ConsistencyError::LuBoundary {
                lower_end: 1,
                upper_start: 2
            }
        ))
    );
}

#[test]
fn test_verbose_output() {
    let A = arrow(6);
    let I = Permutation::identity(6);

    let settings = SymbolicSettingsBuilder::default()
        .fill_ratio(1.0)
        .verbose(true)
        .build()
        .unwrap();
    let mut factorizer = SymbolicFactorizer::new(settings).unwrap();
    factorizer.print_to_buffer();
    let F = factorizer.factor(&A.pattern(), &I, &I).unwrap();

    let out = factorizer.get_print_buffer().unwrap();
    assert!(out.contains("symbolic factorization:"));
    assert!(out.contains(&format!("Reallocs {}", F.info.reallocs)));
    assert!(out.contains("for best performance"));

    // failures are reported too
    let B = CsrMatrix::<f64>::from_pattern(2, 2, vec![0, 0, 1], vec![1]);
    let J = Permutation::identity(2);
    factorizer.print_to_buffer();
    assert!(factorizer.factor(&B.pattern(), &J, &J).is_err());
    let out = factorizer.get_print_buffer().unwrap();
    assert!(out.contains("failed: Empty row 0"));

    // quiet by default
    let mut factorizer = SymbolicFactorizer::new(SymbolicSettings::default()).unwrap();
    factorizer.print_to_buffer();
    factorizer.factor(&A.pattern(), &I, &I).unwrap();
    assert!(factorizer.get_print_buffer().unwrap().is_empty());
}
