use super::FactorVariant;
use crate::algebra::SparseFormatError;
use itertools::Itertools;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Row compressed index structure without values
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RowPattern {
    pub rowptr: Vec<usize>,
    pub colval: Vec<usize>,
}

impl RowPattern {
    pub fn row(&self, i: usize) -> &[usize] {
        &self.colval[self.rowptr[i]..self.rowptr[i + 1]]
    }

    pub fn nnz(&self) -> usize {
        self.colval.len()
    }
}

/// Final index arrays of a factor pattern, one variant per layout
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FactorStorage {
    /// Rows ascending with the diagonal inside, `diag[i]` its absolute offset.
    Plain {
        rowptr: Vec<usize>,
        colval: Vec<usize>,
        diag: Vec<usize>,
    },
    /// Strictly lower rows in `lower`.  Rows of `upper` hold the diagonal
    /// first, followed by the strictly upper ids, and `diag[i] == upper.rowptr[i]`.
    LuSeparate {
        lower: RowPattern,
        upper: RowPattern,
        diag: Vec<usize>,
    },
    /// Single buffer.  Row `i` of L is `colval[rowptr[i]..rowptr[i+1]]`.
    /// Its strictly upper ids are `colval[diag[i+1]+1..diag[i]]` and the
    /// diagonal is `colval[diag[i]]`.  `colval[0]` is padding.
    LuPacked {
        rowptr: Vec<usize>,
        colval: Vec<usize>,
        diag: Vec<usize>,
    },
    /// Upper rows with the diagonal in the last slot, `diag[i] == rowptr[i+1] - 1`.
    Cholesky {
        rowptr: Vec<usize>,
        colval: Vec<usize>,
        diag: Vec<usize>,
    },
}

/// Statistics gathered by a symbolic factorization
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SymbolicInfo {
    /// structural nonzeros read from the input
    pub nnz_original: usize,
    /// structural nonzeros of the factor
    pub nnz: usize,
    pub fill_ratio_given: f64,
    /// `nnz / nnz_original`, or zero for an empty input
    pub fill_ratio_needed: f64,
    /// number of arena chunks acquired after the first
    pub reallocs: usize,
    pub chunks: usize,
    /// seconds spent eliminating
    pub elimination_time: f64,
    /// seconds spent compacting
    pub compaction_time: f64,
}

/// Nonzero structure of the triangular factors of a permuted matrix.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FactorPattern {
    pub n: usize,
    pub variant: FactorVariant,
    pub storage: FactorStorage,
    pub info: SymbolicInfo,
}

impl FactorPattern {
    /// number of rows (and columns) of the factored matrix
    pub fn nrows(&self) -> usize {
        self.n
    }

    /// structural nonzeros, each row's diagonal included
    pub fn nnz(&self) -> usize {
        self.info.nnz
    }

    /// diagonal offsets in the layout's own buffer
    pub fn diag(&self) -> &[usize] {
        match &self.storage {
            FactorStorage::Plain { diag, .. }
            | FactorStorage::LuSeparate { diag, .. }
            | FactorStorage::LuPacked { diag, .. }
            | FactorStorage::Cholesky { diag, .. } => diag,
        }
    }

    pub fn diag_offset(&self, i: usize) -> usize {
        self.diag()[i]
    }

    /// strictly lower ids of row `i`, ascending.  Empty for Cholesky.
    pub fn lower(&self, i: usize) -> &[usize] {
        match &self.storage {
            FactorStorage::Plain {
                rowptr,
                colval,
                diag,
            } => &colval[rowptr[i]..diag[i]],
            FactorStorage::LuSeparate { lower, .. } => lower.row(i),
            FactorStorage::LuPacked { rowptr, colval, .. } => &colval[rowptr[i]..rowptr[i + 1]],
            FactorStorage::Cholesky { .. } => &[],
        }
    }

    /// strictly upper ids of row `i`, ascending
    pub fn upper(&self, i: usize) -> &[usize] {
        match &self.storage {
            FactorStorage::Plain {
                rowptr,
                colval,
                diag,
            } => &colval[diag[i] + 1..rowptr[i + 1]],
            FactorStorage::LuSeparate { upper, .. } => &upper.row(i)[1..],
            FactorStorage::LuPacked { colval, diag, .. } => &colval[diag[i + 1] + 1..diag[i]],
            FactorStorage::Cholesky { rowptr, colval, .. } => &colval[rowptr[i]..rowptr[i + 1] - 1],
        }
    }

    /// number of stored ids in row `i`
    pub fn row_nnz(&self, i: usize) -> usize {
        self.lower(i).len() + 1 + self.upper(i).len()
    }

    /// all ids of row `i` in ascending order
    pub fn row(&self, i: usize) -> Vec<usize> {
        let mut ids = Vec::with_capacity(self.row_nnz(i));
        ids.extend_from_slice(self.lower(i));
        ids.push(i);
        ids.extend_from_slice(self.upper(i));
        ids
    }

    /// Position of entry (row, col) in a factor value array of length
    /// [`nnz`](FactorPattern::nnz), or None if it is not in the pattern.
    ///
    /// Separate LU values hold all of L first and then all of U.
    pub fn value_index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.n || col >= self.n {
            return None;
        }
        let find = |ids: &[usize], base: usize| ids.binary_search(&col).ok().map(|k| base + k);

        match &self.storage {
            FactorStorage::Plain { rowptr, colval, .. } => {
                find(&colval[rowptr[row]..rowptr[row + 1]], rowptr[row])
            }
            FactorStorage::LuSeparate { lower, upper, .. } => {
                if col < row {
                    find(lower.row(row), lower.rowptr[row])
                } else {
                    // the diagonal leads the row, the rest is ascending
                    find(upper.row(row), upper.rowptr[row]).map(|k| lower.nnz() + k)
                }
            }
            FactorStorage::LuPacked {
                rowptr,
                colval,
                diag,
            } => {
                // shift past the padding slot
                let k = match col.cmp(&row) {
                    std::cmp::Ordering::Less => {
                        find(&colval[rowptr[row]..rowptr[row + 1]], rowptr[row])
                    }
                    std::cmp::Ordering::Equal => Some(diag[row]),
                    std::cmp::Ordering::Greater => {
                        find(&colval[diag[row + 1] + 1..diag[row]], diag[row + 1] + 1)
                    }
                };
                k.map(|k| k - 1)
            }
            FactorStorage::Cholesky { rowptr, colval, diag } => match col.cmp(&row) {
                std::cmp::Ordering::Less => None,
                std::cmp::Ordering::Equal => Some(diag[row]),
                std::cmp::Ordering::Greater => {
                    find(&colval[rowptr[row]..rowptr[row + 1] - 1], rowptr[row])
                }
            },
        }
    }
}

impl FactorPattern {
    /// Check that the index arrays agree with each other, with `n` and with
    /// `nnz`, so that every row accessor stays in bounds.
    ///
    /// Patterns produced by a factorization always pass.  Useful for
    /// patterns read back from disk.
    pub fn check_format(&self) -> Result<(), SparseFormatError> {
        use SparseFormatError::*;
        let n = self.n;

        let stored = match (self.variant, &self.storage) {
            (
                FactorVariant::Plain,
                FactorStorage::Plain {
                    rowptr,
                    colval,
                    diag,
                },
            ) => {
                check_rowptr(rowptr, n, 0, colval.len())?;
                check_ids(colval, n)?;
                if diag.len() != n {
                    return Err(IncompatibleDimension);
                }
                if (0..n).any(|i| !(rowptr[i]..rowptr[i + 1]).contains(&diag[i]) || colval[diag[i]] != i) {
                    return Err(BadRowptr);
                }
                colval.len()
            }
            (FactorVariant::Lu, FactorStorage::LuSeparate { lower, upper, diag }) => {
                check_rowptr(&lower.rowptr, n, 0, lower.nnz())?;
                check_rowptr(&upper.rowptr, n, 0, upper.nnz())?;
                check_ids(&lower.colval, n)?;
                check_ids(&upper.colval, n)?;
                if *diag != upper.rowptr {
                    return Err(IncompatibleDimension);
                }
                if (0..n).any(|i| upper.row(i).first() != Some(&i)) {
                    return Err(BadRowptr);
                }
                lower.nnz() + upper.nnz()
            }
            (
                FactorVariant::Lu,
                FactorStorage::LuPacked {
                    rowptr,
                    colval,
                    diag,
                },
            ) => {
                if colval.is_empty() || diag.len() != n + 1 {
                    return Err(IncompatibleDimension);
                }
                // U rows run downwards from the end of the buffer
                if diag[0] != colval.len() - 1 || diag.iter().tuple_windows().any(|(a, b)| a <= b) {
                    return Err(BadRowptr);
                }
                check_rowptr(rowptr, n, 1, diag[n] + 1)?;
                check_ids(&colval[1..], n)?;
                colval.len() - 1
            }
            (
                FactorVariant::Cholesky,
                FactorStorage::Cholesky {
                    rowptr,
                    colval,
                    diag,
                },
            ) => {
                check_rowptr(rowptr, n, 0, colval.len())?;
                check_ids(colval, n)?;
                if diag.len() != n {
                    return Err(IncompatibleDimension);
                }
                if (0..n).any(|i| rowptr[i] == rowptr[i + 1] || diag[i] != rowptr[i + 1] - 1) {
                    return Err(BadRowptr);
                }
                colval.len()
            }
            _ => return Err(IncompatibleDimension),
        };

        if stored != self.info.nnz {
            return Err(IncompatibleDimension);
        }
        Ok(())
    }
}

// row pointers of length n+1 running from `first` to `last` without decreasing
fn check_rowptr(rowptr: &[usize], n: usize, first: usize, last: usize) -> Result<(), SparseFormatError> {
    if rowptr.len() != n + 1 {
        return Err(SparseFormatError::IncompatibleDimension);
    }
    if rowptr[0] != first || rowptr[n] != last || rowptr.iter().tuple_windows().any(|(a, b)| a > b) {
        return Err(SparseFormatError::BadRowptr);
    }
    Ok(())
}

fn check_ids(ids: &[usize], n: usize) -> Result<(), SparseFormatError> {
    if ids.iter().any(|&id| id >= n) {
        return Err(SparseFormatError::BadColval);
    }
    Ok(())
}

#[cfg(feature = "serde")]
mod json {
    use super::FactorPattern;
    use std::fs::File;
    use std::io::{self, Read, Write};

    impl FactorPattern {
        /// Write the pattern as JSON
        pub fn save_to_file(&self, file: &mut File) -> Result<(), io::Error> {
            let json = serde_json::to_string(self)?;
            file.write_all(json.as_bytes())?;
            Ok(())
        }

        /// Read a pattern written by [`save_to_file`](FactorPattern::save_to_file).
        ///
        /// Patterns whose index arrays are inconsistent are rejected with
        /// [`io::ErrorKind::InvalidData`].
        pub fn load_from_file(file: &mut File) -> Result<Self, io::Error> {
            let mut buffer = String::new();
            file.read_to_string(&mut buffer)?;
            let pattern: FactorPattern = serde_json::from_str(&buffer)?;
            pattern
                .check_format()
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            Ok(pattern)
        }
    }
}
