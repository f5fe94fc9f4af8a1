use crate::algebra::{PermutationError, ShapedMatrix, SparsityPattern};

const UNSET: usize = usize::MAX;

/// A bijection on `0..n` stored together with its inverse.
///
/// `apply(new)` returns the original index placed at position `new`, and
/// `invert(old)` returns the new position of original index `old`.  Both
/// are O(1) lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    perm: Vec<usize>,
    iperm: Vec<usize>,
}

impl Permutation {
    /// Construct from a permutation vector, validating that it is a bijection.
    pub fn new(perm: Vec<usize>) -> Result<Self, PermutationError> {
        let iperm = invperm(&perm)?;
        Ok(Self { perm, iperm })
    }

    /// The identity permutation on `0..n`
    pub fn identity(n: usize) -> Self {
        let perm: Vec<usize> = (0..n).collect();
        let iperm = perm.clone();
        Self { perm, iperm }
    }

    /// Approximate minimum degree ordering of the structure `A + Aᵀ`.
    ///
    /// `dense_scale` multiplies the AMD dense row threshold; values above
    /// one treat fewer rows as dense.
    pub fn amd(pattern: &SparsityPattern<'_>, dense_scale: f64) -> Result<Self, PermutationError> {
        let n = pattern.nrows();
        if !pattern.is_square() {
            return Err(PermutationError::OrderingFailed(n));
        }

        let mut control = amd::Control::default();
        control.dense *= dense_scale;

        // AMD orders A + Aᵀ, so the CSR arrays can be passed
        // where it expects compressed columns
        let (perm, iperm, _info) = amd::order(n, pattern.rowptr(), pattern.colval(), &control)
            .map_err(|_| PermutationError::OrderingFailed(n))?;
        Ok(Self { perm, iperm })
    }

    pub fn len(&self) -> usize {
        self.perm.len()
    }

    pub fn is_empty(&self) -> bool {
        self.perm.is_empty()
    }

    /// original index placed at position `i`
    #[inline]
    pub fn apply(&self, i: usize) -> usize {
        self.perm[i]
    }

    /// new position of original index `j`
    #[inline]
    pub fn invert(&self, j: usize) -> usize {
        self.iperm[j]
    }

    /// The inverse permutation
    pub fn inverse(&self) -> Self {
        Self {
            perm: self.iperm.clone(),
            iperm: self.perm.clone(),
        }
    }

    pub fn perm(&self) -> &[usize] {
        &self.perm
    }

    pub fn iperm(&self) -> &[usize] {
        &self.iperm
    }

    pub fn is_identity(&self) -> bool {
        self.perm.iter().enumerate().all(|(i, &p)| i == p)
    }
}

// Construct an inverse permutation from a permutation
fn invperm(p: &[usize]) -> Result<Vec<usize>, PermutationError> {
    let mut b = vec![UNSET; p.len()];

    for (i, &j) in p.iter().enumerate() {
        if j < p.len() && b[j] == UNSET {
            b[j] = i;
        } else {
            return Err(PermutationError::InvalidPermutation);
        }
    }
    Ok(b)
}

#[test]
fn test_invperm() {
    let p = Permutation::new(vec![3, 0, 2, 1]).unwrap();
    assert_eq!(p.iperm(), &[1, 3, 2, 0]);
    for i in 0..4 {
        assert_eq!(p.invert(p.apply(i)), i);
        assert_eq!(p.apply(p.invert(i)), i);
    }
    assert_eq!(p.inverse().perm(), p.iperm());
    assert!(!p.is_identity());
    assert!(Permutation::identity(4).is_identity());
}

//test fail on bad permutation
#[test]
fn test_invperm_bad_perm() {
    //repeated index, including a repeated zero
    assert!(Permutation::new(vec![3, 0, 2, 0]).is_err());
    assert!(Permutation::new(vec![0, 0]).is_err());
    //index too big
    assert!(Permutation::new(vec![4, 0, 2, 1]).is_err());
}

#[test]
fn test_amd() {
    // arrow matrix with the dense row first
    let rowptr = [0, 4, 6, 8, 10];
    let colval = [0, 1, 2, 3, 0, 1, 0, 2, 0, 3];
    let pattern = SparsityPattern::new(4, 4, &rowptr, &colval).unwrap();
    let p = Permutation::amd(&pattern, 1.0).unwrap();

    assert_eq!(p.len(), 4);
    assert_eq!(Permutation::new(p.perm().to_vec()).unwrap(), p);

    // rectangular patterns can't be ordered
    let pattern = SparsityPattern::new(4, 5, &rowptr, &colval).unwrap();
    assert!(Permutation::amd(&pattern, 1.0).is_err());
}
