//! Chunked append-only storage for factor rows of unknown total size.
//!
//! Rows are appended to the tail chunk and never span two chunks.  When the
//! tail is exhausted the caller acquires a new chunk instead of growing and
//! copying the old one, so earlier rows stay where they were written.

use super::SymbolicError;

/// Location of a stored row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Slot {
    pub chunk: usize,
    pub offset: usize,
}

#[derive(Debug)]
pub(crate) struct Chunk {
    data: Vec<usize>,
    used: usize,
}

impl Chunk {
    fn with_capacity(capacity: usize) -> Result<Self, SymbolicError> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|_| SymbolicError::ResourceExhaustion {
                requested: capacity,
            })?;
        data.resize(capacity, 0);
        Ok(Self { data, used: 0 })
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// the filled prefix of the chunk
    pub fn used(&self) -> &[usize] {
        &self.data[..self.used]
    }
}

#[derive(Debug, Default)]
pub(crate) struct FreeSpace {
    chunks: Vec<Chunk>,
    total_capacity: usize,
    total_used: usize,
}

impl FreeSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Link a new tail chunk holding at least `n` entries.
    pub fn acquire(&mut self, n: usize) -> Result<(), SymbolicError> {
        debug_assert!(n > 0);
        let chunk = Chunk::with_capacity(n)?;
        self.chunks
            .try_reserve(1)
            .map_err(|_| SymbolicError::ResourceExhaustion { requested: n })?;
        self.total_capacity += chunk.capacity();
        self.chunks.push(chunk);
        Ok(())
    }

    /// free entries left in the tail chunk
    pub fn remaining(&self) -> usize {
        self.chunks
            .last()
            .map_or(0, |chunk| chunk.capacity() - chunk.used)
    }

    /// Hand out `len` contiguous entries of the tail chunk.
    ///
    /// # Panics
    /// Panics if the tail chunk has fewer than `len` free entries.
    pub fn reserve(&mut self, len: usize) -> (Slot, &mut [usize]) {
        assert!(len <= self.remaining());
        let chunk_idx = self.chunks.len() - 1;
        let chunk = &mut self.chunks[chunk_idx];
        let offset = chunk.used;
        chunk.used += len;
        self.total_used += len;
        let slot = Slot {
            chunk: chunk_idx,
            offset,
        };
        (slot, &mut chunk.data[offset..offset + len])
    }

    /// A row previously written through [`reserve`](FreeSpace::reserve)
    pub fn row(&self, slot: Slot, len: usize) -> &[usize] {
        &self.chunks[slot.chunk].data[slot.offset..slot.offset + len]
    }

    pub fn total_capacity(&self) -> usize {
        self.total_capacity
    }

    pub fn total_used(&self) -> usize {
        self.total_used
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Release every chunk without reading it
    pub fn destroy(&mut self) {
        self.chunks = Vec::new();
        self.total_capacity = 0;
        self.total_used = 0;
    }

    /// Consume the arena front to back.  Each chunk is dropped as soon
    /// as the consumer moves on to the next one.
    pub fn into_chunks(self) -> impl Iterator<Item = Chunk> {
        self.chunks.into_iter()
    }
}

#[test]
fn test_freespace_rows() {
    let mut space = FreeSpace::new();
    assert_eq!(space.remaining(), 0);

    space.acquire(5).unwrap();
    let (s0, row) = space.reserve(3);
    row.copy_from_slice(&[0, 2, 4]);
    assert_eq!(space.remaining(), 2);

    // the next row doesn't fit and goes to a fresh chunk
    space.acquire(4).unwrap();
    let (s1, row) = space.reserve(4);
    row.copy_from_slice(&[1, 2, 3, 4]);

    assert_eq!(s0, Slot { chunk: 0, offset: 0 });
    assert_eq!(s1, Slot { chunk: 1, offset: 0 });
    assert_eq!(space.row(s0, 3), &[0, 2, 4]);
    assert_eq!(space.row(s1, 4), &[1, 2, 3, 4]);
    assert_eq!(space.total_capacity(), 9);
    assert_eq!(space.total_used(), 7);
    assert_eq!(space.chunk_count(), 2);

    let used: Vec<Vec<usize>> = space.into_chunks().map(|c| c.used().to_vec()).collect();
    assert_eq!(used, vec![vec![0, 2, 4], vec![1, 2, 3, 4]]);
}

#[test]
fn test_freespace_destroy() {
    let mut space = FreeSpace::new();
    space.acquire(8).unwrap();
    space.reserve(2);
    space.destroy();
    assert_eq!(space.chunk_count(), 0);
    assert_eq!(space.total_capacity(), 0);
    assert_eq!(space.remaining(), 0);
}

#[test]
fn test_freespace_exhaustion() {
    let mut space = FreeSpace::new();
    let err = space.acquire(usize::MAX / 2).unwrap_err();
    assert_eq!(
        err,
        SymbolicError::ResourceExhaustion {
            requested: usize::MAX / 2
        }
    );
    assert_eq!(space.chunk_count(), 0);
}
