// Sorted singly linked list of column ids threaded through one array.
// Entry `n` is both the list head and its terminator, so an id `k` is
// followed by `next[k]` and the list is empty when `next[n] == n`.

#[derive(Debug)]
pub(crate) struct FillList {
    next: Vec<usize>,
    len: usize,
}

impl FillList {
    pub fn new(n: usize) -> Self {
        let mut next = vec![0; n + 1];
        next[n] = n;
        Self { next, len: 0 }
    }

    #[inline]
    fn sentinel(&self) -> usize {
        self.next.len() - 1
    }

    pub fn clear(&mut self) {
        let head = self.sentinel();
        self.next[head] = head;
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn first(&self) -> usize {
        self.next[self.sentinel()]
    }

    #[inline]
    pub fn next(&self, k: usize) -> usize {
        self.next[k]
    }

    /// Insert `id` searching from the head.  Returns false if it was present.
    pub fn insert(&mut self, id: usize) -> bool {
        let head = self.sentinel();
        self.insert_after(head, id).1
    }

    /// Insert `id` searching forward from `cursor`, which must be the
    /// head or an id in the list smaller than `id`.  Returns the position
    /// of `id` as the next cursor and whether it was newly inserted.
    #[inline]
    pub fn insert_after(&mut self, cursor: usize, id: usize) -> (usize, bool) {
        let mut m = cursor;
        while self.next[m] < id {
            m = self.next[m];
        }
        if self.next[m] == id {
            return (id, false);
        }
        self.next[id] = self.next[m];
        self.next[m] = id;
        self.len += 1;
        (id, true)
    }

    pub fn iter(&self) -> FillListIter<'_> {
        FillListIter {
            list: self,
            at: self.first(),
        }
    }
}

pub(crate) struct FillListIter<'a> {
    list: &'a FillList,
    at: usize,
}

impl Iterator for FillListIter<'_> {
    type Item = usize;
    fn next(&mut self) -> Option<usize> {
        if self.at == self.list.sentinel() {
            return None;
        }
        let id = self.at;
        self.at = self.list.next(id);
        Some(id)
    }
}

#[test]
fn test_fill_list() {
    let mut list = FillList::new(6);
    assert_eq!(list.first(), 6);

    for id in [4, 1, 3, 1, 0] {
        list.insert(id);
    }
    assert_eq!(list.len(), 4);
    assert_eq!(list.iter().collect::<Vec<_>>(), vec![0, 1, 3, 4]);

    // cursor insertion from a known smaller id
    let (cur, inserted) = list.insert_after(1, 2);
    assert_eq!((cur, inserted), (2, true));
    let (cur, inserted) = list.insert_after(cur, 3);
    assert_eq!((cur, inserted), (3, false));
    list.insert_after(cur, 5);
    assert_eq!(list.iter().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4, 5]);

    list.clear();
    assert_eq!(list.len(), 0);
    assert_eq!(list.iter().count(), 0);
    list.insert(2);
    assert_eq!(list.iter().collect::<Vec<_>>(), vec![2]);
}
