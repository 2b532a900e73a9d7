/// Pre-allocated stream storage addressed by a write cursor.
///
/// The backing slice never grows; `clear` only rewinds the cursor, so stale
/// data past it survives until overwritten.
#[derive(Debug)]
pub(crate) struct Arena<T> {
    data: Box<[T]>,
    len: usize,
}

impl<T: Copy + Default> Arena<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![T::default(); capacity].into_boxed_slice(),
            len: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.len
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Written prefix.
    #[inline]
    pub fn written(&self) -> &[T] {
        &self.data[..self.len]
    }

    /// Whole backing storage, including the unwritten tail.
    #[inline]
    pub fn storage(&self) -> &[T] {
        &self.data
    }

    /// Hands out the next `n` slots and advances the cursor.
    ///
    /// Callers check [`remaining`](Self::remaining) first; running past the
    /// end is a bug and panics on the slice bound.
    #[inline]
    pub fn claim(&mut self, n: usize) -> &mut [T] {
        let start = self.len;
        self.len += n;
        &mut self.data[start..start + n]
    }

    #[inline]
    pub fn push_slice(&mut self, values: &[T]) {
        self.claim(values.len()).copy_from_slice(values);
    }
}
