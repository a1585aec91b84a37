//! In-memory file-access adapter
//!
//! Inline image embedding hands the engine a random-access view over a
//! caller-supplied byte buffer. The adapter's single responsibility is the
//! bounds check: a read whose end falls past the buffer is refused outright,
//! never truncated, so the engine cannot read memory it was not given.

/// Random-access read interface handed to the engine's inline-image loader.
pub trait BlockSource {
    /// Total length of the source in bytes.
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy `out.len()` bytes starting at `offset` into `out`.
    ///
    /// Returns `false` when the requested range is not fully contained in
    /// the source. Partial reads are never performed.
    fn read_block(&self, offset: u64, out: &mut [u8]) -> bool;
}

/// [`BlockSource`] over a borrowed byte buffer.
pub struct BufferSource<'a> {
    data: &'a [u8],
}

impl<'a> BufferSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl BlockSource for BufferSource<'_> {
    fn len(&self) -> u64 {
        self.data.len() as u64
    }

    fn read_block(&self, offset: u64, out: &mut [u8]) -> bool {
        let end = match offset.checked_add(out.len() as u64) {
            Some(end) => end,
            None => return false,
        };
        if end > self.data.len() as u64 {
            return false;
        }

        let start = offset as usize;
        out.copy_from_slice(&self.data[start..start + out.len()]);
        true
    }
}
