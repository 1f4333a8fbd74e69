// Bit stream
//------------------------------------------------------------------------------

/// Append-only MSB-first bit buffer with a fixed bit capacity.
#[derive(Debug, Clone)]
pub struct BitStream {
    data: Vec<u8>,
    // Bit length
    len: usize,
    // Max bit capacity
    capacity: usize,
}

impl BitStream {
    pub fn new(capacity: usize) -> Self {
        Self { data: vec![0; (capacity + 7) >> 3], len: 0, capacity }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes covering every pushed bit; trailing bits of the last byte are 0.
    pub fn data(&self) -> &[u8] {
        &self.data[..(self.len + 7) >> 3]
    }

    /// Appends the `size` low bits of `bits`, most significant first.
    pub fn push_bits(&mut self, bits: u16, size: usize) {
        debug_assert!(
            size >= (16 - bits.leading_zeros()) as usize,
            "Bit count shouldn't exceed bit length: Length {size}, Bits {bits}"
        );
        debug_assert!(
            self.len + size <= self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + size
        );

        let mut remaining = size;
        while remaining > 0 {
            let offset = self.len & 7;
            let pos = self.len >> 3;
            let take = remaining.min(8 - offset);
            let chunk = ((bits >> (remaining - take)) & ((1 << take) - 1)) as u8;
            self.data[pos] |= chunk << (8 - offset - take);
            self.len += take;
            remaining -= take;
        }
    }

    /// Appends whole bytes. The stream must be byte aligned.
    pub fn extend(&mut self, bytes: &[u8]) {
        debug_assert!(
            self.len & 7 == 0,
            "Byte extension requires byte alignment: Length {}",
            self.len
        );
        debug_assert!(
            self.len + (bytes.len() << 3) <= self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + (bytes.len() << 3)
        );

        let pos = self.len >> 3;
        self.data[pos..pos + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len() << 3;
    }
}

// Iterator over pushed bits, MSB first
//------------------------------------------------------------------------------

pub struct BitStreamIter<'a> {
    stream: &'a BitStream,
    cursor: usize,
}

impl Iterator for BitStreamIter<'_> {
    type Item = bool;
    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.stream.len {
            return None;
        }
        let byte = self.stream.data[self.cursor >> 3];
        let bit = byte & (0b10000000 >> (self.cursor & 7)) != 0;
        self.cursor += 1;
        Some(bit)
    }
}

impl<'a> IntoIterator for &'a BitStream {
    type Item = bool;
    type IntoIter = BitStreamIter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        BitStreamIter { stream: self, cursor: 0 }
    }
}
