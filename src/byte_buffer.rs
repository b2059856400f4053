const MSB_MASK: u64 = 0x8080_8080_8080_8080;
const LSB_MASK: u64 = 0x0101_0101_0101_0101;

/// Sets the high bit of every byte in `chunk` equal to the byte repeated in `repeat`.
#[inline(always)]
fn swar_matches(chunk: u64, repeat: u64) -> u64 {
    let xored = chunk ^ repeat;
    xored.wrapping_sub(LSB_MASK) & !xored & MSB_MASK
}

pub trait ByteBuffer {
    /// Index of the first `needle`, scanning eight bytes at a time.
    fn byte_position(&self, needle: u8) -> Option<usize>;

    /// Splits a line at the first `delimiter`, dropping the delimiter itself.
    fn split_record(&self, delimiter: u8) -> Option<(&[u8], &[u8])>;

    /// Strips a single trailing `\r`.
    fn trim_cr(&self) -> &[u8];
}

impl ByteBuffer for [u8] {
    #[inline(always)]
    fn byte_position(&self, needle: u8) -> Option<usize> {
        let repeat = LSB_MASK * needle as u64;

        let mut chunks = self.chunks_exact(8);
        let mut offset = 0;
        for chunk in chunks.by_ref() {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);

            let matching_bytes = swar_matches(u64::from_le_bytes(word), repeat);
            if matching_bytes != 0 {
                return Some(offset + (matching_bytes.trailing_zeros() / 8) as usize);
            }

            offset += 8;
        }

        chunks
            .remainder()
            .iter()
            .position(|&b| b == needle)
            .map(|j| offset + j)
    }

    #[inline(always)]
    fn split_record(&self, delimiter: u8) -> Option<(&[u8], &[u8])> {
        let pos = self.byte_position(delimiter)?;
        Some((&self[..pos], &self[pos + 1..]))
    }

    #[inline(always)]
    fn trim_cr(&self) -> &[u8] {
        match self.split_last() {
            Some((b'\r', rest)) => rest,
            _ => self,
        }
    }
}

/// Iterator over `\n`-terminated lines; the final line may lack its terminator.
pub struct Lines<'a> {
    buf: &'a [u8],
}

impl<'a> Lines<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a [u8];

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.buf.is_empty() {
            return None;
        }

        match self.buf.byte_position(b'\n') {
            Some(nl) => {
                let line = &self.buf[..nl];
                self.buf = &self.buf[nl + 1..];
                Some(line)
            }
            None => {
                let line = self.buf;
                self.buf = &[];
                Some(line)
            }
        }
    }
}

/// Cuts `buf` into at most `parts` contiguous regions that each end on a line boundary.
///
/// Region boundaries are picked at even byte offsets and then pulled back to just
/// after the preceding newline. Empty regions are dropped, so fewer than `parts`
/// may be returned for small inputs.
pub fn split_regions(buf: &[u8], parts: usize) -> Vec<&[u8]> {
    let parts = parts.max(1);
    let mut regions = Vec::with_capacity(parts);

    let mut start = 0;
    for i in 1..parts {
        let target = (buf.len() / parts) * i;
        if target <= start {
            continue;
        }

        let end = match buf[start..target].iter().rposition(|&b| b == b'\n') {
            Some(nl) => start + nl + 1,
            None => continue,
        };

        regions.push(&buf[start..end]);
        start = end;
    }

    if start < buf.len() {
        regions.push(&buf[start..]);
    }

    regions
}
