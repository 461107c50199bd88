//! Flat, bounds-checked storage for composed glyph cells.

use super::RenderError;

/// Byte buffer holding `glyph_count` cells of `rows * pitch` bytes each.
///
/// Cells are concatenated in ascending code order and each cell is stored
/// row-major. Every access goes through [`MatrixBuffer::offset`], which
/// rejects any address outside the addressed glyph's own region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixBuffer {
    data: Vec<u8>,
    glyph_count: usize,
    rows: usize,
    pitch: usize,
}

impl MatrixBuffer {
    /// Allocates a zero-filled buffer.
    ///
    /// Allocation failure is reported instead of aborting the process.
    pub fn zeroed(glyph_count: usize, rows: usize, pitch: usize) -> Result<Self, RenderError> {
        let size = glyph_count
            .checked_mul(rows)
            .and_then(|n| n.checked_mul(pitch))
            .ok_or(RenderError::Allocation { bytes: usize::MAX })?;

        let mut data = Vec::new();
        data.try_reserve_exact(size)
            .map_err(|_| RenderError::Allocation { bytes: size })?;
        data.resize(size, 0);

        Ok(Self {
            data,
            glyph_count,
            rows,
            pitch,
        })
    }

    /// Number of glyph cells.
    pub fn glyph_count(&self) -> usize {
        self.glyph_count
    }

    /// Rows per glyph cell.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Bytes per row.
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    /// Bytes per glyph cell.
    pub fn glyph_bytes(&self) -> usize {
        self.rows * self.pitch
    }

    /// Total size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Resolves `(glyph, row, byte)` to an index into the flat buffer.
    pub fn offset(&self, glyph: usize, row: usize, byte: usize) -> Result<usize, RenderError> {
        if glyph >= self.glyph_count || row >= self.rows || byte >= self.pitch {
            return Err(RenderError::OutOfBounds { glyph, row, byte });
        }
        Ok(glyph * self.glyph_bytes() + row * self.pitch + byte)
    }

    /// Reads one byte.
    pub fn byte(&self, glyph: usize, row: usize, byte: usize) -> Result<u8, RenderError> {
        let idx = self.offset(glyph, row, byte)?;
        Ok(self.data[idx])
    }

    /// ORs `mask` into one byte. Bits are only ever set, never cleared.
    pub fn set_bits(
        &mut self,
        glyph: usize,
        row: usize,
        byte: usize,
        mask: u8,
    ) -> Result<(), RenderError> {
        let idx = self.offset(glyph, row, byte)?;
        self.data[idx] |= mask;
        Ok(())
    }

    /// The bytes of one glyph cell.
    pub fn glyph(&self, glyph: usize) -> Option<&[u8]> {
        if glyph >= self.glyph_count {
            return None;
        }
        let start = glyph * self.glyph_bytes();
        self.data.get(start..start + self.glyph_bytes())
    }

    /// The bytes of one row of one glyph cell.
    pub fn row(&self, glyph: usize, row: usize) -> Option<&[u8]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.pitch;
        self.glyph(glyph)?.get(start..start + self.pitch)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_size() {
        let buf = MatrixBuffer::zeroed(95, 36, 2).unwrap();
        assert_eq!(buf.len(), 95 * 36 * 2);
        assert_eq!(buf.glyph_bytes(), 72);
        assert!(buf.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_offset_bounds() {
        let buf = MatrixBuffer::zeroed(3, 4, 2).unwrap();
        assert_eq!(buf.offset(0, 0, 0).unwrap(), 0);
        assert_eq!(buf.offset(1, 0, 0).unwrap(), 8);
        assert_eq!(buf.offset(2, 3, 1).unwrap(), 23);

        assert!(matches!(
            buf.offset(3, 0, 0),
            Err(RenderError::OutOfBounds { glyph: 3, row: 0, byte: 0 })
        ));
        assert!(buf.offset(0, 4, 0).is_err());
        // a byte past the row end must not spill into the next row
        assert!(buf.offset(0, 0, 2).is_err());
    }

    #[test]
    fn test_set_bits_ors() {
        let mut buf = MatrixBuffer::zeroed(2, 2, 1).unwrap();
        buf.set_bits(1, 1, 0, 0x80).unwrap();
        buf.set_bits(1, 1, 0, 0x01).unwrap();
        buf.set_bits(1, 1, 0, 0x80).unwrap();
        assert_eq!(buf.byte(1, 1, 0).unwrap(), 0x81);
        assert_eq!(buf.row(1, 1), Some(&[0x81][..]));
        assert_eq!(buf.glyph(0), Some(&[0, 0][..]));
        assert_eq!(buf.glyph(2), None);
        assert!(buf.set_bits(2, 0, 0, 0xFF).is_err());
    }

    #[test]
    fn test_glyph_slices() {
        let mut buf = MatrixBuffer::zeroed(3, 1, 1).unwrap();
        buf.set_bits(2, 0, 0, 0xAA).unwrap();
        assert_eq!(buf.glyph(0), Some(&[0u8][..]));
        assert_eq!(buf.glyph(2), Some(&[0xAAu8][..]));
        assert_eq!(buf.glyph(3), None);
    }

    #[test]
    fn test_overflowing_size_is_allocation_error() {
        let result = MatrixBuffer::zeroed(usize::MAX, 2, 2);
        assert!(matches!(result, Err(RenderError::Allocation { .. })));
    }
}
