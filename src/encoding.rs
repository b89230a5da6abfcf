use thiserror::Error;

/// Column count used when the caller does not pick one.
pub const DEFAULT_COLS: usize = 10;

/// Number of bits drawn for every character on a tile page.
pub const PATTERN_BITS: usize = 16;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unsupported character: '{0}' (U+{1:04X}) is outside the Basic Multilingual Plane")]
    Unsupported(char, u32),
}

/// Row-major matrix of Unicode code points with a fixed column count.
///
/// A cell holding `0` is empty: it pads the last row and is never printed.
/// Padding is implied by `len` and never stored, so a very wide grid costs no
/// more memory than its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodePointGrid {
    cols: usize,
    len: usize,
    points: Vec<u32>,
}

impl CodePointGrid {
    /// Create a grid of `rows × cols` empty cells.
    pub fn zeroed(rows: usize, cols: usize) -> Result<Self, EncodeError> {
        check_cols(cols)?;
        let len = rows.checked_mul(cols).ok_or_else(|| too_large(rows, cols))?;
        Ok(Self {
            cols,
            len,
            points: Vec::new(),
        })
    }

    /// Lay out the code points of `text` in rows of `cols` cells, padding the
    /// last row with zeros.
    pub fn from_text(text: &str, cols: usize) -> Result<Self, EncodeError> {
        let points: Vec<u32> = text.chars().map(u32::from).collect();
        Self::from_cells(points, cols)
    }

    /// Build a grid from a flat run of cells, zero-padding to a full row.
    pub fn from_cells(points: Vec<u32>, cols: usize) -> Result<Self, EncodeError> {
        check_cols(cols)?;
        let rows = points.len().div_ceil(cols);
        let len = rows.checked_mul(cols).ok_or_else(|| too_large(rows, cols))?;
        Ok(Self { cols, len, points })
    }

    pub fn rows(&self) -> usize {
        self.len / self.cols
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells, padding included.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        let idx = self.index(row, col)?;
        Some(self.points.get(idx).copied().unwrap_or(0))
    }

    pub fn set(&mut self, row: usize, col: usize, value: u32) -> Result<(), EncodeError> {
        let idx = self.index(row, col).ok_or_else(|| {
            EncodeError::InvalidArgument(format!(
                "cell ({row}, {col}) is outside a {}x{} grid",
                self.rows(),
                self.cols
            ))
        })?;
        if idx >= self.points.len() {
            self.points.resize(idx + 1, 0);
        }
        self.points[idx] = value;
        Ok(())
    }

    /// Stored cells in row-major order, without the trailing padding.
    pub fn code_points(&self) -> &[u32] {
        &self.points
    }

    /// Every cell in row-major order, padding included.
    pub fn cells(&self) -> impl Iterator<Item = u32> + '_ {
        let padding = self.len.saturating_sub(self.points.len());
        self.points
            .iter()
            .copied()
            .chain(std::iter::repeat_n(0, padding))
    }

    /// Cells of one row; empty when `row` is out of range.
    pub fn row_cells(&self, row: usize) -> impl Iterator<Item = u32> + '_ {
        let cols = if row < self.rows() { self.cols } else { 0 };
        (0..cols).map(move |col| self.get(row, col).unwrap_or(0))
    }

    /// Recover the encoded text, dropping empty cells.
    pub fn to_text(&self) -> String {
        self.points
            .iter()
            .filter(|&&cp| cp != 0)
            .filter_map(|&cp| char::from_u32(cp))
            .collect()
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if col >= self.cols {
            return None;
        }
        let idx = row.checked_mul(self.cols)?.checked_add(col)?;
        (idx < self.len).then_some(idx)
    }
}

fn check_cols(cols: usize) -> Result<(), EncodeError> {
    if cols == 0 {
        return Err(EncodeError::InvalidArgument(
            "column count must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn too_large(rows: usize, cols: usize) -> EncodeError {
    EncodeError::InvalidArgument(format!("a {rows}x{cols} grid is too large to address"))
}

/// Sixteen bits of one character's big-endian UTF-16 code unit.
///
/// Bit 0 is the most significant bit of the first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitPattern(pub u16);

impl BitPattern {
    /// Encode a character from the Basic Multilingual Plane.
    pub fn encode(ch: char) -> Result<Self, EncodeError> {
        let mut units = [0u16; 2];
        match ch.encode_utf16(&mut units) {
            [unit] => Ok(BitPattern(*unit)),
            _ => Err(EncodeError::Unsupported(ch, ch as u32)),
        }
    }

    /// The two data bytes, big-endian, no byte-order mark.
    pub fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    /// Bits in drawing order, most significant first.
    pub fn bits(self) -> [bool; PATTERN_BITS] {
        let mut out = [false; PATTERN_BITS];
        for (idx, bit) in out.iter_mut().enumerate() {
            *bit = (self.0 >> (PATTERN_BITS - 1 - idx)) & 1 == 1;
        }
        out
    }

    pub fn from_bits(bits: &[bool; PATTERN_BITS]) -> Self {
        let value = bits
            .iter()
            .fold(0u16, |acc, &bit| (acc << 1) | u16::from(bit));
        BitPattern(value)
    }

    /// Decode back into a character; lone surrogates yield `None`.
    pub fn to_char(self) -> Option<char> {
        char::from_u32(u32::from(self.0))
    }
}

/// Reject the first character that cannot be drawn as a single tile.
pub fn ensure_tileable(text: &str) -> Result<(), EncodeError> {
    for ch in text.chars() {
        BitPattern::encode(ch)?;
    }
    Ok(())
}
