//! LUT table parsing and building

use crate::lut::error::{LutError, Result};
use binrw::{BinRead, BinWrite};
use std::io::Cursor;
use tracing::warn;

/// Number of LUT entries, one per valid sample value 128-255
pub const LUT_ENTRIES: usize = 128;

/// Color channels kept per entry
pub const LUT_CHANNELS: usize = 3;

/// u16 words stored per entry on disk
pub const LUT_DISK_CHANNELS: usize = 4;

/// Size of a LUT file in bytes
pub const LUT_SIZE: usize = LUT_ENTRIES * LUT_DISK_CHANNELS * 2;

/// One on-disk LUT row: four little-endian u16 words
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
struct LutRow {
    red: u16,
    green: u16,
    blue: u16,
    /// Unused channel, zero on write, ignored on read
    reserved: u16,
}

/// 128-entry RGB lookup table
///
/// Entry `i` colors sample value `128 + i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lut {
    entries: [[u8; LUT_CHANNELS]; LUT_ENTRIES],
}

impl Lut {
    /// Create a table from its entries
    pub fn new(entries: [[u8; LUT_CHANNELS]; LUT_ENTRIES]) -> Self {
        Self { entries }
    }

    /// Create a table from a slice of exactly 128 RGB rows
    pub fn from_rows(rows: &[[u8; LUT_CHANNELS]]) -> Result<Self> {
        let entries: [[u8; LUT_CHANNELS]; LUT_ENTRIES] =
            rows.try_into().map_err(|_| LutError::InvalidShape {
                expected: LUT_ENTRIES * LUT_CHANNELS,
                actual: rows.len() * LUT_CHANNELS,
            })?;
        Ok(Self { entries })
    }

    /// Create a table from 384 row-major values (R, G, B per entry)
    pub fn from_flat(values: &[u8]) -> Result<Self> {
        if values.len() != LUT_ENTRIES * LUT_CHANNELS {
            return Err(LutError::InvalidShape {
                expected: LUT_ENTRIES * LUT_CHANNELS,
                actual: values.len(),
            });
        }

        let mut entries = [[0u8; LUT_CHANNELS]; LUT_ENTRIES];
        for (entry, rgb) in entries.iter_mut().zip(values.chunks_exact(LUT_CHANNELS)) {
            entry.copy_from_slice(rgb);
        }
        Ok(Self { entries })
    }

    /// Linear grayscale ramp from black (sample 128) to white (sample 255)
    pub fn default_grayscale() -> Self {
        let mut entries = [[0u8; LUT_CHANNELS]; LUT_ENTRIES];
        for (i, entry) in entries.iter_mut().enumerate() {
            // Rounded i * 255 / 127, never above 255
            let level = ((i * 255 * 2 + 127) / (127 * 2)) as u8;
            *entry = [level; LUT_CHANNELS];
        }
        Self { entries }
    }

    /// All entries in order
    pub fn entries(&self) -> &[[u8; LUT_CHANNELS]; LUT_ENTRIES] {
        &self.entries
    }

    /// Color for a sample value, `None` for reserved values below 128
    pub fn color(&self, sample: u8) -> Option<[u8; LUT_CHANNELS]> {
        let index = usize::from(sample).checked_sub(LUT_ENTRIES)?;
        self.entries.get(index).copied()
    }

    /// Parse a LUT from exactly 1024 bytes
    ///
    /// Each stored u16 is narrowed to its low byte; the fourth word of every
    /// row is discarded.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() != LUT_SIZE {
            return Err(LutError::MalformedLut {
                expected: LUT_SIZE,
                actual: data.len(),
            });
        }

        let mut cursor = Cursor::new(data);
        let mut entries = [[0u8; LUT_CHANNELS]; LUT_ENTRIES];
        let mut wide_values = 0usize;
        for entry in &mut entries {
            let row = LutRow::read_options(&mut cursor, binrw::Endian::Little, ())
                .map_err(LutError::from)?;
            let channels = [row.red, row.green, row.blue];
            wide_values += channels.iter().filter(|&&v| v > 0xFF).count();
            *entry = channels.map(|v| v as u8);
        }

        if wide_values > 0 {
            warn!(
                "LUT holds {} channel value(s) above 255, high bytes discarded",
                wide_values
            );
        }

        Ok(Self { entries })
    }

    /// Build the 1024-byte on-disk form
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::with_capacity(LUT_SIZE);
        let mut cursor = Cursor::new(&mut buffer);

        for &[red, green, blue] in &self.entries {
            let row = LutRow {
                red: u16::from(red),
                green: u16::from(green),
                blue: u16::from(blue),
                reserved: 0,
            };
            row.write_options(&mut cursor, binrw::Endian::Little, ())
                .map_err(|e| LutError::BinWrite(e.to_string()))?;
        }

        Ok(buffer)
    }
}

impl Default for Lut {
    fn default() -> Self {
        Self::default_grayscale()
    }
}

impl crate::CtxFormat for Lut {
    fn parse(data: &[u8]) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        Self::parse(data).map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
    }

    fn build(&self) -> std::result::Result<Vec<u8>, Box<dyn std::error::Error>> {
        self.build()
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
    }
}
