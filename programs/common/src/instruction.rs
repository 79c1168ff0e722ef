//! Instruction data deserialization helpers
//!
//! All reads are bounds checked and fail with `InvalidArgument`.

use crate::error::BridgeError;

/// Read a u16 (little-endian) from instruction data
#[inline]
fn read_u16(data: &[u8], offset: usize) -> Result<u16, BridgeError> {
    let end = offset.checked_add(2).ok_or(BridgeError::InvalidArgument)?;
    let slice = data.get(offset..end).ok_or(BridgeError::InvalidArgument)?;
    Ok(u16::from_le_bytes([slice[0], slice[1]]))
}

/// Instruction data reader with tracked offset
pub struct InstructionReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> InstructionReader<'a> {
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    #[inline]
    pub fn read_u16(&mut self) -> Result<u16, BridgeError> {
        let val = read_u16(self.data, self.offset)?;
        self.offset += 2;
        Ok(val)
    }

    /// Fail if any bytes were left unread
    #[inline]
    pub fn finish(&self) -> Result<(), BridgeError> {
        if self.offset != self.data.len() {
            return Err(BridgeError::InvalidArgument);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_u16() {
        let data = [0x34, 0x12, 0, 0]; // 0x1234 in little-endian
        assert_eq!(read_u16(&data, 0).unwrap(), 0x1234);
        assert!(read_u16(&data, 3).is_err());
        assert!(read_u16(&data, usize::MAX).is_err());
    }

    #[test]
    fn test_instruction_reader() {
        let data = [0x34, 0x12, 0xCD, 0xAB, 0x01];

        let mut reader = InstructionReader::new(&data);
        assert!(reader.finish().is_err());

        assert_eq!(reader.read_u16().unwrap(), 0x1234);
        assert_eq!(reader.read_u16().unwrap(), 0xABCD);
        // One byte left over
        assert!(reader.finish().is_err());
        assert!(reader.read_u16().is_err());
        assert!(reader.finish().is_err());

        let mut exact = InstructionReader::new(&data[..4]);
        exact.read_u16().unwrap();
        exact.read_u16().unwrap();
        assert!(exact.finish().is_ok());
    }
}
