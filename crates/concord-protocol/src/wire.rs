//! Primitive wire encoding shared by the game protocol.
//!
//! Integers are VarInts: 7 bits per byte, least-significant group first,
//! high bit set on every byte except the last. A 32-bit value takes at
//! most five bytes. Strings are a VarInt byte length followed by that
//! many bytes of UTF-8.
//!
//! ```text
//! value        bytes
//! ---------------------------
//! 0            00
//! 127          7f
//! 128          80 01
//! 300          ac 02
//! 2147483647   ff ff ff ff 07
//! ```

use crate::ProtocolError;

/// Longest VarInt encoding of a 32-bit value.
const MAX_VARINT_LEN: usize = 5;

/// Appends `value` as a VarInt.
pub(crate) fn write_varint(out: &mut Vec<u8>, mut value: u32) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// Appends a length-prefixed UTF-8 string of at most `max_chars` characters.
pub(crate) fn write_string(
    out: &mut Vec<u8>,
    s: &str,
    max_chars: usize,
) -> Result<(), ProtocolError> {
    let chars = s.chars().count();
    if chars > max_chars {
        return Err(ProtocolError::StringTooLong {
            len: chars,
            max: max_chars,
        });
    }
    let len = u32::try_from(s.len()).map_err(|_| ProtocolError::StringTooLong {
        len: chars,
        max: max_chars,
    })?;
    write_varint(out, len);
    out.extend_from_slice(s.as_bytes());
    Ok(())
}

/// A cursor over a received buffer. Every read is bounds-checked; running
/// off the end is reported as a malformed payload, never a panic.
pub(crate) struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub(crate) fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8, ProtocolError> {
        let byte = *self.buf.get(self.pos).ok_or_else(|| {
            ProtocolError::MalformedPayload(format!(
                "truncated at byte {}",
                self.pos
            ))
        })?;
        self.pos += 1;
        Ok(byte)
    }

    pub(crate) fn read_bytes(
        &mut self,
        len: usize,
    ) -> Result<&'a [u8], ProtocolError> {
        if len > self.remaining() {
            return Err(ProtocolError::MalformedPayload(format!(
                "truncated: wanted {len} bytes at byte {}, {} left",
                self.pos,
                self.remaining()
            )));
        }
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub(crate) fn read_varint(&mut self) -> Result<u32, ProtocolError> {
        let mut value: u32 = 0;
        for i in 0..MAX_VARINT_LEN {
            let byte = self.read_u8()?;
            value |= u32::from(byte & 0x7f) << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(ProtocolError::MalformedPayload("varint too long".into()))
    }

    /// Reads a VarInt that the game protocol treats as a signed length or
    /// count. Negative values are rejected.
    pub(crate) fn read_len(&mut self) -> Result<usize, ProtocolError> {
        let raw = self.read_varint()?;
        let signed = raw as i32;
        usize::try_from(signed).map_err(|_| {
            ProtocolError::MalformedPayload(format!("negative length {signed}"))
        })
    }

    pub(crate) fn read_string(
        &mut self,
        max_chars: usize,
    ) -> Result<&'a str, ProtocolError> {
        let len = self.read_len()?;
        // A char is at most 4 bytes of UTF-8.
        if len > max_chars.saturating_mul(4) {
            return Err(ProtocolError::MalformedPayload(format!(
                "string of {len} bytes exceeds limit"
            )));
        }
        let bytes = self.read_bytes(len)?;
        let s = std::str::from_utf8(bytes).map_err(|e| {
            ProtocolError::MalformedPayload(format!("invalid utf-8: {e}"))
        })?;
        if s.chars().count() > max_chars {
            return Err(ProtocolError::MalformedPayload(format!(
                "string exceeds {max_chars} characters"
            )));
        }
        Ok(s)
    }
}
