use std::convert::TryInto;
use std::num::NonZeroU32;

use bytes::{Buf, BytesMut};

use crate::riverdb::{Error, Result};
use crate::riverdb::pg::protocol::{Messages, Tag};

/// Number of bytes needed to commit to a tagged header: one tag byte plus a 4-byte
/// length field. Untagged startup-class messages (no tag byte on the wire) are parsed
/// by a separate path in `startup.rs`, not by `MessageParser`.
pub const HEADER_LEN: u32 = 5;

#[derive(Copy, Clone)]
pub struct Header {
    pub tag: Tag,
    pub length: NonZeroU32,
}

impl Header {
    /// Parses a tagged message header from the front of `bytes`. Returns `Ok(None)` if
    /// `bytes` doesn't yet hold a complete header (a partial read), not an error.
    pub fn parse(bytes: &[u8]) -> Result<Option<Self>> {
        if (bytes.len() as u32) < HEADER_LEN {
            return Ok(None);
        }
        let tag = Tag::new(bytes[0])?;
        let len = u32::from_be_bytes(bytes[1..5].try_into().unwrap());
        let length = NonZeroU32::new(len)
            .ok_or_else(|| Error::protocol("message length field cannot be 0"))?;
        Ok(Some(Header { tag, length }))
    }

    /// Total on-wire size of the message this header describes, tag byte included.
    pub fn len(&self) -> u32 {
        self.length.get() + 1
    }
}

/// Incremental parser over a growable receive buffer. Feed bytes in via `bytes_mut()`,
/// then call `next()` until it returns `None` to drain every complete message currently
/// buffered; any partial trailing message is left in place for the next read.
pub struct MessageParser {
    data: BytesMut,
}

impl MessageParser {
    pub fn new() -> Self {
        Self::with_capacity(8 * 1024)
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self { data: BytesMut::with_capacity(cap) }
    }

    /// Returns the next complete message in the buffer, or `None` if only a partial
    /// message (or nothing) remains. A parse error (bad tag, zero length) is terminal
    /// for the connection.
    pub fn next(&mut self) -> Option<Result<Messages>> {
        match Header::parse(self.data.chunk()) {
            Err(e) => Some(Err(e)),
            Ok(None) => None,
            Ok(Some(hdr)) => {
                let msg_len = hdr.len() as usize;
                if msg_len <= self.data.len() {
                    let msg = self.data.split_to(msg_len).freeze();
                    Some(Ok(Messages::new(msg)))
                } else {
                    self.data.reserve(msg_len - self.data.len());
                    None
                }
            }
        }
    }

    pub fn bytes_mut(&mut self) -> &mut BytesMut {
        &mut self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Default for MessageParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BufMut;

    #[test]
    fn parses_one_complete_message() {
        let mut p = MessageParser::new();
        p.bytes_mut().put_u8(b'Z');
        p.bytes_mut().put_i32(5);
        p.bytes_mut().put_u8(b'I');
        let msgs = p.next().unwrap().unwrap();
        assert_eq!(msgs.first().unwrap().tag(), Tag::READY_FOR_QUERY);
        assert!(p.next().is_none());
    }

    #[test]
    fn partial_header_yields_none() {
        let mut p = MessageParser::new();
        p.bytes_mut().put_u8(b'Z');
        p.bytes_mut().put_u8(0);
        assert!(p.next().is_none());
    }

    #[test]
    fn partial_body_yields_none_until_rest_arrives() {
        let mut p = MessageParser::new();
        p.bytes_mut().put_u8(b'Z');
        p.bytes_mut().put_i32(5);
        assert!(p.next().is_none());
        p.bytes_mut().put_u8(b'I');
        assert!(p.next().is_some());
    }
}
