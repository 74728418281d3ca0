use bytes::{BufMut, Bytes, BytesMut};

use crate::error::ParsePacketErr;

// 网络字节序只在这里转换

pub struct ReadCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ReadCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], ParsePacketErr> {
        if self.remaining() < n {
            return Err(ParsePacketErr::BufSize(format!(
                "need {} bytes at {}, have {}",
                n,
                self.pos,
                self.remaining()
            )));
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, ParsePacketErr> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, ParsePacketErr> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, ParsePacketErr> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_slice(&mut self, n: usize) -> Result<&'a [u8], ParsePacketErr> {
        self.take(n)
    }

    // 跳过未知attribute的body
    pub fn skip(&mut self, n: usize) -> Result<(), ParsePacketErr> {
        self.take(n).map(|_| ())
    }
}

pub struct WriteCursor {
    buf: BytesMut,
}

impl WriteCursor {
    pub fn new() -> Self {
        Self {
            buf: BytesMut::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn put_u8(&mut self, v: u8) {
        self.buf.put_u8(v);
    }

    pub fn put_u16(&mut self, v: u16) {
        self.buf.put_u16(v);
    }

    pub fn put_u32(&mut self, v: u32) {
        self.buf.put_u32(v);
    }

    pub fn put_slice(&mut self, v: &[u8]) {
        self.buf.put_slice(v);
    }

    // 回填之前写入的长度占位
    pub fn patch_u16(&mut self, pos: usize, v: u16) {
        self.buf[pos..pos + 2].copy_from_slice(&v.to_be_bytes());
    }

    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }
}

impl Default for WriteCursor {
    fn default() -> Self {
        Self::new()
    }
}
