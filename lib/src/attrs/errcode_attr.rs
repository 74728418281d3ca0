use crate::cursor::{ReadCursor, WriteCursor};
use crate::error::ParsePacketErr;

// class:  3 bit        3-6
// number: 8 bit        0-99
// code = class * 100 + number

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrcodeAttr {
    pub code: u16,
    pub phrase: String,
}

impl ErrcodeAttr {
    pub fn new(code: u16, phrase: &str) -> Self {
        Self {
            code,
            phrase: phrase.to_string(),
        }
    }

    pub fn body_len(&self) -> usize {
        4 + self.phrase.len()
    }

    pub fn pack_body(&self, cursor: &mut WriteCursor) {
        cursor.put_u16(0);
        cursor.put_u8((self.code / 100) as u8);
        cursor.put_u8((self.code % 100) as u8);
        cursor.put_slice(self.phrase.as_bytes());
    }

    pub fn unpack(len: usize, cursor: &mut ReadCursor) -> Result<Self, ParsePacketErr> {
        if len < 4 {
            return Err(ParsePacketErr::BufSize(format!(
                "err_code attr buf len:{} < 4",
                len
            )));
        }

        // 2字节保留
        cursor.read_u16()?;

        let class = cursor.read_u8()? & 0x07;
        if !(3..=6).contains(&class) {
            return Err(ParsePacketErr::BadValue(format!("error class: {}", class)));
        }

        let number = cursor.read_u8()?;
        if number > 99 {
            return Err(ParsePacketErr::BadValue(format!("error number: {}", number)));
        }

        let phrase = cursor.read_slice(len - 4)?;
        let phrase = match std::str::from_utf8(phrase) {
            Ok(v) => v.to_string(),
            Err(_e) => {
                return Err(ParsePacketErr::NotUtf8);
            }
        };

        Ok(Self {
            code: class as u16 * 100 + number as u16,
            phrase,
        })
    }
}
