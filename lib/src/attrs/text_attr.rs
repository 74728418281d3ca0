use crate::cursor::{ReadCursor, WriteCursor};
use crate::error::ParsePacketErr;

// username / password / software

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextAttr {
    pub attr_type: u16,
    pub text: String,
}

impl TextAttr {
    pub fn new(attr_type: u16, text: &str) -> Self {
        Self {
            attr_type,
            text: text.to_string(),
        }
    }

    pub fn body_len(&self) -> usize {
        self.text.len()
    }

    pub fn pack_body(&self, cursor: &mut WriteCursor) {
        cursor.put_slice(self.text.as_bytes());
    }

    pub fn unpack(attr_type: u16, len: usize, cursor: &mut ReadCursor) -> Result<Self, ParsePacketErr> {
        let text = match std::str::from_utf8(cursor.read_slice(len)?) {
            Ok(v) => v.to_string(),
            Err(_e) => {
                return Err(ParsePacketErr::NotUtf8);
            }
        };

        Ok(Self { attr_type, text })
    }
}
