use std::net::SocketAddr;

use bytes::Bytes;

use crate::attrs::Attr;
use crate::constants::{ATTR_CHANGED_ADDRESS, ATTR_OTHER_ADDRESS, HEADER_LEN, MAX_ATTRS, MSG_LEN_OFFSET};
use crate::cursor::{ReadCursor, WriteCursor};
use crate::error::ParsePacketErr;
use crate::header::Header;

// 是否是一个正确的stun包
// 验证message length和attribute的边界对齐
// 不认识的attribute按声明长度跳过

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub header: Header,
    pub attrs: Vec<Attr>,
}

impl Packet {
    pub fn new(header: Header, attrs: Vec<Attr>) -> Self {
        let mut packet = Self { header, attrs };
        packet.update_header_len();
        packet
    }

    fn update_header_len(&mut self) {
        let total = self.attrs.iter().fold(0_usize, |acc, x| acc + x.len());
        self.header.msg_len = total as u16;
    }

    pub fn add_attr(&mut self, attr: Attr) {
        self.attrs.push(attr);
        self.update_header_len();
    }

    pub fn pack(&self) -> Bytes {
        let mut cursor = WriteCursor::new();
        self.header.pack(&mut cursor);
        for v in self.attrs.iter() {
            v.pack(&mut cursor);
        }

        // 回填header里的body长度
        let body_len = cursor.len() - HEADER_LEN;
        cursor.patch_u16(MSG_LEN_OFFSET, body_len as u16);

        cursor.freeze()
    }

    pub fn unpack(buf_bytes: Bytes) -> Result<Self, ParsePacketErr> {
        let mut cursor = ReadCursor::new(&buf_bytes);
        let header = Header::unpack(&mut cursor)?;

        if header.msg_len as usize != cursor.remaining() {
            return Err(ParsePacketErr::NotMatch(format!(
                "header len:{} != {}",
                header.msg_len,
                cursor.remaining()
            )));
        }

        let body_end = cursor.pos() + header.msg_len as usize;
        let mut attr_list = vec![];
        let mut attr_count = 0_usize;

        while cursor.pos() < body_end {
            if attr_count == MAX_ATTRS {
                return Err(ParsePacketErr::TooManyAttrs);
            }
            attr_count += 1;

            if body_end - cursor.pos() < 4 {
                return Err(ParsePacketErr::NotMatch(format!(
                    "attr header straddles body end at {}",
                    cursor.pos()
                )));
            }

            let attr_type = cursor.read_u16()?;
            let attr_len = cursor.read_u16()? as usize;

            if cursor.pos() + attr_len > body_end {
                return Err(ParsePacketErr::BufSize(format!(
                    "attr len:{} > remaining:{}",
                    attr_len,
                    body_end - cursor.pos()
                )));
            }

            let body_start = cursor.pos();
            if let Some(attr) = Attr::unpack(attr_type, attr_len, &mut cursor, &header.trans_id)? {
                attr_list.push(attr);
            }

            if cursor.pos() - body_start != attr_len {
                return Err(ParsePacketErr::NotMatch(format!(
                    "attr type:{:#06x} consumed {} != declared {}",
                    attr_type,
                    cursor.pos() - body_start,
                    attr_len
                )));
            }
        }

        Ok(Self {
            header,
            attrs: attr_list,
        })
    }

    pub fn validate(&self) -> Result<(), ParsePacketErr> {
        self.header.validate()
    }

    // 按类型码取第一个地址类attribute
    pub fn address(&self, attr_type: u16) -> Option<SocketAddr> {
        self.attrs.iter().find_map(|a| match a {
            Attr::Address(v) if v.attr_type == attr_type => Some(v.address),
            _ => None,
        })
    }

    pub fn xor_mapped_address(&self) -> Option<SocketAddr> {
        self.attrs.iter().find_map(|a| match a {
            Attr::XorMappedAddress(v) => Some(v.address),
            _ => None,
        })
    }

    // other-address优先，老服务器只发changed-address
    pub fn other_address(&self) -> Option<SocketAddr> {
        self.address(ATTR_OTHER_ADDRESS)
            .or_else(|| self.address(ATTR_CHANGED_ADDRESS))
    }

    pub fn error_code(&self) -> Option<(u16, &str)> {
        self.attrs.iter().find_map(|a| match a {
            Attr::ErrorCode(v) => Some((v.code, v.phrase.as_str())),
            _ => None,
        })
    }
}
