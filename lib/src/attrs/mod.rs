#![allow(clippy::len_without_is_empty)]

use bytes::Bytes;

use crate::constants::*;
use crate::cursor::{ReadCursor, WriteCursor};
use crate::error::ParsePacketErr;
use crate::header::TransId;

pub mod address_attr;
pub mod change_request;
pub mod errcode_attr;
pub mod text_attr;
pub mod unknown_attrs;
pub mod xor_address;

pub use address_attr::AddressAttr;
pub use change_request::ChangeRequest;
pub use errcode_attr::ErrcodeAttr;
pub use text_attr::TextAttr;
pub use unknown_attrs::UnknownAttrs;
pub use xor_address::XorMappedAddress;

// message-integrity / fingerprint，内容不解释
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueAttr {
    pub attr_type: u16,
    pub value: Bytes,
}

impl OpaqueAttr {
    pub fn new(attr_type: u16, value: Bytes) -> Self {
        Self { attr_type, value }
    }
}

// 每个支持的attribute一个变体，类型码相同body形状也相同的共用一个
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attr {
    Address(AddressAttr),
    XorMappedAddress(XorMappedAddress),
    ChangeRequest(ChangeRequest),
    ErrorCode(ErrcodeAttr),
    Text(TextAttr),
    UnknownAttributes(UnknownAttrs),
    Opaque(OpaqueAttr),
}

impl Attr {
    pub fn attr_type(&self) -> u16 {
        match self {
            Attr::Address(v) => v.attr_type,
            Attr::XorMappedAddress(_) => ATTR_XOR_MAPPED_ADDRESS,
            Attr::ChangeRequest(_) => ATTR_CHANGE_REQUEST,
            Attr::ErrorCode(_) => ATTR_ERROR_CODE,
            Attr::Text(v) => v.attr_type,
            Attr::UnknownAttributes(_) => ATTR_UNKNOWN_ATTRIBUTES,
            Attr::Opaque(v) => v.attr_type,
        }
    }

    pub fn body_len(&self) -> usize {
        match self {
            Attr::Address(v) => v.body_len(),
            Attr::XorMappedAddress(v) => v.body_len(),
            Attr::ChangeRequest(v) => v.body_len(),
            Attr::ErrorCode(v) => v.body_len(),
            Attr::Text(v) => v.body_len(),
            Attr::UnknownAttributes(v) => v.body_len(),
            Attr::Opaque(v) => v.value.len(),
        }
    }

    // tlv全长
    pub fn len(&self) -> usize {
        self.body_len() + 4
    }

    pub fn pack(&self, cursor: &mut WriteCursor) {
        cursor.put_u16(self.attr_type());

        // 长度占位，body写完后回填
        let len_pos = cursor.len();
        cursor.put_u16(0);
        let body_start = cursor.len();

        match self {
            Attr::Address(v) => v.pack_body(cursor),
            Attr::XorMappedAddress(v) => v.pack_body(cursor),
            Attr::ChangeRequest(v) => v.pack_body(cursor),
            Attr::ErrorCode(v) => v.pack_body(cursor),
            Attr::Text(v) => v.pack_body(cursor),
            Attr::UnknownAttributes(v) => v.pack_body(cursor),
            Attr::Opaque(v) => cursor.put_slice(&v.value),
        }

        let body_len = cursor.len() - body_start;
        cursor.patch_u16(len_pos, body_len as u16);
    }

    // 类型码到构造器的分发表。不认识的类型跳过body，返回None。
    pub fn unpack(
        attr_type: u16,
        len: usize,
        cursor: &mut ReadCursor,
        trans_id: &TransId,
    ) -> Result<Option<Attr>, ParsePacketErr> {
        let attr = match attr_type {
            ATTR_MAPPED_ADDRESS
            | ATTR_RESPONSE_ADDRESS
            | ATTR_SOURCE_ADDRESS
            | ATTR_CHANGED_ADDRESS
            | ATTR_REFLECTED_FROM
            | ATTR_ALTERNATE_SERVER
            | ATTR_OTHER_ADDRESS
            | ATTR_RESPONSE_ORIGIN => Attr::Address(AddressAttr::unpack(attr_type, cursor)?),
            ATTR_XOR_MAPPED_ADDRESS => {
                Attr::XorMappedAddress(XorMappedAddress::unpack(cursor, trans_id)?)
            }
            ATTR_CHANGE_REQUEST => Attr::ChangeRequest(ChangeRequest::unpack(cursor)?),
            ATTR_ERROR_CODE => Attr::ErrorCode(ErrcodeAttr::unpack(len, cursor)?),
            ATTR_USERNAME | ATTR_PASSWORD | ATTR_SOFTWARE => {
                Attr::Text(TextAttr::unpack(attr_type, len, cursor)?)
            }
            ATTR_UNKNOWN_ATTRIBUTES => Attr::UnknownAttributes(UnknownAttrs::unpack(len, cursor)?),
            ATTR_MESSAGE_INTEGRITY | ATTR_FINGERPRINT => Attr::Opaque(OpaqueAttr::new(
                attr_type,
                Bytes::copy_from_slice(cursor.read_slice(len)?),
            )),
            _ => {
                cursor.skip(len)?;
                return Ok(None);
            }
        };

        Ok(Some(attr))
    }
}

impl From<AddressAttr> for Attr {
    fn from(v: AddressAttr) -> Self {
        Attr::Address(v)
    }
}

impl From<XorMappedAddress> for Attr {
    fn from(v: XorMappedAddress) -> Self {
        Attr::XorMappedAddress(v)
    }
}

impl From<ChangeRequest> for Attr {
    fn from(v: ChangeRequest) -> Self {
        Attr::ChangeRequest(v)
    }
}

impl From<ErrcodeAttr> for Attr {
    fn from(v: ErrcodeAttr) -> Self {
        Attr::ErrorCode(v)
    }
}

impl From<TextAttr> for Attr {
    fn from(v: TextAttr) -> Self {
        Attr::Text(v)
    }
}

impl From<UnknownAttrs> for Attr {
    fn from(v: UnknownAttrs) -> Self {
        Attr::UnknownAttributes(v)
    }
}

impl From<OpaqueAttr> for Attr {
    fn from(v: OpaqueAttr) -> Self {
        Attr::Opaque(v)
    }
}
