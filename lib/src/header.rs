#![allow(clippy::len_without_is_empty)]

use crate::constants::*;
use crate::cursor::{ReadCursor, WriteCursor};
use crate::error::ParsePacketErr;

pub type TransId = [u8; TRANS_ID_LEN];

// rfc 3489, 11.1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub msg_type: u16,

    // 不包括header的20字节
    pub msg_len: u16,

    pub trans_id: TransId,
}

impl Header {
    pub fn new(msg_type: u16, msg_len: u16, trans_id: TransId) -> Self {
        Self {
            msg_type,
            msg_len,
            trans_id,
        }
    }

    pub fn len(&self) -> usize {
        HEADER_LEN
    }

    pub fn pack(&self, cursor: &mut WriteCursor) {
        cursor.put_u16(self.msg_type);
        cursor.put_u16(self.msg_len);
        cursor.put_slice(&self.trans_id);
    }

    pub fn unpack(cursor: &mut ReadCursor) -> Result<Self, ParsePacketErr> {
        // 只检查长度，不检查有效性
        if cursor.remaining() < HEADER_LEN {
            return Err(ParsePacketErr::BufSize(format!(
                "header buf len:{} < {}",
                cursor.remaining(),
                HEADER_LEN
            )));
        }

        let msg_type = cursor.read_u16()?;
        let msg_len = cursor.read_u16()?;

        let mut trans_id = [0_u8; TRANS_ID_LEN];
        trans_id.copy_from_slice(cursor.read_slice(TRANS_ID_LEN)?);

        Ok(Self {
            msg_type,
            msg_len,
            trans_id,
        })
    }

    pub fn validate(&self) -> Result<(), ParsePacketErr> {
        // 检查 stun message type
        match self.msg_type {
            MESSAGE_TYPE_BIND_REQ
            | MESSAGE_TYPE_BIND_RES
            | MESSAGE_TYPE_BIND_ERR_RES
            | MESSAGE_TYPE_SHARED_SECRET_REQ
            | MESSAGE_TYPE_SHARED_SECRET_RES
            | MESSAGE_TYPE_SHARED_SECRET_ERR_RES => Ok(()),
            v => Err(ParsePacketErr::BadValue(format!(
                "not support message type: {}",
                v
            ))),
        }
    }
}
