use crate::constants::{CHANGE_IP_FLAG, CHANGE_PORT_FLAG};
use crate::cursor::{ReadCursor, WriteCursor};
use crate::error::ParsePacketErr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRequest {
    pub change_ip: bool,
    pub change_port: bool,
}

impl ChangeRequest {
    pub fn new(change_ip: bool, change_port: bool) -> Self {
        Self {
            change_ip,
            change_port,
        }
    }

    pub fn body_len(&self) -> usize {
        4
    }

    pub fn pack_body(&self, cursor: &mut WriteCursor) {
        let mut flag: u32 = 0;
        if self.change_ip {
            flag |= CHANGE_IP_FLAG;
        }
        if self.change_port {
            flag |= CHANGE_PORT_FLAG;
        }
        cursor.put_u32(flag);
    }

    pub fn unpack(cursor: &mut ReadCursor) -> Result<Self, ParsePacketErr> {
        let flag = cursor.read_u32()?;

        let change_ip = flag & CHANGE_IP_FLAG == CHANGE_IP_FLAG;
        let change_port = flag & CHANGE_PORT_FLAG == CHANGE_PORT_FLAG;
        Ok(Self {
            change_ip,
            change_port,
        })
    }
}
