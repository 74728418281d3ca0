use std::net::SocketAddr;

use crate::attrs::address_attr::{endpoint_len, pack_endpoint, unpack_endpoint};
use crate::cursor::{ReadCursor, WriteCursor};
use crate::error::ParsePacketErr;
use crate::header::TransId;
use crate::util;

// xor-mapped-address 端口和ip需要混淆
// port 和 trans_id 前2字节做 xor
// address(ipv4) 和 trans_id 前4字节做xor
// address(ipv6) 和 trans_id 全部16字节做xor
//
// rfc 5780 的 trans_id 以 magic cookie 开头，混淆结果和标准一致

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XorMappedAddress {
    pub address: SocketAddr,
    pub trans_id: TransId,
}

impl XorMappedAddress {
    pub fn new(trans_id: TransId, address: SocketAddr) -> Self {
        Self { address, trans_id }
    }

    pub fn body_len(&self) -> usize {
        endpoint_len(&self.address)
    }

    pub fn pack_body(&self, cursor: &mut WriteCursor) {
        let obfuscated = util::xor_address(self.address, &self.trans_id);
        pack_endpoint(cursor, &obfuscated);
    }

    pub fn unpack(cursor: &mut ReadCursor, trans_id: &TransId) -> Result<Self, ParsePacketErr> {
        let obfuscated = unpack_endpoint(cursor)?;
        let address = util::xor_address(obfuscated, trans_id);

        Ok(Self {
            address,
            trans_id: *trans_id,
        })
    }
}
