use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use crate::constants::*;
use crate::cursor::{ReadCursor, WriteCursor};
use crate::error::ParsePacketErr;

// 地址类的attribute
//
// mapped-address  response-address  source-address  changed-address
// reflected-from  alternate-server  other-address   response-origin

// ipv4: family: 0x01, 4 bytes
// ipv6: family: 0x02, 16 bytes

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressAttr {
    pub attr_type: u16,
    pub address: SocketAddr,
}

impl AddressAttr {
    pub fn new(attr_type: u16, address: SocketAddr) -> Self {
        Self { attr_type, address }
    }

    pub fn body_len(&self) -> usize {
        endpoint_len(&self.address)
    }

    pub fn pack_body(&self, cursor: &mut WriteCursor) {
        pack_endpoint(cursor, &self.address);
    }

    pub fn unpack(attr_type: u16, cursor: &mut ReadCursor) -> Result<Self, ParsePacketErr> {
        let address = unpack_endpoint(cursor)?;
        Ok(Self { attr_type, address })
    }
}

pub(crate) fn endpoint_len(address: &SocketAddr) -> usize {
    match address {
        SocketAddr::V4(_) => 8,
        SocketAddr::V6(_) => 20,
    }
}

pub(crate) fn pack_endpoint(cursor: &mut WriteCursor, address: &SocketAddr) {
    cursor.put_u8(0);
    match address {
        SocketAddr::V4(addr) => {
            cursor.put_u8(ATTR_FAMILY_IPV4);
            cursor.put_u16(addr.port());
            cursor.put_slice(&addr.ip().octets());
        }
        SocketAddr::V6(addr) => {
            cursor.put_u8(ATTR_FAMILY_IPV6);
            cursor.put_u16(addr.port());
            cursor.put_slice(&addr.ip().octets());
        }
    }
}

pub(crate) fn unpack_endpoint(cursor: &mut ReadCursor) -> Result<SocketAddr, ParsePacketErr> {
    // reserved
    cursor.read_u8()?;
    let family = cursor.read_u8()?;
    let port = cursor.read_u16()?;

    let ip = match family {
        ATTR_FAMILY_IPV4 => {
            let mut octets = [0_u8; 4];
            octets.copy_from_slice(cursor.read_slice(4)?);
            IpAddr::V4(Ipv4Addr::from(octets))
        }
        ATTR_FAMILY_IPV6 => {
            let mut octets = [0_u8; 16];
            octets.copy_from_slice(cursor.read_slice(16)?);
            IpAddr::V6(Ipv6Addr::from(octets))
        }
        v => {
            return Err(ParsePacketErr::BadValue(format!("ip family: {}", v)));
        }
    };

    Ok(SocketAddr::new(ip, port))
}
