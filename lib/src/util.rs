use std::fmt::Write as _;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};

use rand::{thread_rng, RngCore};

use crate::constants::{MAGIC_COOKIE, TRANS_ID_LEN};
use crate::header::TransId;

pub fn print_bytes(buf: &[u8], separator: &str, row_width: usize) -> String {
    let mut hex = String::new();
    buf.iter().enumerate().for_each(|(x, y)| {
        let _ = write!(hex, "{:02X}", y);
        if (x + 1) % row_width == 0 {
            hex.push('\n');
        } else {
            hex.push_str(separator);
        }
    });

    hex
}

// rfc 5780: magic cookie + 12字节随机
pub fn new_trans_id() -> TransId {
    let cookie_len = MAGIC_COOKIE.len();
    let mut trans_id = [0u8; TRANS_ID_LEN];

    trans_id[..cookie_len].copy_from_slice(&MAGIC_COOKIE[..]);
    thread_rng().fill_bytes(&mut trans_id[cookie_len..]);
    trans_id
}

// rfc 3489: 16字节全随机
pub fn new_legacy_trans_id() -> TransId {
    let mut trans_id = [0u8; TRANS_ID_LEN];
    thread_rng().fill_bytes(&mut trans_id);
    trans_id
}

pub fn xor_address_v4(addr: SocketAddrV4, trans_id: &TransId) -> SocketAddrV4 {
    let prefix = u16::from_be_bytes([trans_id[0], trans_id[1]]);
    let port = addr.port() ^ prefix;

    let src_buf = addr.ip().octets();
    let mut buf = [0_u8; 4];
    for i in 0..buf.len() {
        buf[i] = src_buf[i] ^ trans_id[i];
    }

    SocketAddrV4::new(Ipv4Addr::from(buf), port)
}

pub fn xor_address_v6(addr: SocketAddrV6, trans_id: &TransId) -> SocketAddrV6 {
    let prefix = u16::from_be_bytes([trans_id[0], trans_id[1]]);
    let port = addr.port() ^ prefix;

    let src_buf = addr.ip().octets();
    let mut buf = [0_u8; 16];
    for i in 0..buf.len() {
        buf[i] = src_buf[i] ^ trans_id[i];
    }

    SocketAddrV6::new(Ipv6Addr::from(buf), port, 0, 0)
}

pub fn xor_address(addr: SocketAddr, trans_id: &TransId) -> SocketAddr {
    match addr {
        SocketAddr::V4(v) => SocketAddr::V4(xor_address_v4(v, trans_id)),
        SocketAddr::V6(v) => SocketAddr::V6(xor_address_v6(v, trans_id)),
    }
}
