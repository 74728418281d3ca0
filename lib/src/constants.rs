// 0x2112A442
pub const MAGIC_COOKIE: [u8; 4] = [0x21, 0x12, 0xA4, 0x42];

pub const TRANS_ID_LEN: usize = 16;
pub const HEADER_LEN: usize = 20;

// header offset of the body-length field
pub const MSG_LEN_OFFSET: usize = 2;

pub const MESSAGE_TYPE_BIND_REQ: u16 = 0x0001;
pub const MESSAGE_TYPE_BIND_RES: u16 = 0x0101;
pub const MESSAGE_TYPE_BIND_ERR_RES: u16 = 0x0111;

// rfc 3489 shared-secret family, decoded but never sent
pub const MESSAGE_TYPE_SHARED_SECRET_REQ: u16 = 0x0002;
pub const MESSAGE_TYPE_SHARED_SECRET_RES: u16 = 0x0102;
pub const MESSAGE_TYPE_SHARED_SECRET_ERR_RES: u16 = 0x0112;

pub const ATTR_FAMILY_IPV4: u8 = 0x01;
pub const ATTR_FAMILY_IPV6: u8 = 0x02;

pub const ATTR_MAPPED_ADDRESS: u16 = 0x0001;
pub const ATTR_RESPONSE_ADDRESS: u16 = 0x0002;
pub const ATTR_CHANGE_REQUEST: u16 = 0x0003;
pub const ATTR_SOURCE_ADDRESS: u16 = 0x0004;
pub const ATTR_CHANGED_ADDRESS: u16 = 0x0005;
pub const ATTR_USERNAME: u16 = 0x0006;
pub const ATTR_PASSWORD: u16 = 0x0007;
pub const ATTR_MESSAGE_INTEGRITY: u16 = 0x0008;
pub const ATTR_ERROR_CODE: u16 = 0x0009;
pub const ATTR_UNKNOWN_ATTRIBUTES: u16 = 0x000A;
pub const ATTR_REFLECTED_FROM: u16 = 0x000B;
pub const ATTR_XOR_MAPPED_ADDRESS: u16 = 0x0020;

pub const ATTR_SOFTWARE: u16 = 0x8022;
pub const ATTR_ALTERNATE_SERVER: u16 = 0x8023;
pub const ATTR_FINGERPRINT: u16 = 0x8028;
pub const ATTR_OTHER_ADDRESS: u16 = 0x802B;
pub const ATTR_RESPONSE_ORIGIN: u16 = 0x802C;

// change-request flag bits, last octet
pub const CHANGE_IP_FLAG: u32 = 0x04;
pub const CHANGE_PORT_FLAG: u32 = 0x02;

pub const RECV_BUF_LEN: usize = 2048;
pub const MAX_ATTRS: usize = 32;

pub const DEFAULT_RECEIVE_TIMEOUT_MS: u64 = 2000;
