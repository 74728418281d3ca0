use std::net::SocketAddr;

use bytes::{BufMut, Bytes, BytesMut};

use natprobe::attrs::{
    AddressAttr, Attr, ChangeRequest, ErrcodeAttr, OpaqueAttr, TextAttr, UnknownAttrs,
    XorMappedAddress,
};
use natprobe::constants::*;
use natprobe::header::Header;
use natprobe::packet::Packet;
use natprobe::util;

fn addr(s: &str) -> SocketAddr {
    s.parse().expect("unable to parse")
}

fn full_attr_set(trans_id: [u8; 16], mapped: SocketAddr) -> Vec<Attr> {
    vec![
        AddressAttr::new(ATTR_MAPPED_ADDRESS, mapped).into(),
        AddressAttr::new(ATTR_RESPONSE_ADDRESS, addr("10.20.30.40:1234")).into(),
        AddressAttr::new(ATTR_SOURCE_ADDRESS, addr("10.20.30.40:1234")).into(),
        AddressAttr::new(ATTR_CHANGED_ADDRESS, addr("10.20.30.41:1235")).into(),
        AddressAttr::new(ATTR_REFLECTED_FROM, addr("10.20.30.42:1236")).into(),
        AddressAttr::new(ATTR_ALTERNATE_SERVER, addr("10.20.30.43:1237")).into(),
        AddressAttr::new(ATTR_OTHER_ADDRESS, addr("10.20.30.41:1235")).into(),
        AddressAttr::new(ATTR_RESPONSE_ORIGIN, addr("10.20.30.40:1234")).into(),
        XorMappedAddress::new(trans_id, mapped).into(),
        ChangeRequest::new(true, false).into(),
        ErrcodeAttr::new(420, "Bad Request").into(),
        TextAttr::new(ATTR_USERNAME, "alice").into(),
        TextAttr::new(ATTR_PASSWORD, "hunter2").into(),
        TextAttr::new(ATTR_SOFTWARE, "natprobe 0.1").into(),
        UnknownAttrs::new(vec![0x7001, 0x7002]).into(),
        OpaqueAttr::new(ATTR_MESSAGE_INTEGRITY, Bytes::from_static(&[0xAB; 20])).into(),
        OpaqueAttr::new(ATTR_FINGERPRINT, Bytes::from_static(&[1, 2, 3, 4])).into(),
    ]
}

#[test]
fn test_round_trip_v4() {
    let trans_id = util::new_trans_id();
    let attrs = full_attr_set(trans_id, addr("192.168.8.100:5678"));
    let packet = Packet::new(Header::new(MESSAGE_TYPE_BIND_RES, 0, trans_id), attrs);

    let decoded = Packet::unpack(packet.pack()).unwrap();
    assert_eq!(decoded, packet);
}

#[test]
fn test_round_trip_v6() {
    let trans_id = util::new_legacy_trans_id();
    let mapped = addr("[1:2:3:4:5:6:7:8]:8080");
    let attrs = vec![
        AddressAttr::new(ATTR_MAPPED_ADDRESS, mapped).into(),
        XorMappedAddress::new(trans_id, mapped).into(),
    ];
    let packet = Packet::new(Header::new(MESSAGE_TYPE_BIND_RES, 0, trans_id), attrs);

    let decoded = Packet::unpack(packet.pack()).unwrap();
    assert_eq!(decoded, packet);
}

#[test]
fn test_length_patching() {
    let trans_id = util::new_trans_id();
    let attrs = full_attr_set(trans_id, addr("192.168.8.100:5678"));
    let expected: usize = attrs.iter().map(|a| a.len()).sum();

    let packet = Packet::new(Header::new(MESSAGE_TYPE_BIND_RES, 0, trans_id), attrs);
    let buf = packet.pack();

    let patched = u16::from_be_bytes([buf[2], buf[3]]) as usize;
    assert_eq!(patched, expected);
    assert_eq!(buf.len(), HEADER_LEN + patched);
    assert_eq!(packet.header.msg_len as usize, expected);
}

#[test]
fn test_unknown_attr_skipped() {
    let trans_id = util::new_trans_id();
    let first = Packet::new(
        Header::new(MESSAGE_TYPE_BIND_RES, 0, trans_id),
        vec![AddressAttr::new(ATTR_MAPPED_ADDRESS, addr("1.2.3.4:5678")).into()],
    )
    .pack();
    let second = Packet::new(
        Header::new(MESSAGE_TYPE_BIND_RES, 0, trans_id),
        vec![AddressAttr::new(ATTR_RESPONSE_ORIGIN, addr("5.6.7.8:1234")).into()],
    )
    .pack();

    // 两个认识的attribute中间夹一个合成的未知attribute
    let unknown_body = [0x5A_u8; 5];
    let body_len = (first.len() - HEADER_LEN) + (second.len() - HEADER_LEN) + 4 + unknown_body.len();

    let mut buf = BytesMut::new();
    buf.put_u16(MESSAGE_TYPE_BIND_RES);
    buf.put_u16(body_len as u16);
    buf.put_slice(&trans_id);
    buf.put_slice(&first[HEADER_LEN..]);
    buf.put_u16(0xFFFE);
    buf.put_u16(unknown_body.len() as u16);
    buf.put_slice(&unknown_body);
    buf.put_slice(&second[HEADER_LEN..]);

    let packet = Packet::unpack(buf.freeze()).unwrap();
    assert_eq!(packet.attrs.len(), 2);
    assert_eq!(packet.address(ATTR_MAPPED_ADDRESS), Some(addr("1.2.3.4:5678")));
    assert_eq!(packet.attrs[0].attr_type(), ATTR_MAPPED_ADDRESS);
    assert_eq!(packet.attrs[1].attr_type(), ATTR_RESPONSE_ORIGIN);
}

#[test]
fn test_xor_symmetry() {
    let cases = [
        addr("192.168.8.100:5678"),
        addr("203.0.113.7:51000"),
        addr("[1:2:3:4:5:6:7:8]:8080"),
        addr("[2001:db8::1]:443"),
    ];

    for trans_id in [util::new_trans_id(), util::new_legacy_trans_id()] {
        for v in cases {
            let masked = util::xor_address(v, &trans_id);
            assert_eq!(util::xor_address(masked, &trans_id), v);
        }
    }
}

#[test]
fn test_xor_attr_round_trip() {
    let trans_id = util::new_legacy_trans_id();
    let mapped = addr("203.0.113.7:51000");
    let packet = Packet::new(
        Header::new(MESSAGE_TYPE_BIND_RES, 0, trans_id),
        vec![XorMappedAddress::new(trans_id, mapped).into()],
    );

    let decoded = Packet::unpack(packet.pack()).unwrap();
    assert_eq!(decoded.xor_mapped_address(), Some(mapped));
}

#[test]
fn test_errcode_composite() {
    let trans_id = util::new_trans_id();
    let packet = Packet::new(
        Header::new(MESSAGE_TYPE_BIND_ERR_RES, 0, trans_id),
        vec![ErrcodeAttr::new(502, "not auth").into()],
    );

    let decoded = Packet::unpack(packet.pack()).unwrap();
    assert_eq!(decoded.error_code(), Some((502, "not auth")));
}

#[test]
fn test_errcode_bad_class() {
    let trans_id = util::new_trans_id();

    // class=2 不在3..6里
    let mut buf = BytesMut::new();
    buf.put_u16(MESSAGE_TYPE_BIND_ERR_RES);
    buf.put_u16(8);
    buf.put_slice(&trans_id);
    buf.put_u16(ATTR_ERROR_CODE);
    buf.put_u16(4);
    buf.put_u16(0);
    buf.put_u8(2);
    buf.put_u8(50);

    assert!(Packet::unpack(buf.freeze()).is_err());
}

#[test]
fn test_change_request_flags() {
    let trans_id = util::new_trans_id();
    let packet = Packet::new(
        Header::new(MESSAGE_TYPE_BIND_REQ, 0, trans_id),
        vec![ChangeRequest::new(true, true).into()],
    );
    let buf = packet.pack();

    // body是4字节，标志在最后一个字节
    assert_eq!(buf[HEADER_LEN + 4 + 3], 0x06);

    let decoded = Packet::unpack(buf).unwrap();
    assert_eq!(
        decoded.attrs[0],
        Attr::ChangeRequest(ChangeRequest::new(true, true))
    );
}

#[test]
fn test_unpack_truncated_header() {
    let buf = Bytes::from_static(&[0x01, 0x01, 0x00]);
    assert!(Packet::unpack(buf).is_err());
}

#[test]
fn test_unpack_len_mismatch() {
    let trans_id = util::new_trans_id();
    let packet = Packet::new(
        Header::new(MESSAGE_TYPE_BIND_RES, 0, trans_id),
        vec![AddressAttr::new(ATTR_MAPPED_ADDRESS, addr("1.2.3.4:5678")).into()],
    );
    let buf = packet.pack();

    // 声明的body长度和实际不一致
    let mut shorter = BytesMut::from(&buf[..]);
    shorter.truncate(buf.len() - 2);
    assert!(Packet::unpack(shorter.freeze()).is_err());
}

#[test]
fn test_unpack_attr_overrun() {
    let trans_id = util::new_trans_id();

    // attribute声明长度超出body
    let mut buf = BytesMut::new();
    buf.put_u16(MESSAGE_TYPE_BIND_RES);
    buf.put_u16(8);
    buf.put_slice(&trans_id);
    buf.put_u16(ATTR_MAPPED_ADDRESS);
    buf.put_u16(100);
    buf.put_u32(0);

    assert!(Packet::unpack(buf.freeze()).is_err());
}

#[test]
fn test_unpack_trailing_garbage() {
    let trans_id = util::new_trans_id();

    // body末尾剩3个字节，塞不下一个attribute头
    let mut buf = BytesMut::new();
    buf.put_u16(MESSAGE_TYPE_BIND_RES);
    buf.put_u16(3);
    buf.put_slice(&trans_id);
    buf.put_u8(0);
    buf.put_u8(0);
    buf.put_u8(0);

    assert!(Packet::unpack(buf.freeze()).is_err());
}

#[test]
fn test_header_validate() {
    let trans_id = util::new_trans_id();

    for v in [
        MESSAGE_TYPE_BIND_REQ,
        MESSAGE_TYPE_BIND_RES,
        MESSAGE_TYPE_BIND_ERR_RES,
        MESSAGE_TYPE_SHARED_SECRET_REQ,
        MESSAGE_TYPE_SHARED_SECRET_RES,
        MESSAGE_TYPE_SHARED_SECRET_ERR_RES,
    ] {
        assert!(Header::new(v, 0, trans_id).validate().is_ok());
    }

    assert!(Header::new(0x7777, 0, trans_id).validate().is_err());
}

#[test]
fn test_trans_id_shapes() {
    let modern = util::new_trans_id();
    assert_eq!(&modern[..4], &MAGIC_COOKIE[..]);

    let a = util::new_legacy_trans_id();
    let b = util::new_legacy_trans_id();
    assert_ne!(a, b);
}
