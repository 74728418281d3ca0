use std::net::SocketAddr;
use std::time::Duration;

use log::debug;

use crate::attrs::ChangeRequest;
use crate::constants::{MESSAGE_TYPE_BIND_ERR_RES, MESSAGE_TYPE_BIND_REQ, MESSAGE_TYPE_BIND_RES};
use crate::error::{Failure, QueryError};
use crate::header::{Header, TransId};
use crate::packet::Packet;
use crate::transport::Transport;

pub(crate) fn binding_request(trans_id: TransId, change_request: Option<(bool, bool)>) -> Packet {
    let header = Header::new(MESSAGE_TYPE_BIND_REQ, 0, trans_id);
    let mut request = Packet::new(header, vec![]);

    if let Some((change_ip, change_port)) = change_request {
        let attr = ChangeRequest::new(change_ip, change_port);
        request.add_attr(attr.into());
    }

    request
}

// 一次探测：发请求，带期限收一个数据报，验证后返回。
// None = 超时。BindingErrorResponse直接变成失败。
pub(crate) fn exchange(
    transport: &mut dyn Transport,
    dest: SocketAddr,
    request: &Packet,
    timeout: Duration,
) -> Result<Option<Packet>, Failure> {
    let buf = request.pack();
    transport.send(&buf, dest)?;

    let data = match transport.recv(timeout)? {
        Some(v) => v,
        None => {
            return Ok(None);
        }
    };

    let reply = Packet::unpack(data)?;
    reply.validate()?;

    // 校验顺序：报文类型，trans_id，error-code
    match reply.header.msg_type {
        MESSAGE_TYPE_BIND_RES | MESSAGE_TYPE_BIND_ERR_RES => {}
        v => {
            debug!("unexpected reply type: {:#06x}", v);
            return Err(Failure::query(QueryError::BadResponse));
        }
    }

    if reply.header.trans_id != request.header.trans_id {
        debug!("reply trans_id != request trans_id");
        return Err(Failure::query(QueryError::BadTransactionId));
    }

    if reply.header.msg_type == MESSAGE_TYPE_BIND_ERR_RES {
        return match reply.error_code() {
            Some((code, phrase)) => {
                debug!("server error: {} {}", code, phrase);
                Err(Failure::server(code, phrase.to_string()))
            }
            None => Err(Failure::query(QueryError::BadResponse)),
        };
    }

    Ok(Some(reply))
}
