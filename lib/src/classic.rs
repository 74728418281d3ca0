use std::net::SocketAddr;

use log::debug;

use crate::config::Config;
use crate::constants::{ATTR_CHANGED_ADDRESS, ATTR_MAPPED_ADDRESS};
use crate::error::{Failure, QueryError};
use crate::nat::{NatType, QueryType};
use crate::probe::{binding_request, exchange};
use crate::transport::Transport;
use crate::util;

// rfc 3489, 10.1 的探测序列
//
// test1 基本绑定 -> 有无NAT -> test2 change(ip+port) ->
// 对changed-address再做test1 -> test3 change(port)
//
// 整个序列共用一个16字节全随机trans_id

pub(crate) struct ClassicOutcome {
    pub nat_type: NatType,
    pub public: Option<SocketAddr>,
    pub local: Option<SocketAddr>,
}

pub(crate) fn discover(
    transport: &mut dyn Transport,
    server: SocketAddr,
    query_type: QueryType,
    config: &Config,
) -> Result<ClassicOutcome, Failure> {
    let trans_id = util::new_legacy_trans_id();
    let timeout = config.receive_timeout;

    // test1: 基本绑定请求
    let request = binding_request(trans_id, None);
    let reply = exchange(transport, server, &request, timeout)?;
    let local = transport.local_addr()?;

    let reply = match reply {
        Some(v) => v,
        None => {
            debug!("test1 timeout, server unreachable");
            return Err(Failure::query(QueryError::Timeout));
        }
    };

    let public = match reply.address(ATTR_MAPPED_ADDRESS) {
        Some(v) => v,
        None => {
            debug!("test1 reply without mapped-address");
            return Err(Failure::query(QueryError::BadResponse));
        }
    };
    let changed = reply.address(ATTR_CHANGED_ADDRESS);
    debug!("test1 mapped: {}, local: {}", public, local);

    // 只要公网地址就到此为止
    if query_type == QueryType::PublicIp {
        return Ok(ClassicOutcome {
            nat_type: NatType::Unspecified,
            public: Some(public),
            local: Some(local),
        });
    }

    if public == local {
        // 没看到NAT。test2确认回包能不能从另一个地址进来。
        let request = binding_request(trans_id, Some((true, true)));
        let nat_type = match exchange(transport, server, &request, timeout)? {
            Some(_) => NatType::OpenInternet,
            None => NatType::SymmetricUdpFirewall,
        };
        debug!("no nat, verdict: {:?}", nat_type);

        return Ok(ClassicOutcome {
            nat_type,
            public: Some(public),
            local: Some(local),
        });
    }

    // 有NAT。test2能收到就是full cone。
    let request = binding_request(trans_id, Some((true, true)));
    if exchange(transport, server, &request, timeout)?.is_some() {
        debug!("test2 answered, full cone");
        return Ok(ClassicOutcome {
            nat_type: NatType::FullCone,
            public: Some(public),
            local: Some(local),
        });
    }

    // open-nat查询到这里已经有答案了
    if query_type == QueryType::OpenNat {
        debug!("open-nat query, not open");
        return Ok(ClassicOutcome {
            nat_type: NatType::Unspecified,
            public: Some(public),
            local: Some(local),
        });
    }

    let changed = match changed {
        Some(v) => v,
        None => {
            debug!("test1 reply without changed-address, can't tell symmetric");
            return Err(Failure::query(QueryError::BadResponse));
        }
    };

    // 从changed-address要一次映射，对比test1的
    let request = binding_request(trans_id, None);
    let reply = match exchange(transport, changed, &request, timeout)? {
        Some(v) => v,
        None => {
            debug!("test1 to changed-address timeout");
            return Err(Failure::query(QueryError::Timeout));
        }
    };

    let mapped = match reply.address(ATTR_MAPPED_ADDRESS) {
        Some(v) => v,
        None => {
            return Err(Failure::query(QueryError::BadResponse));
        }
    };

    if mapped != public {
        // 每个目的地址一个映射，对外端口没有唯一值
        debug!("mapped {} != {}, symmetric", mapped, public);
        return Ok(ClassicOutcome {
            nat_type: NatType::Symmetric,
            public: None,
            local: Some(local),
        });
    }

    // test3: change port区分restricted和port restricted
    let request = binding_request(trans_id, Some((false, true)));
    let nat_type = match exchange(transport, changed, &request, timeout)? {
        Some(_) => NatType::Restricted,
        None => NatType::PortRestricted,
    };
    debug!("test3 verdict: {:?}", nat_type);

    Ok(ClassicOutcome {
        nat_type,
        public: Some(public),
        local: Some(local),
    })
}
