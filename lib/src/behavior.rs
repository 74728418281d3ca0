use std::net::SocketAddr;

use log::debug;

use crate::config::Config;
use crate::error::{Failure, QueryError};
use crate::nat::{synthesize_nat_type, FilteringBehavior, MappingBehavior, NatType, QueryType};
use crate::probe::{binding_request, exchange};
use crate::transport::Transport;
use crate::util;

// rfc 5780 的行为探测，mapping和filtering各自独立
//
// mapping:  主地址 -> (other.ip, 主port) -> (other.ip, other.port)
// filtering: change(ip+port) -> change(port)，都发主地址
//
// trans_id = magic cookie + 12字节随机，整个序列共用

pub(crate) struct BehaviorOutcome {
    pub nat_type: NatType,
    pub mapping: Option<MappingBehavior>,
    pub filtering: Option<FilteringBehavior>,
    pub public: Option<SocketAddr>,
    pub local: Option<SocketAddr>,
}

pub(crate) fn discover(
    transport: &mut dyn Transport,
    server: SocketAddr,
    query_type: QueryType,
    config: &Config,
) -> Result<BehaviorOutcome, Failure> {
    let trans_id = util::new_trans_id();
    let timeout = config.receive_timeout;

    // mapping第一步：基本绑定请求
    let request = binding_request(trans_id, None);
    let reply = exchange(transport, server, &request, timeout)?;
    let local = transport.local_addr()?;

    let reply = match reply {
        Some(v) => v,
        None => {
            debug!("mapping test timeout, server unreachable");
            return Err(Failure::query(QueryError::Timeout));
        }
    };

    let first = reply.xor_mapped_address();
    let other = reply.other_address();

    if query_type == QueryType::PublicIp {
        let public = match first {
            Some(v) => v,
            None => {
                return Err(Failure::query(QueryError::BadResponse));
            }
        };
        return Ok(BehaviorOutcome {
            nat_type: NatType::Unspecified,
            mapping: None,
            filtering: None,
            public: Some(public),
            local: Some(local),
        });
    }

    // 后面的步骤要第二个服务端地址
    let other = match other {
        Some(v) => v,
        None => {
            debug!("reply without other-address/changed-address");
            return Err(Failure::query(QueryError::NotSupported));
        }
    };
    let first = match first {
        Some(v) => v,
        None => {
            debug!("reply without xor-mapped-address");
            return Err(Failure::query(QueryError::BadResponse));
        }
    };
    debug!("xor-mapped: {}, other: {}, local: {}", first, other, local);

    // 第二步：同一个端口，另一个ip
    let dest = SocketAddr::new(other.ip(), server.port());
    let reply = match exchange(transport, dest, &request, timeout)? {
        Some(v) => v,
        None => {
            debug!("mapping test timeout from {}", dest);
            return Err(Failure::query(QueryError::Timeout));
        }
    };
    let second = match reply.xor_mapped_address() {
        Some(v) => v,
        None => {
            return Err(Failure::query(QueryError::BadResponse));
        }
    };
    debug!("xor-mapped from {}: {}", dest, second);

    let mapping = if second == first {
        if first == local {
            MappingBehavior::NoMapping
        } else {
            MappingBehavior::EndpointIndependent
        }
    } else {
        // 第三步：ip和端口都换
        let reply = match exchange(transport, other, &request, timeout)? {
            Some(v) => v,
            None => {
                debug!("mapping test timeout from {}", other);
                return Err(Failure::query(QueryError::Timeout));
            }
        };
        let third = match reply.xor_mapped_address() {
            Some(v) => v,
            None => {
                return Err(Failure::query(QueryError::BadResponse));
            }
        };
        debug!("xor-mapped from {}: {}", other, third);

        if third == second {
            MappingBehavior::AddressDependent
        } else {
            MappingBehavior::AddressAndPortDependent
        }
    };
    debug!("mapping: {:?}", mapping);

    // filtering: 先试回包从另一个ip+port进来
    let request = binding_request(trans_id, Some((true, true)));
    let filtering = match exchange(transport, server, &request, timeout)? {
        Some(_) => FilteringBehavior::EndpointIndependent,
        None => {
            // 再试只换端口
            let request = binding_request(trans_id, Some((false, true)));
            match exchange(transport, server, &request, timeout)? {
                Some(_) => FilteringBehavior::AddressDependent,
                None => FilteringBehavior::AddressAndPortDependent,
            }
        }
    };
    debug!("filtering: {:?}", filtering);

    Ok(BehaviorOutcome {
        nat_type: synthesize_nat_type(mapping, filtering),
        mapping: Some(mapping),
        filtering: Some(filtering),
        public: Some(first),
        local: Some(local),
    })
}
