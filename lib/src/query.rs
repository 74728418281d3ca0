use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};

use log::debug;

use crate::behavior;
use crate::classic;
use crate::config::Config;
use crate::error::{Failure, QueryError};
use crate::nat::{DiscoveryVariant, NatType, QueryResult, QueryType};
use crate::transport::{Transport, UdpTransport};

// 查询门面。socket要么这里建（close_socket决定是否随结果带回），
// 要么调用方借给我们，借的从不关闭。

pub fn query(
    server: SocketAddr,
    query_type: QueryType,
    variant: DiscoveryVariant,
    local_bind: Option<SocketAddr>,
    close_socket: bool,
) -> io::Result<QueryResult> {
    query_with_config(
        server,
        query_type,
        variant,
        local_bind,
        close_socket,
        &Config::default(),
    )
}

pub fn query_with_config(
    server: SocketAddr,
    query_type: QueryType,
    variant: DiscoveryVariant,
    local_bind: Option<SocketAddr>,
    close_socket: bool,
    config: &Config,
) -> io::Result<QueryResult> {
    let bind = local_bind
        .unwrap_or_else(|| SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0));
    let socket = UdpSocket::bind(bind)?;
    debug!("bound {:?}", socket.local_addr());

    let mut result = {
        let mut transport = UdpTransport::new(&socket);
        query_with_transport(&mut transport, server, query_type, variant, config)?
    };

    if !close_socket {
        result.socket = Some(socket);
    }

    Ok(result)
}

pub fn query_with_socket(
    socket: &UdpSocket,
    server: SocketAddr,
    query_type: QueryType,
    variant: DiscoveryVariant,
) -> io::Result<QueryResult> {
    query_with_socket_config(socket, server, query_type, variant, &Config::default())
}

pub fn query_with_socket_config(
    socket: &UdpSocket,
    server: SocketAddr,
    query_type: QueryType,
    variant: DiscoveryVariant,
    config: &Config,
) -> io::Result<QueryResult> {
    let mut transport = UdpTransport::new(socket);
    query_with_transport(&mut transport, server, query_type, variant, config)
}

// 引擎都从这里走，测试用脚本Transport替换socket
pub fn query_with_transport(
    transport: &mut dyn Transport,
    server: SocketAddr,
    query_type: QueryType,
    variant: DiscoveryVariant,
    config: &Config,
) -> io::Result<QueryResult> {
    let mut result = QueryResult {
        query_type,
        variant,
        error: QueryError::Success,
        server,
        local: None,
        public: None,
        nat_type: NatType::Unspecified,
        server_error: None,
        server_error_phrase: None,
        mapping: None,
        filtering: None,
        socket: None,
    };

    let failure = match variant {
        DiscoveryVariant::Rfc3489 => {
            match classic::discover(transport, server, query_type, config) {
                Ok(outcome) => {
                    result.nat_type = outcome.nat_type;
                    result.public = outcome.public;
                    result.local = outcome.local;
                    None
                }
                Err(f) => Some(f),
            }
        }
        DiscoveryVariant::Rfc5780 => {
            match behavior::discover(transport, server, query_type, config) {
                Ok(outcome) => {
                    result.nat_type = outcome.nat_type;
                    result.mapping = outcome.mapping;
                    result.filtering = outcome.filtering;
                    result.public = outcome.public;
                    result.local = outcome.local;
                    None
                }
                Err(f) => Some(f),
            }
        }
    };

    if let Some(f) = failure {
        match f {
            // 环境问题不折算成探测结论
            Failure::Io(e) => {
                return Err(e);
            }
            Failure::Query {
                error,
                server_error,
                server_error_phrase,
            } => {
                debug!("query failed: {}", error);
                result.error = error;
                result.server_error = server_error;
                result.server_error_phrase = server_error_phrase;
                result.local = transport.local_addr().ok();
            }
        }
    }

    Ok(result)
}

// 把一次同步探测丢到阻塞线程上，引擎内部没有挂起点
pub async fn query_async(
    server: SocketAddr,
    query_type: QueryType,
    variant: DiscoveryVariant,
    local_bind: Option<SocketAddr>,
    close_socket: bool,
    config: Config,
) -> io::Result<QueryResult> {
    let handle = tokio::task::spawn_blocking(move || {
        query_with_config(server, query_type, variant, local_bind, close_socket, &config)
    });

    match handle.await {
        Ok(v) => v,
        Err(e) => Err(io::Error::new(io::ErrorKind::Other, e)),
    }
}
