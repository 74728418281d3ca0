use std::net::{IpAddr, SocketAddr, ToSocketAddrs};

// "<host>:<port>"。host先按ip字面量解析，失败再走dns取第一条记录。

pub fn parse_host_port(s: &str) -> Result<SocketAddr, String> {
    if s.is_empty() {
        return Err("empty server address".to_string());
    }

    if s.matches(':').count() != 1 {
        return Err(format!("expect exactly one ':' in {:?}", s));
    }

    let (host, port) = match s.split_once(':') {
        Some(v) => v,
        None => {
            return Err(format!("expect <host>:<port>, got {:?}", s));
        }
    };

    let port = match port.parse::<u16>() {
        Ok(v) => v,
        Err(e) => {
            return Err(format!("bad port {:?}: {}", port, e));
        }
    };

    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, port));
    }

    match (host, port).to_socket_addrs() {
        Ok(mut addrs) => match addrs.next() {
            Some(v) => Ok(v),
            None => Err(format!("no address record for {:?}", host)),
        },
        Err(e) => Err(format!("can't resolve {:?}: {}", host, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn test_empty_input() {
        assert!(parse_host_port("").is_err());
    }

    #[test]
    fn test_colon_count() {
        assert!(parse_host_port("1.2.3.4").is_err());
        assert!(parse_host_port("1:2:3").is_err());
        assert!(parse_host_port("[::1]:3478").is_err());
    }

    #[test]
    fn test_bad_port() {
        assert!(parse_host_port("1.2.3.4:").is_err());
        assert!(parse_host_port("1.2.3.4:abc").is_err());
        assert!(parse_host_port("1.2.3.4:65536").is_err());
    }

    #[test]
    fn test_literal_ip() {
        let addr = parse_host_port("203.0.113.7:3478").unwrap();
        assert_eq!(addr.ip(), IpAddr::V4(Ipv4Addr::new(203, 0, 113, 7)));
        assert_eq!(addr.port(), 3478);
    }

    #[test]
    fn test_localhost_resolves() {
        let addr = parse_host_port("localhost:3478").unwrap();
        assert_eq!(addr.port(), 3478);
    }
}
