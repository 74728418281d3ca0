use std::fmt;
use std::net::{SocketAddr, UdpSocket};

use crate::error::QueryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    // 只要公网地址
    PublicIp,
    // 只判断是不是full cone以内
    OpenNat,
    // 完整分类
    ExactNat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryVariant {
    Rfc3489,
    Rfc5780,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NatType {
    Unspecified,
    OpenInternet,
    FullCone,
    Restricted,
    PortRestricted,
    Symmetric,
    SymmetricUdpFirewall,
}

impl fmt::Display for NatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NatType::Unspecified => write!(f, "Unspecified"),
            NatType::OpenInternet => write!(f, "Open Internet"),
            NatType::FullCone => write!(f, "Full Cone"),
            NatType::Restricted => write!(f, "Restricted Cone"),
            NatType::PortRestricted => write!(f, "Port Restricted Cone"),
            NatType::Symmetric => write!(f, "Symmetric"),
            NatType::SymmetricUdpFirewall => write!(f, "Symmetric UDP Firewall"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingBehavior {
    NoMapping,
    EndpointIndependent,
    AddressDependent,
    AddressAndPortDependent,
}

impl fmt::Display for MappingBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingBehavior::NoMapping => write!(f, "No Mapping"),
            MappingBehavior::EndpointIndependent => write!(f, "Endpoint Independent"),
            MappingBehavior::AddressDependent => write!(f, "Address Dependent"),
            MappingBehavior::AddressAndPortDependent => write!(f, "Address and Port Dependent"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilteringBehavior {
    EndpointIndependent,
    AddressDependent,
    AddressAndPortDependent,
}

impl fmt::Display for FilteringBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilteringBehavior::EndpointIndependent => write!(f, "Endpoint Independent"),
            FilteringBehavior::AddressDependent => write!(f, "Address Dependent"),
            FilteringBehavior::AddressAndPortDependent => write!(f, "Address and Port Dependent"),
        }
    }
}

// mapping + filtering 折算到老的分类
pub fn synthesize_nat_type(mapping: MappingBehavior, filtering: FilteringBehavior) -> NatType {
    match mapping {
        MappingBehavior::NoMapping => NatType::OpenInternet,
        MappingBehavior::EndpointIndependent => match filtering {
            FilteringBehavior::EndpointIndependent => NatType::FullCone,
            FilteringBehavior::AddressDependent => NatType::Restricted,
            FilteringBehavior::AddressAndPortDependent => NatType::PortRestricted,
        },
        MappingBehavior::AddressDependent | MappingBehavior::AddressAndPortDependent => {
            NatType::Symmetric
        }
    }
}

#[derive(Debug)]
pub struct QueryResult {
    pub query_type: QueryType,
    pub variant: DiscoveryVariant,
    pub error: QueryError,
    pub server: SocketAddr,
    pub local: Option<SocketAddr>,
    pub public: Option<SocketAddr>,
    pub nat_type: NatType,
    pub server_error: Option<u16>,
    pub server_error_phrase: Option<String>,
    pub mapping: Option<MappingBehavior>,
    pub filtering: Option<FilteringBehavior>,

    // 门面创建且调用方不要求关闭时，socket随结果带回
    pub socket: Option<UdpSocket>,
}

impl QueryResult {
    pub fn is_success(&self) -> bool {
        self.error == QueryError::Success
    }
}
