use std::fmt;
use std::io;

#[derive(Debug)]
pub enum ParsePacketErr {
    // 长度或值不匹配
    NotMatch(String),

    // buf不够
    BufSize(String),

    // 字段的值不合规
    BadValue(String),

    // 不是utf8字符串
    NotUtf8,

    // attribute过多
    TooManyAttrs,
}

impl fmt::Display for ParsePacketErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsePacketErr::NotMatch(s) => write!(f, "not match: {}", s),
            ParsePacketErr::BufSize(s) => write!(f, "buf size: {}", s),
            ParsePacketErr::BadValue(s) => write!(f, "bad value: {}", s),
            ParsePacketErr::NotUtf8 => write!(f, "not utf8"),
            ParsePacketErr::TooManyAttrs => write!(f, "too many attrs"),
        }
    }
}

// 一次查询的结局，放在 QueryResult.error 里
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryError {
    Success,
    ServerError,
    BadResponse,
    BadTransactionId,
    Timeout,
    NotSupported,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryError::Success => "Success",
            QueryError::ServerError => "ServerError",
            QueryError::BadResponse => "BadResponse",
            QueryError::BadTransactionId => "BadTransactionID",
            QueryError::Timeout => "Timeout",
            QueryError::NotSupported => "NotSupported",
        };
        f.write_str(name)
    }
}

// 引擎内部的失败通道。Io 在门面处重新抛出，Query 变成结果字段。
#[derive(Debug)]
pub(crate) enum Failure {
    Io(io::Error),
    Query {
        error: QueryError,
        server_error: Option<u16>,
        server_error_phrase: Option<String>,
    },
}

impl Failure {
    pub(crate) fn query(error: QueryError) -> Self {
        Failure::Query {
            error,
            server_error: None,
            server_error_phrase: None,
        }
    }

    pub(crate) fn server(code: u16, phrase: String) -> Self {
        Failure::Query {
            error: QueryError::ServerError,
            server_error: Some(code),
            server_error_phrase: Some(phrase),
        }
    }
}

impl From<io::Error> for Failure {
    fn from(e: io::Error) -> Self {
        Failure::Io(e)
    }
}

impl From<ParsePacketErr> for Failure {
    fn from(_: ParsePacketErr) -> Self {
        Failure::query(QueryError::BadResponse)
    }
}
