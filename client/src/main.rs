use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use clap::builder::ValueParser;
use clap::{Arg, Command};
use log::debug;

use natprobe::{Config, DiscoveryVariant, QueryResult, QueryType};

mod resolve;

use resolve::parse_host_port;

const APP_NAME: &str = env!("CARGO_PKG_NAME");
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

fn parse_ip(s: &str) -> Result<IpAddr, String> {
    let ip = match s.parse::<IpAddr>() {
        Ok(v) => v,
        Err(e) => {
            return Err(format!("{}", e));
        }
    };
    // 0.0.0.0能跑，但自地址比较会失真
    if let IpAddr::V4(v4) = ip {
        if u32::from_be_bytes(v4.octets()) == 0 {
            return Err("0.0.0.0 not allow".to_string());
        }
    }

    Ok(ip)
}

fn parse_query(s: &str) -> Result<QueryType, String> {
    match s {
        "public-ip" => Ok(QueryType::PublicIp),
        "open-nat" => Ok(QueryType::OpenNat),
        "exact-nat" => Ok(QueryType::ExactNat),
        v => Err(format!("unknown query type: {}", v)),
    }
}

fn parse_variant(s: &str) -> Result<DiscoveryVariant, String> {
    match s {
        "rfc3489" => Ok(DiscoveryVariant::Rfc3489),
        "rfc5780" => Ok(DiscoveryVariant::Rfc5780),
        v => Err(format!("unknown variant: {}", v)),
    }
}

fn parse_timeout(s: &str) -> Result<u64, String> {
    match s.parse::<u64>() {
        Ok(0) => Err("timeout must be > 0".to_string()),
        Ok(v) => Ok(v),
        Err(e) => Err(format!("{}", e)),
    }
}

fn print_result(result: &QueryResult) {
    println!("server:    {}", result.server);
    if let Some(v) = result.local {
        println!("local:     {}", v);
    }
    match result.public {
        Some(v) => println!("public:    {}", v),
        None => println!("public:    -"),
    }
    println!("nat type:  {}", result.nat_type);
    if let Some(v) = result.mapping {
        println!("mapping:   {}", v);
    }
    if let Some(v) = result.filtering {
        println!("filtering: {}", v);
    }
    if let Some(code) = result.server_error {
        println!(
            "server error: {} {}",
            code,
            result.server_error_phrase.as_deref().unwrap_or("")
        );
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let app = Command::new(APP_NAME)
        .version(APP_VERSION)
        .about("probe public address and nat behavior over stun")
        .arg(
            Arg::new("server")
                .long("server")
                .takes_value(true)
                .required(true)
                .help("stun server, host:port")
                .value_parser(ValueParser::new(parse_host_port)),
        )
        .arg(
            Arg::new("local_ip")
                .long("local_ip")
                .takes_value(true)
                .help("local ip to bind, default 0.0.0.0")
                .value_parser(ValueParser::new(parse_ip)),
        )
        .arg(
            Arg::new("query")
                .long("query")
                .takes_value(true)
                .default_value("exact-nat")
                .help("public-ip | open-nat | exact-nat")
                .value_parser(ValueParser::new(parse_query)),
        )
        .arg(
            Arg::new("variant")
                .long("variant")
                .takes_value(true)
                .default_value("rfc3489")
                .help("rfc3489 | rfc5780")
                .value_parser(ValueParser::new(parse_variant)),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .takes_value(true)
                .default_value("2000")
                .help("per-probe receive timeout, ms")
                .value_parser(ValueParser::new(parse_timeout)),
        )
        .get_matches();

    let server: SocketAddr = *app.get_one("server").expect("wrong server address");
    let local_ip: Option<IpAddr> = app.get_one("local_ip").copied();
    let query_type: QueryType = *app.get_one("query").expect("wrong query type");
    let variant: DiscoveryVariant = *app.get_one("variant").expect("wrong variant");
    let timeout_ms: u64 = *app.get_one("timeout").expect("wrong timeout");

    let local_bind = local_ip.map(|ip| SocketAddr::new(ip, 0));
    let config = Config::new(Duration::from_millis(timeout_ms));
    debug!(
        "server: {}, query: {:?}, variant: {:?}, bind: {:?}",
        server, query_type, variant, local_bind
    );

    let result =
        match natprobe::query_async(server, query_type, variant, local_bind, true, config).await {
            Ok(v) => v,
            Err(e) => {
                eprintln!("io error: {}", e);
                std::process::exit(2);
            }
        };

    print_result(&result);

    if !result.is_success() {
        eprintln!("{}", result.error);
        std::process::exit(1);
    }
}
