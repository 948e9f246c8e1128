use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use bytes::BytesMut;
use rftun_frame::encode_frame;
use rftun_transport::{FrameSink, SendOutcome, UdpPublisher};
use tracing::warn;

use crate::cmd::SendArgs;
use crate::exit::{frame_error, transport_error, CliError, CliResult, SUCCESS, USAGE};

pub fn run(args: SendArgs) -> CliResult<i32> {
    let payload = resolve_payload(&args)?;

    let mut wire = BytesMut::new();
    encode_frame(args.interface, &payload, &mut wire)
        .map_err(|err| frame_error("encode failed", err))?;

    let mut publisher = UdpPublisher::bind(ephemeral_for(args.endpoint), args.endpoint)
        .map_err(|err| transport_error("bind failed", err))?;

    match publisher
        .send_frame(&wire)
        .map_err(|err| transport_error("send failed", err))?
    {
        SendOutcome::Sent => {}
        SendOutcome::WouldBlock => warn!("outbound socket full, frame not sent"),
    }

    publisher
        .close()
        .map_err(|err| transport_error("close failed", err))?;
    Ok(SUCCESS)
}

fn resolve_payload(args: &SendArgs) -> CliResult<Vec<u8>> {
    if let Some(data) = &args.data {
        return Ok(data.as_bytes().to_vec());
    }
    if let Some(hex) = &args.hex {
        return parse_hex(hex);
    }
    Ok(Vec::new())
}

fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let input = input.trim().trim_start_matches("0x");
    if input.len() % 2 != 0 {
        return Err(CliError::new(USAGE, "hex payload must have even length"));
    }
    (0..input.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&input[i..i + 2], 16)
                .map_err(|_| CliError::new(USAGE, format!("invalid hex payload: {input}")))
        })
        .collect()
}

fn ephemeral_for(endpoint: SocketAddr) -> SocketAddr {
    let ip = match endpoint {
        SocketAddr::V4(_) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        SocketAddr::V6(_) => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
    };
    SocketAddr::new(ip, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_accepts_prefixed_and_bare() {
        assert_eq!(parse_hex("0xdead").unwrap(), vec![0xDE, 0xAD]);
        assert_eq!(parse_hex("0102ff").unwrap(), vec![0x01, 0x02, 0xFF]);
        assert_eq!(parse_hex("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn parse_hex_rejects_bad_input() {
        assert!(parse_hex("abc").is_err());
        assert!(parse_hex("zz").is_err());
    }

    #[test]
    fn ephemeral_matches_address_family() {
        let v4: SocketAddr = "127.0.0.1:52002".parse().unwrap();
        assert!(ephemeral_for(v4).is_ipv4());

        let v6: SocketAddr = "[::1]:52002".parse().unwrap();
        assert!(ephemeral_for(v6).is_ipv6());
    }
}
