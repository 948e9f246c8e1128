use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rftun_driver::{PacketSink, RadioConfig, RadioDriver, RxPump, TunnelRadio};

use crate::cmd::RunArgs;
use crate::exit::{driver_error, CliError, CliResult, INTERNAL, SUCCESS, USAGE};
use crate::output::{print_packet, OutputFormat};

pub fn run(args: RunArgs, format: OutputFormat) -> CliResult<i32> {
    let config = RadioConfig {
        publish_endpoint: args.publish,
        subscriber_endpoint: args.subscriber,
        collect_endpoint: args.collect,
        tick_period: parse_duration(&args.tick)?,
    };

    let mut radio = TunnelRadio::open(&config).map_err(|err| driver_error("bind failed", err))?;
    radio.init().map_err(|err| driver_error("init failed", err))?;
    radio.on().map_err(|err| driver_error("power-on failed", err))?;

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    let mut pump = RxPump::with_tick_period(radio, PrintStack { format }, config.tick_period);
    pump.run(&running);

    pump.driver_mut()
        .off()
        .map_err(|err| driver_error("power-off failed", err))?;

    Ok(SUCCESS)
}

struct PrintStack {
    format: OutputFormat,
}

impl PacketSink for PrintStack {
    fn packet_input(&mut self, interface_id: u8, payload: &[u8]) {
        print_packet(interface_id, payload, self.format);
    }
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| {
        CliError::new(
            INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}

fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "ms")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        _ => Err(CliError::new(
            USAGE,
            format!("unsupported duration unit: {unit}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration_millis_and_seconds() {
        assert_eq!(parse_duration("5ms").unwrap(), Duration::from_millis(5));
        assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration("7").unwrap(), Duration::from_millis(7));
    }

    #[test]
    fn parse_duration_rejects_invalid_values() {
        assert!(parse_duration("0ms").is_err());
        assert!(parse_duration("").is_err());
        assert!(parse_duration("soon").is_err());
    }
}
