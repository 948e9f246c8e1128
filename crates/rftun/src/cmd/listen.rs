use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rftun_frame::{decode_frame, MAX_FRAME};
use rftun_transport::{FrameSource, UdpCollector};
use tracing::debug;

use crate::cmd::ListenArgs;
use crate::exit::{transport_error, CliError, CliResult, INTERNAL, SUCCESS};
use crate::output::{print_packet, OutputFormat};

const POLL_TIMEOUT: Duration = Duration::from_millis(100);

pub fn run(args: ListenArgs, format: OutputFormat) -> CliResult<i32> {
    let mut collector =
        UdpCollector::bind(args.endpoint).map_err(|err| transport_error("bind failed", err))?;

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    let mut printed = 0usize;

    while running.load(Ordering::SeqCst) {
        match collector.poll(POLL_TIMEOUT) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(err) => return Err(transport_error("poll failed", err)),
        }

        let wire = match collector.try_recv(MAX_FRAME) {
            Ok(Some(wire)) => wire,
            Ok(None) => continue,
            Err(err) => return Err(transport_error("receive failed", err)),
        };

        // Same policy as the radio: a frame that fails validation is noise.
        let frame = match decode_frame(&wire) {
            Ok(frame) => frame,
            Err(err) => {
                debug!(%err, "discarding invalid frame");
                continue;
            }
        };

        print_packet(frame.interface_id, &frame.payload, format);
        printed = printed.saturating_add(1);

        if let Some(count) = args.count {
            if printed >= count {
                break;
            }
        }
    }

    collector
        .close()
        .map_err(|err| transport_error("close failed", err))?;
    Ok(SUCCESS)
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
