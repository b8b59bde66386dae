use echo_ping::{
    GenericError, PingConfig, Pinger, ProbeResult, RunStatistics, RunSummary, SequenceNumber,
};
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(argh::FromArgs)]
/// echo-ping - send ICMP ECHO_REQUEST packets to a host
struct Args {
    #[argh(option, short = 'w', default = "1000")]
    /// timeout in milliseconds for each send and each reply
    timeout: u64,

    #[argh(option, short = 'l', default = "32")]
    /// payload size in bytes
    size: usize,

    #[argh(option, short = 'n', default = "4")]
    /// number of echo requests to send
    count: u32,

    #[argh(switch, short = 'v')]
    /// log every probe state change
    verbose: bool,

    #[argh(positional)]
    /// host name or IPv4 address
    destination: String,
}

fn main() -> Result<(), GenericError> {
    let args: Args = argh::from_env();

    let level = if args.verbose { Level::TRACE } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = PingConfig {
        timeout: Duration::from_millis(args.timeout),
        payload_size: args.size,
        count: args.count,
        identifier: None,
    };
    println!(
        "timeout: {} size: {} count: {}",
        args.timeout, args.size, args.count
    );

    let mut pinger = Pinger::connect(&args.destination, config).map_err(|e| {
        tracing::error!("{e}");
        e
    })?;
    let remote_addr = pinger.remote_addr();
    println!(
        "PING {} [{remote_addr}] with {} bytes of data:",
        args.destination,
        pinger.config().payload_size
    );
    if args.verbose {
        println!("identifier: {:#06x}", pinger.identifier());
    }

    let mut statistics = RunStatistics::new();
    pinger.run(&mut statistics, print_probe);

    print_summary(&remote_addr.to_string(), &statistics.summarize());
    Ok(())
}

fn print_probe(sequence_number: SequenceNumber, result: &ProbeResult) {
    match result {
        ProbeResult::Success { reply, .. } => println!(
            "Reply from {}: icmp_seq={sequence_number} bytes={} time={}ms TTL={}",
            reply.source,
            reply.icmp_payload_len,
            result.round_trip_millis().unwrap_or_default(),
            reply.ttl
        ),
        ProbeResult::Failure(failure) => println!("icmp_seq={sequence_number}: {failure}"),
    }
}

fn print_summary(remote_addr: &str, summary: &RunSummary) {
    println!();
    println!("Ping statistics for {remote_addr}:");
    println!(
        "    Packets: sent = {}, received = {}, lost = {} ({:.0}% loss)",
        summary.sent, summary.succeeded, summary.failed, summary.loss_percent
    );
    match summary.round_trip {
        Some(round_trip) => {
            println!("Approximate round trip times in milli-seconds:");
            println!(
                "    Minimum = {}ms, Maximum = {}ms, Average = {}ms",
                round_trip.min_millis, round_trip.max_millis, round_trip.mean_millis
            );
        }
        None => println!("Approximate round trip times: undefined, no reply received"),
    }
}
