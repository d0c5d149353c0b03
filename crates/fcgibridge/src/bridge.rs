use std::time::Duration;

use clap::{Args, ValueEnum};
use fcgibridge_relay::{OutboundPolicy, Relay, RelayConfig};
use fcgibridge_transport::{
    PipeEndpoint, TcpConfig, TcpTransport, Transport, DEFAULT_HOST, DEFAULT_PORT,
};

use crate::exit::{relay_error, transport_error, CliError, CliResult, SUCCESS, USAGE};

#[derive(Args, Debug)]
pub struct BridgeArgs {
    /// TCP port of the FastCGI application.
    #[arg(env = "FCGIBRIDGE_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
    /// Host of the FastCGI application.
    #[arg(long, env = "FCGIBRIDGE_HOST", default_value = DEFAULT_HOST)]
    pub host: String,
    /// Handling of ABORT_REQUEST records sent by the web server.
    #[arg(long, value_enum, default_value = "filter")]
    pub policy: PolicyArg,
    /// Timeout for each connection attempt (e.g. 5s, 500ms).
    #[arg(long, value_name = "DURATION")]
    pub connect_timeout: Option<String>,
    /// Read and write the pipe handle inherited as stdin.
    #[arg(long)]
    pub duplex_stdin: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Drop ABORT_REQUEST records.
    Filter,
    /// Forward every record.
    Forward,
}

impl From<PolicyArg> for OutboundPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::Filter => OutboundPolicy::Filter,
            PolicyArg::Forward => OutboundPolicy::Forward,
        }
    }
}

pub fn run(args: &BridgeArgs) -> CliResult<i32> {
    let connect_timeout = args
        .connect_timeout
        .as_deref()
        .map(parse_duration)
        .transpose()?;

    let transport = TcpTransport::new(TcpConfig {
        host: args.host.clone(),
        port: args.port,
        connect_timeout,
        nodelay: true,
    });

    let pipe = if args.duplex_stdin {
        PipeEndpoint::duplex_stdin().map_err(|err| transport_error("pipe open failed", err))?
    } else {
        PipeEndpoint::stdio()
    };

    tracing::debug!(pipe = pipe.kind(), peer = %transport.describe(), "starting relay");

    let (reader, writer) = pipe.into_split();
    let config = RelayConfig {
        policy: args.policy.into(),
    };
    let relay = Relay::connect(reader, writer, transport, config)
        .map_err(|err| relay_error("connect failed", err))?;

    let stats = relay.run().map_err(|err| relay_error("relay failed", err))?;
    tracing::debug!(?stats, "relay finished");

    Ok(SUCCESS)
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
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        _ => Ok(Duration::from_secs(value)),
    }
}
