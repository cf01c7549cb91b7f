use std::str::FromStr;

/// Where to find a reader.
///
/// Serial readers are addressed as `tmr:///COM19` or `tmr:///dev/ttyUSB0`,
/// network readers as `tmr://192.168.1.100` with an optional `:port`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReaderUri {
    Serial { path: String },
    Network { host: String, port: Option<u16> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UriError {
    UnknownScheme(String),
    MissingTarget,
    InvalidPort(String),
}

impl core::fmt::Display for UriError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            UriError::UnknownScheme(uri) => write!(
                f,
                "Invalid reader URI {uri}. Format: `tmr:///[serial port]` or `tmr://[host][:port]`"
            ),
            UriError::MissingTarget => write!(f, "Reader URI has no serial port or host"),
            UriError::InvalidPort(port) => write!(f, "Invalid port {port}"),
        }
    }
}

impl ReaderUri {
    const SCHEME: &'static str = "tmr://";
}

impl FromStr for ReaderUri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix(Self::SCHEME)
            .ok_or_else(|| UriError::UnknownScheme(s.to_string()))?;

        if let Some(path) = rest.strip_prefix('/') {
            // Device nodes keep their leading slash, COM ports have none.
            let path = if path.starts_with("dev/") {
                format!("/{path}")
            } else {
                path.to_string()
            };

            if path.is_empty() {
                return Err(UriError::MissingTarget);
            }

            return Ok(Self::Serial { path });
        }

        let (host, port) = match rest.rsplit_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse()
                    .map_err(|_| UriError::InvalidPort(port.to_string()))?;
                (host, Some(port))
            }
            None => (rest, None),
        };

        if host.is_empty() {
            return Err(UriError::MissingTarget);
        }

        Ok(Self::Network {
            host: host.to_string(),
            port,
        })
    }
}

impl core::fmt::Display for ReaderUri {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReaderUri::Serial { path } => {
                write!(f, "{}/{}", Self::SCHEME, path.trim_start_matches('/'))
            }
            ReaderUri::Network { host, port: None } => write!(f, "{}{host}", Self::SCHEME),
            ReaderUri::Network {
                host,
                port: Some(port),
            } => write!(f, "{}{host}:{port}", Self::SCHEME),
        }
    }
}
