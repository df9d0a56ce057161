//! STOMP 1.2 frame codec.
//!
//! Encodes and decodes the frame subset a notification subscriber needs:
//! the `CONNECT`/`CONNECTED` handshake, `SUBSCRIBE` registration, and the
//! broker-pushed `MESSAGE`, `ERROR`, and `RECEIPT` frames.
//!
//! # Wire format
//!
//! ```text
//! MESSAGE
//! destination:/afs/v1/node_events/mem
//! subscription:sub-0
//! content-length:24
//!
//! [NodeCreated(id=node-7)]^@
//! ```
//!
//! A frame is a command line, zero or more `name:value` header lines, a
//! blank line, then a body terminated by a NUL octet. When a
//! `content-length` header is present the body is exactly that many bytes
//! (and may itself contain NUL); otherwise the body runs to the first NUL.
//! Header names and values use backslash escaping in every frame except
//! `CONNECT` and `CONNECTED`. A lone EOL between frames is a heart-beat,
//! not a frame; [`is_heartbeat`] identifies those so callers can skip them.
//!
//! Rust guideline compliant 2026-02

use crate::constants::{STOMP_ACCEPT_VERSIONS, STOMP_HEART_BEAT};

/// Frame commands understood by this client.
///
/// Client-originated: `CONNECT`, `SUBSCRIBE`. Server-originated:
/// `CONNECTED`, `MESSAGE`, `ERROR`, `RECEIPT`. Anything else fails to
/// parse; the session logs and skips such frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Client frame opening a session.
    Connect,
    /// Client frame registering a subscription.
    Subscribe,
    /// Server acknowledgment of `CONNECT`.
    Connected,
    /// Server frame carrying a payload for a subscription.
    Message,
    /// Server-reported error.
    Error,
    /// Server acknowledgment of a receipt request.
    Receipt,
}

impl Command {
    /// Wire representation of the command.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connect => "CONNECT",
            Self::Subscribe => "SUBSCRIBE",
            Self::Connected => "CONNECTED",
            Self::Message => "MESSAGE",
            Self::Error => "ERROR",
            Self::Receipt => "RECEIPT",
        }
    }

    /// Whether headers of this frame use backslash escaping.
    ///
    /// `CONNECT` and `CONNECTED` predate escaping and are exempt.
    fn escapes_headers(self) -> bool {
        !matches!(self, Self::Connect | Self::Connected)
    }
}

impl std::str::FromStr for Command {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONNECT" => Ok(Self::Connect),
            "SUBSCRIBE" => Ok(Self::Subscribe),
            "CONNECTED" => Ok(Self::Connected),
            "MESSAGE" => Ok(Self::Message),
            "ERROR" => Ok(Self::Error),
            "RECEIPT" => Ok(Self::Receipt),
            other => Err(FrameError::UnknownCommand(other.to_string())),
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while decoding a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Input has no command line.
    Empty,
    /// Command line is not one this client understands.
    UnknownCommand(String),
    /// A header line has no `:` separator.
    MalformedHeader(String),
    /// The body never reaches its NUL terminator.
    MissingTerminator,
    /// The `content-length` header is not a number.
    BadContentLength(String),
    /// The body is shorter than its declared `content-length`, or the
    /// declared length does not fall on a character boundary.
    TruncatedBody {
        /// Bytes the `content-length` header promised.
        declared: usize,
        /// Bytes actually present after the header block.
        available: usize,
    },
    /// A header escape sequence is not one of `\r` `\n` `\c` `\\`.
    BadEscape(char),
}

impl std::fmt::Display for FrameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty frame"),
            Self::UnknownCommand(cmd) => write!(f, "unknown command: {cmd}"),
            Self::MalformedHeader(line) => write!(f, "malformed header: {line}"),
            Self::MissingTerminator => write!(f, "missing NUL terminator"),
            Self::BadContentLength(value) => write!(f, "bad content-length: {value}"),
            Self::TruncatedBody {
                declared,
                available,
            } => write!(
                f,
                "truncated body: content-length {declared} but only {available} bytes"
            ),
            Self::BadEscape(ch) => write!(f, "bad escape sequence: \\{ch}"),
        }
    }
}

impl std::error::Error for FrameError {}

/// A STOMP frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Frame command.
    pub command: Command,
    /// Header entries in wire order. Repeated names are kept; lookups
    /// return the first occurrence, as the protocol requires.
    pub headers: Vec<(String, String)>,
    /// Frame body, empty for the frames this client sends.
    pub body: String,
}

impl Frame {
    /// Build the `CONNECT` frame that opens a session.
    ///
    /// Offers the supported protocol versions and disables heart-beating.
    /// `host` is the broker's virtual host name, taken from the server URL.
    #[must_use]
    pub fn connect(host: &str) -> Self {
        Self {
            command: Command::Connect,
            headers: vec![
                ("accept-version".to_string(), STOMP_ACCEPT_VERSIONS.to_string()),
                ("host".to_string(), host.to_string()),
                ("heart-beat".to_string(), STOMP_HEART_BEAT.to_string()),
            ],
            body: String::new(),
        }
    }

    /// Build the `SUBSCRIBE` frame that registers a subscription.
    #[must_use]
    pub fn subscribe(id: &str, destination: &str) -> Self {
        Self {
            command: Command::Subscribe,
            headers: vec![
                ("id".to_string(), id.to_string()),
                ("destination".to_string(), destination.to_string()),
            ],
            body: String::new(),
        }
    }

    /// Look up a header by name, returning the first occurrence.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Encode the frame for the wire.
    ///
    /// A `content-length` header is appended when the body is non-empty.
    #[must_use]
    pub fn encode(&self) -> String {
        let escape = self.command.escapes_headers();
        let mut out = String::new();
        out.push_str(self.command.as_str());
        out.push('\n');
        for (name, value) in &self.headers {
            if escape {
                out.push_str(&escape_header_field(name));
                out.push(':');
                out.push_str(&escape_header_field(value));
            } else {
                out.push_str(name);
                out.push(':');
                out.push_str(value);
            }
            out.push('\n');
        }
        if !self.body.is_empty() {
            out.push_str("content-length:");
            out.push_str(&self.body.len().to_string());
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&self.body);
        out.push('\0');
        out
    }

    /// Decode one frame from a WebSocket text message.
    ///
    /// Tolerates both LF and CRLF line endings and ignores anything after
    /// the NUL terminator (brokers may append trailing EOLs).
    ///
    /// # Errors
    ///
    /// Returns a [`FrameError`] describing the first structural problem
    /// found. Heart-beats are not frames; check [`is_heartbeat`] first.
    pub fn parse(raw: &str) -> Result<Self, FrameError> {
        let (command_line, mut rest) = split_line(raw).ok_or(FrameError::Empty)?;
        if command_line.is_empty() {
            return Err(FrameError::Empty);
        }
        let command: Command = command_line.parse()?;
        let unescape = command.escapes_headers();

        let mut headers = Vec::new();
        loop {
            let (line, next) = split_line(rest).ok_or(FrameError::MissingTerminator)?;
            rest = next;
            if line.is_empty() {
                break;
            }
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| FrameError::MalformedHeader(line.to_string()))?;
            if unescape {
                headers.push((unescape_header_field(name)?, unescape_header_field(value)?));
            } else {
                headers.push((name.to_string(), value.to_string()));
            }
        }

        let declared = headers
            .iter()
            .find(|(name, _)| name == "content-length")
            .map(|(_, value)| {
                value
                    .parse::<usize>()
                    .map_err(|_| FrameError::BadContentLength(value.clone()))
            })
            .transpose()?;

        let body = match declared {
            Some(len) => {
                let body = rest.get(..len).ok_or(FrameError::TruncatedBody {
                    declared: len,
                    available: rest.len(),
                })?;
                if rest.as_bytes().get(len) != Some(&0) {
                    return Err(FrameError::MissingTerminator);
                }
                body.to_string()
            }
            None => rest
                .split_once('\0')
                .ok_or(FrameError::MissingTerminator)?
                .0
                .to_string(),
        };

        Ok(Self {
            command,
            headers,
            body,
        })
    }
}

/// Returns `true` if `raw` is a heart-beat (a lone EOL) rather than a frame.
#[must_use]
pub fn is_heartbeat(raw: &str) -> bool {
    raw.is_empty() || raw == "\n" || raw == "\r\n"
}

/// Split off the first line, tolerating LF and CRLF endings.
fn split_line(input: &str) -> Option<(&str, &str)> {
    let (line, rest) = input.split_once('\n')?;
    Some((line.strip_suffix('\r').unwrap_or(line), rest))
}

/// Apply STOMP 1.2 header escaping.
fn escape_header_field(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    for ch in field.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            ':' => out.push_str("\\c"),
            other => out.push(other),
        }
    }
    out
}

/// Undo STOMP 1.2 header escaping.
fn unescape_header_field(field: &str) -> Result<String, FrameError> {
    let mut out = String::with_capacity(field.len());
    let mut chars = field.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('\\') => out.push('\\'),
                Some('r') => out.push('\r'),
                Some('n') => out.push('\n'),
                Some('c') => out.push(':'),
                Some(other) => return Err(FrameError::BadEscape(other)),
                None => return Err(FrameError::BadEscape('\\')),
            }
        } else {
            out.push(ch);
        }
    }
    Ok(out)
}
