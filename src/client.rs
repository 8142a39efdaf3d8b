//! Line-oriented JSON client for the external actuator.
//!
//! One JSON object per line in each direction: a request goes out as a
//! single line, then the client blocks until one reply line arrives.
//! There is no retry or timeout here — a missing or unparsable reply is
//! fatal for the session and surfaces as an error to the driver.

use std::io::{BufRead, Write};

use crate::error::{MargaError, Result};
use crate::protocol::{Action, Feedback};

/// Turn-based client over a pair of line-oriented streams.
///
/// Generic over the streams so tests can run against in-memory buffers;
/// the shipped binary wires it to stdin/stdout.
pub struct BotClient<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> BotClient<R, W> {
    /// Create a client over the given streams.
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Send one request as a single JSON line.
    pub fn send(&mut self, action: &Action) -> Result<()> {
        let line = serde_json::to_string(action)?;
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Block until one reply line arrives and parse it.
    ///
    /// EOF means the actuator went away; that ends the session.
    pub fn recv(&mut self) -> Result<Feedback> {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line)?;
        if read == 0 {
            return Err(MargaError::Protocol("actuator closed the stream".into()));
        }
        let value = serde_json::from_str(line.trim_end())?;
        Ok(Feedback::new(value))
    }

    /// Send one request and wait for its reply.
    pub fn round_trip(&mut self, action: &Action) -> Result<Feedback> {
        self.send(action)?;
        self.recv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction;

    #[test]
    fn test_send_writes_one_line() {
        let mut out = Vec::new();
        {
            let mut client = BotClient::new(&b""[..], &mut out);
            client.send(&Action::Position).unwrap();
            client
                .send(&Action::Step { dir: Direction::North })
                .unwrap();
        }

        let written = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], r#"{"action":"position"}"#);
        assert_eq!(lines[1], r#"{"action":"step","dir":"north"}"#);
    }

    #[test]
    fn test_recv_parses_one_line() {
        let input = b"{\"action\":\"step\",\"ok\":true}\n" as &[u8];
        let mut client = BotClient::new(input, Vec::new());

        let reply = client.recv().unwrap();
        assert_eq!(reply.step_result(), Some(true));
    }

    #[test]
    fn test_recv_fails_on_eof() {
        let mut client = BotClient::new(&b""[..], Vec::new());
        assert!(client.recv().is_err());
    }

    #[test]
    fn test_recv_fails_on_garbage() {
        let mut client = BotClient::new(&b"not json\n"[..], Vec::new());
        assert!(client.recv().is_err());
    }

    #[test]
    fn test_round_trip() {
        let input = b"{\"type\":\"position\",\"x\":1,\"y\":2,\"z\":3}\n" as &[u8];
        let mut out = Vec::new();
        let reply = {
            let mut client = BotClient::new(input, &mut out);
            client.round_trip(&Action::Position).unwrap()
        };

        assert!(reply.position().is_some());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"action\":\"position\"}\n"
        );
    }
}
