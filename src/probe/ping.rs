//! Single-shot ping invocation and locale-tolerant output parsing.

use std::process::Stdio;
use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use tokio::process::Command;

use super::{ProbeError, ProbeSource};

/// Probe that shells out to the system `ping` binary, one echo per call.
#[derive(Debug, Clone)]
pub struct PingProbe {
    timeout: Duration,
}

impl PingProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl ProbeSource for PingProbe {
    async fn probe(&self, address: &str) -> Result<Option<f64>, ProbeError> {
        let output = ping_command(address, self.timeout)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        // Unreachable hosts exit non-zero; that is a lost packet, not an
        // invocation failure.
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_ping_output(&stdout))
    }
}

#[cfg(not(windows))]
fn ping_command(address: &str, timeout: Duration) -> Command {
    let timeout_secs = timeout.as_secs().max(1);
    let mut cmd = Command::new("ping");
    cmd.args(["-c", "1", "-W", &timeout_secs.to_string(), address]);
    cmd
}

#[cfg(windows)]
fn ping_command(address: &str, timeout: Duration) -> Command {
    let timeout_ms = timeout.as_millis().max(1000);
    let mut cmd = Command::new("ping");
    cmd.args(["-n", "1", "-w", &timeout_ms.to_string(), address]);
    cmd
}

/// Parse one ping invocation's output into a latency in milliseconds.
///
/// Ping output is locale-dependent: the time label varies by language and
/// the decimal mark may be a comma. A reply line is only trusted when a
/// `ttl=` marker is present, so summary-only output from a dead host never
/// fabricates a latency.
fn parse_ping_output(output: &str) -> Option<f64> {
    if !output.to_lowercase().contains("ttl=") {
        return None;
    }

    // Per-packet response, any locale: "time=12.3 ms", "tempo=23ms",
    // "temps=12,4 ms", "Zeit=12ms", "tiempo<1ms"
    static RE_TIME: OnceLock<Regex> = OnceLock::new();
    let re_time = RE_TIME.get_or_init(|| {
        Regex::new(r"(?i)(?:time|tempo|temps|zeit|tiempo)\s*[=<]\s*(?P<val>[0-9]+(?:[.,][0-9]+)?)\s*ms")
            .unwrap()
    });

    if let Some(caps) = re_time.captures(output) {
        let raw = caps.name("val")?.as_str().replace(',', ".");
        if let Ok(ms) = raw.parse::<f64>() {
            return Some(ms);
        }
    }

    // Summary fallback "rtt min/avg/max/mdev = a/b/c/d ms" (Linux) or
    // "round-trip min/avg/max/stddev = a/b/c/d ms" (macOS): use the avg.
    static RE_SUMMARY: OnceLock<Regex> = OnceLock::new();
    let re_summary = RE_SUMMARY.get_or_init(|| {
        Regex::new(r"(?:rtt|round-trip)\s+min/avg/max/\w+\s*=\s*([0-9.]+)/([0-9.]+)/([0-9.]+)")
            .unwrap()
    });

    if let Some(caps) = re_summary.captures(output) {
        if let Ok(ms) = caps.get(2)?.as_str().parse::<f64>() {
            return Some(ms);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_linux_reply() {
        let out = "64 bytes from 8.8.8.8: icmp_seq=1 ttl=117 time=12.345 ms";
        assert_eq!(parse_ping_output(out), Some(12.345));
    }

    #[test]
    fn test_parse_windows_reply() {
        let out = "Reply from 8.8.8.8: bytes=32 time=23ms TTL=117";
        assert_eq!(parse_ping_output(out), Some(23.0));
    }

    #[test]
    fn test_parse_windows_sub_millisecond() {
        let out = "Reply from 192.168.0.1: bytes=32 time<1ms TTL=64";
        assert_eq!(parse_ping_output(out), Some(1.0));
    }

    #[test]
    fn test_parse_portuguese_reply_with_comma() {
        let out = "Resposta de 8.8.8.8: bytes=32 tempo=23,4ms TTL=117";
        assert_eq!(parse_ping_output(out), Some(23.4));
    }

    #[test]
    fn test_parse_french_reply() {
        let out = "64 octets de 1.1.1.1 : icmp_seq=1 ttl=57 temps=9,81 ms";
        assert_eq!(parse_ping_output(out), Some(9.81));
    }

    #[test]
    fn test_parse_macos_summary_only() {
        let out = "PING google.com (142.250.69.174): 56 data bytes\n\
                   64 bytes from 142.250.69.174: icmp_seq=0 ttl=117\n\
                   --- google.com ping statistics ---\n\
                   1 packets transmitted, 1 packets received, 0.0% packet loss\n\
                   round-trip min/avg/max/stddev = 17.906/17.906/17.906/0.000 ms";
        assert_eq!(parse_ping_output(out), Some(17.906));
    }

    #[test]
    fn test_no_ttl_means_no_reply() {
        // A dead host still prints a summary; without ttl= nothing is
        // trusted.
        let out = "PING 10.255.255.1 (10.255.255.1) 56(84) bytes of data.\n\
                   --- 10.255.255.1 ping statistics ---\n\
                   1 packets transmitted, 0 received, 100% packet loss, time 0ms";
        assert_eq!(parse_ping_output(out), None);
    }

    #[test]
    fn test_garbage_output() {
        assert_eq!(parse_ping_output(""), None);
        assert_eq!(parse_ping_output("ping: unknown host nowhere.invalid"), None);
        // ttl present but no parseable time
        assert_eq!(parse_ping_output("ttl=64 but no time here"), None);
    }
}
