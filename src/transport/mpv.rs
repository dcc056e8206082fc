use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{anyhow, Context as _, Result};
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::{PlayerEvent, Transport};
use crate::app::events::AppEvent;

/// Playback surface backed by an external mpv process, driven over its JSON
/// IPC socket. Commands go out on one connection; a reader thread on a
/// second connection turns mpv events into [`PlayerEvent`]s on the app bus.
pub struct MpvTransport {
    child: Mutex<Child>,
    commands: Mutex<UnixStream>,
    socket: PathBuf,
}

impl MpvTransport {
    pub fn spawn(mpv_bin: &str, tx: mpsc::Sender<AppEvent>) -> Result<Self> {
        let socket =
            std::env::temp_dir().join(format!("kino-mpv-{}.sock", std::process::id()));

        let child = Command::new(mpv_bin)
            .arg("--idle=yes")
            .arg("--no-terminal")
            .arg("--force-window=no")
            .arg("--keep-open=no")
            .arg(format!("--input-ipc-server={}", socket.display()))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to launch {mpv_bin}"))?;

        let commands = connect_with_retry(&socket)?;
        let events = connect_with_retry(&socket)?;

        let transport = Self {
            child: Mutex::new(child),
            commands: Mutex::new(commands),
            socket,
        };

        // Properties the app event loop listens to.
        transport.send(json!({ "command": ["observe_property", 1, "pause"] }))?;
        transport.send(json!({ "command": ["observe_property", 2, "time-pos"] }))?;
        transport.send(json!({ "command": ["observe_property", 3, "duration"] }))?;

        std::thread::spawn(move || event_loop(BufReader::new(events), tx));

        Ok(transport)
    }

    fn send(&self, command: Value) -> Result<()> {
        let mut sock = self
            .commands
            .lock()
            .map_err(|_| anyhow!("mpv command socket poisoned"))?;
        serde_json::to_writer(&mut *sock, &command)?;
        sock.write_all(b"\n")?;
        Ok(())
    }
}

impl Transport for MpvTransport {
    fn load(&self, url: &str, title: &str) -> Result<()> {
        debug!(url, title, "loading media");
        self.send(json!({ "command": ["set_property", "force-media-title", title] }))?;
        self.send(json!({ "command": ["loadfile", url, "replace"] }))?;
        self.send(json!({ "command": ["set_property", "pause", false] }))
    }

    fn toggle_pause(&self) -> Result<()> {
        self.send(json!({ "command": ["cycle", "pause"] }))
    }

    fn seek_by(&self, secs: f64) -> Result<()> {
        self.send(json!({ "command": ["seek", secs, "relative"] }))
    }

    fn adjust_volume(&self, delta: f64) -> Result<()> {
        // mpv's volume scale is 0-100.
        self.send(json!({ "command": ["add", "volume", delta * 100.0] }))
    }

    fn toggle_fullscreen(&self) -> Result<()> {
        self.send(json!({ "command": ["cycle", "fullscreen"] }))
    }

    fn add_subtitle(&self, url: &str, language: &str, name: &str) -> Result<()> {
        debug!(url, language, "attaching subtitle track");
        self.send(json!({ "command": ["sub-add", url, "auto", name, language] }))
    }

    fn quit(&self) -> Result<()> {
        self.send(json!({ "command": ["quit"] }))
    }
}

impl Drop for MpvTransport {
    fn drop(&mut self) {
        let _ = self.send(json!({ "command": ["quit"] }));
        if let Ok(mut child) = self.child.lock() {
            let _ = child.kill();
            let _ = child.wait();
        }
        let _ = std::fs::remove_file(&self.socket);
    }
}

fn connect_with_retry(socket: &Path) -> Result<UnixStream> {
    // mpv creates the socket shortly after startup.
    for _ in 0..50 {
        match UnixStream::connect(socket) {
            Ok(stream) => return Ok(stream),
            Err(_) => std::thread::sleep(Duration::from_millis(50)),
        }
    }
    Err(anyhow!(
        "mpv IPC socket never appeared at {}",
        socket.display()
    ))
}

fn event_loop(reader: BufReader<UnixStream>, tx: mpsc::Sender<AppEvent>) {
    for line in reader.lines() {
        let Ok(line) = line else { break };
        let Ok(msg) = serde_json::from_str::<Value>(&line) else {
            continue;
        };
        let Some(event) = parse_event(&msg) else {
            continue;
        };
        if tx.blocking_send(AppEvent::Player(event)).is_err() {
            break;
        }
    }
    warn!("mpv event stream closed");
}

fn parse_event(msg: &Value) -> Option<PlayerEvent> {
    match msg.get("event")?.as_str()? {
        "end-file" => match msg.get("reason").and_then(Value::as_str) {
            Some("eof") => Some(PlayerEvent::Ended),
            Some("error") => Some(PlayerEvent::Error(
                msg.get("file_error")
                    .and_then(Value::as_str)
                    .unwrap_or("playback failed")
                    .to_string(),
            )),
            // stop/redirect/quit are user-driven, never an advance trigger
            _ => None,
        },
        "property-change" => match msg.get("name")?.as_str()? {
            "pause" => msg.get("data").and_then(Value::as_bool).map(PlayerEvent::Paused),
            "time-pos" => msg
                .get("data")
                .and_then(Value::as_f64)
                .map(PlayerEvent::Position),
            "duration" => msg
                .get("data")
                .and_then(Value::as_f64)
                .map(PlayerEvent::Duration),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_end_of_file() {
        let msg = serde_json::json!({ "event": "end-file", "reason": "eof" });
        assert_eq!(parse_event(&msg), Some(PlayerEvent::Ended));
    }

    #[test]
    fn parses_load_error() {
        let msg = serde_json::json!({
            "event": "end-file", "reason": "error", "file_error": "unsupported codec"
        });
        assert_eq!(
            parse_event(&msg),
            Some(PlayerEvent::Error("unsupported codec".to_string()))
        );
    }

    #[test]
    fn user_stop_is_not_an_advance_trigger() {
        let msg = serde_json::json!({ "event": "end-file", "reason": "stop" });
        assert_eq!(parse_event(&msg), None);
    }

    #[test]
    fn parses_pause_property() {
        let msg = serde_json::json!({
            "event": "property-change", "id": 1, "name": "pause", "data": true
        });
        assert_eq!(parse_event(&msg), Some(PlayerEvent::Paused(true)));
    }
}
