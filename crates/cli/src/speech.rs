//! Narration through the platform's speech program.
//!
//! The synthesizer runs as a child process fed through stdin, so pressing
//! `q` can kill it at once. A spinner animates on stdout while it speaks.

use std::io::{self, Write};
use std::process::Stdio;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use owo_colors::OwoColorize;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

const FRAME_INTERVAL: Duration = Duration::from_millis(200);
const SPINNER_FRAMES: [char; 4] = ['-', '\\', '|', '/'];

/// Speech settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarratorConfig {
    /// Words per minute
    pub rate: u32,
    /// Synthesizer voice name, platform default when `None`
    pub voice: Option<String>,
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self { rate: 175, voice: None }
    }
}

/// SAPI rate (-10..=10) closest to `wpm`, with 0 at 175 words per minute
fn sapi_rate(wpm: u32) -> i64 {
    ((i64::from(wpm) - 175) / 25).clamp(-10, 10)
}

fn speech_command(config: &NarratorConfig) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("say");
        cmd.arg("-r").arg(config.rate.to_string());
        if let Some(voice) = &config.voice {
            cmd.arg("-v").arg(voice);
        }
        cmd.arg("-f").arg("-");
        cmd
    } else if cfg!(target_os = "windows") {
        let select_voice = config
            .voice
            .as_ref()
            .map(|voice| format!("$s.SelectVoice('{}');", voice.replace('\'', "''")))
            .unwrap_or_default();
        let script = format!(
            "Add-Type -AssemblyName System.Speech; \
             $s = New-Object System.Speech.Synthesis.SpeechSynthesizer; \
             $s.Rate = {}; {} $s.Speak([Console]::In.ReadToEnd())",
            sapi_rate(config.rate),
            select_voice
        );
        let mut cmd = Command::new("powershell");
        cmd.args(["-NoProfile", "-Command", &script]);
        cmd
    } else {
        let mut cmd = Command::new("espeak");
        cmd.arg("-s").arg(config.rate.to_string());
        if let Some(voice) = &config.voice {
            cmd.arg("-v").arg(voice);
        }
        cmd.arg("--stdin");
        cmd
    }
}

/// Restores cooked mode when dropped
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Block until `q` (or Ctrl-C) is pressed or `stop` is set; true when quit was requested
fn watch_keys(stop: &AtomicBool) -> bool {
    let _raw = match RawMode::enable() {
        Ok(raw) => raw,
        Err(e) => {
            debug!(error = %e, "keyboard not available, narration can't be cancelled");
            return false;
        }
    };

    while !stop.load(Ordering::Relaxed) {
        match event::poll(FRAME_INTERVAL) {
            Ok(true) => {
                if let Ok(Event::Key(key)) = event::read()
                    && key.kind == KeyEventKind::Press
                    && (key.code == KeyCode::Char('q')
                        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)))
                {
                    return true;
                }
            }
            Ok(false) => {}
            Err(_) => return false,
        }
    }
    false
}

async fn spin(stop: Arc<AtomicBool>) {
    for frame in SPINNER_FRAMES.iter().cycle() {
        if stop.load(Ordering::Relaxed) {
            break;
        }
        print!("\r{} {}", frame, "Reading entry ('q' to quit)...".dimmed());
        let _ = io::stdout().flush();
        tokio::time::sleep(FRAME_INTERVAL).await;
    }
}

/// Speak `text`, returning early if the user presses `q`.
pub async fn narrate(text: &str, config: &NarratorConfig) -> anyhow::Result<()> {
    let mut child = speech_command(config)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .context("Failed to start the speech synthesizer")?;

    if let Some(mut stdin) = child.stdin.take() {
        let bytes = text.as_bytes().to_vec();
        tokio::spawn(async move {
            if let Err(e) = stdin.write_all(&bytes).await {
                warn!(error = %e, "speech synthesizer closed its input early");
            }
        });
    }

    let stop = Arc::new(AtomicBool::new(false));
    let spinner = tokio::spawn(spin(Arc::clone(&stop)));
    let key_flag = Arc::clone(&stop);
    let mut watcher = tokio::task::spawn_blocking(move || watch_keys(&key_flag));

    let (interrupted, outcome) = tokio::select! {
        status = child.wait() => (false, status.map(|status| debug!(%status, "narration finished"))),
        Ok(true) = &mut watcher => (true, child.kill().await),
    };

    stop.store(true, Ordering::Relaxed);
    let _ = spinner.await;
    if !interrupted {
        let _ = watcher.await;
    }

    outcome.context("Speech synthesizer failed")?;
    println!("\r\n\nEnd of Audio\n");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sapi_rate() {
        assert_eq!(sapi_rate(175), 0);
        assert_eq!(sapi_rate(250), 3);
        assert_eq!(sapi_rate(100), -3);
        assert_eq!(sapi_rate(1000), 10);
        assert_eq!(sapi_rate(0), -7);
    }

    #[test]
    fn test_speech_command_feeds_stdin() {
        let config = NarratorConfig { rate: 200, voice: Some("en".to_string()) };
        let cmd = speech_command(&config);
        let args: Vec<String> = cmd.as_std().get_args().map(|a| a.to_string_lossy().into_owned()).collect();

        if cfg!(target_os = "macos") {
            assert_eq!(args, vec!["-r", "200", "-v", "en", "-f", "-"]);
        } else if cfg!(target_os = "windows") {
            assert!(args.last().is_some_and(|script| script.contains("SelectVoice('en')")));
        } else {
            assert_eq!(cmd.as_std().get_program(), "espeak");
            assert_eq!(args, vec!["-s", "200", "-v", "en", "--stdin"]);
        }
    }

    #[test]
    fn test_default_config() {
        let config = NarratorConfig::default();
        assert_eq!(config.rate, 175);
        assert!(config.voice.is_none());
    }
}
