//! Speech output
//!
//! Every spoken line is logged. With a TTS program configured it is also
//! handed to that program; playback is not awaited.

use tokio::process::Command;
use tracing::{info, warn};

/// Something that can say a line to the user
pub trait Speaker {
    fn speak(&self, text: &str);
}

/// Configured speech output
pub enum VoiceOutput {
    /// Log only
    Log,
    /// Run `program [args..] <text>` for every line
    Command { program: String, args: Vec<String> },
}

impl VoiceOutput {
    /// Build from an optional command line such as `espeak-ng -v nl`
    pub fn from_command_line(command: Option<&str>) -> Self {
        let mut parts = match command {
            Some(line) => line.split_whitespace().map(str::to_string),
            None => return VoiceOutput::Log,
        };

        match parts.next() {
            Some(program) => VoiceOutput::Command {
                program,
                args: parts.collect(),
            },
            None => VoiceOutput::Log,
        }
    }
}

impl Speaker for VoiceOutput {
    fn speak(&self, text: &str) {
        info!(target: "speak", "{}", text);

        if let VoiceOutput::Command { program, args } = self {
            if let Err(e) = Command::new(program).args(args).arg(text).spawn() {
                warn!(?e, %program, "failed to start speech program");
            }
        }
    }
}
