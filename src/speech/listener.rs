//! Line-oriented recognizer front-end
//!
//! Reads phrases from stdin on a dedicated thread and forwards them as
//! recognition events. A line is either `<phrase>` or `<phrase> @<confidence>`.
//! Phrases outside the grammar are scored 0.0, the way a grammar-constrained
//! recognizer rejects out-of-grammar speech.

use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::grammar::Grammar;

/// One phrase reported by the recognizer
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionEvent {
    pub text: String,
    /// In [0, 1]
    pub confidence: f32,
}

impl RecognitionEvent {
    /// Parse an input line. Returns `None` for blank lines.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        if let Some((text, score)) = line.rsplit_once(" @") {
            if let Ok(confidence) = score.trim().parse::<f32>() {
                let confidence = if confidence.is_finite() {
                    confidence.clamp(0.0, 1.0)
                } else {
                    0.0
                };
                return Some(Self {
                    text: text.trim().to_string(),
                    confidence,
                });
            }
        }

        Some(Self {
            text: line.to_string(),
            confidence: 1.0,
        })
    }
}

/// Errors starting the listener
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("listener is already running")]
    AlreadyRunning,

    #[error("failed to spawn listener thread: {0}")]
    ThreadSpawn(String),
}

/// Stdin recognizer that feeds the orchestrator
pub struct ConsoleListener {
    event_tx: Option<mpsc::Sender<RecognitionEvent>>,
    grammar: Arc<Grammar>,
    running: Arc<AtomicBool>,
}

impl ConsoleListener {
    pub fn new(event_tx: mpsc::Sender<RecognitionEvent>, grammar: Grammar) -> Self {
        Self {
            event_tx: Some(event_tx),
            grammar: Arc::new(grammar),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start reading stdin
    ///
    /// Input is read with blocking I/O on a dedicated thread, outside the
    /// runtime. The sender moves into that thread, so the event channel
    /// closes at end of input.
    pub fn start(&mut self) -> Result<(), ListenerError> {
        let event_tx = self.event_tx.take().ok_or(ListenerError::AlreadyRunning)?;
        let grammar = Arc::clone(&self.grammar);
        let running = Arc::clone(&self.running);

        running.store(true, Ordering::SeqCst);
        info!(phrases = grammar.len(), "listening");

        thread::Builder::new()
            .name("speech-listener".to_string())
            .spawn(move || {
                let stdin = std::io::stdin();

                for line in stdin.lock().lines() {
                    if !running.load(Ordering::SeqCst) {
                        break;
                    }

                    let line = match line {
                        Ok(line) => line,
                        Err(e) => {
                            warn!(?e, "failed to read input");
                            break;
                        }
                    };

                    let Some(event) = recognize(&grammar, &line) else {
                        continue;
                    };
                    if event_tx.blocking_send(event).is_err() {
                        break;
                    }
                }

                debug!("end of input");
                running.store(false, Ordering::SeqCst);
                info!("listener stopped");
            })
            .map_err(|e| ListenerError::ThreadSpawn(e.to_string()))?;

        Ok(())
    }

    /// Stop forwarding input. Takes effect after the next line.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

/// Score a line against the grammar
fn recognize(grammar: &Grammar, line: &str) -> Option<RecognitionEvent> {
    let mut event = RecognitionEvent::parse_line(line)?;
    if !grammar.contains(&event.text) {
        debug!(text = %event.text, "phrase outside grammar");
        event.confidence = 0.0;
    }
    Some(event)
}
