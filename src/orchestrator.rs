//! Glue between the recognizer, the session and the hub
//!
//! Events are handled one at a time, in arrival order, each to completion
//! before the next is read.

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::hub::PacketSink;
use crate::session::{Session, SessionError};
use crate::speech::{RecognitionEvent, Speaker};

const GREETING: &str = "Ik ben klaar om te luisteren!";

pub struct Orchestrator<S, T> {
    session: Session,
    speaker: S,
    sink: T,
}

impl<S: Speaker, T: PacketSink> Orchestrator<S, T> {
    pub fn new(session: Session, speaker: S, sink: T) -> Self {
        Self {
            session,
            speaker,
            sink,
        }
    }

    /// Tell the user we are listening
    pub fn greet(&self) {
        self.speaker.speak(GREETING);
    }

    /// Process recognition events until the channel closes
    pub async fn run(&mut self, mut events: mpsc::Receiver<RecognitionEvent>) {
        info!(
            devices = self.session.directory().len(),
            "orchestrator started"
        );

        while let Some(event) = events.recv().await {
            self.dispatch(&event).await;
        }

        if let Some(pending) = self.session.pending() {
            info!(device = %pending.device, "unconfirmed command dropped");
        }
        info!("orchestrator stopped");
    }

    /// Handle a single recognition event
    pub async fn dispatch(&mut self, event: &RecognitionEvent) {
        info!(text = %event.text, confidence = event.confidence, "recognized");

        let outcome = match self.session.handle(event) {
            Ok(outcome) => outcome,
            Err(e @ SessionError::NoPendingConfirmation) => {
                error!(%e, "confirmation ignored");
                return;
            }
            Err(e) => {
                warn!(%e, "recognition ignored");
                return;
            }
        };

        info!(event = %outcome, state = %self.session.state(), "session event");

        if let Some(packet) = outcome.packet() {
            if let Err(e) = self.sink.send_packet(&packet).await {
                error!(?e, %packet, "failed to send packet to hub");
            }
        }

        self.speaker.speak(&outcome.speech());
    }

    /// Give back the transport, e.g. to close it on shutdown
    pub fn into_sink(self) -> T {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::directory::DeviceDirectory;
    use crate::hub::HubError;
    use crate::session::{State, DEFAULT_MIN_CONFIDENCE};

    #[derive(Default)]
    struct RecordingSpeaker {
        lines: RefCell<Vec<String>>,
    }

    impl Speaker for &RecordingSpeaker {
        fn speak(&self, text: &str) {
            self.lines.borrow_mut().push(text.to_string());
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        packets: Vec<String>,
        fail: bool,
    }

    impl PacketSink for RecordingSink {
        async fn send_packet(&mut self, packet: &str) -> Result<(), HubError> {
            if self.fail {
                return Err(HubError::Closed);
            }
            self.packets.push(packet.to_string());
            Ok(())
        }
    }

    fn create_orchestrator(
        speaker: &RecordingSpeaker,
        sink: RecordingSink,
    ) -> Orchestrator<&RecordingSpeaker, RecordingSink> {
        let mut directory = DeviceDirectory::new();
        directory.insert("Keuken", 12).unwrap();
        directory.insert("Hal", 3).unwrap();
        Orchestrator::new(
            Session::new(directory, DEFAULT_MIN_CONFIDENCE),
            speaker,
            sink,
        )
    }

    fn heard(text: &str) -> RecognitionEvent {
        RecognitionEvent {
            text: text.to_string(),
            confidence: 0.9,
        }
    }

    #[test]
    fn test_greeting() {
        let speaker = RecordingSpeaker::default();
        let orchestrator = create_orchestrator(&speaker, RecordingSink::default());

        orchestrator.greet();

        assert_eq!(*speaker.lines.borrow(), vec![GREETING.to_string()]);
        assert_eq!(GREETING, "Ik ben klaar om te luisteren!");
        assert_eq!(orchestrator.session.state(), State::Idle);
        assert!(orchestrator.into_sink().packets.is_empty());
    }

    #[test]
    fn test_confirmed_command_reaches_hub() {
        let speaker = RecordingSpeaker::default();
        let mut orchestrator = create_orchestrator(&speaker, RecordingSink::default());

        tokio_test::block_on(async {
            orchestrator.dispatch(&heard("Keuken aan")).await;
            orchestrator.dispatch(&heard("ja")).await;
        });

        assert_eq!(
            *speaker.lines.borrow(),
            vec![
                "Wil je de lichten Keuken zeker aandoen?".to_string(),
                "Ik doe Keuken aan.".to_string(),
            ]
        );
        assert_eq!(orchestrator.into_sink().packets, vec!["2 28 12 255"]);
    }

    #[test]
    fn test_replaced_command_never_sent() {
        let speaker = RecordingSpeaker::default();
        let mut orchestrator = create_orchestrator(&speaker, RecordingSink::default());

        tokio_test::block_on(async {
            orchestrator.dispatch(&heard("Keuken aan")).await;
            orchestrator.dispatch(&heard("Hal uit")).await;
            orchestrator.dispatch(&heard("ja")).await;
        });

        assert_eq!(orchestrator.into_sink().packets, vec!["2 28 3 0"]);
    }

    #[test]
    fn test_rejections_are_silent() {
        let speaker = RecordingSpeaker::default();
        let mut orchestrator = create_orchestrator(&speaker, RecordingSink::default());

        tokio_test::block_on(async {
            orchestrator.dispatch(&heard("ja")).await;
            orchestrator.dispatch(&heard("nee")).await;
            orchestrator.dispatch(&heard("Zolder aan")).await;
            orchestrator
                .dispatch(&RecognitionEvent {
                    text: "Keuken aan".to_string(),
                    confidence: 0.2,
                })
                .await;
        });

        assert!(speaker.lines.borrow().is_empty());
        assert_eq!(orchestrator.session.state(), State::Idle);
        assert!(orchestrator.into_sink().packets.is_empty());
    }

    #[test]
    fn test_cancel() {
        let speaker = RecordingSpeaker::default();
        let mut orchestrator = create_orchestrator(&speaker, RecordingSink::default());

        tokio_test::block_on(async {
            orchestrator.dispatch(&heard("Hal aan")).await;
            orchestrator.dispatch(&heard("nee")).await;
        });

        assert_eq!(speaker.lines.borrow().last().map(String::as_str), Some("OK"));
        assert!(orchestrator.into_sink().packets.is_empty());
    }

    #[test]
    fn test_send_failure_is_absorbed() {
        let speaker = RecordingSpeaker::default();
        let sink = RecordingSink {
            fail: true,
            ..Default::default()
        };
        let mut orchestrator = create_orchestrator(&speaker, sink);

        tokio_test::block_on(async {
            orchestrator.dispatch(&heard("Keuken uit")).await;
            orchestrator.dispatch(&heard("ja")).await;
        });

        assert_eq!(orchestrator.session.state(), State::Idle);
        assert_eq!(speaker.lines.borrow().len(), 2);
    }

    #[test]
    fn test_run_drains_channel() {
        let speaker = RecordingSpeaker::default();
        let mut orchestrator = create_orchestrator(&speaker, RecordingSink::default());
        let (tx, rx) = mpsc::channel(8);

        tokio_test::block_on(async {
            tx.send(heard("Keuken uit")).await.unwrap();
            tx.send(heard("ja")).await.unwrap();
            drop(tx);
            orchestrator.run(rx).await;
        });

        assert_eq!(orchestrator.into_sink().packets, vec!["2 28 12 0"]);
    }
}
