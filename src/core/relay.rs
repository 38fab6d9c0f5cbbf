use crate::core::morse;
use crate::domain::model::{
    AccessPointCredential, Message, PhaseTiming, RelayPhase, RelayReport, RelayRun,
};
use crate::domain::ports::{
    CapabilityGate, MessageDispatcher, Notifier, RelaySettings, WirelessAssociator,
};
use crate::utils::error::{RelayError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use url::Url;

/// Fixed deployment facts for a relay run: the two access points, the shared
/// dispatch endpoint, and the Morse unit length.
#[derive(Debug, Clone)]
pub struct RelayPlan {
    pub transmitter: AccessPointCredential,
    pub receiver: AccessPointCredential,
    pub endpoint: Url,
    pub unit: Duration,
}

impl RelayPlan {
    pub fn from_settings<S: RelaySettings>(settings: &S) -> Result<Self> {
        let endpoint = Url::parse(settings.endpoint()).map_err(|e| {
            RelayError::InvalidConfigValueError {
                field: "endpoint".to_string(),
                value: settings.endpoint().to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            transmitter: settings.transmitter(),
            receiver: settings.receiver(),
            endpoint,
            unit: Duration::from_millis(settings.unit_ms()),
        })
    }
}

/// Sequential state machine for one send: permission check, transmitter
/// association and dispatch, receiver association, Morse-timed wait, second
/// dispatch. Every failure is terminal for the run and reported to the
/// operator; the wireless state is never rolled back.
pub struct RelayOrchestrator<W, D, C, N> {
    plan: RelayPlan,
    associator: Mutex<W>,
    dispatcher: D,
    capabilities: C,
    notifier: N,
    busy: AtomicBool,
}

impl<W, D, C, N> RelayOrchestrator<W, D, C, N>
where
    W: WirelessAssociator,
    D: MessageDispatcher,
    C: CapabilityGate,
    N: Notifier,
{
    pub fn new(plan: RelayPlan, associator: W, dispatcher: D, capabilities: C, notifier: N) -> Self {
        Self {
            plan,
            associator: Mutex::new(associator),
            dispatcher,
            capabilities,
            notifier,
            busy: AtomicBool::new(false),
        }
    }

    pub fn plan(&self) -> &RelayPlan {
        &self.plan
    }

    /// Runs one relay end to end. A blank message is refused before any phase
    /// runs, and a second call while a run is in flight is rejected with
    /// `RelayError::Busy` rather than queued.
    pub async fn start(&self, raw_message: &str) -> Result<RelayReport> {
        let message = match Message::parse(raw_message) {
            Ok(message) => message,
            Err(e) => {
                self.notifier.notify("Please enter a message.").await;
                return Err(e);
            }
        };

        if self.busy.swap(true, Ordering::SeqCst) {
            tracing::warn!("Rejecting send: a relay run is already in flight");
            return Err(RelayError::Busy);
        }

        let started = Instant::now();
        let mut run = RelayRun::new(message);
        let mut timings = Vec::new();

        let outcome = self.drive(&mut run, &mut timings).await;
        self.busy.store(false, Ordering::SeqCst);

        match outcome {
            Ok(delay) => {
                run.advance(RelayPhase::Done);
                self.notifier.notify("Message sent to receiver").await;
                tracing::info!(
                    message = %run.message,
                    delay_ms = delay.as_millis() as u64,
                    "Relay run completed"
                );
                Ok(RelayReport {
                    message: run.message.as_str().to_string(),
                    delay_ms: delay.as_millis() as u64,
                    total_duration_ms: started.elapsed().as_millis() as u64,
                    phases: timings,
                })
            }
            Err(e) => {
                let failed_at = run.phase;
                run.fail(&e);
                tracing::error!(phase = %failed_at, error = %e, "Relay run failed");
                self.notifier
                    .notify(&format!("Error during {}: {}", failed_at, e))
                    .await;
                Err(e)
            }
        }
    }

    async fn drive(&self, run: &mut RelayRun, timings: &mut Vec<PhaseTiming>) -> Result<Duration> {
        run.advance(RelayPhase::PermissionCheck);
        let step = Instant::now();
        if !self.capabilities.request_wireless_capability().await? {
            return Err(RelayError::PermissionDenied);
        }
        record(timings, RelayPhase::PermissionCheck, step);

        run.advance(RelayPhase::ConnectTransmitter);
        let step = Instant::now();
        self.associate(&self.plan.transmitter).await?;
        record(timings, RelayPhase::ConnectTransmitter, step);
        self.notifier
            .notify(&format!("Connected to {}", self.plan.transmitter.ssid))
            .await;

        run.advance(RelayPhase::SendToTransmitter);
        let step = Instant::now();
        self.dispatcher
            .send(&self.plan.endpoint, run.message.as_str())
            .await?;
        record(timings, RelayPhase::SendToTransmitter, step);
        self.notifier.notify("Message sent to transmitter").await;

        run.advance(RelayPhase::ConnectReceiver);
        let step = Instant::now();
        self.associate(&self.plan.receiver).await?;
        record(timings, RelayPhase::ConnectReceiver, step);
        self.notifier
            .notify(&format!("Connected to {}", self.plan.receiver.ssid))
            .await;

        run.advance(RelayPhase::WaitDelay);
        let step = Instant::now();
        let delay = morse::compute_delay(run.message.as_str(), self.plan.unit);
        tracing::info!(
            delay_ms = delay.as_millis() as u64,
            "Waiting out the Morse transmission window"
        );
        tokio::time::sleep(delay).await;
        record(timings, RelayPhase::WaitDelay, step);

        run.advance(RelayPhase::SendToReceiver);
        let step = Instant::now();
        self.dispatcher
            .send(&self.plan.endpoint, run.message.as_str())
            .await?;
        record(timings, RelayPhase::SendToReceiver, step);

        Ok(delay)
    }

    async fn associate(&self, credential: &AccessPointCredential) -> Result<()> {
        let mut associator = self.associator.lock().await;
        associator.associate(credential).await
    }
}

fn record(timings: &mut Vec<PhaseTiming>, phase: RelayPhase, started: Instant) {
    timings.push(PhaseTiming {
        phase,
        duration_ms: started.elapsed().as_millis() as u64,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;

    type EventLog = Arc<Mutex<Vec<String>>>;

    async fn push(log: &EventLog, event: String) {
        log.lock().await.push(event);
    }

    struct ScriptedAssociator {
        log: EventLog,
        fail_on: Option<String>,
        settle: Duration,
        current: Option<String>,
    }

    impl ScriptedAssociator {
        fn new(log: EventLog) -> Self {
            Self {
                log,
                fail_on: None,
                settle: Duration::ZERO,
                current: None,
            }
        }

        fn failing_on(mut self, ssid: &str) -> Self {
            self.fail_on = Some(ssid.to_string());
            self
        }

        fn settling_in(mut self, settle: Duration) -> Self {
            self.settle = settle;
            self
        }
    }

    #[async_trait]
    impl WirelessAssociator for ScriptedAssociator {
        async fn associate(&mut self, credential: &AccessPointCredential) -> Result<()> {
            tokio::time::sleep(self.settle).await;
            if self.fail_on.as_deref() == Some(credential.ssid.as_str()) {
                return Err(RelayError::AssociationFailure {
                    ssid: credential.ssid.clone(),
                    reason: "no such network".to_string(),
                });
            }
            push(&self.log, format!("associate:{}", credential.ssid)).await;
            self.current = Some(credential.ssid.clone());
            Ok(())
        }

        fn current_ssid(&self) -> Option<&str> {
            self.current.as_deref()
        }
    }

    struct RecordingDispatcher {
        log: EventLog,
        fail: bool,
    }

    #[async_trait]
    impl MessageDispatcher for RecordingDispatcher {
        async fn send(&self, endpoint: &Url, message: &str) -> Result<()> {
            if self.fail {
                return Err(RelayError::DispatchRejected { status: 500 });
            }
            push(&self.log, format!("dispatch:{}:{}", endpoint.path(), message)).await;
            Ok(())
        }
    }

    struct FixedGate {
        log: EventLog,
        grant: bool,
    }

    #[async_trait]
    impl CapabilityGate for FixedGate {
        async fn request_wireless_capability(&self) -> Result<bool> {
            push(&self.log, "permission".to_string()).await;
            Ok(self.grant)
        }
    }

    struct RecordingNotifier {
        notices: EventLog,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, text: &str) {
            push(&self.notices, text.to_string()).await;
        }
    }

    fn test_plan(unit_ms: u64) -> RelayPlan {
        RelayPlan {
            transmitter: AccessPointCredential::wpa2("tx-net", "tx-pass"),
            receiver: AccessPointCredential::wpa2("rx-net", "rx-pass"),
            endpoint: Url::parse("http://192.168.4.1/send").unwrap(),
            unit: Duration::from_millis(unit_ms),
        }
    }

    struct Harness {
        orchestrator: RelayOrchestrator<
            ScriptedAssociator,
            RecordingDispatcher,
            FixedGate,
            RecordingNotifier,
        >,
        events: EventLog,
        notices: EventLog,
    }

    fn harness(plan: RelayPlan, associator: ScriptedAssociator, fail_dispatch: bool, grant: bool) -> Harness {
        let events = associator.log.clone();
        let notices: EventLog = Arc::new(Mutex::new(Vec::new()));
        let orchestrator = RelayOrchestrator::new(
            plan,
            associator,
            RecordingDispatcher {
                log: events.clone(),
                fail: fail_dispatch,
            },
            FixedGate {
                log: events.clone(),
                grant,
            },
            RecordingNotifier {
                notices: notices.clone(),
            },
        );
        Harness {
            orchestrator,
            events,
            notices,
        }
    }

    #[tokio::test]
    async fn test_blank_message_never_reaches_permission_check() {
        let events: EventLog = Arc::new(Mutex::new(Vec::new()));
        let h = harness(test_plan(1), ScriptedAssociator::new(events), false, true);

        let result = h.orchestrator.start("   ").await;
        assert!(matches!(result, Err(RelayError::InvalidInput { .. })));
        assert!(h.events.lock().await.is_empty());
        assert_eq!(h.notices.lock().await.as_slice(), ["Please enter a message."]);
    }

    #[tokio::test]
    async fn test_permission_denied_stops_before_association() {
        let events: EventLog = Arc::new(Mutex::new(Vec::new()));
        let h = harness(test_plan(1), ScriptedAssociator::new(events), false, false);

        let result = h.orchestrator.start("SOS").await;
        assert!(matches!(result, Err(RelayError::PermissionDenied)));
        assert_eq!(h.events.lock().await.as_slice(), ["permission"]);
    }

    #[tokio::test]
    async fn test_transmitter_failure_never_dispatches() {
        let events: EventLog = Arc::new(Mutex::new(Vec::new()));
        let associator = ScriptedAssociator::new(events).failing_on("tx-net");
        let h = harness(test_plan(1), associator, false, true);

        let result = h.orchestrator.start("SOS").await;
        assert!(matches!(result, Err(RelayError::AssociationFailure { .. })));

        let events = h.events.lock().await;
        assert!(!events.iter().any(|e| e.starts_with("dispatch:")));

        let notices = h.notices.lock().await;
        assert!(notices
            .iter()
            .any(|n| n.contains("transmitter association")));
    }

    #[tokio::test]
    async fn test_receiver_failure_dispatches_once() {
        let events: EventLog = Arc::new(Mutex::new(Vec::new()));
        let associator = ScriptedAssociator::new(events).failing_on("rx-net");
        let h = harness(test_plan(1), associator, false, true);

        let result = h.orchestrator.start("SOS").await;
        assert!(matches!(result, Err(RelayError::AssociationFailure { .. })));

        let events = h.events.lock().await;
        let dispatches = events.iter().filter(|e| e.starts_with("dispatch:")).count();
        assert_eq!(dispatches, 1);
    }

    #[tokio::test]
    async fn test_happy_path_orders_phases_and_dispatches_twice() {
        let events: EventLog = Arc::new(Mutex::new(Vec::new()));
        let h = harness(test_plan(1), ScriptedAssociator::new(events), false, true);

        let report = h.orchestrator.start("SOS").await.unwrap();

        let events = h.events.lock().await;
        assert_eq!(
            events.as_slice(),
            [
                "permission",
                "associate:tx-net",
                "dispatch:/send:SOS",
                "associate:rx-net",
                "dispatch:/send:SOS",
            ]
        );

        let expected = morse::compute_delay("SOS", Duration::from_millis(1));
        assert_eq!(report.delay_ms, expected.as_millis() as u64);
        assert_eq!(report.message, "SOS");
        assert!(report
            .phases
            .iter()
            .any(|t| t.phase == RelayPhase::WaitDelay));

        let notices = h.notices.lock().await;
        assert_eq!(notices.first().unwrap(), "Connected to tx-net");
        assert_eq!(notices.last().unwrap(), "Message sent to receiver");
    }

    #[tokio::test]
    async fn test_dispatch_failure_is_terminal() {
        let events: EventLog = Arc::new(Mutex::new(Vec::new()));
        let h = harness(test_plan(1), ScriptedAssociator::new(events), true, true);

        let result = h.orchestrator.start("SOS").await;
        assert!(matches!(
            result,
            Err(RelayError::DispatchRejected { status: 500 })
        ));

        let notices = h.notices.lock().await;
        assert!(notices
            .iter()
            .any(|n| n.contains("transmitter dispatch")));
    }

    #[tokio::test]
    async fn test_second_send_is_rejected_while_busy() {
        let events: EventLog = Arc::new(Mutex::new(Vec::new()));
        let associator =
            ScriptedAssociator::new(events).settling_in(Duration::from_millis(100));
        let h = harness(test_plan(1), associator, false, true);
        let orchestrator = Arc::new(h.orchestrator);

        let first = {
            let orchestrator = orchestrator.clone();
            tokio::spawn(async move { orchestrator.start("SOS").await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        let second = orchestrator.start("HI").await;
        assert!(matches!(second, Err(RelayError::Busy)));

        assert!(first.await.unwrap().is_ok());

        // With the first run complete, a fresh run is accepted again.
        assert!(orchestrator.start("HI").await.is_ok());
    }

    #[tokio::test]
    async fn test_wait_brackets_the_computed_delay() {
        // 20ms unit, "E" = 4 units = 80ms floor between the two dispatches.
        let events: EventLog = Arc::new(Mutex::new(Vec::new()));
        let h = harness(test_plan(20), ScriptedAssociator::new(events), false, true);

        let started = Instant::now();
        let report = h.orchestrator.start("E").await.unwrap();
        let elapsed = started.elapsed();

        assert_eq!(report.delay_ms, 80);
        assert!(elapsed >= Duration::from_millis(80));
    }
}
