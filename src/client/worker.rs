use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use super::{GenerateError, GeneratedReadme, GenerationClient, HealthStatus, Username};

/// Result of a background client call.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerEvent {
    Generated(Result<GeneratedReadme, GenerateError>),
    Health(Result<HealthStatus, GenerateError>),
}

/// Runs client calls off the UI thread.
///
/// At most one generation is in flight; results are collected by polling
/// [`GenerationWorker::try_recv`] from the event loop.
pub struct GenerationWorker {
    client: Arc<dyn GenerationClient>,
    tx: Sender<WorkerEvent>,
    rx: Receiver<WorkerEvent>,
    generating: bool,
}

impl GenerationWorker {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            client,
            tx,
            rx,
            generating: false,
        }
    }

    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    pub const fn is_generating(&self) -> bool {
        self.generating
    }

    /// Start generating for `username`. Returns `false` without doing
    /// anything if a generation is already running.
    pub fn spawn_generate(&mut self, username: Username) -> bool {
        if self.generating {
            tracing::debug!(%username, "generation already in flight");
            return false;
        }
        self.generating = true;

        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let spawned = std::thread::Builder::new()
            .name("generate".to_string())
            .spawn(move || {
                let result = client.generate(&username);
                let _ = tx.send(WorkerEvent::Generated(result));
            });
        if let Err(err) = spawned {
            let _ = self.tx.send(WorkerEvent::Generated(Err(GenerateError::Network(
                format!("failed to start request: {err}"),
            ))));
        }
        true
    }

    /// Probe the service in the background.
    pub fn spawn_health(&self) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let spawned = std::thread::Builder::new()
            .name("health".to_string())
            .spawn(move || {
                let _ = tx.send(WorkerEvent::Health(client.health()));
            });
        if let Err(err) = spawned {
            tracing::warn!(error = %err, "failed to start health check");
        }
    }

    /// Next finished call, if any.
    pub fn try_recv(&mut self) -> Option<WorkerEvent> {
        let event = self.rx.try_recv().ok()?;
        if matches!(event, WorkerEvent::Generated(_)) {
            self.generating = false;
        }
        Some(event)
    }
}

impl std::fmt::Debug for GenerationWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationWorker")
            .field("endpoint", &self.client.endpoint())
            .field("generating", &self.generating)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc::SyncSender;
    use std::sync::{Mutex, mpsc::sync_channel};
    use std::time::{Duration, Instant};

    use super::*;

    /// Blocks each `generate` call until the test releases it.
    struct GatedClient {
        calls: AtomicUsize,
        gate: Mutex<Receiver<()>>,
    }

    impl GenerationClient for GatedClient {
        fn generate(&self, username: &Username) -> Result<GeneratedReadme, GenerateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Ok(gate) = self.gate.lock() {
                let _ = gate.recv_timeout(Duration::from_secs(5));
            }
            Ok(GeneratedReadme {
                markdown: format!("# {username}"),
                generation_time: Some(0.5),
                cached: false,
                elapsed: Duration::ZERO,
            })
        }

        fn health(&self) -> Result<HealthStatus, GenerateError> {
            Err(GenerateError::Network("down".to_string()))
        }

        fn endpoint(&self) -> &str {
            "http://gated.test/generate"
        }
    }

    fn gated() -> (Arc<GatedClient>, SyncSender<()>) {
        let (release, gate) = sync_channel(4);
        let client = Arc::new(GatedClient {
            calls: AtomicUsize::new(0),
            gate: Mutex::new(gate),
        });
        (client, release)
    }

    fn wait_for(worker: &mut GenerationWorker) -> WorkerEvent {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(event) = worker.try_recv() {
                return event;
            }
            assert!(Instant::now() < deadline, "worker produced no event");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_second_generate_while_in_flight_is_refused() {
        let (client, release) = gated();
        let mut worker = GenerationWorker::new(client.clone());

        assert!(worker.spawn_generate(Username::parse("octocat").unwrap()));
        assert!(!worker.spawn_generate(Username::parse("octocat").unwrap()));
        assert!(worker.is_generating());

        release.send(()).unwrap();
        let event = wait_for(&mut worker);
        assert!(matches!(event, WorkerEvent::Generated(Ok(ref r)) if r.markdown == "# octocat"));
        assert!(!worker.is_generating());
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_generate_allowed_again_after_completion() {
        let (client, release) = gated();
        let mut worker = GenerationWorker::new(client.clone());

        release.send(()).unwrap();
        assert!(worker.spawn_generate(Username::parse("a").unwrap()));
        wait_for(&mut worker);

        release.send(()).unwrap();
        assert!(worker.spawn_generate(Username::parse("b").unwrap()));
        wait_for(&mut worker);
        assert_eq!(client.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_health_result_does_not_clear_generating() {
        let (client, release) = gated();
        let mut worker = GenerationWorker::new(client);

        assert!(worker.spawn_generate(Username::parse("a").unwrap()));
        worker.spawn_health();
        let event = wait_for(&mut worker);
        assert!(matches!(event, WorkerEvent::Health(Err(_))));
        assert!(worker.is_generating());

        release.send(()).unwrap();
        assert!(matches!(wait_for(&mut worker), WorkerEvent::Generated(_)));
        assert!(!worker.is_generating());
    }
}
