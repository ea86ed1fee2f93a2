//! # Print Dispatch
//!
//! Hands a composed report to a secondary rendering context and triggers the
//! platform print step.
//!
//! ```text
//! dispatch()
//!   │ host.acquire() ── None ──→ return None (caller decides what to tell the user)
//!   ▼
//! spawn ─→ load(html) ─→ sleep(settle_delay) ─→ print() ─→ close()
//! ```
//!
//! The spawned task is fire-and-forget. `close()` always runs once a context
//! was acquired, whether or not printing succeeded. What closing releases is
//! up to the host; the system host keeps the written file until session end.

use async_trait::async_trait;
use log::{debug, info, warn};
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::task::JoinHandle;

use crate::core::config::PrintSettings;
use crate::core::export::PrintDocument;

#[derive(Debug)]
pub enum PrintError {
    Io(io::Error),
    /// The print command ran but reported failure.
    CommandFailed { program: String, code: Option<i32> },
}

impl fmt::Display for PrintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrintError::Io(e) => write!(f, "print I/O error: {e}"),
            PrintError::CommandFailed { program, code } => match code {
                Some(code) => write!(f, "print command '{program}' exited with status {code}"),
                None => write!(f, "print command '{program}' was terminated by a signal"),
            },
        }
    }
}

impl std::error::Error for PrintError {}

impl From<io::Error> for PrintError {
    fn from(e: io::Error) -> Self {
        PrintError::Io(e)
    }
}

/// One isolated surface holding a single document.
#[async_trait]
pub trait PrintContext: Send {
    /// Write the complete document into the surface.
    async fn load(&mut self, html: &str) -> Result<(), PrintError>;

    /// Invoke the platform print step. Returns once it has been dismissed.
    async fn print(&mut self) -> Result<(), PrintError>;

    /// Release the context. The host decides whether the loaded document
    /// outlives this call.
    async fn close(self: Box<Self>);
}

/// Source of print contexts. Acquisition can fail, e.g. when the host
/// environment refuses to open a new surface.
pub trait PrintHost: Send + Sync {
    fn name(&self) -> &str;

    fn acquire(&self) -> Option<Box<dyn PrintContext>>;
}

/// Render `document` and print it in the background.
///
/// Returns `None` without doing anything else when no context can be
/// acquired. The returned handle may be dropped; tests await it.
pub fn dispatch(
    host: &dyn PrintHost,
    document: &PrintDocument,
    settings: &PrintSettings,
) -> Option<JoinHandle<()>> {
    let Some(mut context) = host.acquire() else {
        warn!("Print host '{}' could not provide a context", host.name());
        return None;
    };

    let html = document.to_html(&settings.geometry);
    let settle_delay = settings.settle_delay;
    let entries = document.entries.len();
    info!(
        "Dispatching report ({} entries, {} bytes) to '{}'",
        entries,
        html.len(),
        host.name()
    );

    Some(tokio::spawn(async move {
        match context.load(&html).await {
            Ok(()) => {
                tokio::time::sleep(settle_delay).await;
                match context.print().await {
                    Ok(()) => info!("Print step finished for {} entries", entries),
                    Err(e) => warn!("Print failed: {}", e),
                }
            }
            Err(e) => warn!("Failed to load report into print context: {}", e),
        }
        context.close().await;
    }))
}

// ============================================================================
// System host
// ============================================================================

/// Print host backed by a session spool directory and an external command.
///
/// Each context writes one HTML file into the spool and runs the configured
/// command with that file's path appended. Platform openers often return
/// before the viewer has read the file, so documents stay in the spool until
/// the host (and its temporary directory) is dropped at session end.
pub struct SystemPrintHost {
    spool: tempfile::TempDir,
    command: Vec<String>,
    counter: AtomicU64,
}

impl SystemPrintHost {
    pub fn new(command: Vec<String>) -> io::Result<Self> {
        let spool = tempfile::Builder::new()
            .prefix("asset-register-print-")
            .tempdir()?;
        debug!("Print spool at {}", spool.path().display());
        Ok(Self {
            spool,
            command,
            counter: AtomicU64::new(0),
        })
    }

    pub fn spool_path(&self) -> &std::path::Path {
        self.spool.path()
    }
}

impl PrintHost for SystemPrintHost {
    fn name(&self) -> &str {
        "system"
    }

    fn acquire(&self) -> Option<Box<dyn PrintContext>> {
        if self.command.is_empty() || !self.spool.path().is_dir() {
            return None;
        }
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        let stamp = chrono::Utc::now().timestamp_millis();
        let path = self.spool.path().join(format!("report-{stamp}-{n}.html"));
        Some(Box::new(SpoolContext {
            path,
            command: self.command.clone(),
        }))
    }
}

struct SpoolContext {
    path: PathBuf,
    command: Vec<String>,
}

#[async_trait]
impl PrintContext for SpoolContext {
    async fn load(&mut self, html: &str) -> Result<(), PrintError> {
        tokio::fs::write(&self.path, html).await?;
        debug!("Wrote report to {}", self.path.display());
        Ok(())
    }

    async fn print(&mut self) -> Result<(), PrintError> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| PrintError::Io(io::Error::new(io::ErrorKind::InvalidInput, "empty print command")))?;

        let status = tokio::process::Command::new(program)
            .args(args)
            .arg(&self.path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await?;

        if status.success() {
            Ok(())
        } else {
            Err(PrintError::CommandFailed {
                program: program.clone(),
                code: status.code(),
            })
        }
    }

    // The opener may still be reading the file, so it stays in the spool
    // and goes away with the host's TempDir.
    async fn close(self: Box<Self>) {
        debug!("Closed print context; {} kept until session end", self.path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::RecordId;
    use crate::core::selection::SelectionSet;
    use crate::core::store::RecordStore;
    use crate::test_support::record;
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    /// Records every call so tests can assert the lifecycle order.
    struct RecordingHost {
        available: bool,
        fail_print: bool,
        events: Arc<Mutex<Vec<String>>>,
    }

    struct RecordingContext {
        fail_print: bool,
        events: Arc<Mutex<Vec<String>>>,
    }

    impl PrintHost for RecordingHost {
        fn name(&self) -> &str {
            "recording"
        }

        fn acquire(&self) -> Option<Box<dyn PrintContext>> {
            self.available.then(|| {
                Box::new(RecordingContext {
                    fail_print: self.fail_print,
                    events: self.events.clone(),
                }) as Box<dyn PrintContext>
            })
        }
    }

    #[async_trait]
    impl PrintContext for RecordingContext {
        async fn load(&mut self, html: &str) -> Result<(), PrintError> {
            self.events.lock().unwrap().push(format!("load:{}", html.len()));
            Ok(())
        }

        async fn print(&mut self) -> Result<(), PrintError> {
            self.events.lock().unwrap().push("print".to_string());
            if self.fail_print {
                Err(PrintError::CommandFailed {
                    program: "fake".to_string(),
                    code: Some(1),
                })
            } else {
                Ok(())
            }
        }

        async fn close(self: Box<Self>) {
            self.events.lock().unwrap().push("close".to_string());
        }
    }

    fn host(available: bool, fail_print: bool) -> (RecordingHost, Arc<Mutex<Vec<String>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        (
            RecordingHost {
                available,
                fail_print,
                events: events.clone(),
            },
            events,
        )
    }

    fn document() -> PrintDocument {
        let store = RecordStore::from_records(vec![record("a")]);
        let mut selection = SelectionSet::new();
        selection.toggle(&RecordId::from("a"));
        crate::core::export::compose(&store, &selection, "Report").unwrap()
    }

    fn settings(delay_ms: u64, command: Vec<String>) -> PrintSettings {
        PrintSettings {
            settle_delay: Duration::from_millis(delay_ms),
            command,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_dispatch_runs_load_print_close_in_order() {
        let (host, events) = host(true, false);
        let handle = dispatch(&host, &document(), &settings(0, vec![])).unwrap();
        handle.await.unwrap();

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 3);
        assert!(events[0].starts_with("load:"));
        assert_eq!(events[1], "print");
        assert_eq!(events[2], "close");
    }

    #[tokio::test]
    async fn test_unavailable_host_is_silent_noop() {
        let (host, events) = host(false, false);
        assert!(dispatch(&host, &document(), &settings(0, vec![])).is_none());
        assert!(events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_context_closed_even_when_print_fails() {
        let (host, events) = host(true, true);
        dispatch(&host, &document(), &settings(0, vec![]))
            .unwrap()
            .await
            .unwrap();
        assert_eq!(events.lock().unwrap().last().map(String::as_str), Some("close"));
    }

    #[tokio::test]
    async fn test_settle_delay_precedes_print() {
        let (host, _events) = host(true, false);
        let started = Instant::now();
        dispatch(&host, &document(), &settings(30, vec![]))
            .unwrap()
            .await
            .unwrap();
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_system_host_without_command_is_unavailable() {
        let host = SystemPrintHost::new(Vec::new()).unwrap();
        assert!(host.acquire().is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_host_keeps_document_after_close() {
        let host = SystemPrintHost::new(vec!["true".to_string()]).unwrap();
        let spool = host.spool_path().to_path_buf();
        dispatch(&host, &document(), &settings(0, vec!["true".to_string()]))
            .unwrap()
            .await
            .unwrap();

        let written: Vec<_> = std::fs::read_dir(&spool).unwrap().collect();
        assert_eq!(written.len(), 1);
        let html = std::fs::read_to_string(written[0].as_ref().unwrap().path()).unwrap();
        assert!(html.contains("<title>Report</title>"));

        drop(host);
        assert!(!spool.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_spool_context_reports_command_failure() {
        let host = SystemPrintHost::new(vec!["false".to_string()]).unwrap();
        tokio_test::block_on(async {
            let mut context = host.acquire().unwrap();
            tokio_test::assert_ok!(context.load("<html></html>").await);
            let err = tokio_test::assert_err!(context.print().await);
            assert!(matches!(err, PrintError::CommandFailed { .. }));
            context.close().await;
        });
    }
}
