//! Process-scoped host state shared across invocations.
//!
//! The embedding application owns one [`HostContext`] and hands it to the
//! disassembly service instead of letting the pipeline reach into globals.
//! It bundles the shared text output channel external tools write into, the
//! audit gate that mutes launch reporting while a capture is active, the
//! directory scratch class files live in, and the lock that serializes
//! invocations over those shared pieces.

use std::io::{self, Write};
use std::mem;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// The host's shared text output channel.
///
/// Tool launchers write whatever the external tool emits here. Normally the
/// writes forward to the sink the host installed (stdout in the CLI); while
/// a capture is active they accumulate in a private buffer instead. Every
/// write takes the internal lock, so writers may call from any stack depth
/// and from helper threads.
pub struct Console {
    sink: Mutex<Sink>,
}

enum Sink {
    /// Forwarding to the host's installed channel.
    Forward(Box<dyn Write + Send>),
    /// Capturing into a private buffer; `prev` is restored when the capture
    /// ends.
    Capture { buf: Vec<u8>, prev: Box<dyn Write + Send> },
}

impl Console {
    pub fn new(sink: Box<dyn Write + Send>) -> Self {
        Self { sink: Mutex::new(Sink::Forward(sink)) }
    }

    fn lock(&self) -> MutexGuard<'_, Sink> {
        // A writer that panicked mid-call poisons the mutex but leaves the
        // sink itself coherent; the capture guard has restored the channel
        // by the time anyone else can observe the poison.
        self.sink.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append bytes to the channel.
    ///
    /// Forward-sink write errors are dropped (the console is best-effort);
    /// capture writes cannot fail.
    pub fn write_all(&self, bytes: &[u8]) {
        match &mut *self.lock() {
            Sink::Forward(w) => {
                let _ = w.write_all(bytes);
            }
            Sink::Capture { buf, .. } => buf.extend_from_slice(bytes),
        }
    }

    /// Append a line of text to the channel.
    pub fn write_line(&self, line: &str) {
        let mut owned = String::with_capacity(line.len() + 1);
        owned.push_str(line);
        owned.push('\n');
        self.write_all(owned.as_bytes());
    }

    /// Redirect the channel into a private buffer until the returned guard
    /// finishes or drops.
    ///
    /// Captures are not reentrant; [`HostContext::serialize`] keeps at most
    /// one active at a time.
    pub fn begin_capture(&self) -> CaptureGuard<'_> {
        let mut sink = self.lock();
        let prev = match mem::replace(&mut *sink, Sink::Forward(Box::new(io::sink()))) {
            Sink::Forward(w) => w,
            // A stale capture means an earlier invocation aborted without
            // unwinding its guard; discard its buffer and keep the original
            // channel as the one to restore.
            Sink::Capture { prev, .. } => prev,
        };
        *sink = Sink::Capture { buf: Vec::new(), prev };
        CaptureGuard { console: self, active: true }
    }

    /// Restore the previous sink and return everything captured since
    /// [`Console::begin_capture`]. Returns an empty string when no capture
    /// was active.
    fn end_capture(&self) -> String {
        let mut sink = self.lock();
        match mem::replace(&mut *sink, Sink::Forward(Box::new(io::sink()))) {
            Sink::Capture { buf, prev } => {
                *sink = Sink::Forward(prev);
                String::from_utf8_lossy(&buf).into_owned()
            }
            Sink::Forward(w) => {
                *sink = Sink::Forward(w);
                String::new()
            }
        }
    }

    /// Flush the underlying sink if the channel is currently forwarding.
    pub fn flush(&self) {
        if let Sink::Forward(w) = &mut *self.lock() {
            let _ = w.flush();
        }
    }
}

/// Token returned by [`Console::begin_capture`].
///
/// [`CaptureGuard::finish`] restores the channel and yields the captured
/// text. Dropping the guard without finishing (an unwind, an early return)
/// still restores the channel: the console must never be left redirected
/// after an invocation ends.
#[must_use = "dropping the guard discards the captured text"]
pub struct CaptureGuard<'a> {
    console: &'a Console,
    active: bool,
}

impl CaptureGuard<'_> {
    /// End the capture and return the text written since it began.
    pub fn finish(mut self) -> String {
        self.active = false;
        self.console.end_capture()
    }
}

impl Drop for CaptureGuard<'_> {
    fn drop(&mut self) {
        if self.active {
            let _ = self.console.end_capture();
        }
    }
}

/// Quiet flag for the host's audit reporting.
///
/// The audit layer announces external process launches on the shared
/// console. During a capture those lines would land inside the tool's
/// listing, so the service mutes them for exactly the duration of the call.
/// Muting is a presentation concern; it blocks nothing.
#[derive(Debug, Default)]
pub struct AuditGate {
    quiet: AtomicBool,
}

impl AuditGate {
    pub fn set_quiet(&self, quiet: bool) {
        self.quiet.store(quiet, Ordering::SeqCst);
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet.load(Ordering::SeqCst)
    }

    /// Mute audit reporting until the guard drops.
    ///
    /// The flag is cleared on every exit path, unwinds included; it must
    /// never be left set once an invocation is over.
    pub fn silenced(&self) -> AuditSilence<'_> {
        self.set_quiet(true);
        AuditSilence { gate: self }
    }
}

/// RAII guard returned by [`AuditGate::silenced`].
pub struct AuditSilence<'a> {
    gate: &'a AuditGate,
}

impl Drop for AuditSilence<'_> {
    fn drop(&mut self) {
        self.gate.set_quiet(false);
    }
}

/// Shared host state, passed explicitly to the service and its backends.
pub struct HostContext {
    console: Console,
    audit: AuditGate,
    scratch_dir: PathBuf,
    invocation: Mutex<()>,
}

impl HostContext {
    /// Host context forwarding tool output to stdout and creating scratch
    /// files in the system temp directory.
    pub fn new() -> Self {
        Self::with_sink(std::env::temp_dir(), Box::new(io::stdout()))
    }

    /// Host context with an explicit scratch directory and console sink.
    pub fn with_sink(scratch_dir: PathBuf, sink: Box<dyn Write + Send>) -> Self {
        Self {
            console: Console::new(sink),
            audit: AuditGate::default(),
            scratch_dir,
            invocation: Mutex::new(()),
        }
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn audit(&self) -> &AuditGate {
        &self.audit
    }

    /// Directory scratch class files are created in.
    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    /// Take the single-invocation lock.
    ///
    /// The console and audit gate are process-scoped and non-reentrant;
    /// holders of this guard have the whole prepare/invoke/capture window
    /// to themselves, and a second caller blocks here until the first has
    /// finished cleanup.
    pub fn serialize(&self) -> MutexGuard<'_, ()> {
        self.invocation.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Audit-layer hook: report an external process launch.
    ///
    /// The console line is suppressed while the gate is quiet; the tracing
    /// event fires regardless, since only the console line is capture
    /// noise.
    pub fn audit_exec(&self, program: &Path) {
        tracing::debug!(program = %program.display(), "exec");
        if !self.audit.is_quiet() {
            self.console.write_line(&format!("[audit] exec {}", program.display()));
        }
    }
}

impl Default for HostContext {
    fn default() -> Self {
        Self::new()
    }
}
