//! Subprocess driver for the x13as engine binary.

use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::X13Config;
use crate::engine::request::EngineRequest;
use crate::error::{Result, X13Error};

/// Characters of captured stderr carried in a no-output error.
const STDERR_SNIPPET_LEN: usize = 300;

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Run the engine against an encoded request and return the d11 path.
///
/// The engine is invoked with the request's extension-less base path as
/// its sole argument and the scratch directory as its working directory.
/// Success is judged solely by the presence of the d11 artifact
/// afterward: the engine may exit nonzero while still emitting usable
/// output, so a nonzero exit code is logged as a diagnostic but is not
/// itself a failure. If the subprocess outlives the configured budget it
/// is killed and no partial-output recovery is attempted.
pub fn run_engine(
    request: &EngineRequest,
    series_id: &str,
    config: &X13Config,
) -> Result<PathBuf> {
    if !config.binary_path.exists() {
        return Err(X13Error::BinaryNotFound(config.binary_path.clone()));
    }

    let mut child = Command::new(&config.binary_path)
        .arg(request.base())
        .current_dir(request.dir())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    // Drain both pipes off-thread before waiting: a chatty engine that
    // fills the OS pipe buffer would otherwise block on write and never
    // exit, turning a successful run into a timeout.
    let stdout_drain = spawn_drain(child.stdout.take());
    let stderr_drain = spawn_drain(child.stderr.take());

    let deadline = Instant::now() + config.timeout;
    let status = loop {
        match child.try_wait()? {
            Some(status) => break status,
            None if Instant::now() >= deadline => {
                child.kill().ok();
                let _ = child.wait();
                // No partial-output recovery on timeout. The drain threads
                // are dropped rather than joined: an orphaned grandchild
                // could hold the pipes open past the deadline.
                drop(stdout_drain);
                drop(stderr_drain);
                return Err(X13Error::EngineTimeout {
                    timeout: config.timeout,
                });
            }
            None => thread::sleep(POLL_INTERVAL),
        }
    };

    // Nothing downstream consumes stdout; it is drained only so the
    // engine can never wedge on it.
    join_drain(stdout_drain);
    let stderr = join_drain(stderr_drain);

    if !status.success() {
        log::debug!("X-13 stderr for {series_id}: {}", truncate(&stderr, 500));
    }

    let d11 = request.d11_path();
    if !d11.exists() {
        return Err(X13Error::EngineProducedNoOutput {
            stderr: truncate(&stderr, STDERR_SNIPPET_LEN).to_string(),
        });
    }
    Ok(d11)
}

/// Collect a child output pipe into a string on a background thread.
fn spawn_drain<R>(source: Option<R>) -> Option<thread::JoinHandle<String>>
where
    R: Read + Send + 'static,
{
    source.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = String::new();
            pipe.read_to_string(&mut buf).ok();
            buf
        })
    })
}

fn join_drain(handle: Option<thread::JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

/// Truncate to at most `max` characters, respecting char boundaries.
fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
