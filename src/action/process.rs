//! Subprocess execution for process-backed actions.
//!
//! Runs a command with:
//!
//! - Executable resolution against PATH before spawning
//! - Captured stdout/stderr, drained on reader threads so a chatty child
//!   cannot block on a full pipe while we poll for exit
//! - A hard timeout that kills and reaps the child, along with anything it
//!   left running in its process group
//!
//! Failures are classified in priority order: executable not found, non-zero
//! exit, timeout, anything else.

use super::error::ActionError;
use crate::config::StderrPolicy;
use crate::logging::{Level, LogSink};
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// A command line plus its execution limits.
#[derive(Debug, Clone)]
pub struct ProcessCommand {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    timeout: Duration,
}

impl ProcessCommand {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            timeout,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Shell-quoted rendering of the full command line, for diagnostics.
    pub fn display(&self) -> String {
        shell_words::join(std::iter::once(&self.program).chain(&self.args))
    }
}

/// Captured result of a process that exited with status 0.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
}

/// Run `command` to completion or until its timeout.
pub fn run(command: &ProcessCommand) -> Result<ProcessOutput, ActionError> {
    let resolved = which::which(&command.program).map_err(|_| ActionError::ExecutableNotFound {
        program: command.program.clone(),
    })?;

    let mut cmd = Command::new(&resolved);
    cmd.args(&command.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = &command.current_dir {
        cmd.current_dir(dir);
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    let start_time = Instant::now();
    let deadline = start_time + command.timeout;
    let mut child = cmd.spawn().map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ActionError::ExecutableNotFound {
            program: command.program.clone(),
        },
        _ => ActionError::UnexpectedFailure(format!(
            "failed to execute '{}': {}",
            command.display(),
            e
        )),
    })?;

    let stdout_rx = drain(child.stdout.take());
    let stderr_rx = drain(child.stderr.take());

    let Some(status) = wait_with_timeout(&mut child, deadline)? else {
        return Err(timed_out(command));
    };
    let duration = start_time.elapsed();

    // A background grandchild can keep the pipes open after the child exits.
    let (Some(stdout), Some(stderr)) = (collect(&stdout_rx, deadline), collect(&stderr_rx, deadline))
    else {
        kill_process(&mut child);
        return Err(timed_out(command));
    };

    match status.code() {
        Some(0) => Ok(ProcessOutput {
            stdout,
            stderr,
            duration,
        }),
        Some(code) => Err(ActionError::NonZeroExit {
            command: command.display(),
            code,
            stderr: stderr.trim_end().to_string(),
        }),
        None => Err(ActionError::UnexpectedFailure(format!(
            "'{}' was terminated without an exit code ({})",
            command.display(),
            status
        ))),
    }
}

/// Run `command` and report its streams through `sink`.
///
/// stdout goes to DEBUG. Non-empty stderr goes to WARN; under
/// [`StderrPolicy::Fail`] it also turns a zero exit into a failure.
pub fn run_and_report(
    command: &ProcessCommand,
    sink: &dyn LogSink,
    stderr_policy: StderrPolicy,
) -> Result<ProcessOutput, ActionError> {
    let output = run(command)?;
    let display = command.display();

    sink.log(
        Level::DEBUG,
        &format!("'{}' stdout:\n{}", display, output.stdout),
    );

    if !output.stderr.trim().is_empty() {
        sink.log(
            Level::WARN,
            &format!("'{}' stderr:\n{}", display, output.stderr),
        );
        if stderr_policy == StderrPolicy::Fail {
            return Err(ActionError::UnexpectedFailure(format!(
                "'{}' wrote to stderr: {}",
                display,
                output.stderr.trim_end()
            )));
        }
    }

    Ok(output)
}

fn timed_out(command: &ProcessCommand) -> ActionError {
    ActionError::TimedOut {
        command: command.display(),
        timeout: command.timeout,
    }
}

/// Read a pipe to the end on its own thread; the text arrives on the channel at EOF.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        let _ = tx.send(String::from_utf8_lossy(&buf).into_owned());
    });
    rx
}

/// Wait for a drained stream until `deadline`. `None` means the pipe is still open.
fn collect(rx: &Receiver<String>, deadline: Instant) -> Option<String> {
    match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(text) => Some(text),
        Err(mpsc::RecvTimeoutError::Timeout) => None,
        Err(mpsc::RecvTimeoutError::Disconnected) => Some(String::new()),
    }
}

/// Wait for a child process until `deadline`.
///
/// Returns `None` if the deadline passed; the child has been killed by then.
fn wait_with_timeout(child: &mut Child, deadline: Instant) -> Result<Option<ExitStatus>, ActionError> {
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(Some(status)),
            Ok(None) => {
                if Instant::now() >= deadline {
                    kill_process(child);
                    return Ok(None);
                }
                std::thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                kill_process(child);
                return Err(ActionError::UnexpectedFailure(format!(
                    "failed to check process status: {}",
                    e
                )));
            }
        }
    }
}

/// Kill a process and its process group, then reap it.
fn kill_process(child: &mut Child) {
    #[cfg(unix)]
    {
        // The child leads its own group, so the negative pid reaches grandchildren.
        let _ = Command::new("kill")
            .arg("-KILL")
            .arg("--")
            .arg(format!("-{}", child.id()))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
    }
    // On Unix this is SIGKILL; on Windows it is TerminateProcess.
    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::logging::MemorySink;
    use tempfile::TempDir;

    const TEN_SECONDS: Duration = Duration::from_secs(10);

    fn sh(script: &str, timeout: Duration) -> ProcessCommand {
        ProcessCommand::new("sh", timeout).arg("-c").arg(script)
    }

    #[test]
    fn test_run_simple_command() {
        let output = run(&ProcessCommand::new("echo", TEN_SECONDS).arg("hello")).unwrap();
        assert_eq!(output.stdout.trim(), "hello");
        assert!(output.stderr.is_empty());
    }

    #[test]
    fn test_run_in_current_dir() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("mydir")).unwrap();

        let command = ProcessCommand::new("ls", TEN_SECONDS).current_dir(temp_dir.path());
        let output = run(&command).unwrap();
        assert!(output.stdout.contains("mydir"));
    }

    #[test]
    fn test_run_missing_executable() {
        let command = ProcessCommand::new("actuator-definitely-not-installed", TEN_SECONDS);
        let err = run(&command).unwrap_err();
        assert_eq!(
            err,
            ActionError::ExecutableNotFound {
                program: "actuator-definitely-not-installed".to_string()
            }
        );
    }

    #[test]
    fn test_run_nonzero_exit_captures_code_and_stderr() {
        let err = run(&sh("echo broken >&2; exit 3", TEN_SECONDS)).unwrap_err();
        match err {
            ActionError::NonZeroExit { code, stderr, .. } => {
                assert_eq!(code, 3);
                assert_eq!(stderr, "broken");
            }
            other => panic!("expected NonZeroExit, got {other:?}"),
        }
    }

    #[test]
    fn test_run_timeout_kills_process() {
        let start = Instant::now();
        let err = run(&sh("sleep 5", Duration::from_millis(200))).unwrap_err();

        assert!(matches!(err, ActionError::TimedOut { .. }));
        assert!(start.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_run_timeout_ignores_late_output() {
        let err = run(&sh("sleep 5; echo late", Duration::from_millis(200))).unwrap_err();
        assert!(matches!(err, ActionError::TimedOut { .. }));
    }

    #[test]
    fn test_run_timeout_when_background_child_holds_pipes() {
        let start = Instant::now();
        let err = run(&sh("sleep 6 & echo hi", Duration::from_secs(1))).unwrap_err();

        assert!(matches!(err, ActionError::TimedOut { .. }));
        assert!(start.elapsed() < Duration::from_secs(3));
    }

    #[test]
    fn test_run_background_child_that_closes_pipes_succeeds() {
        let output = run(&sh("sleep 6 >/dev/null 2>&1 & echo hi", TEN_SECONDS)).unwrap();

        assert_eq!(output.stdout.trim(), "hi");
        assert!(output.duration < Duration::from_secs(3));
    }

    #[test]
    fn test_run_large_output_does_not_deadlock() {
        // Well beyond a 64 KiB pipe buffer.
        let output = run(&sh(
            "i=0; while [ $i -lt 20000 ]; do echo 0123456789; i=$((i+1)); done",
            TEN_SECONDS,
        ))
        .unwrap();
        assert_eq!(output.stdout.lines().count(), 20000);
    }

    #[test]
    fn test_display_quotes_arguments() {
        let command = sh("exit 1", TEN_SECONDS);
        assert_eq!(command.display(), "sh -c 'exit 1'");
    }

    #[test]
    fn test_report_logs_stdout_at_debug() {
        let sink = MemorySink::new();
        let command = ProcessCommand::new("echo", TEN_SECONDS).arg("listing");

        run_and_report(&command, &sink, StderrPolicy::Warn).unwrap();

        assert!(sink.contains(Level::DEBUG, "listing"));
        assert!(sink.messages(Level::WARN).is_empty());
    }

    #[test]
    fn test_report_warns_on_stderr_but_succeeds() {
        let sink = MemorySink::new();
        let result = run_and_report(&sh("echo careful >&2", TEN_SECONDS), &sink, StderrPolicy::Warn);

        assert!(result.is_ok());
        assert!(sink.contains(Level::WARN, "careful"));
    }

    #[test]
    fn test_report_strict_policy_fails_on_stderr() {
        let sink = MemorySink::new();
        let err = run_and_report(&sh("echo careful >&2", TEN_SECONDS), &sink, StderrPolicy::Fail)
            .unwrap_err();

        assert!(matches!(err, ActionError::UnexpectedFailure(_)));
        assert!(sink.contains(Level::WARN, "careful"));
    }
}
