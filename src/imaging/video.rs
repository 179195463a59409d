//! Single-frame video extraction through the system `ffprobe` and `ffmpeg`.
//!
//! Video containers are never parsed in-process. `ffprobe` reports the frame
//! count and rate as JSON; `ffmpeg` seeks to one frame and writes it to stdout
//! as raw `rgb24`. Both binaries only need to be on `PATH` at runtime, so the
//! crate itself links no codec libraries.
//!
//! Each invocation is owned by a [`ChildGuard`]: whichever way the call
//! returns, the guard kills the process if it is still running and reaps it.
//! A wall-clock timeout bounds decoders that hang on hostile input.

use super::backend::{BackendError, VideoInfo};
use super::frame::Frame;
use serde::Deserialize;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

pub const DEFAULT_DECODE_TIMEOUT: Duration = Duration::from_secs(20);

/// Locations of the external tools and the per-call time budget.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoTools {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
    pub timeout: Duration,
}

impl Default for VideoTools {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            ffprobe: PathBuf::from("ffprobe"),
            timeout: DEFAULT_DECODE_TIMEOUT,
        }
    }
}

impl VideoTools {
    pub fn probe(&self, path: &Path) -> Result<VideoInfo, BackendError> {
        let mut command = Command::new(&self.ffprobe);
        command
            .args(["-v", "error", "-select_streams", "v:0", "-show_entries"])
            .arg("stream=width,height,nb_frames,avg_frame_rate,r_frame_rate,duration:format=duration")
            .args(["-of", "json"])
            .arg(path);

        let stdout = run_bounded(command, "ffprobe", path, self.timeout).map_err(|e| match e {
            BackendError::Decode { path, reason } => BackendError::Probe { path, reason },
            other => other,
        })?;
        parse_probe_output(&stdout, path)
    }

    pub fn read_frame(
        &self,
        path: &Path,
        info: &VideoInfo,
        index: u64,
    ) -> Result<Frame, BackendError> {
        if info.width == 0 || info.height == 0 {
            return Err(BackendError::probe(path, "video stream has no dimensions"));
        }

        let seek = format!("{:.6}", info.seek_seconds(index));
        let mut command = Command::new(&self.ffmpeg);
        command
            .args(["-v", "error", "-noautorotate", "-ss", &seek, "-i"])
            .arg(path)
            .args(["-frames:v", "1", "-f", "rawvideo", "-pix_fmt", "rgb24", "pipe:1"]);

        let mut raw = run_bounded(command, "ffmpeg", path, self.timeout)?;
        let expected = info.width as usize * info.height as usize * 3;
        if raw.is_empty() {
            return Err(BackendError::NoFrames(path.to_path_buf()));
        }
        if raw.len() < expected {
            return Err(BackendError::decode(
                path,
                format!("short frame: got {} bytes, expected {expected}", raw.len()),
            ));
        }
        raw.truncate(expected);
        Frame::from_raw(info.width, info.height, raw)
            .ok_or_else(|| BackendError::decode(path, "raw frame does not match dimensions"))
    }
}

/// Owns a spawned tool process and releases it on every exit path.
struct ChildGuard {
    child: Child,
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            let _ = self.child.kill();
        }
        let _ = self.child.wait();
    }
}

/// Read a pipe to EOF on a helper thread.
fn drain<R: Read + Send + 'static>(mut reader: R) -> mpsc::Receiver<io::Result<Vec<u8>>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let result = reader.read_to_end(&mut buf).map(|_| buf);
        let _ = tx.send(result);
    });
    rx
}

/// Run `command` to completion and return its stdout.
///
/// Fails with [`BackendError::Timeout`] when stdout is not closed within
/// `timeout`; the guard then kills the process, which also unblocks the
/// reader threads.
pub(crate) fn run_bounded(
    mut command: Command,
    tool: &str,
    path: &Path,
    timeout: Duration,
) -> Result<Vec<u8>, BackendError> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let child = command.spawn().map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => BackendError::ToolMissing(tool.to_string()),
        _ => BackendError::Io(e),
    })?;
    let mut guard = ChildGuard { child };

    let stdout = guard.child.stdout.take().map(drain);
    let stderr = guard.child.stderr.take().map(drain);
    let Some(stdout) = stdout else {
        return Err(BackendError::decode(path, format!("{tool} stdout unavailable")));
    };

    let output = match stdout.recv_timeout(timeout) {
        Ok(result) => result?,
        Err(RecvTimeoutError::Timeout) => {
            return Err(BackendError::Timeout {
                tool: tool.to_string(),
                seconds: timeout.as_secs(),
            });
        }
        Err(RecvTimeoutError::Disconnected) => {
            return Err(BackendError::decode(path, format!("{tool} stdout reader died")));
        }
    };

    let status = guard.child.wait()?;
    if !status.success() {
        let message = stderr
            .and_then(|rx| rx.recv().ok())
            .and_then(Result::ok)
            .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
            .unwrap_or_default();
        return Err(BackendError::decode(
            path,
            format!("{tool} exited with {status}: {message}"),
        ));
    }
    Ok(output)
}

#[derive(Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    format: Option<ProbeFormat>,
}

#[derive(Deserialize)]
struct ProbeStream {
    width: Option<u32>,
    height: Option<u32>,
    nb_frames: Option<String>,
    avg_frame_rate: Option<String>,
    r_frame_rate: Option<String>,
    duration: Option<String>,
}

#[derive(Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

/// Turn `ffprobe -of json` output into a [`VideoInfo`].
fn parse_probe_output(stdout: &[u8], path: &Path) -> Result<VideoInfo, BackendError> {
    let parsed: ProbeOutput = serde_json::from_slice(stdout)
        .map_err(|e| BackendError::probe(path, format!("ffprobe json parse failed: {e}")))?;
    let stream = parsed
        .streams
        .first()
        .ok_or_else(|| BackendError::probe(path, "no video stream found"))?;

    let fps = [&stream.avg_frame_rate, &stream.r_frame_rate]
        .into_iter()
        .filter_map(|r| r.as_deref().and_then(parse_ff_ratio))
        .find(|&fps| fps > 0.0);
    let duration_secs = stream
        .duration
        .as_deref()
        .or(parsed.format.as_ref().and_then(|f| f.duration.as_deref()))
        .and_then(|s| s.parse::<f64>().ok());

    Ok(VideoInfo {
        width: stream.width.unwrap_or(0),
        height: stream.height.unwrap_or(0),
        frame_count: stream.nb_frames.as_deref().and_then(|s| s.parse().ok()),
        fps,
        duration_secs,
    })
}

/// Parse an ffmpeg rational such as `30000/1001`.
fn parse_ff_ratio(ratio: &str) -> Option<f64> {
    let (num, den) = ratio.split_once('/')?;
    let num: f64 = num.trim().parse().ok()?;
    let den: f64 = den.trim().parse().ok()?;
    (den != 0.0).then(|| num / den)
}
