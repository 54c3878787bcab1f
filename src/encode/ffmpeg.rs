use std::io::{Read, Write as _};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::encode::encoder::{
    EncoderBackend, EncoderConfig, EncoderEvent, PREFERRED_MIME_TYPES, VideoEncoder, VideoMime,
    flatten_premul_over_bg,
};
use crate::foundation::core::Rgba8;
use crate::foundation::error::{PromoError, PromoResult};
use crate::render::backend::FrameRGBA;

const STDOUT_CHUNK_BYTES: usize = 64 * 1024;

/// Encoder backend that spawns the system `ffmpeg` and streams raw frames to its stdin.
///
/// The encoded container is read back from stdout and delivered as chunk events.
#[derive(Clone, Debug)]
pub struct FfmpegBackend {
    program: PathBuf,
    crf: u8,
}

impl Default for FfmpegBackend {
    fn default() -> Self {
        Self {
            program: PathBuf::from("ffmpeg"),
            crf: 32,
        }
    }
}

impl FfmpegBackend {
    /// Backend invoking `ffmpeg` from `PATH`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend invoking a specific executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    fn list_encoders(&self) -> Option<String> {
        let out = Command::new(&self.program)
            .args(["-hide_banner", "-encoders"])
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .ok()?;
        out.status
            .success()
            .then(|| String::from_utf8_lossy(&out.stdout).into_owned())
    }

    fn output_args(&self, mime: VideoMime) -> Vec<String> {
        let crf = self.crf.to_string();
        let args: Vec<&str> = match mime {
            VideoMime::WebmVp9 | VideoMime::Webm => vec![
                "-c:v", "libvpx-vp9", "-b:v", "0", "-crf", &crf, "-deadline", "realtime",
                "-cpu-used", "8", "-f", "webm",
            ],
            VideoMime::WebmVp8 => vec![
                "-c:v", "libvpx", "-b:v", "2M", "-deadline", "realtime", "-cpu-used", "8", "-f",
                "webm",
            ],
            VideoMime::Mp4 => vec![
                "-c:v",
                "libx264",
                "-preset",
                "veryfast",
                "-movflags",
                "frag_keyframe+empty_moov",
                "-f",
                "mp4",
            ],
        };
        args.into_iter().map(str::to_string).collect()
    }
}

/// Pick the first preferred format whose encoder appears in an `ffmpeg -encoders` listing.
pub fn select_mime(encoders_listing: &str) -> Option<VideoMime> {
    let available: Vec<&str> = encoders_listing
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .collect();
    let has = |name: &str| available.contains(&name);
    PREFERRED_MIME_TYPES.into_iter().find(|mime| match mime {
        VideoMime::WebmVp9 => has("libvpx-vp9"),
        VideoMime::WebmVp8 => has("libvpx"),
        VideoMime::Webm => has("libvpx-vp9") || has("libvpx"),
        VideoMime::Mp4 => has("libx264"),
    })
}

impl EncoderBackend for FfmpegBackend {
    fn probe(&self) -> Option<VideoMime> {
        let listing = self.list_encoders()?;
        let mime = select_mime(&listing);
        tracing::debug!(?mime, program = %self.program.display(), "probed ffmpeg encoders");
        mime
    }

    fn start(
        &mut self,
        cfg: &EncoderConfig,
    ) -> PromoResult<(Box<dyn VideoEncoder>, Receiver<EncoderEvent>)> {
        cfg.validate()?;

        let mut cmd = Command::new(&self.program);
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        // Input is raw RGBA8; alpha is flattened before frames reach stdin.
        cmd.args([
            "-hide_banner",
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &format!("{}/{}", cfg.fps.num, cfg.fps.den),
            "-i",
            "pipe:0",
            "-an",
            "-pix_fmt",
            "yuv420p",
        ]);
        cmd.args(self.output_args(cfg.mime));
        cmd.arg("pipe:1");

        let mut child = cmd.spawn().map_err(|e| {
            PromoError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| PromoError::encode("failed to open ffmpeg stdin"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| PromoError::encode("failed to open ffmpeg stdout"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| PromoError::encode("failed to open ffmpeg stderr"))?;

        let stderr_drain = std::thread::spawn(move || {
            let mut bytes = Vec::new();
            stderr.read_to_end(&mut bytes)?;
            Ok(bytes)
        });

        let child = Arc::new(Mutex::new(child));
        let (tx, rx) = mpsc::channel();
        let reader = {
            let child = Arc::clone(&child);
            std::thread::spawn(move || pump_stdout(stdout, child, stderr_drain, tx))
        };

        tracing::info!(
            mime = %cfg.mime,
            width = cfg.width,
            height = cfg.height,
            "ffmpeg encoder started"
        );
        Ok((
            Box::new(FfmpegEncoder {
                child,
                stdin: Some(stdin),
                reader: Some(reader),
                scratch: vec![0u8; cfg.frame_len()],
                width: cfg.width,
                height: cfg.height,
                background: cfg.background,
            }),
            rx,
        ))
    }
}

type StderrDrain = JoinHandle<std::io::Result<Vec<u8>>>;

fn pump_stdout(
    mut stdout: impl Read,
    child: Arc<Mutex<Child>>,
    stderr_drain: StderrDrain,
    tx: Sender<EncoderEvent>,
) {
    let mut buf = vec![0u8; STDOUT_CHUNK_BYTES];
    let read_error = loop {
        match stdout.read(&mut buf) {
            Ok(0) => break None,
            Ok(n) => {
                // Receiver gone means the session was torn down; keep draining so ffmpeg exits.
                let _ = tx.send(EncoderEvent::Chunk(buf[..n].to_vec()));
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => break Some(e),
        }
    };

    let status = match child.lock() {
        Ok(mut guard) => guard.wait(),
        Err(_) => Err(std::io::Error::other("ffmpeg child lock poisoned")),
    };
    let stderr_bytes = stderr_drain
        .join()
        .ok()
        .and_then(Result::ok)
        .unwrap_or_default();

    let event = match (read_error, status) {
        (Some(e), _) => EncoderEvent::Fault(format!("failed to read ffmpeg output: {e}")),
        (None, Err(e)) => EncoderEvent::Fault(format!("failed to wait for ffmpeg: {e}")),
        (None, Ok(status)) if status.success() => EncoderEvent::Stopped,
        (None, Ok(status)) => EncoderEvent::Fault(format!(
            "ffmpeg exited with status {status}: {}",
            String::from_utf8_lossy(&stderr_bytes).trim()
        )),
    };
    let _ = tx.send(event);
}

struct FfmpegEncoder {
    child: Arc<Mutex<Child>>,
    stdin: Option<ChildStdin>,
    reader: Option<JoinHandle<()>>,
    scratch: Vec<u8>,
    width: u32,
    height: u32,
    background: Rgba8,
}

impl VideoEncoder for FfmpegEncoder {
    fn push_frame(&mut self, frame: &FrameRGBA) -> PromoResult<()> {
        if frame.width != self.width || frame.height != self.height {
            return Err(PromoError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.width, self.height
            )));
        }
        if frame.premultiplied {
            flatten_premul_over_bg(&mut self.scratch, &frame.data, self.background)?;
        } else {
            if frame.data.len() != self.scratch.len() {
                return Err(PromoError::validation(
                    "frame.data size mismatch with width*height*4",
                ));
            }
            self.scratch.copy_from_slice(&frame.data);
        }

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(PromoError::encode("ffmpeg encoder is already stopping"));
        };
        stdin.write_all(&self.scratch).map_err(|e| {
            PromoError::encode(format!("failed to write frame to ffmpeg stdin: {e}"))
        })
    }

    fn request_stop(&mut self) -> PromoResult<()> {
        // Closing stdin lets ffmpeg flush its muxer and exit.
        drop(self.stdin.take());
        Ok(())
    }

    fn abort(&mut self) {
        drop(self.stdin.take());
        if let Ok(mut child) = self.child.lock()
            && let Err(e) = child.kill()
        {
            tracing::debug!(error = %e, "ffmpeg kill failed (already exited?)");
        }
        if let Some(reader) = self.reader.take() {
            let _ = reader.join();
        }
    }
}

impl Drop for FfmpegEncoder {
    fn drop(&mut self) {
        if self.reader.is_some() {
            self.abort();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
