//! Intercepted-output drain loop.
//!
//! One task multiplexes three event sources: child exit, a stdout chunk and
//! a stderr chunk. Stdout chunks are relabeled and written before the next
//! read is issued; stderr chunks are copied verbatim.

use std::io::{self, Write};
use std::process::ExitStatus;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Child;

use crate::output::OutputRelabel;
use crate::process::error::{LaunchError, Stream};

/// Drain settings for one intercepted run.
#[derive(Debug, Clone)]
pub struct DrainConfig {
    pub relabel: OutputRelabel,
    pub chunk_size: usize,
    /// Quiet period after child exit before stderr is abandoned.
    pub poll_interval: Duration,
}

/// Drain both pipes of `child` until it has exited and its output is done.
///
/// Stdout is read to end of file. Stderr is read to end of file, or until
/// the child has exited and nothing arrived for one poll interval. A read
/// error ends that stream's drain without failing the run.
pub async fn drain_intercepted<O, E>(
    child: &mut Child,
    config: &DrainConfig,
    out: &mut O,
    err: &mut E,
) -> Result<ExitStatus, LaunchError>
where
    O: Write,
    E: Write,
{
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    drain_pipes(child, stdout, stderr, config, out, err).await
}

async fn drain_pipes<RO, RE, O, E>(
    child: &mut Child,
    mut stdout: Option<RO>,
    mut stderr: Option<RE>,
    config: &DrainConfig,
    out: &mut O,
    err: &mut E,
) -> Result<ExitStatus, LaunchError>
where
    RO: AsyncRead + Unpin,
    RE: AsyncRead + Unpin,
    O: Write,
    E: Write,
{
    let chunk_size = config.chunk_size.max(1);
    let mut out_buf = vec![0u8; chunk_size];
    let mut err_buf = vec![0u8; chunk_size];
    let mut status: Option<ExitStatus> = None;

    loop {
        if let (Some(status), None, None) = (status, &stdout, &stderr) {
            return Ok(status);
        }

        tokio::select! {
            read = read_chunk(&mut stdout, &mut out_buf), if stdout.is_some() => {
                match read {
                    Ok(0) => stdout = None,
                    Ok(n) => {
                        let chunk = config.relabel.apply(&out_buf[..n]);
                        forward(out, &chunk, Stream::Stdout)?;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "stdout read failed, ending stdout drain");
                        stdout = None;
                    }
                }
            }
            read = read_chunk(&mut stderr, &mut err_buf), if stderr.is_some() => {
                match read {
                    Ok(0) => stderr = None,
                    Ok(n) => forward(err, &err_buf[..n], Stream::Stderr)?,
                    Err(e) => {
                        tracing::warn!(error = %e, "stderr read failed, ending stderr drain");
                        stderr = None;
                    }
                }
            }
            waited = child.wait(), if status.is_none() => {
                let exited = waited.map_err(|source| LaunchError::Wait { source })?;
                tracing::debug!(status = %exited, "target exited, draining remaining output");
                status = Some(exited);
            }
            _ = tokio::time::sleep(config.poll_interval), if status.is_some() && stderr.is_some() => {
                tracing::debug!("stderr quiet after exit, closing");
                stderr = None;
            }
        }
    }
}

async fn read_chunk<R>(pipe: &mut Option<R>, buf: &mut [u8]) -> io::Result<usize>
where
    R: AsyncRead + Unpin,
{
    match pipe {
        Some(pipe) => pipe.read(buf).await,
        None => Ok(0),
    }
}

fn forward<W: Write>(sink: &mut W, bytes: &[u8], stream: Stream) -> Result<(), LaunchError> {
    sink.write_all(bytes)
        .and_then(|()| sink.flush())
        .map_err(|source| LaunchError::Forward { stream, source })
}
