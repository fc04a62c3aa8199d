//! `/dev/hidgN` report endpoint of one gadget HID function.
//!
//! Reports are written through `tokio::fs`, which hands the blocking write
//! to the runtime's blocking pool, so one stalled endpoint never holds up
//! the relays feeding the other functions.

use std::fs;
use std::io::{self, Read};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::trace;

use crate::error::{Error, Result};
use crate::hid::{Profile, ReportSink};

/// Writer for the character device of one HID function.
#[derive(Debug)]
pub struct HidGadgetSink {
    profile: Profile,
    path: PathBuf,
    report_id: Option<u8>,
    out_report_len: usize,
    last_received: Mutex<Option<Vec<u8>>>,
}

impl HidGadgetSink {
    pub fn new(profile: Profile, path: impl Into<PathBuf>) -> Self {
        Self {
            profile,
            path: path.into(),
            report_id: profile.report_id(),
            out_report_len: profile.out_report_length(),
            last_received: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    fn frame(&self, report: &[u8]) -> Vec<u8> {
        let mut frame = Vec::with_capacity(report.len() + 1);
        if let Some(id) = self.report_id {
            frame.push(id);
        }
        frame.extend_from_slice(report);
        frame
    }

    /// One non-blocking read of a pending host report, `None` if nothing is queued.
    fn poll_host_report(&self) -> io::Result<Option<Vec<u8>>> {
        let prefix = usize::from(self.report_id.is_some());
        let mut buf = vec![0u8; self.out_report_len + prefix];
        let mut file = fs::OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(&self.path)?;
        let n = match file.read(&mut buf) {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(None),
            Err(e) => return Err(e),
        };
        if n <= prefix {
            return Ok(None);
        }
        if let Some(id) = self.report_id {
            if buf[0] != id {
                return Ok(None);
            }
        }
        Ok(Some(buf[prefix..n].to_vec()))
    }
}

#[async_trait]
impl ReportSink for HidGadgetSink {
    async fn send_report(&self, report: &[u8]) -> Result<()> {
        let frame = self.frame(report);
        let write = async {
            let mut file = OpenOptions::new().write(true).open(&self.path).await?;
            file.write_all(&frame).await?;
            file.flush().await
        };
        write.await.map_err(|source| Error::ReportWrite {
            path: self.path.clone(),
            source,
        })?;
        trace!(profile = %self.profile, report = ?report, "report sent");
        Ok(())
    }

    fn last_received_report(&self) -> Result<Option<Vec<u8>>> {
        let mut last = self
            .last_received
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if self.out_report_len == 0 {
            return Ok(last.clone());
        }
        let fresh = self.poll_host_report().map_err(|source| Error::ReportRead {
            path: self.path.clone(),
            source,
        })?;
        if let Some(report) = fresh {
            *last = Some(report);
        }
        Ok(last.clone())
    }
}
