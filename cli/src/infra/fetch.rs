//! HTTP implementation of the `AssetFetcher` port.
//!
//! Streams the body into `<dest>.partial` and renames it to `dest` only once
//! the whole body has arrived. One attempt per call; callers decide what a
//! failure means.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::AssetFetcher;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const READ_TIMEOUT: Duration = Duration::from_secs(300);

/// Production `AssetFetcher` backed by a `ureq` agent.
pub struct UreqFetcher {
    agent: ureq::Agent,
    quiet: bool,
}

impl UreqFetcher {
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout_read(READ_TIMEOUT)
            .build();
        Self { agent, quiet }
    }
}

impl AssetFetcher for UreqFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64> {
        let partial = self.partial_path(dest);
        let result = self.download(url, dest, &partial);
        if result.is_err() {
            std::fs::remove_file(&partial).ok();
        }
        result
    }
}

impl UreqFetcher {
    fn download(&self, url: &str, dest: &Path, partial: &Path) -> Result<u64> {
        let response = match self.agent.get(url).call() {
            Ok(r) => r,
            Err(ureq::Error::Status(code, _)) => anyhow::bail!("HTTP {code}"),
            Err(e) => return Err(e).context("request failed"),
        };

        let total = response
            .header("Content-Length")
            .and_then(|v| v.parse::<u64>().ok());
        let mut file = File::create(partial)
            .with_context(|| format!("creating {}", partial.display()))?;
        let pb = make_progress_bar(self.quiet, total);

        let mut reader = response.into_reader();
        let mut buf = vec![0u8; 64 * 1024];
        let mut written: u64 = 0;
        loop {
            let n = reader.read(&mut buf).context("download interrupted")?;
            if n == 0 {
                break;
            }
            file.write_all(&buf[..n])
                .with_context(|| format!("writing {}", partial.display()))?;
            written += n as u64;
            pb.inc(n as u64);
        }
        pb.finish_and_clear();
        file.sync_all().context("flushing download")?;
        drop(file);

        if let Some(expected) = total
            && written != expected
        {
            anyhow::bail!("connection closed after {written} of {expected} bytes");
        }

        std::fs::rename(partial, dest)
            .with_context(|| format!("moving download to {}", dest.display()))?;
        Ok(written)
    }
}

fn make_progress_bar(quiet: bool, total: Option<u64>) -> indicatif::ProgressBar {
    if quiet {
        return indicatif::ProgressBar::hidden();
    }
    if let Some(t) = total {
        let pb = indicatif::ProgressBar::new(t);
        pb.set_style(
            indicatif::ProgressStyle::default_bar()
                .template("[{bar:40}] {percent}% {bytes}/{total_bytes}")
                .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        pb
    } else {
        indicatif::ProgressBar::new_spinner()
    }
}
