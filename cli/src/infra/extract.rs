//! Archive implementation of the `ArchiveExtractor` port.
//!
//! Supports `.zip` and `.tar.gz`/`.tgz`. Entries whose path is absolute or
//! climbs out of the target with `..` fail the whole extraction.

use std::fs::{self, File};
use std::io;
use std::path::{Component, Path};

use anyhow::{Context, Result};

use crate::application::ports::ArchiveExtractor;
use crate::domain::ArchiveKind;

/// Production `ArchiveExtractor`.
pub struct ArchiveUnpacker;

impl ArchiveExtractor for ArchiveUnpacker {
    fn extract(&self, archive: &Path, into: &Path) -> Result<()> {
        match ArchiveKind::from_path(archive) {
            Some(ArchiveKind::Zip) => extract_zip(archive, into),
            Some(ArchiveKind::TarGz) => extract_tar_gz(archive, into),
            None => anyhow::bail!("unsupported archive type: {}", archive.display()),
        }
    }
}

fn extract_zip(archive: &Path, into: &Path) -> Result<()> {
    let file = File::open(archive).with_context(|| format!("opening {}", archive.display()))?;
    let mut zip = zip::ZipArchive::new(file).context("not a valid zip archive")?;

    for i in 0..zip.len() {
        let mut entry = zip.by_index(i).context("reading zip entry")?;
        let Some(relative) = entry.enclosed_name().map(Path::to_path_buf) else {
            anyhow::bail!("unsafe path in archive: {}", entry.name());
        };
        let out_path = into.join(&relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)
                .with_context(|| format!("creating {}", out_path.display()))?;
            continue;
        }
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let mut out = File::create(&out_path)
            .with_context(|| format!("creating {}", out_path.display()))?;
        io::copy(&mut entry, &mut out)
            .with_context(|| format!("extracting {}", relative.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                fs::set_permissions(&out_path, fs::Permissions::from_mode(mode)).ok();
            }
        }
    }
    Ok(())
}

fn extract_tar_gz(archive: &Path, into: &Path) -> Result<()> {
    let file = File::open(archive).with_context(|| format!("opening {}", archive.display()))?;
    let mut tar = tar::Archive::new(flate2::read::GzDecoder::new(file));

    for entry in tar.entries().context("not a valid tar.gz archive")? {
        let mut entry = entry.context("reading tar entry")?;
        let path = entry.path().context("reading tar entry path")?.into_owned();
        if !is_enclosed(&path) {
            anyhow::bail!("unsafe path in archive: {}", path.display());
        }
        let unpacked = entry
            .unpack_in(into)
            .with_context(|| format!("extracting {}", path.display()))?;
        if !unpacked {
            anyhow::bail!("unsafe path in archive: {}", path.display());
        }
    }
    Ok(())
}

fn is_enclosed(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
