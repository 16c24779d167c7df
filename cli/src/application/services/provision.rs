//! Application service: asset provisioning use-case.
//!
//! Downloads each asset of a `ProvisioningConfig`, checks its size and
//! unpacks it. Every failure removes the artifact it concerns before
//! returning, so the next run starts clean. Nothing is retried.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::application::ports::{
    ArchiveExtractor, AssetFetcher, FileHasher, LocalFs, ProgressReporter,
};
use crate::domain::{AssetSpec, AssetState, ProvisionError, ProvisioningConfig};

/// Port bundle used by [`provision`].
pub struct ProvisionPorts<'a, F, D, X, H, R> {
    pub fs: &'a F,
    pub fetcher: &'a D,
    pub extractor: &'a X,
    pub hasher: &'a H,
    pub reporter: &'a R,
}

/// Make every asset in `config` ready, in order.
///
/// When all assets are already ready, this touches neither network nor disk
/// beyond reading sizes and checking directories.
///
/// # Errors
///
/// Returns the first `ProvisionError` encountered (transport, integrity,
/// checksum or extraction), or an I/O error from the filesystem port.
pub fn provision<F, D, X, H, R>(
    config: &ProvisioningConfig,
    ports: &ProvisionPorts<'_, F, D, X, H, R>,
) -> Result<Vec<AssetState>>
where
    F: LocalFs,
    D: AssetFetcher,
    X: ArchiveExtractor,
    H: FileHasher,
    R: ProgressReporter,
{
    let mut states = Vec::with_capacity(config.assets.len());
    for spec in &config.assets {
        states.push(provision_one(spec, ports)?);
    }
    Ok(states)
}

/// Observe every asset without changing anything on disk.
///
/// # Errors
///
/// Returns an error if a file size cannot be read.
pub fn inspect(config: &ProvisioningConfig, fs: &impl LocalFs) -> Result<Vec<AssetState>> {
    config
        .assets
        .iter()
        .map(|spec| {
            let mut state = AssetState::new(spec);
            state.observe_size(fs.file_size(&spec.archive)?);
            state.extracted = is_extracted(fs, spec);
            Ok(state)
        })
        .collect()
}

fn provision_one<F, D, X, H, R>(
    spec: &AssetSpec,
    ports: &ProvisionPorts<'_, F, D, X, H, R>,
) -> Result<AssetState>
where
    F: LocalFs,
    D: AssetFetcher,
    X: ArchiveExtractor,
    H: FileHasher,
    R: ProgressReporter,
{
    let ProvisionPorts {
        fs,
        fetcher,
        extractor,
        hasher,
        reporter,
    } = ports;
    let mut state = AssetState::new(spec);

    if let Some(parent) = spec.archive.parent()
        && !parent.as_os_str().is_empty()
    {
        fs.create_dir_all(parent)?;
    }

    state.observe_size(fs.file_size(&spec.archive)?);
    if state.is_undersized() {
        reporter.warn(&format!(
            "{} is only {} bytes (expected at least {}), removing it",
            spec.archive.display(),
            state.size.unwrap_or_default(),
            spec.min_size
        ));
        fs.remove_file(&spec.archive)?;
        state.observe_size(None);
    }

    if !state.present {
        download(spec, *fs, *fetcher, *hasher, *reporter)?;
        state.observe_size(fs.file_size(&spec.archive)?);
    }

    match &spec.extract_dir {
        Some(dir) if is_extracted(*fs, spec) => {
            reporter.success(&format!("{} already available at {}", spec.name, dir.display()));
        }
        Some(dir) => {
            reporter.step(&format!("extracting {} to {}...", spec.name, dir.display()));
            extract(spec, dir, *fs, *extractor)?;
            reporter.success(&format!("{} ready at {}", spec.name, dir.display()));
        }
        None => reporter.success(&format!("{} ready at {}", spec.name, spec.archive.display())),
    }
    state.extracted = true;

    Ok(state)
}

fn download(
    spec: &AssetSpec,
    fs: &impl LocalFs,
    fetcher: &impl AssetFetcher,
    hasher: &impl FileHasher,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    reporter.step(&format!("downloading {} from {}...", spec.name, spec.url));

    if let Err(e) = fetcher.fetch(&spec.url, &spec.archive) {
        // Cleanup failures must not mask the transport error.
        let _ = fs.remove_file(&fetcher.partial_path(&spec.archive));
        let _ = fs.remove_file(&spec.archive);
        return Err(ProvisionError::Transport {
            name: spec.name.clone(),
            url: spec.url.clone(),
            path: spec.archive.clone(),
            reason: format!("{e:#}"),
        }
        .into());
    }

    let size = fs.file_size(&spec.archive)?.unwrap_or_default();
    if size < spec.min_size {
        fs.remove_file(&spec.archive)?;
        return Err(ProvisionError::Integrity {
            name: spec.name.clone(),
            path: spec.archive.clone(),
            size,
            min_size: spec.min_size,
        }
        .into());
    }

    if let Some(expected) = &spec.sha256 {
        let actual = hasher.sha256_file(&spec.archive)?;
        if !actual.eq_ignore_ascii_case(expected) {
            fs.remove_file(&spec.archive)?;
            return Err(ProvisionError::Checksum {
                name: spec.name.clone(),
                path: spec.archive.clone(),
                expected: expected.clone(),
                actual,
            }
            .into());
        }
    }

    reporter.success(&format!("downloaded {} ({size} bytes)", spec.name));
    Ok(())
}

/// `true` when the extracted directory exists and holds every required entry.
fn is_extracted(fs: &impl LocalFs, spec: &AssetSpec) -> bool {
    spec.extract_dir.as_deref().is_none_or(|dir| {
        fs.exists(dir)
            && spec
                .required_entries
                .iter()
                .all(|entry| fs.exists(&dir.join(entry)))
    })
}

/// Staging directory next to `dir`, e.g. `models/.vosk-model.partial`.
fn staging_path(dir: &Path) -> PathBuf {
    let name = dir
        .file_name()
        .map_or_else(|| "asset".into(), |n| n.to_string_lossy().into_owned());
    dir.with_file_name(format!(".{name}.partial"))
}

/// Where the extracted content starts inside `staging`.
///
/// Archives usually wrap their content in one top-level folder, whose name
/// need not match the target directory. Content already laid out at the top
/// level is taken as is.
fn content_root(
    spec: &AssetSpec,
    dir: &Path,
    staging: &Path,
    fs: &impl LocalFs,
) -> Result<PathBuf> {
    let at_top = |entry: &String| fs.exists(&staging.join(entry));
    if !spec.required_entries.is_empty() && spec.required_entries.iter().all(at_top) {
        return Ok(staging.to_path_buf());
    }
    let entries = fs.list_dir(staging)?;
    if let [only] = entries.as_slice()
        && fs.is_dir(only)
    {
        return Ok(only.clone());
    }
    Ok(dir
        .file_name()
        .map(|name| staging.join(name))
        .filter(|nested| fs.exists(nested))
        .unwrap_or_else(|| staging.to_path_buf()))
}

fn extract(
    spec: &AssetSpec,
    dir: &Path,
    fs: &impl LocalFs,
    extractor: &impl ArchiveExtractor,
) -> Result<()> {
    // An incomplete directory from an interrupted run is never trusted.
    fs.remove_dir_all(dir)?;
    let staging = staging_path(dir);
    fs.remove_dir_all(&staging)?;
    fs.create_dir_all(&staging)?;

    let fail = |reason: String| -> anyhow::Error {
        let _ = fs.remove_dir_all(&staging);
        let _ = fs.remove_file(&spec.archive);
        ProvisionError::Extraction {
            name: spec.name.clone(),
            archive: spec.archive.clone(),
            reason,
        }
        .into()
    };

    if let Err(e) = extractor.extract(&spec.archive, &staging) {
        return Err(fail(format!("{e:#}")));
    }

    let root = match content_root(spec, dir, &staging, fs) {
        Ok(root) => root,
        Err(e) => return Err(fail(format!("{e:#}"))),
    };

    if let Some(missing) = spec
        .required_entries
        .iter()
        .find(|entry| !fs.exists(&root.join(entry)))
    {
        return Err(fail(format!("archive has no '{missing}' entry")));
    }

    if let Err(e) = fs.rename(&root, dir) {
        return Err(fail(format!("{e:#}")));
    }
    fs.remove_dir_all(&staging)?;
    Ok(())
}
