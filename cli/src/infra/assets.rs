//! Embedded lesson content compiled into the CLI binary.
//!
//! At compile time, `include_dir!` embeds everything under `cli/assets/`:
//!   - `courses/solar-system.yaml`: the built-in solar system course

use std::path::Path;

use anyhow::{Context, Result};
use include_dir::{Dir, include_dir};
use reachy_lesson::Course;

static EMBEDDED_ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets");

/// Path of the built-in course inside the embedded assets.
pub const BUILTIN_COURSE: &str = "courses/solar-system.yaml";

/// Return the raw bytes of a single embedded asset.
///
/// # Errors
///
/// Returns an error if no asset with the given `name` exists.
pub fn get_asset(name: &str) -> Result<&'static [u8]> {
    EMBEDDED_ASSETS
        .get_file(name)
        .map(|f| f.contents())
        .ok_or_else(|| anyhow::anyhow!("embedded asset not found: {name}"))
}

/// Load the course at `path`, or the built-in course when `path` is `None`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, does not parse, or fails
/// validation.
pub fn load_course(path: Option<&Path>) -> Result<Course> {
    let (source, text) = match path {
        Some(p) => (
            p.display().to_string(),
            std::fs::read_to_string(p).with_context(|| format!("cannot read {}", p.display()))?,
        ),
        None => (
            BUILTIN_COURSE.to_string(),
            String::from_utf8_lossy(get_asset(BUILTIN_COURSE)?).into_owned(),
        ),
    };
    let course: Course =
        serde_yaml::from_str(&text).with_context(|| format!("cannot parse {source}"))?;
    course
        .validate()
        .with_context(|| format!("invalid course {source}"))?;
    Ok(course)
}
