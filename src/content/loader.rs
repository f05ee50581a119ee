//! Loader for RON content files at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::*;
use super::registry::ContentRegistry;

const EMBEDDED_DEFAULTS: &str = include_str!("../../assets/data/gameplay_defaults.ron");
const EMBEDDED_LEVEL: &str = include_str!("../../assets/data/level.ron");
const EMBEDDED_WAVES: &str = include_str!("../../assets/data/waves.ron");

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

fn parse<T>(file: &str, contents: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })
}

fn read(path: &Path) -> Result<String, ContentLoadError> {
    fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: path.display().to_string(),
        message: format!("IO error: {}", e),
    })
}

/// Load a RON file containing a DataFile<T> wrapper.
fn load_data_file<T>(path: &Path) -> Result<Vec<T>, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let contents = read(path)?;
    let data: DataFile<T> = parse(&path.display().to_string(), &contents)?;
    Ok(data.items)
}

/// Load a single RON struct (not wrapped in DataFile).
fn load_single_file<T>(path: &Path) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let contents = read(path)?;
    parse(&path.display().to_string(), &contents)
}

/// Load all content from `base_path/*.ron` into a ContentRegistry.
/// Returns errors for every file that fails to load.
pub fn load_all_content(base_path: &Path) -> Result<ContentRegistry, Vec<ContentLoadError>> {
    let mut errors = Vec::new();

    let defaults = load_single_file::<GameplayDefaults>(&base_path.join("gameplay_defaults.ron"))
        .map_err(|e| errors.push(e))
        .ok();
    let level = load_single_file::<LevelDef>(&base_path.join("level.ron"))
        .map_err(|e| errors.push(e))
        .ok();
    let waves = load_data_file::<WaveDef>(&base_path.join("waves.ron"))
        .map_err(|e| errors.push(e))
        .ok();

    match (defaults, level, waves) {
        (Some(defaults), Some(level), Some(waves)) => Ok(ContentRegistry {
            defaults,
            level,
            waves,
        }),
        _ => Err(errors),
    }
}

/// Parse the copies of assets/data compiled into the binary.
pub fn embedded_content() -> Result<ContentRegistry, ContentLoadError> {
    let defaults = parse::<GameplayDefaults>("embedded gameplay_defaults.ron", EMBEDDED_DEFAULTS)?;
    let level = parse::<LevelDef>("embedded level.ron", EMBEDDED_LEVEL)?;
    let waves = parse::<DataFile<WaveDef>>("embedded waves.ron", EMBEDDED_WAVES)?.items;

    Ok(ContentRegistry {
        defaults,
        level,
        waves,
    })
}
