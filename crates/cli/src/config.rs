//! Demo configuration read from the process environment.
use std::env;
use std::path::PathBuf;

use targeting_core::GridCell;

use crate::demo::Tool;

/// Inputs for one demo lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemoConfig {
    /// TOML targeting config; the bundled one is used when unset.
    pub config_path: Option<PathBuf>,
    /// RON field layout; the bundled one is used when unset.
    pub field_path: Option<PathBuf>,
    /// Top-left cell of the agent's bounding box.
    pub anchor: GridCell,
    /// Cell under the cursor.
    pub hint: GridCell,
    pub tool: Tool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            field_path: None,
            anchor: GridCell::new(110, 47),
            hint: GridCell::new(114, 49),
            tool: Tool::Pickaxe,
        }
    }
}

impl DemoConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TARGETING_CONFIG` - Path to a targeting TOML file
    /// - `TARGETING_FIELD` - Path to a field RON file
    /// - `TARGETING_ANCHOR` - Agent cell as `x,y` (default: 110,47)
    /// - `TARGETING_HINT` - Cursor cell as `x,y` (default: 114,49)
    /// - `TARGETING_TOOL` - `pickaxe`, `torch` or `seeds` (default: pickaxe)
    ///
    /// Unparsable values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.config_path = env::var_os("TARGETING_CONFIG").map(PathBuf::from);
        config.field_path = env::var_os("TARGETING_FIELD").map(PathBuf::from);

        if let Some(anchor) = read_env_with("TARGETING_ANCHOR", parse_cell) {
            config.anchor = anchor;
        }
        if let Some(hint) = read_env_with("TARGETING_HINT", parse_cell) {
            config.hint = hint;
        }
        if let Some(tool) = read_env_with("TARGETING_TOOL", |raw| raw.parse().ok()) {
            config.tool = tool;
        }

        config
    }
}

/// Parses `"x,y"` (whitespace around either number is allowed).
pub fn parse_cell(raw: &str) -> Option<GridCell> {
    let (x, y) = raw.split_once(',')?;
    Some(GridCell::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
}

fn read_env_with<T>(key: &str, parse: impl FnOnce(&str) -> Option<T>) -> Option<T> {
    let raw = env::var(key).ok()?;
    let parsed = parse(&raw);
    if parsed.is_none() {
        tracing::warn!(key, value = %raw, "ignoring unparsable environment variable");
    }
    parsed
}
