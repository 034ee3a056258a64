//! Display settings and about information.
//!
//! Settings carry no data invariants; nothing here touches the note list.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Color scheme for presentation layers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Returns the opposite mode.
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl Display for ThemeMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unsupported theme `{other}`; expected light|dark")),
        }
    }
}

/// Runtime dependencies listed on the about screen, as declared in the core
/// manifest.
const RUNTIME_DEPENDENCIES: &[(&str, &str)] = &[
    ("dirs", "5"),
    ("flexi_logger", "0.29"),
    ("log", "0.4"),
    ("once_cell", "1.20"),
    ("regex", "1.11"),
    ("rusqlite", "0.32"),
    ("serde", "1.0"),
    ("serde_json", "1.0"),
    ("uuid", "1.8"),
];

/// Version and dependency listing for the settings view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutInfo {
    pub version: &'static str,
    pub dependencies: Vec<(&'static str, &'static str)>,
}

impl AboutInfo {
    /// Describes the running core build.
    pub fn current() -> Self {
        Self {
            version: crate::core_version(),
            dependencies: RUNTIME_DEPENDENCIES.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AboutInfo, ThemeMode, RUNTIME_DEPENDENCIES};
    use once_cell::sync::Lazy;
    use regex::Regex;

    static DEPENDENCY_LINE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r#"^([A-Za-z0-9_-]+)\s*=\s*(?:"([^"]+)"|\{.*?version\s*=\s*"([^"]+)")"#)
            .expect("valid dependency regex")
    });

    fn manifest_dependencies() -> Vec<(String, String)> {
        include_str!("../Cargo.toml")
            .lines()
            .map(str::trim)
            .skip_while(|line| *line != "[dependencies]")
            .skip(1)
            .take_while(|line| !line.starts_with('['))
            .filter_map(|line| DEPENDENCY_LINE.captures(line))
            .map(|caps| {
                let version = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
                (caps[1].to_string(), version.to_string())
            })
            .collect()
    }

    #[test]
    fn toggle_flips_mode() {
        assert_eq!(ThemeMode::Light.toggle(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggle().toggle(), ThemeMode::Dark);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(" Dark ".parse::<ThemeMode>(), Ok(ThemeMode::Dark));
        assert!("sepia".parse::<ThemeMode>().is_err());
        assert_eq!(ThemeMode::Light.to_string(), "light");
    }

    #[test]
    fn about_lists_version_and_sorted_dependencies() {
        let about = AboutInfo::current();
        assert!(!about.version.is_empty());
        let names: Vec<_> = about.dependencies.iter().map(|(name, _)| *name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert!(names.contains(&"rusqlite"));
    }

    #[test]
    fn dependency_list_matches_manifest() {
        let listed: Vec<(String, String)> = RUNTIME_DEPENDENCIES
            .iter()
            .map(|(name, version)| (name.to_string(), version.to_string()))
            .collect();
        let declared = manifest_dependencies();
        assert!(!declared.is_empty());
        assert_eq!(listed, declared);
    }
}
