//! TOML loader for balance overrides.

use std::fs;
use std::path::Path;

use anyhow::Context;
use raid_core::BalanceParams;

use super::LoadResult;

/// Loads balance parameters from a TOML file.
///
/// Missing sections and fields fall back to the shipped defaults, so an
/// override file only names what it changes:
///
/// ```toml
/// detection_probability = 0.4
///
/// [coordination]
/// base = 0.12
/// per_extra = 0.05
/// cap = 0.5
/// ```
pub fn load_balance(path: &Path) -> LoadResult<BalanceParams> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading balance tables from {}", path.display()))?;
    let params: BalanceParams = toml::from_str(&raw)
        .with_context(|| format!("parsing balance tables from {}", path.display()))?;
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_partial_override_on_top_of_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "detection_probability = 0.4\n\n[coordination]\nbase = 0.12\nper_extra = 0.05\ncap = 0.5\n"
        )
        .unwrap();

        let params = load_balance(file.path()).unwrap();
        assert_eq!(params.detection_probability, 0.4);
        assert_eq!(params.coordination.base, 0.12);
        // Untouched sections keep the shipped values.
        assert_eq!(params.comeback, Default::default());
        assert_eq!(params.monster.growth, BalanceParams::default().monster.growth);
    }

    #[test]
    fn rejects_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "coordination = \"not a table\"").unwrap();
        assert!(load_balance(file.path()).is_err());
    }

    #[test]
    fn missing_file_is_an_error_with_the_path() {
        let err = load_balance(Path::new("/nonexistent/balance.toml")).unwrap_err();
        assert!(err.to_string().contains("balance.toml"));
    }
}
