use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a JSON or YAML file (chosen by extension) into a typed struct.
pub fn read_input<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;

    let value: T = if is_yaml(&canonical) {
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    } else {
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    };
    Ok(value)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Resolve relative paths against the working directory and require a regular file.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use emi_core::lenders::catalog::Lender;
    use rust_decimal::Decimal;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("emi-cli-{}-{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_read_yaml_lenders() {
        let path = write_temp(
            "lenders.yaml",
            "- name: Credit Union\n  annual_rate_percent: 8.1\n  processing_fee_percent: 0.25\n",
        );
        let lenders: Vec<Lender> = read_input(path.to_str().unwrap()).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(lenders.len(), 1);
        assert_eq!(lenders[0].name, "Credit Union");
        assert_eq!(lenders[0].processing_fee_percent, Decimal::new(25, 2));
    }

    #[test]
    fn test_read_json_lenders() {
        let path = write_temp(
            "lenders.json",
            r#"[{"name": "SBI", "annual_rate_percent": "8.5", "processing_fee_percent": "0.5"}]"#,
        );
        let lenders: Vec<Lender> = read_input(path.to_str().unwrap()).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(lenders[0].annual_rate_percent, Decimal::new(85, 1));
    }

    #[test]
    fn test_missing_file() {
        let err = read_input::<Vec<Lender>>("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
