use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use blockdrop::PointerEvent;

/// A recorded drag gesture
///
/// ```yaml
/// events:
///   - event: down
///     block: footer
///   - event: move
///     hover: hero
///     pointer_y: 12
///     hover_midpoint_y: 40
///   - event: up
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DragScript {
    pub events: Vec<PointerEvent>,
}

impl DragScript {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read drag script {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse drag script {}", path.display()))
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_script() {
        let script = DragScript::from_yaml_str(
            r#"
events:
  - event: down
    block: footer
  - event: move
    hover: hero
    pointer_y: 12
    hover_midpoint_y: 40.5
  - event: up
"#,
        )
        .unwrap();

        assert_eq!(
            script.events,
            vec![
                PointerEvent::Down {
                    block: "footer".to_string()
                },
                PointerEvent::Move {
                    hover: "hero".to_string(),
                    pointer_y: 12.0,
                    hover_midpoint_y: 40.5,
                },
                PointerEvent::Up,
            ]
        );
    }

    #[test]
    fn test_unknown_event_is_an_error() {
        assert!(DragScript::from_yaml_str("events:\n  - event: hover\n").is_err());
    }

    #[test]
    fn test_load_from_file_names_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "events: 3").unwrap();

        let err = DragScript::load_from_file(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains(&file.path().display().to_string()));
    }
}
