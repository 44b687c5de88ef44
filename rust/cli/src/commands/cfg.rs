//! Shows the effective configuration and where each value came from.

use std::io::Write;

use crate::config;
use crate::error::CliError;
use crate::ui;

/// Prints the resolved configuration as pretty JSON. Each field carries its
/// value and the source it was resolved from (default, file, or env).
pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Failed to load configuration: {}", e))?;
            return Err(CliError::Config(format!(
                "Failed to load configuration: {}",
                e
            )));
        }
    };
    let cfg = &resolved.config;
    let src = &resolved.sources;

    let report = serde_json::json!({
        "seed": { "value": cfg.seed, "source": src.seed },
        "difficulty": { "value": cfg.difficulty, "source": src.difficulty },
        "dealer_delay_ms": { "value": cfg.dealer_delay_ms, "source": src.dealer_delay_ms },
        "deck_path": { "value": cfg.deck_path, "source": src.deck_path },
    });
    let text = serde_json::to_string_pretty(&report)
        .map_err(|e| CliError::Config(format!("Failed to serialize configuration: {}", e)))?;
    writeln!(out, "{}", text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cfg_output_is_json_with_sources() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_cfg_command(&mut out, &mut err).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&String::from_utf8(out).unwrap()).unwrap();
        for field in ["seed", "difficulty", "dealer_delay_ms", "deck_path"] {
            assert!(json[field].get("value").is_some(), "missing value for {}", field);
            assert!(json[field].get("source").is_some(), "missing source for {}", field);
        }
    }
}
