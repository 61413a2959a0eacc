//! Build script for marquee-sim
//!
//! Validates the bundled sign.toml at compile time so a broken default
//! configuration never ships.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use marquee_core::ALPHABET;
use marquee_protocol::{LINE_LEN, SIGN_LINES};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    validate_config();
}

/// Validate sign.toml
fn validate_config() {
    println!("cargo:rerun-if-changed=sign.toml");

    let config_path = Path::new("sign.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: sign.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The simulator bundles sign.toml as its default configuration.   ║\n\
            ║  Please create one in the marquee-sim directory.                 ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read sign.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in sign.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    validate_required_sections(&config, &mut errors);
    validate_presets(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid sign.toml", &errors);
    }
}

/// Abort the build with a boxed error listing
fn fail(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| {
                let truncated = if e.len() > 62 {
                    format!("{}...", e.chars().take(59).collect::<String>())
                } else {
                    e.clone()
                };
                format!("║  • {:<62} ║", truncated)
            })
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Check that [palette] and [plain] exist with their keys
fn validate_required_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let sections: [(&str, &[&str]); 2] = [
        ("palette", &["lit", "unlit", "text", "symbol"]),
        ("plain", &["lit", "unlit"]),
    ];

    for (section, keys) in sections {
        let Some(table) = config.get(section).and_then(|s| s.as_table()) else {
            errors.push(format!("Missing [{}] section", section));
            continue;
        };
        for key in keys {
            if !matches!(table.get(*key), Some(toml::Value::String(_))) {
                errors.push(format!("[{}] '{}' must be a string", section, key));
            }
        }
    }
}

/// Check preset fields, unique names and unique function keys
fn validate_presets(config: &toml::Value, errors: &mut Vec<String>) {
    let presets = match config.get("preset") {
        None => return,
        Some(toml::Value::Array(presets)) => presets,
        Some(_) => {
            errors.push("'preset' must be an array of tables ([[preset]])".to_string());
            return;
        }
    };

    let mut names = HashSet::new();
    let mut keys = HashSet::new();

    for (index, preset) in presets.iter().enumerate() {
        let Some(preset) = preset.as_table() else {
            errors.push(format!("preset #{} must be a table", index + 1));
            continue;
        };

        match preset.get("name").and_then(|n| n.as_str()) {
            Some(name) => {
                if !names.insert(name.to_string()) {
                    errors.push(format!("duplicate preset name '{}'", name));
                }
            }
            None => errors.push(format!("preset #{} missing 'name'", index + 1)),
        }

        match preset.get("line").and_then(|l| l.as_integer()) {
            Some(line) if (0..i64::from(SIGN_LINES)).contains(&line) => {}
            Some(_) => errors.push(format!(
                "preset #{} line must be 0-{}",
                index + 1,
                SIGN_LINES - 1
            )),
            None => errors.push(format!("preset #{} missing 'line'", index + 1)),
        }

        match preset.get("text").and_then(|t| t.as_str()) {
            Some(text) => validate_text(text, index + 1, errors),
            None => errors.push(format!("preset #{} missing 'text'", index + 1)),
        }

        if let Some(key) = preset.get("key").and_then(|k| k.as_integer()) {
            if !keys.insert(key) {
                errors.push(format!("preset #{} reuses F{}", index + 1, key));
            }
        }
    }
}

/// Check that preset text fits a line and uses only characters the sign shows
fn validate_text(text: &str, number: usize, errors: &mut Vec<String>) {
    if text.chars().count() > LINE_LEN {
        errors.push(format!("preset #{} text longer than {}", number, LINE_LEN));
    }
    for c in text.chars().filter(|c| !ALPHABET.contains(*c)) {
        errors.push(format!("preset #{} text has unsupported {:?}", number, c));
    }
}
