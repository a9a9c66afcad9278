//! PlatformIO configuration rendering
//!
//! Renders `platformio.ini` from the manifest's board, platform, framework
//! and free-form option overrides. Overrides with an empty key or empty
//! value are dropped; the remaining keys render in lexicographic order so
//! the output is deterministic.

use std::collections::BTreeMap;

use handlebars::Handlebars;

use crate::core::manifest::PlatformioConfig;
use crate::error::AssembleError;

const CONFIG_TEMPLATE: &str = "\
; Generated by pioforge. Do not edit; change pioforge.toml instead.
[env:{{board}}]
platform = {{platform}}
board = {{board}}
framework = {{framework}}
{{options}}";

/// Render the configuration file content
pub fn render_config(config: &PlatformioConfig) -> Result<String, AssembleError> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars
        .register_template_string("platformio.ini", CONFIG_TEMPLATE)
        .map_err(|e| AssembleError::ConfigRender {
            error: e.to_string(),
        })?;

    let mut data = BTreeMap::new();
    data.insert("board", config.board.clone());
    data.insert("platform", config.platform.clone());
    data.insert("framework", config.framework.clone());
    data.insert("options", options_block(&config.options));

    handlebars
        .render("platformio.ini", &data)
        .map_err(|e| AssembleError::ConfigRender {
            error: e.to_string(),
        })
}

/// Newline-joined `key = value` block, skipping empty keys and values
fn options_block(options: &BTreeMap<String, String>) -> String {
    options
        .iter()
        .filter(|(key, value)| !key.trim().is_empty() && !value.trim().is_empty())
        .map(|(key, value)| format!("{key} = {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}
