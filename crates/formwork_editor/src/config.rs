//! Rich text editor init options.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_MIN_HEIGHT: u32 = 250;

pub const DEFAULT_PLUGINS: &[&str] = &[
    "autoresize",
    "code",
    "codesample",
    "image",
    "link",
    "lists",
    "table",
    "wordcount",
    "preview",
];

pub const DEFAULT_TOOLBAR: &str = "blocks | bold italic link codesample blockquote image table | bullist numlist | outdent indent | wordcount | undo redo | code | custom_preview";

pub const DEFAULT_BLOCK_FORMATS: &str = "Paragraph=p; Header 1=h1; Header 2=h2; Header 3=h3";

/// Stylesheet injected into the editing frame so content looks as it does
/// when rendered on the site.
pub fn content_style(disabled: bool) -> String {
    let opacity = if disabled { "opacity: 0.5; " } else { "" };
    format!(
        r#"
body {{
  font-size: 14px;
  {opacity}
}}

blockquote  {{
  margin-left: 0.5rem !important;
  padding-left: 1rem !important;
  color: #757575;
  border-left: 4px solid #C5C5C5 !important;
}}

blockquote > blockquote {{
  margin-left: 0 !important;
}}
"#
    )
}

/// A toolbar button registered by the host when the editor is set up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolbarButton {
    pub name: String,
    pub text: String,
    pub tooltip: String,
    /// Editor command executed on click
    pub command: String,
}

impl ToolbarButton {
    /// Math preview button referenced by the default toolbar.
    pub fn math_preview() -> Self {
        Self {
            name: "custom_preview".to_string(),
            text: "√x".to_string(),
            tooltip: "Preview math equations".to_string(),
            command: "mcePreview".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub branding: bool,
    pub menubar: bool,
    pub statusbar: bool,
    pub min_height: u32,
    pub plugins: Vec<String>,
    pub contextmenu: bool,
    pub toolbar: String,
    pub autoresize_bottom_margin: u32,
    pub block_formats: String,
    pub table_advtab: bool,
    pub convert_urls: bool,
    pub buttons: Vec<ToolbarButton>,
    /// Caller options applied over everything else
    pub overrides: IndexMap<String, Value>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            branding: false,
            menubar: false,
            statusbar: false,
            min_height: DEFAULT_MIN_HEIGHT,
            plugins: DEFAULT_PLUGINS.iter().map(|p| p.to_string()).collect(),
            contextmenu: false,
            toolbar: DEFAULT_TOOLBAR.to_string(),
            autoresize_bottom_margin: 20,
            block_formats: DEFAULT_BLOCK_FORMATS.to_string(),
            table_advtab: false,
            convert_urls: false,
            buttons: vec![ToolbarButton::math_preview()],
            overrides: IndexMap::new(),
        }
    }
}

impl EditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_height(mut self, min_height: u32) -> Self {
        self.min_height = min_height;
        self
    }

    pub fn toolbar(mut self, toolbar: impl Into<String>) -> Self {
        self.toolbar = toolbar.into();
        self
    }

    pub fn plugin(mut self, plugin: impl Into<String>) -> Self {
        let plugin = plugin.into();
        if !self.plugins.contains(&plugin) {
            self.plugins.push(plugin);
        }
        self
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }

    /// Options handed to the editor engine.
    pub fn to_init_json(&self, disabled: bool) -> Value {
        let mut init = Map::new();
        init.insert("branding".into(), self.branding.into());
        init.insert("menubar".into(), self.menubar.into());
        init.insert("statusbar".into(), self.statusbar.into());
        init.insert("min_height".into(), self.min_height.into());
        init.insert("content_style".into(), content_style(disabled).into());
        init.insert("plugins".into(), self.plugins.clone().into());
        init.insert("contextmenu".into(), self.contextmenu.into());
        init.insert("toolbar".into(), self.toolbar.clone().into());
        init.insert(
            "autoresize_bottom_margin".into(),
            self.autoresize_bottom_margin.into(),
        );
        init.insert("block_formats".into(), self.block_formats.clone().into());
        init.insert("table_advtab".into(), self.table_advtab.into());
        init.insert("convert_urls".into(), self.convert_urls.into());
        for (key, value) in &self.overrides {
            init.insert(key.clone(), value.clone());
        }
        Value::Object(init)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_init_options() {
        let init = EditorConfig::default().to_init_json(false);
        assert_eq!(init["branding"], json!(false));
        assert_eq!(init["min_height"], json!(250));
        assert_eq!(init["plugins"].as_array().unwrap().len(), 9);
        assert_eq!(init["autoresize_bottom_margin"], json!(20));
        assert_eq!(init["block_formats"], json!(DEFAULT_BLOCK_FORMATS));
        assert_eq!(init["convert_urls"], json!(false));
        assert!(!init["content_style"].as_str().unwrap().contains("opacity"));
    }

    #[test]
    fn test_disabled_dims_content() {
        let init = EditorConfig::default().to_init_json(true);
        assert!(init["content_style"].as_str().unwrap().contains("opacity: 0.5;"));
    }

    #[test]
    fn test_overrides_win() {
        let init = EditorConfig::new()
            .min_height(100)
            .set("menubar", true)
            .set("min_height", 400)
            .to_init_json(false);
        assert_eq!(init["menubar"], json!(true));
        assert_eq!(init["min_height"], json!(400));
    }

    #[test]
    fn test_plugin_not_duplicated() {
        let config = EditorConfig::new().plugin("link").plugin("emoticons");
        assert_eq!(config.plugins.len(), 10);
    }

    #[test]
    fn test_toolbar_references_preview_button() {
        let config = EditorConfig::default();
        assert!(config.toolbar.ends_with(&config.buttons[0].name));
    }
}
