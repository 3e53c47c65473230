use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the shape search enumerates candidates.
///
/// Both strategies return the same shapes; `Exhaustive` walks every
/// combination of segments, `Adjacency` only follows segments that share a
/// point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    #[default]
    Adjacency,
    Exhaustive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub search_quadrilaterals: bool,
    pub strategy: SearchStrategy,
    /// Let layer nodes act as shape corners. When off, only segments running
    /// between two intersections take part in the search.
    pub include_node_vertices: bool,
    pub parallel: bool,
    /// Cap on enumerated candidates per layer-transition and shape kind.
    pub max_candidates: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            search_quadrilaterals: true,
            strategy: SearchStrategy::default(),
            include_node_vertices: true,
            parallel: true,
            max_candidates: Some(50_000_000),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub line_thickness: f32,
    pub node_size: f32,
    /// Fraction of shapes that get filled.
    pub shape_density: f64,
    /// Seed for the shape selection; drawn at random when absent.
    pub seed: Option<u64>,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            margin: 40.0,
            line_thickness: 1.0,
            node_size: 8.0,
            shape_density: 0.2,
            seed: None,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::de_stijl();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        let density = self.render.shape_density;
        if !(0.0..=1.0).contains(&density) {
            return Err(anyhow::anyhow!(
                "shape density must lie between 0 and 1, got {density}"
            ));
        }
        if self.theme.palette.is_empty() {
            return Err(anyhow::anyhow!("theme palette must name at least one color"));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    palette: Option<Vec<String>>,
    line_color: Option<String>,
    node_color: Option<String>,
    background: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchConfigFile {
    quadrilaterals: Option<bool>,
    strategy: Option<SearchStrategy>,
    include_node_vertices: Option<bool>,
    parallel: Option<bool>,
    max_candidates: Option<u64>,
    unlimited: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    margin: Option<f32>,
    line_thickness: Option<f32>,
    node_size: Option<f32>,
    shape_density: Option<f64>,
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    search: Option<SearchConfigFile>,
    render: Option<RenderConfigFile>,
}

/// Loads a config file on top of the defaults.
///
/// Plain JSON is tried first, then JSON5 (comments, trailing commas).
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    apply_config_str(&mut config, &contents)?;
    config.validate()?;
    Ok(config)
}

fn apply_config_str(config: &mut Config, contents: &str) -> anyhow::Result<()> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(json_err) => json5::from_str(contents).map_err(|json5_err| {
            anyhow::anyhow!("invalid config file: {json_err} (as JSON5: {json5_err})")
        })?,
    };

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "monochrome" {
            config.theme = Theme::monochrome();
        } else if theme_name == "de-stijl" || theme_name == "default" {
            config.theme = Theme::de_stijl();
        } else {
            return Err(anyhow::anyhow!("unknown theme '{theme_name}'"));
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.palette {
            config.theme.palette = v;
        }
        if let Some(v) = vars.line_color {
            config.theme.line_color = v;
        }
        if let Some(v) = vars.node_color {
            config.theme.node_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
    }

    if let Some(search) = parsed.search {
        if let Some(v) = search.quadrilaterals {
            config.layout.search_quadrilaterals = v;
        }
        if let Some(v) = search.strategy {
            config.layout.strategy = v;
        }
        if let Some(v) = search.include_node_vertices {
            config.layout.include_node_vertices = v;
        }
        if let Some(v) = search.parallel {
            config.layout.parallel = v;
        }
        if search.max_candidates.is_some() {
            config.layout.max_candidates = search.max_candidates;
        }
        if search.unlimited == Some(true) {
            config.layout.max_candidates = None;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
        if let Some(v) = render.margin {
            config.render.margin = v;
        }
        if let Some(v) = render.line_thickness {
            config.render.line_thickness = v;
        }
        if let Some(v) = render.node_size {
            config.render.node_size = v;
        }
        if let Some(v) = render.shape_density {
            config.render.shape_density = v;
        }
        if render.seed.is_some() {
            config.render.seed = render.seed;
        }
    }

    config.render.background = config.theme.background.clone();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_search_everything() {
        let config = Config::default();
        assert!(config.layout.search_quadrilaterals);
        assert!(config.layout.include_node_vertices);
        assert_eq!(config.layout.strategy, SearchStrategy::Adjacency);
        assert_eq!(config.render.background, config.theme.background);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn json_overrides_defaults() {
        let mut config = Config::default();
        apply_config_str(
            &mut config,
            r##"{
                "theme": "monochrome",
                "themeVariables": { "background": "#fafafa" },
                "search": { "strategy": "exhaustive", "quadrilaterals": false, "unlimited": true },
                "render": { "shapeDensity": 0.5, "seed": 7 }
            }"##,
        )
        .unwrap();
        assert_eq!(config.theme.palette, Theme::monochrome().palette);
        assert_eq!(config.render.background, "#fafafa");
        assert_eq!(config.layout.strategy, SearchStrategy::Exhaustive);
        assert!(!config.layout.search_quadrilaterals);
        assert_eq!(config.layout.max_candidates, None);
        assert_eq!(config.render.shape_density, 0.5);
        assert_eq!(config.render.seed, Some(7));
    }

    #[test]
    fn json5_is_accepted() {
        let mut config = Config::default();
        apply_config_str(
            &mut config,
            "{\n  // comment\n  search: { maxCandidates: 1000, },\n}",
        )
        .unwrap();
        assert_eq!(config.layout.max_candidates, Some(1000));
    }

    #[test]
    fn rejects_unknown_theme_and_bad_density() {
        let mut config = Config::default();
        assert!(apply_config_str(&mut config, r#"{"theme": "pastel"}"#).is_err());

        let mut config = Config::default();
        apply_config_str(&mut config, r#"{"render": {"shapeDensity": 1.5}}"#).unwrap();
        assert!(config.validate().is_err());
    }
}
