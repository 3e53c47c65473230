use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    /// Fill colors, cycled through in selection order.
    pub palette: Vec<String>,
    pub line_color: String,
    pub node_color: String,
    pub background: String,
}

impl Theme {
    /// Red, blue, yellow and black after Mondrian.
    pub fn de_stijl() -> Self {
        Self {
            palette: ["#E70503", "#0300AD", "#FDDE06", "#050103"]
                .iter()
                .map(|value| value.to_string())
                .collect(),
            line_color: "#000000".to_string(),
            node_color: "#000000".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn monochrome() -> Self {
        Self {
            palette: ["#1C1C1C", "#5A5A5A", "#9A9A9A", "#D4D4D4"]
                .iter()
                .map(|value| value.to_string())
                .collect(),
            line_color: "#1C1C1C".to_string(),
            node_color: "#1C1C1C".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }
}
