// Library exports for likeplot

pub mod compile;
pub mod csv_reader;
pub mod data;
pub mod error;
pub mod graph;
pub mod ir;
pub mod palette;
pub mod parser;
pub mod runtime;
pub mod scale;
pub mod schema;
pub mod stats;
pub mod transform;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[serde(rename = "png")]
    #[default]
    Png,
    #[serde(rename = "svg")]
    Svg,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderOptions {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default, rename = "type")]
    pub format: OutputFormat,
}

fn default_width() -> u32 {
    800
}
fn default_height() -> u32 {
    600
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            format: OutputFormat::Png,
        }
    }
}
