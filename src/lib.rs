#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig, SearchStrategy, load_config};
pub use ir::NetworkSpec;
pub use layout::{Layout, LayoutError, Shape, ShapeKind, compute_layout};
pub use layout::winding::order_quadrilateral;
