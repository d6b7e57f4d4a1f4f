pub mod control_panel;
pub mod response_plot;

pub use control_panel::{ControlPanel, PanelAction};
pub use response_plot::ResponsePlot;
