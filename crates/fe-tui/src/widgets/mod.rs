pub mod chart;
pub mod gate_overlay;
pub mod gauge_bar;
pub mod help_modal;
pub mod metric_card;
pub mod status_bar;
