pub mod app;
pub mod event;
pub mod plot_view;
pub mod scrub;
pub mod status;
pub mod theme;
