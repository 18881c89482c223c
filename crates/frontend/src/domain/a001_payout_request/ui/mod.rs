pub mod list;
pub mod panel;
