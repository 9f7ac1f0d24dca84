pub mod event;
pub mod site;
