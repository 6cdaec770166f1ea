pub mod commands;
pub mod dictionaries;
