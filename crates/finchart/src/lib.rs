pub mod analyst;
pub mod chart_data;
pub mod errors;
pub mod handlers;
pub mod input;
pub mod models;
pub mod prompt_template;
pub mod providers;
pub mod tools;
