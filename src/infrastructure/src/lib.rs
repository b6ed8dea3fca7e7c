pub mod api_client;
pub mod config;
pub mod danger;
pub mod executor;
pub mod history_store;
pub mod prompt_builder;
pub mod response_parser;
pub mod system_context;
