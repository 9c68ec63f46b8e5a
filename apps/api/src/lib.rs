pub mod config;
pub mod errors;
pub mod letter;
pub mod llm_client;
pub mod routes;
pub mod state;
