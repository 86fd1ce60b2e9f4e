//! Command handlers behind the `classroom` CLI

pub mod clone;
pub mod config;
pub mod list;
pub mod pull;
pub mod push;
pub mod token;

pub use clone::{handle_clone_command, submissions_directory};
pub use config::{handle_config_path, handle_config_set, handle_config_show};
pub use list::{handle_list_assignments, handle_list_classrooms, handle_list_repos};
pub use pull::handle_pull_command;
pub use push::handle_push_command;
pub use token::{handle_token_delete, handle_token_set, handle_token_status};
