//! Terminal storefront: configuration, command shell, and listing output.
//!
//! This is the presentation layer around `goodshop-catalog`. Every command is
//! turned into a `ShopAction`, applied to the session state, and the listing is
//! rendered again from that state.

pub mod config;
pub mod render;
pub mod shell;

pub use config::StorefrontConfig;
pub use shell::{Command, CommandError, Shell, parse_command};
