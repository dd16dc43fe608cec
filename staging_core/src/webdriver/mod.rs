pub mod client;

pub use client::{Capabilities, Session, WebDriverClient};
