//! Game archive access through the external u4pak tool

mod u4pak;

pub use u4pak::{ToolOutput, U4PAK_RELEASE_URL, U4pak, U4pakCommand, U4pakSource};
