mod config;
mod error;
mod mapper;
mod output;
mod serialize;
mod snap;
mod state;

pub use config::*;
pub use error::*;
pub use mapper::*;
pub use output::*;
pub use serialize::*;
pub use snap::*;
pub use state::*;
