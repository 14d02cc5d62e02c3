pub mod config;
pub mod data;
pub mod inbox;
pub mod record;
pub mod session;
pub mod status;
pub mod track;
pub mod view;

pub use config::*;
pub use data::*;
pub use inbox::*;
pub use record::Record;
pub use session::*;
pub use status::*;
pub use track::*;
pub use view::*;
