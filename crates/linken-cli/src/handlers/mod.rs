pub mod link;
pub mod list;

pub use link::LinkHandler;
pub use list::ListHandler;
