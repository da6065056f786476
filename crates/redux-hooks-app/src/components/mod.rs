pub mod block;
pub mod loading;

pub use block::Block;
