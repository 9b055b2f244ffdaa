mod node;
mod view;

pub use node::{Element, Node};
pub use view::ThreadPage;
