mod declaration;
mod descriptor;
mod factory;

pub use declaration::*;
pub use descriptor::*;
pub use factory::*;
