pub(crate) mod prelude;
#[macro_use]
pub(crate) mod core;

pub(crate) mod browser;
pub(crate) mod browser_context;
pub(crate) mod browser_type;
pub(crate) mod frame;
pub(crate) mod page;
pub(crate) mod playwright;
pub(crate) mod utils;
