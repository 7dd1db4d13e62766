#[macro_use]
mod util;
