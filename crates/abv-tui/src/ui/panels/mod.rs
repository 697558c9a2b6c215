pub(crate) mod log;
pub(crate) mod prompt;
pub(crate) mod stock;
