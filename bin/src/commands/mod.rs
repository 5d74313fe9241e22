//! CLI command implementations.

pub(crate) mod categories;
pub(crate) mod chart;
pub(crate) mod coin;
pub(crate) mod global;
pub(crate) mod markets;
pub(crate) mod ping;
pub(crate) mod price;
pub(crate) mod rates;
