// Static catalogs backing the part and troubleshooting chip grids.

pub mod handlers;
pub mod parts;
pub mod troubleshooting;

pub use parts::PartName;
pub use troubleshooting::{filter_ts_actions, TsAction};
