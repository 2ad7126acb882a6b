pub mod catalog;
pub mod describe;
pub mod options;
pub mod unit_info;
pub mod util;
