pub mod ip_allow_list;

pub use ip_allow_list::*;
