pub mod counts;
pub mod formatting;
pub mod key;

pub use counts::LiveCounts;
pub use key::ServerKey;
