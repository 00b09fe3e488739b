mod common;
pub use self::common::Query;
mod twse;
pub use self::twse::TwseQuery;

mod tpex;
pub use self::tpex::TpexQuery;
