mod category;
mod summary;
#[cfg(test)]
mod tests;
mod transaction;

pub use category::Category;
pub use summary::Summary;
pub use transaction::{NewTransaction, Transaction};
