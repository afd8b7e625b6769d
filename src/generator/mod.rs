//! Output generators: saw cut lists and the master CSV.

mod master;
mod tiger;

pub use master::generate_master_csv;
pub use tiger::generate_tiger;
