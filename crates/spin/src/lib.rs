pub mod compile;
pub mod error;
pub mod generators;
pub mod hamiltonian;
pub mod information;
pub mod site;

pub use compile::{compile_operator, compile_operator_str, OperatorString};
pub use error::SpinError;
pub use hamiltonian::{build_hamiltonian, Hamiltonian, Term};
pub use site::{build_site_operators, site_operators_for, SiteOp, SiteOperators, Spin};
