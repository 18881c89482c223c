pub mod contract_result;
pub mod search;

pub use contract_result::{ContractError, ContractResult};
