#![no_std]

pub mod allocation;
mod contract;
mod errors;
mod events;
mod interfaces;
pub mod schedule;
mod storage;
mod types;


pub use contract::{TokenSaleContract, TokenSaleContractClient, MAX_BATCH_SIZE};
pub use errors::Error;
pub use types::{ContributionReceipt, SaleConfig, SaleOutcome, StageThreshold};
