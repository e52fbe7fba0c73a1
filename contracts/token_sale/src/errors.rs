use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    // validation
    ZeroAmount = 3,
    BatchSizeInvalid = 4,
    InvalidRecipient = 5,
    InvalidMinter = 6,
    InvalidConfig = 7,
    InvalidTimeWindow = 8,
    InvalidStages = 9,
    InvalidDiscount = 10,
    // window
    OutOfWindow = 11,
    // authorization
    Unauthorized = 12,
    // state
    AlreadyFinalized = 13,
    TooEarly = 14,
    SaleCapReached = 15,
    NotRefunding = 16,
    NothingToRefund = 17,
    Overflow = 18,
}
