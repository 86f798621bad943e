/// Database model definitions.
pub mod models;
/// Score store backends and the persistence trait.
pub mod score_store;
/// Storage abstraction layer for database operations.
pub mod storage;
