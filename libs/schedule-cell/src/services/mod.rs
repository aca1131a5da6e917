pub mod parser;
pub mod slots;

pub use slots::SlotStoreService;
