// Ledger core
pub mod stock_ledger;

// Production workflow
pub mod bom;
pub mod production;

// Source documents feeding the ledger
pub mod documents;

// Reconciliation
pub mod rebuild;

pub use bom::BomService;
pub use documents::DocumentService;
pub use production::ProductionService;
pub use rebuild::RebuildService;
pub use stock_ledger::StockLedgerService;
