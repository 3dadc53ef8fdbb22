pub mod bom_line;
pub mod bom_recipe;
pub mod item;
pub mod production_consumption;
pub mod production_run;
pub mod purchase_receipt;
pub mod sales_shipment;
pub mod stock_adjustment;
pub mod stock_ledger_entry;
pub mod stock_transfer;
pub mod warehouse;
