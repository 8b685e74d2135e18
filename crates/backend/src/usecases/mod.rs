pub mod u100_fetch_inventory;
pub mod u101_reserve_printer;
