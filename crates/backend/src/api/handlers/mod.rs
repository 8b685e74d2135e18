pub mod d100_printer_inventory;
pub mod u101_reserve_printer;
