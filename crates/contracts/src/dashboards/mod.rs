pub mod d100_printer_inventory;
