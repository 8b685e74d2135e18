pub mod u101_reserve_printer;
