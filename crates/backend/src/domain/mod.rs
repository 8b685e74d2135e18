pub mod a001_printer;
