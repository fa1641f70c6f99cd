pub mod save_utils;
