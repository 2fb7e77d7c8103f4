pub mod allele;
pub mod dates;
mod io_utils;
pub mod math;
mod readers;
mod util;

pub use allele::{parse_sequence, Allele, NUM_ALLELES};
pub use io_utils::{create_writer, open_output_file};
pub use readers::{open_input_reader, read_json};
pub use util::{format_number_with_commas, handle_error_and_exit, Result};
