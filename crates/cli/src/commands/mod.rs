//! CLI command implementations.

pub mod cart;

/// Write command output to stdout.
#[allow(clippy::print_stdout)]
pub fn emit(output: &str) {
    if !output.is_empty() {
        println!("{output}");
    }
}
