//! Shared inputs for the benchmarks.

use std::fmt::Write;

/// Builds a program of `functions` functions, each with a handful of
/// declarations, assignments and comments.
pub fn big_input(functions: usize) -> String {
    let mut src = String::with_capacity(functions * 160);
    for n in 0..functions {
        _ = writeln!(
            src,
            "int f{n}(int a, float b) {{\n    // body {n}\n    int c; float d;\n    \
             c = a; d = b; /* swap */ c = {n};\n    return c;\n}}\n"
        );
    }
    src
}
