//! Output formatting for CLI

use crate::equilibrium::PayoffMatrix;
use crate::soccer::Action;

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:24} {}", format!("{}:", key), value);
}

/// Print a 5x5 matrix with action labels on both axes
///
/// Rows are A's actions, columns B's.
pub fn print_matrix(matrix: &PayoffMatrix) {
    print!("  {:>8}", "A \\ B");
    for action in Action::ALL {
        print!(" {:>8}", action.to_string());
    }
    println!();
    for (action, row) in Action::ALL.iter().zip(matrix) {
        print!("  {:>8}", action.to_string());
        for value in row {
            print!(" {value:>8.4}");
        }
        println!();
    }
}
