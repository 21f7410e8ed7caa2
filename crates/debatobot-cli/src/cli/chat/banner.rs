//! Welcome banner shown before the first prompt.

use console::style;

/// Print the welcome line, the active backend and the quit instructions.
pub fn print_welcome_banner(provider: &str, model: &str, thread_history: bool) {
    let memory = if thread_history {
        "remembers the conversation"
    } else {
        "each turn stands alone"
    };

    println!();
    println!("  {}", style("Welcome to DebatoBot!").cyan().bold());
    println!();
    println!("  {}  {} / {}", style("Model:").bold(), provider, style(model).dim());
    println!("  {}  {}", style("History:").bold(), style(memory).dim());
    println!();
    println!("  {}", style("Type 'q' or 'Q' to quit.").dim());
    println!("  {}", style("---").dim());
    println!();
}
