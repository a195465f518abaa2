use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;

pub fn print_overview(entries: &[&CommandEntry]) {
    output_section("Available commands");
    let width = entries
        .iter()
        .map(|entry| entry.name.len())
        .max()
        .unwrap_or(0);
    for entry in entries {
        println!("  {:<width$}  {}", entry.name, entry.description, width = width);
    }
    println!("Use `help <command>` for details.");
}

pub fn print_command(entry: &CommandEntry) {
    output_section(format!("Help: {}", entry.name));
    println!("  Description: {}", entry.description);
    println!("  Usage: {}", entry.usage);
    if !entry.aliases.is_empty() {
        println!("  Also: {}", entry.aliases.join(", "));
    }
}
