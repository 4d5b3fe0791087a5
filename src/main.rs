use api_typedoc::cli;
use colored::Colorize;

fn main() {
    let command_line_interface = cli::CommandLineInterface::load();
    // eprintln!("{command_line_interface:#?}");
    if let Err(error) = command_line_interface.run() {
        eprintln!("{} {error:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
