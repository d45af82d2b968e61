//! Letterpress CLI application entry point

use clap::Parser;

fn main() {
    // Graphical miette output, but no hyperlinks: build logs end up in CI
    // output more often than in a terminal that renders them.
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(false)
                .context_lines(3)
                .build(),
        )
    }))
    .ok();

    let cli = letterpress::Cli::parse();

    if let Err(e) = letterpress::run(cli) {
        eprintln!("{:?}", miette::Report::msg(format!("{e:#}")));
        std::process::exit(1);
    }
}
