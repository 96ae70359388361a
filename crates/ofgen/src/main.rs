use clap::Parser;
use nu_ansi_term::Color;
use ofgen::cli::Cli;

/// Reset SIGPIPE to default behavior so piping to `head` etc. doesn't panic.
#[cfg(unix)]
fn reset_sigpipe() {
    // SAFETY: libc::signal is a standard POSIX function. We only change the
    // disposition of SIGPIPE back to the default (terminate on broken pipe).
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}

fn main() {
    reset_sigpipe();

    let cli = Cli::parse();
    let colors = cli.color.use_colors();
    if let Err(e) = ofgen::run(cli) {
        let label = ofgen_output::paint_bold(Color::Red, "error:", colors);
        eprintln!("{label} {e:#}");
        std::process::exit(1);
    }
}
