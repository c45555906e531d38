use std::fs;
use std::path::{Path, PathBuf};

use argh::FromArgs;
use log::{error, info};

use bookshelf_stats::report::{basic_report, bin_report, summary_report};
use bookshelf_stats::{Design, DesignStats, ParseOptions};

#[derive(FromArgs)]
/// Bookshelf design statistics
struct Args {
    /// directory holding the design files (not needed with --aux)
    #[argh(positional)]
    dir: Option<PathBuf>,

    /// base name shared by the design files (not needed with --aux)
    #[argh(positional)]
    basename: Option<String>,

    /// where to write the report
    #[argh(positional)]
    output: Option<PathBuf>,

    /// aux file naming the design files, instead of dir/basename.*
    #[argh(option, short = 'a')]
    aux: Option<PathBuf>,

    /// skip malformed numeric lines instead of failing
    #[argh(switch, short = 'l')]
    lenient: bool,

    /// print only counts and consistency diagnostics
    #[argh(switch, short = 'b')]
    basic: bool,

    /// append the bin grid settings
    #[argh(switch)]
    bins: bool,
}

fn main() {
    env_logger::builder().init();

    let arguments: Args = argh::from_env();
    let opts = if arguments.lenient {
        ParseOptions::lenient()
    } else {
        ParseOptions::default()
    };

    let read = match (&arguments.aux, &arguments.dir, &arguments.basename) {
        (Some(aux), _, _) => Design::read_aux(aux, &opts),
        (None, Some(dir), Some(basename)) => Design::read(dir, basename, &opts),
        _ => {
            eprintln!("Specify a design directory and base name, or an aux file with --aux");
            std::process::exit(1);
        }
    };
    let design = match read {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Parsing failed: {}", e);
            std::process::exit(2);
        }
    };

    let stats = DesignStats::compute(&design);
    let mut report = if arguments.basic {
        basic_report(&design)
    } else {
        summary_report(&design, &stats)
    };
    if arguments.bins {
        report.push_str(&bin_report(&stats.bins()));
    }

    print!("{}", report);
    let output = arguments.output.unwrap_or_else(|| PathBuf::from("summary.txt"));
    write_report(&output, &report);
}

/// The report has already gone to stdout, so a write failure is only
/// logged.
fn write_report(path: &Path, report: &str) {
    match fs::write(path, report) {
        Ok(()) => info!("Report written to {}", path.display()),
        Err(e) => error!("Cannot write {}: {}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::from_args(&["bookshelf_stats"], args).unwrap()
    }

    #[test]
    fn aux_alone_is_enough() {
        let a = parse(&["--aux", "bench/adaptec1.aux"]);
        assert_eq!(a.aux, Some(PathBuf::from("bench/adaptec1.aux")));
        assert_eq!(a.dir, None);
        assert_eq!(a.basename, None);
        assert_eq!(a.output, None);
    }

    #[test]
    fn positional_design_and_output() {
        let a = parse(&["bench/adaptec1", "adaptec1", "out.txt", "--lenient", "--bins"]);
        assert_eq!(a.dir, Some(PathBuf::from("bench/adaptec1")));
        assert_eq!(a.basename.as_deref(), Some("adaptec1"));
        assert_eq!(a.output, Some(PathBuf::from("out.txt")));
        assert!(a.lenient && a.bins && !a.basic);
    }
}
