use camino::Utf8PathBuf;
use codespan_derive::IntoDiagnostic;
use codespan_reporting::term;
use log::debug;
use sap_driver::{DriverError, LineRanges, Request};
use sap_engine::{AccessChange, AccessLevel};
use sap_files::Files;
use structopt::StructOpt;
use termcolor::{ColorChoice, StandardStream};

#[derive(StructOpt)]
#[structopt(
    name = "sap",
    about = "Rewrite Swift access-control annotations, scope-aware and line by line"
)]
struct Opts {
    #[structopt(subcommand)]
    mode: Mode,
}

#[derive(StructOpt)]
enum Mode {
    /// Set every targeted declaration to exactly this level
    Set {
        /// private, fileprivate, internal, public or open
        level: AccessLevel,
        #[structopt(flatten)]
        common: Common,
    },
    /// Raise each targeted declaration one step
    Increase {
        #[structopt(flatten)]
        common: Common,
    },
    /// Lower each targeted declaration one step
    Decrease {
        #[structopt(flatten)]
        common: Common,
    },
    /// Promote internal declarations to public
    MakeApi {
        #[structopt(flatten)]
        common: Common,
    },
    /// Demote explicit public/open declarations to internal
    RemoveApi {
        #[structopt(flatten)]
        common: Common,
    },
    /// Delete all access notation
    Strip {
        #[structopt(flatten)]
        common: Common,
    },
}

#[derive(StructOpt)]
struct Common {
    /// 1-based line selection, e.g. `3-10,14`; all lines when absent
    #[structopt(long)]
    lines: Option<LineRanges>,

    /// Rewrite the file in place instead of printing to stdout
    #[structopt(long)]
    write: bool,

    /// The Swift source file to rewrite
    file: Utf8PathBuf,
}

impl Mode {
    fn into_request(self) -> Request {
        let (change, common) = match self {
            Mode::Set { level, common } => (AccessChange::SingleLevel(level), common),
            Mode::Increase { common } => (AccessChange::IncreaseAccess, common),
            Mode::Decrease { common } => (AccessChange::DecreaseAccess, common),
            Mode::MakeApi { common } => (AccessChange::MakeApi, common),
            Mode::RemoveApi { common } => (AccessChange::RemoveApi, common),
            Mode::Strip { common } => (AccessChange::Strip, common),
        };

        Request {
            path: common.file,
            ranges: common.lines,
            change,
            write: common.write,
        }
    }
}

fn main() {
    env_logger::init();

    let opts = Opts::from_args();
    let req = opts.mode.into_request();
    debug!("{:?} on {}", req.change, req.path);

    let mut files = Files::new();

    match sap_driver::run(&mut files, &req) {
        Ok(outcome) => {
            if !req.write {
                print!("{}", outcome.text);
            }
        }
        Err(e) => {
            emit_error(&files, &e);
            std::process::exit(1);
        }
    }
}

fn emit_error(files: &Files, e: &DriverError) {
    let diagnostic = e.into_diagnostic();
    let mut stream = StandardStream::stderr(ColorChoice::Auto);
    let config = term::Config::default();

    if term::emit(&mut stream, &config, files, &diagnostic).is_err() {
        eprintln!("error: {:?}", e);
    }
}
