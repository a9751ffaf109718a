//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

const EXIT_CODES_HELP: &str = "\
Exit codes:
  0  success (mismatches kept with --keep also exit 0)
  1  failed to download the md5sums.md5 manifest
  2  failed to open the manifest
  3  failed while reading the manifest
  4  failed to delete the manifest after processing (--delete)
  5  files still failed MD5 verification after one re-download and were deleted

Example:
  md5mirror --url https://www.cfg2html.com/ --delete --keep";

/// Mirror a remote file set and keep it verified against its MD5 manifest.
///
/// Downloads `md5sums.md5` from the base URL, fetches every listed file that
/// is missing, verifies each file's MD5 and re-downloads mismatches once.
/// Files that still mismatch are deleted unless --keep is given.
#[derive(Parser, Debug)]
#[command(name = "md5mirror")]
#[command(author, version, about)]
#[command(disable_help_flag = true, after_help = EXIT_CODES_HELP)]
pub struct Args {
    /// Delete the md5sums.md5 manifest after processing
    #[arg(short = 'd', long = "delete")]
    pub delete: bool,

    /// Keep files that still fail MD5 verification after the re-download
    #[arg(short = 'k', long = "keep")]
    pub keep: bool,

    /// Base URL to mirror from; a trailing '/' is added when missing
    #[arg(short = 'u', long = "url", value_name = "URL")]
    pub url: Option<String>,

    /// Directory holding the manifest and mirrored files [default: .]
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Entries verified concurrently (1-16) [default: 1]
    #[arg(short = 'j', long, value_parser = clap::value_parser!(u8).range(1..=16))]
    pub jobs: Option<u8>,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Silence all logging on stderr
    #[arg(short, long)]
    pub quiet: bool,

    /// Print help
    #[arg(short = 'h', long = "help", short_alias = '?', action = ArgAction::Help)]
    #[allow(dead_code)]
    help: Option<bool>,
}
