use clap::Parser;
use modlist_core::scan::{DEFAULT_ROOT, DEFAULT_SUFFIX};
use modlist_core::{ScanOptions, scan, write_identifiers};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "modlist",
    version,
    about = "List source files as dotted module identifiers",
    long_about = "Recursively walks ROOT, picks every regular file whose name ends with SUFFIX \
                  and prints it as a module identifier: the prefix and suffix are stripped and \
                  directory separators become dots. Symbolic links are not followed. Any \
                  filesystem error aborts the run before anything is printed."
)]
pub struct Cli {
    /// Directory to scan
    #[arg(value_name = "ROOT", env = "MODLIST_ROOT", default_value = DEFAULT_ROOT)]
    pub root: PathBuf,

    /// File name suffix to match; a leading dot is added when missing
    #[arg(short, long, env = "MODLIST_SUFFIX", default_value = DEFAULT_SUFFIX)]
    pub suffix: String,

    /// Path stripped from each file before formatting. Defaults to the parent of ROOT.
    #[arg(short, long, value_name = "PATH")]
    pub prefix: Option<PathBuf>,

    /// Visit directory entries in name order for reproducible output
    #[arg(long)]
    pub sort: bool,
}

impl Cli {
    pub fn scan_options(&self) -> ScanOptions {
        let options = ScanOptions::new(&self.root)
            .with_suffix(&self.suffix)
            .sorted(self.sort);
        match &self.prefix {
            Some(prefix) => options.with_prefix(prefix),
            None => options,
        }
    }
}

/// Scan and write the identifiers to `out`, returning how many were found.
///
/// Nothing reaches `out` unless the whole scan succeeded. A reader that
/// hangs up early (`modlist | head -1`) ends output quietly.
pub fn execute<W: Write>(cli: &Cli, out: W) -> Result<usize, Box<dyn std::error::Error>> {
    let options = cli.scan_options();
    debug!(?options, "resolved options");

    let identifiers = scan(&options)?;
    match write_identifiers(&identifiers, out) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
            debug!("output closed by reader");
        }
        Err(err) => return Err(err.into()),
    }
    Ok(identifiers.len())
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    modlist_core::logging::init_logging();

    let stdout = io::stdout();
    execute(&cli, BufWriter::new(stdout.lock()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    #[test]
    fn test_explicit_arguments() {
        let cli = Cli::try_parse_from([
            "modlist", "lib/app", "--suffix", "java", "--prefix", "lib/app", "--sort",
        ])
        .unwrap();
        let options = cli.scan_options();
        assert_eq!(options.root, PathBuf::from("lib/app"));
        assert_eq!(options.prefix, PathBuf::from("lib/app"));
        assert_eq!(options.suffix, ".java");
        assert!(options.sorted);
    }

    #[test]
    fn test_prefix_defaults_to_root_parent() {
        let cli = Cli::try_parse_from(["modlist", "src/phaserHaxe", "--suffix", ".hx"]).unwrap();
        let options = cli.scan_options();
        assert_eq!(options.prefix, PathBuf::from("src"));
        assert_eq!(options.suffix, ".hx");
        assert!(!options.sorted);
    }

    #[test]
    fn test_execute_writes_identifiers() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("game");
        for file in ["scene/Title.hx", "Main.hx"] {
            let path = root.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::File::create(path).unwrap();
        }

        let root_arg = root.to_string_lossy().into_owned();
        let cli =
            Cli::try_parse_from(["modlist", root_arg.as_str(), "--suffix", "hx", "--sort"]).unwrap();
        let mut out = Vec::new();
        let count = execute(&cli, &mut out).unwrap();

        assert_eq!(count, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "game.Main\ngame.scene.Title\n");
    }

    struct FailingWriter(io::ErrorKind);

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(self.0))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn single_file_cli(temp: &Path) -> Cli {
        let root = temp.join("app");
        fs::create_dir_all(&root).unwrap();
        fs::File::create(root.join("Main.hx")).unwrap();
        Cli {
            root,
            suffix: DEFAULT_SUFFIX.to_string(),
            prefix: None,
            sort: false,
        }
    }

    #[test]
    fn test_execute_tolerates_closed_output() {
        let temp = tempfile::tempdir().unwrap();
        let cli = single_file_cli(temp.path());

        let count = execute(&cli, FailingWriter(io::ErrorKind::BrokenPipe)).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_execute_reports_other_write_errors() {
        let temp = tempfile::tempdir().unwrap();
        let cli = single_file_cli(temp.path());

        let err = execute(&cli, FailingWriter(io::ErrorKind::PermissionDenied)).unwrap_err();
        assert!(err.downcast_ref::<io::Error>().is_some());
    }

    #[test]
    fn test_execute_missing_root_writes_nothing() {
        let temp = tempfile::tempdir().unwrap();
        let cli = Cli {
            root: temp.path().join("missing"),
            suffix: DEFAULT_SUFFIX.to_string(),
            prefix: Some(Path::new("").to_path_buf()),
            sort: false,
        };

        let mut out = Vec::new();
        let err = execute(&cli, &mut out).unwrap_err();
        assert!(err.to_string().starts_with("path not found"));
        assert!(out.is_empty());
    }
}
