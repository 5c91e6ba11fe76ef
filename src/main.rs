// SPDX-License-Identifier: MPL-2.0
use lens_intake::app::{self, paths, Flags};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
Usage: lens_intake [OPTIONS] [FILE]

Pick, drop or capture an image and upload it.

Arguments:
  [FILE]                 Image to stage on startup

Options:
  --lang <ID>            Interface language (e.g. en-US, fr)
  --endpoint <URL>       Upload endpoint, overrides the config file
  --config-dir <DIR>     Directory holding settings.toml
  --i18n-dir <DIR>       Directory with extra Fluent .ftl files
  -h, --help             Print help

Logging is controlled with RUST_LOG (default: lens_intake=info).
";

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lens_intake=info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let lang = args.opt_value_from_str("--lang")?;
    let endpoint = args.opt_value_from_str("--endpoint")?;
    let config_dir = args.opt_value_from_str("--config-dir")?;
    let i18n_dir = args.opt_value_from_str("--i18n-dir")?;
    let file_path = args
        .finish()
        .into_iter()
        .next()
        .and_then(|s| s.into_string().ok());

    Ok(Some(Flags {
        lang,
        file_path,
        endpoint,
        i18n_dir,
        config_dir,
    }))
}

fn main() -> iced::Result {
    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return Ok(());
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    init_tracing();
    paths::init_cli_overrides(flags.config_dir.clone());
    app::run(flags)
}
