#![warn(clippy::pedantic)]

pub mod script;
pub mod settings;

use std::sync::Arc;

use anyhow::Result as AnyResult;

fn main() -> AnyResult<()> {
    let has_term = std::io::IsTerminal::is_terminal(&std::io::stdin());
    // Log to a terminal, if available. Else, log to "log.out" in the working directory.
    if has_term {
        env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        let _ = simple_logging::log_to_file("log.out", log::LevelFilter::Debug);
    }

    let settings = settings::Settings::load_or_default();
    if let Err(e) = settings.save_if_missing() {
        log::warn!("Failed to save settings:\n{e:?}");
    }
    let font = match settings.font() {
        Ok(font) => font.map(Arc::new),
        Err(e) => {
            log::warn!("Failed to load font {:?}, drawing without: {e}", settings.font);
            None
        }
    };

    // Args are `--no-trim` and a list of scripts to render.
    let mut trim = true;
    let paths: Vec<std::path::PathBuf> = std::env::args_os()
        .skip(1)
        .filter(|arg| {
            if arg == "--no-trim" {
                trim = false;
                false
            } else {
                true
            }
        })
        .map(Into::into)
        .collect();
    if paths.is_empty() {
        anyhow::bail!("usage: {} [--no-trim] <script.toml>...", env!("CARGO_PKG_NAME"));
    }

    let rendered = {
        use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
        let rendered = std::sync::atomic::AtomicUsize::new(0);
        paths.par_iter().for_each(|path| {
            let try_block = || -> AnyResult<std::path::PathBuf> {
                let script = script::Script::from_path(path)?;
                let pixmap = script.render(path, &settings, font.as_ref(), trim)?;
                let output = script.output_path(path);
                pixmap.save_png(&output)?;
                Ok(output)
            };

            match try_block() {
                Err(e) => {
                    log::error!("failed to render script {path:?}: {e:#}");
                }
                Ok(output) => {
                    log::info!("rendered {path:?} to {output:?}");
                    rendered.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                }
            }
        });
        rendered.into_inner()
    };
    if rendered != paths.len() {
        anyhow::bail!("{} of {} scripts failed", paths.len() - rendered, paths.len());
    }
    Ok(())
}
